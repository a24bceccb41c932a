use anyhow::anyhow;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::modules::activities::service::EnrollmentService;
use crate::modules::students::model::StudentSummary;
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

pub struct WaitlistService;

impl WaitlistService {
    #[instrument(skip(db))]
    pub async fn list_for_activity(
        db: &SqlitePool,
        activity_name: &str,
    ) -> Result<Vec<StudentSummary>, AppError> {
        let mut tx = db.begin().await?;

        let activity = EnrollmentService::find_activity(&mut tx, activity_name)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Activity not found")))?;

        let entries = sqlx::query_as::<_, StudentSummary>(
            "SELECT s.email, s.name, s.grade \
             FROM waitlist w \
             JOIN students s ON s.id = w.student_id \
             WHERE w.activity_id = ? \
             ORDER BY w.position ASC",
        )
        .bind(activity.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(entries)
    }

    /// Staff-only removal. Promotion happens only when a participant
    /// unregisters, never here.
    #[instrument(skip(db))]
    pub async fn remove_from_waitlist(
        db: &SqlitePool,
        activity_name: &str,
        email: &str,
        requester_email: &str,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        // Role gate first; an unknown requester is Forbidden, not NotFound.
        let role = StudentService::find_role(&mut tx, requester_email).await?;
        if !role.is_some_and(|r| r.can_manage_waitlist()) {
            return Err(AppError::forbidden(anyhow!("Permission denied")));
        }

        let activity = EnrollmentService::find_activity(&mut tx, activity_name).await?;
        let student = StudentService::find_by_email(&mut tx, email).await?;
        let (Some(activity), Some(student)) = (activity, student) else {
            return Err(AppError::not_found(anyhow!("Activity or student not found")));
        };

        let deleted = sqlx::query(
            "DELETE FROM waitlist WHERE activity_id = ? AND student_id = ?",
        )
        .bind(activity.id)
        .bind(student.id)
        .execute(&mut *tx)
        .await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::invalid_input(anyhow!(
                "Student is not on the waitlist"
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}
