use std::collections::{BTreeMap, HashMap};

use anyhow::anyhow;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::instrument;

use crate::modules::activities::model::{
    Activity, ActivityDetail, ActivityStats, DashboardResponse, SignupOutcome, SignupParams,
};
use crate::modules::students::model::StudentSummary;
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

#[derive(FromRow)]
struct WaitlistHead {
    id: i64,
    student_id: i64,
}

#[derive(FromRow)]
struct ParticipantRow {
    activity_id: i64,
    email: String,
    name: String,
    grade: String,
}

/// Owns every state transition over participants and waitlist entries.
/// Each operation runs as one transaction: the capacity check and the
/// insert it guards commit together or not at all.
pub struct EnrollmentService;

impl EnrollmentService {
    pub(crate) async fn find_activity(
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            "SELECT id, name, description, schedule, capacity FROM activities WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(activity)
    }

    async fn participant_count(
        tx: &mut Transaction<'_, Sqlite>,
        activity_id: i64,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM participants WHERE activity_id = ?",
        )
        .bind(activity_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    #[instrument(skip(db, params), fields(email = %params.email))]
    pub async fn signup(
        db: &SqlitePool,
        activity_name: &str,
        params: &SignupParams,
    ) -> Result<SignupOutcome, AppError> {
        let mut tx = db.begin().await?;

        let activity = Self::find_activity(&mut tx, activity_name)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Activity not found")))?;

        let student = match StudentService::find_by_email(&mut tx, &params.email).await? {
            Some(student) => student,
            None => {
                let (Some(name), Some(grade)) = (params.name.as_deref(), params.grade.as_deref())
                else {
                    return Err(AppError::invalid_input(anyhow!(
                        "Student profile required (name, grade)"
                    )));
                };
                StudentService::insert(&mut tx, &params.email, name, grade).await?
            }
        };

        let already_enrolled = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM participants WHERE activity_id = ? AND student_id = ?",
        )
        .bind(activity.id)
        .bind(student.id)
        .fetch_one(&mut *tx)
        .await?;
        if already_enrolled > 0 {
            return Err(AppError::conflict(anyhow!("Student is already signed up")));
        }

        let already_waitlisted = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM waitlist WHERE activity_id = ? AND student_id = ?",
        )
        .bind(activity.id)
        .bind(student.id)
        .fetch_one(&mut *tx)
        .await?;
        if already_waitlisted > 0 {
            return Err(AppError::conflict(anyhow!(
                "Student is already on the waitlist"
            )));
        }

        if Self::participant_count(&mut tx, activity.id).await? >= activity.capacity {
            // FIFO tail: positions are a per-activity monotonic sequence,
            // assigned inside the same transaction as the capacity check.
            let next_position = sqlx::query_scalar::<_, i64>(
                "SELECT COALESCE(MAX(position), 0) + 1 FROM waitlist WHERE activity_id = ?",
            )
            .bind(activity.id)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO waitlist (student_id, activity_id, position) VALUES (?, ?, ?)",
            )
            .bind(student.id)
            .bind(activity.id)
            .bind(next_position)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow!("Student is already on the waitlist"));
                }
                AppError::database(e)
            })?;

            tx.commit().await?;
            return Ok(SignupOutcome::Waitlisted);
        }

        sqlx::query("INSERT INTO participants (student_id, activity_id) VALUES (?, ?)")
            .bind(student.id)
            .bind(activity.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow!("Student is already signed up"));
                }
                AppError::database(e)
            })?;

        tx.commit().await?;
        Ok(SignupOutcome::Enrolled)
    }

    #[instrument(skip(db))]
    pub async fn unregister(
        db: &SqlitePool,
        activity_name: &str,
        email: &str,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let activity = Self::find_activity(&mut tx, activity_name)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Activity not found")))?;

        let student = StudentService::find_by_email(&mut tx, email)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        let deleted = sqlx::query(
            "DELETE FROM participants WHERE activity_id = ? AND student_id = ?",
        )
        .bind(activity.id)
        .bind(student.id)
        .execute(&mut *tx)
        .await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::invalid_input(anyhow!(
                "Student is not signed up for this activity"
            )));
        }

        // Promote the earliest waitlist entry into the freed slot, inside
        // the same transaction as the delete.
        let head = sqlx::query_as::<_, WaitlistHead>(
            "SELECT id, student_id FROM waitlist WHERE activity_id = ? \
             ORDER BY position ASC LIMIT 1",
        )
        .bind(activity.id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(head) = head {
            sqlx::query("INSERT INTO participants (student_id, activity_id) VALUES (?, ?)")
                .bind(head.student_id)
                .bind(activity.id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("DELETE FROM waitlist WHERE id = ?")
                .bind(head.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn list_activities(
        db: &SqlitePool,
    ) -> Result<BTreeMap<String, ActivityDetail>, AppError> {
        let mut tx = db.begin().await?;

        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, name, description, schedule, capacity FROM activities ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT p.activity_id, s.email, s.name, s.grade \
             FROM participants p \
             JOIN students s ON s.id = p.student_id \
             ORDER BY p.id",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut rosters: HashMap<i64, Vec<StudentSummary>> = HashMap::new();
        for row in rows {
            rosters.entry(row.activity_id).or_default().push(StudentSummary {
                email: row.email,
                name: row.name,
                grade: row.grade,
            });
        }

        let mut result = BTreeMap::new();
        for activity in activities {
            let participants = rosters.remove(&activity.id).unwrap_or_default();
            result.insert(
                activity.name,
                ActivityDetail {
                    description: activity.description,
                    schedule: activity.schedule,
                    max_participants: activity.capacity,
                    participants,
                },
            );
        }

        Ok(result)
    }

    #[instrument(skip(db))]
    pub async fn dashboard(db: &SqlitePool) -> Result<DashboardResponse, AppError> {
        let mut tx = db.begin().await?;

        let activity_stats = sqlx::query_as::<_, ActivityStats>(
            "SELECT a.name, COUNT(p.id) AS participants, \
                    a.capacity - COUNT(p.id) AS spots_left \
             FROM activities a \
             LEFT JOIN participants p ON p.activity_id = a.id \
             GROUP BY a.id \
             ORDER BY a.id",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let total_participants = activity_stats.iter().map(|s| s.participants).sum();

        Ok(DashboardResponse {
            total_activities: activity_stats.len() as i64,
            total_participants,
            activity_stats,
        })
    }
}
