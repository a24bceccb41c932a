use anyhow::anyhow;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::instrument;

use crate::modules::students::model::{
    EnrolledActivity, Role, Student, StudentProfile, StudentSummary, UpsertStudentParams,
};
use crate::utils::errors::AppError;

pub struct StudentService;

impl StudentService {
    pub(crate) async fn find_by_email(
        tx: &mut Transaction<'_, Sqlite>,
        email: &str,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, email, name, grade, role FROM students WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(student)
    }

    /// Creates a student with the default `student` role. Used by signup
    /// when the email is unknown; commits together with the enrollment.
    pub(crate) async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        email: &str,
        name: &str,
        grade: &str,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (email, name, grade) VALUES (?, ?, ?) \
             RETURNING id, email, name, grade, role",
        )
        .bind(email)
        .bind(name)
        .bind(grade)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!(
                    "Student with email {} already exists",
                    email
                ));
            }
            AppError::database(e)
        })?;

        Ok(student)
    }

    pub(crate) async fn find_role(
        tx: &mut Transaction<'_, Sqlite>,
        email: &str,
    ) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM students WHERE email = ?")
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(role)
    }

    /// Create-or-overwrite by email. Name and grade are replaced in place;
    /// the role column is never touched here.
    #[instrument(skip(db, params), fields(email = %params.email))]
    pub async fn upsert_profile(
        db: &SqlitePool,
        params: &UpsertStudentParams,
    ) -> Result<StudentSummary, AppError> {
        let mut tx = db.begin().await?;

        let profile = sqlx::query_as::<_, StudentSummary>(
            "INSERT INTO students (email, name, grade) VALUES (?, ?, ?) \
             ON CONFLICT (email) DO UPDATE SET name = excluded.name, grade = excluded.grade \
             RETURNING email, name, grade",
        )
        .bind(&params.email)
        .bind(&params.name)
        .bind(&params.grade)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(profile)
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &SqlitePool, email: &str) -> Result<StudentProfile, AppError> {
        let mut tx = db.begin().await?;

        let student = Self::find_by_email(&mut tx, email)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        let activities = sqlx::query_as::<_, EnrolledActivity>(
            "SELECT a.name, a.description, a.schedule \
             FROM participants p \
             JOIN activities a ON a.id = p.activity_id \
             WHERE p.student_id = ? \
             ORDER BY p.id",
        )
        .bind(student.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StudentProfile {
            email: student.email,
            name: student.name,
            grade: student.grade,
            activities,
        })
    }
}
