use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    entities::{
        experience::{Experience, ExperienceFields, ExperienceRow},
        listing::SortDirection,
    },
    errors::AppError,
    repositories::sqlx_repo::{parse_record_id, with_timeout, SqlxExperienceRepo},
};

/// Read access, offered by every backend.
#[async_trait]
pub trait ExperienceReader: Send + Sync {
    async fn find_all_experiences(&self, order: SortDirection) -> Result<Vec<Experience>, AppError>;
    async fn find_experience_by_id(&self, id: &str) -> Result<Experience, AppError>;
    async fn find_experiences_by_company(&self, company: &str) -> Result<Vec<Experience>, AppError>;
}

/// Full CRUD, offered only by persistent backends.
#[async_trait]
pub trait ExperienceRepository: ExperienceReader {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_experience(&self, fields: &ExperienceFields) -> Result<Experience, AppError>;
    async fn update_experience(&self, id: &str, fields: &ExperienceFields) -> Result<Experience, AppError>;
    async fn delete_experience(&self, id: &str) -> Result<(), AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        SqlxExperienceRepo { pool, timeout }
    }
}

#[async_trait]
impl ExperienceReader for SqlxExperienceRepo {
    async fn find_all_experiences(&self, order: SortDirection) -> Result<Vec<Experience>, AppError> {
        let sql = format!(
            "SELECT * FROM experiences ORDER BY start_date {}, created_at {}",
            order.as_sql(),
            order.as_sql()
        );

        let rows = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ExperienceRow>(&sql).fetch_all(&self.pool),
        )
        .await?;

        Ok(rows.into_iter().map(Experience::from).collect())
    }

    async fn find_experience_by_id(&self, id: &str) -> Result<Experience, AppError> {
        let Some(id) = parse_record_id(id) else {
            return Err(AppError::NotFound("Record not found".into()));
        };

        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ExperienceRow>("SELECT * FROM experiences WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(Experience::from)
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    async fn find_experiences_by_company(&self, company: &str) -> Result<Vec<Experience>, AppError> {
        // POSITION rather than ILIKE so user input never acts as a pattern
        let rows = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ExperienceRow>(
                r#"
                SELECT * FROM experiences
                WHERE POSITION(LOWER($1) IN LOWER(company)) > 0
                ORDER BY start_date DESC
                "#,
            )
            .bind(company)
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows.into_iter().map(Experience::from).collect())
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        with_timeout(self.timeout, sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn create_experience(&self, fields: &ExperienceFields) -> Result<Experience, AppError> {
        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ExperienceRow>(
                r#"
                INSERT INTO experiences (
                    id, company, position, duration, description, achievements,
                    start_date, end_date, is_current_job, location, company_logo,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&fields.company)
            .bind(&fields.position)
            .bind(&fields.duration)
            .bind(&fields.description)
            .bind(&fields.achievements)
            .bind(fields.start_date)
            .bind(fields.end_date)
            .bind(fields.is_current_job)
            .bind(&fields.location)
            .bind(&fields.company_logo)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.into())
    }

    async fn update_experience(&self, id: &str, fields: &ExperienceFields) -> Result<Experience, AppError> {
        let Some(id) = parse_record_id(id) else {
            return Err(AppError::NotFound("Record not found".into()));
        };

        // Full replacement of the merged record; concurrent writers are last-write-wins
        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ExperienceRow>(
                r#"
                UPDATE experiences SET
                    company = $1,
                    position = $2,
                    duration = $3,
                    description = $4,
                    achievements = $5,
                    start_date = $6,
                    end_date = $7,
                    is_current_job = $8,
                    location = $9,
                    company_logo = $10,
                    updated_at = NOW()
                WHERE id = $11
                RETURNING *
                "#,
            )
            .bind(&fields.company)
            .bind(&fields.position)
            .bind(&fields.duration)
            .bind(&fields.description)
            .bind(&fields.achievements)
            .bind(fields.start_date)
            .bind(fields.end_date)
            .bind(fields.is_current_job)
            .bind(&fields.location)
            .bind(&fields.company_logo)
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(Experience::from)
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    async fn delete_experience(&self, id: &str) -> Result<(), AppError> {
        let Some(id) = parse_record_id(id) else {
            return Err(AppError::NotFound("Record not found".into()));
        };

        let result = with_timeout(
            self.timeout,
            sqlx::query("DELETE FROM experiences WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }
}
