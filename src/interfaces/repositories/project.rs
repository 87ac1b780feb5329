use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use std::time::Duration;
use uuid::Uuid;

use crate::{
    entities::{
        listing::SortDirection,
        project::{Project, ProjectFields, ProjectFilter, ProjectRow},
    },
    errors::AppError,
    repositories::sqlx_repo::{parse_record_id, with_timeout, SqlxProjectRepo},
};

#[async_trait]
pub trait ProjectReader: Send + Sync {
    async fn find_all_projects(&self, filter: &ProjectFilter, order: SortDirection) -> Result<Vec<Project>, AppError>;
    async fn find_project_by_id(&self, id: &str) -> Result<Project, AppError>;
}

#[async_trait]
pub trait ProjectRepository: ProjectReader {
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, AppError>;
    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &str) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        SqlxProjectRepo { pool, timeout }
    }
}

fn into_projects(rows: Vec<ProjectRow>) -> Result<Vec<Project>, AppError> {
    rows.into_iter().map(Project::try_from).collect()
}

#[async_trait]
impl ProjectReader for SqlxProjectRepo {
    async fn find_all_projects(&self, filter: &ProjectFilter, order: SortDirection) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects WHERE TRUE");

        if filter.featured_only {
            builder.push(" AND featured = TRUE");
        }

        if let Some(status) = &filter.status {
            builder.push(" AND status = ").push_bind(status.clone());
        }

        builder.push(format!(
            " ORDER BY year {dir}, created_at {dir}",
            dir = order.as_sql()
        ));

        let query = builder.build_query_as::<ProjectRow>();
        let rows = with_timeout(self.timeout, query.fetch_all(&self.pool)).await?;

        into_projects(rows)
    }

    async fn find_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        let Some(id) = parse_record_id(id) else {
            return Err(AppError::NotFound("Record not found".into()));
        };

        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(row) => Project::try_from(row),
            None => Err(AppError::NotFound("Record not found".into())),
        }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, AppError> {
        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ProjectRow>(
                r#"
                INSERT INTO projects (
                    id, title, description, year, url, technologies, featured,
                    image_url, github_url, live_url, status, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.year)
            .bind(&fields.url)
            .bind(&fields.technologies)
            .bind(fields.featured)
            .bind(&fields.image_url)
            .bind(&fields.github_url)
            .bind(&fields.live_url)
            .bind(fields.status.as_str())
            .fetch_one(&self.pool),
        )
        .await?;

        Project::try_from(row)
    }

    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<Project, AppError> {
        let Some(id) = parse_record_id(id) else {
            return Err(AppError::NotFound("Record not found".into()));
        };

        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, ProjectRow>(
                r#"
                UPDATE projects SET
                    title = $1,
                    description = $2,
                    year = $3,
                    url = $4,
                    technologies = $5,
                    featured = $6,
                    image_url = $7,
                    github_url = $8,
                    live_url = $9,
                    status = $10,
                    updated_at = NOW()
                WHERE id = $11
                RETURNING *
                "#,
            )
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.year)
            .bind(&fields.url)
            .bind(&fields.technologies)
            .bind(fields.featured)
            .bind(&fields.image_url)
            .bind(&fields.github_url)
            .bind(&fields.live_url)
            .bind(fields.status.as_str())
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(row) => Project::try_from(row),
            None => Err(AppError::NotFound("Record not found".into())),
        }
    }

    async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let Some(id) = parse_record_id(id) else {
            return Err(AppError::NotFound("Record not found".into()));
        };

        let result = with_timeout(
            self.timeout,
            sqlx::query("DELETE FROM projects WHERE id = $1")
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
