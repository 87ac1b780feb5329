use std::{future::Future, time::Duration};

use sqlx::PgPool;

use crate::errors::AppError;

#[derive(Clone)]
pub struct SqlxExperienceRepo {
    pub pool: PgPool,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
    pub timeout: Duration,
}

/// Bounds a database call; an elapsed deadline surfaces as an internal error.
pub(crate) async fn with_timeout<T, F>(limit: Duration, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::InternalError(format!(
            "Database operation timed out after {}",
            humantime::format_duration(limit)
        ))),
    }
}

/// Ids are UUIDs in Postgres; anything else cannot name a stored record.
pub(crate) fn parse_record_id(id: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(id).ok()
}
