use crate::{
    entities::{
        experience::{Experience, ExperienceFields, ExperiencePayload},
        listing::SortDirection,
    },
    errors::AppError,
    repositories::ExperienceBackend,
};

const NOT_FOUND: &str = "Experience not found";

pub struct ExperienceHandler {
    pub backend: ExperienceBackend,
}

impl ExperienceHandler {
    pub fn new(backend: ExperienceBackend) -> Self {
        ExperienceHandler { backend }
    }

    /// Lists every experience, ordered by start date
    pub async fn list_experiences(&self, order: SortDirection) -> Result<Vec<Experience>, AppError> {
        self.backend.reader().find_all_experiences(order).await
    }

    pub async fn get_experience(&self, id: &str) -> Result<Experience, AppError> {
        self.backend
            .reader()
            .find_experience_by_id(id)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))
    }

    /// Case-insensitive substring search on the company name
    pub async fn search_by_company(&self, company: &str) -> Result<Vec<Experience>, AppError> {
        self.backend
            .reader()
            .find_experiences_by_company(company.trim())
            .await
    }

    /// Validates the payload against defaults and stores a new record
    pub async fn create_experience(&self, payload: ExperiencePayload) -> Result<Experience, AppError> {
        let repo = self.backend.writer()?;
        let fields = ExperienceFields::try_from(payload)?;

        let created = repo.create_experience(&fields).await?;
        tracing::info!(id = %created.id, company = %created.company, "Experience created");

        Ok(created)
    }

    /// Merges a partial payload over the stored record, then re-validates the result
    pub async fn update_experience(&self, id: &str, payload: ExperiencePayload) -> Result<Experience, AppError> {
        let repo = self.backend.writer()?;

        let existing = repo
            .find_experience_by_id(id)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))?;

        let fields = ExperienceFields::try_from(existing.to_draft().merge(payload))?;

        let updated = repo
            .update_experience(id, &fields)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))?;
        tracing::info!(id = %updated.id, "Experience updated");

        Ok(updated)
    }

    pub async fn delete_experience(&self, id: &str) -> Result<(), AppError> {
        self.backend
            .writer()?
            .delete_experience(id)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))?;
        tracing::info!(%id, "Experience deleted");

        Ok(())
    }

    /// Probes the backing store; the static dataset has nothing to probe.
    pub async fn check_store(&self) -> Option<Result<(), AppError>> {
        match self.backend.writer() {
            Ok(repo) => Some(repo.check_connection().await),
            Err(_) => None,
        }
    }
}
