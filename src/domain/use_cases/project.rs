use crate::{
    entities::{
        listing::SortDirection,
        project::{Project, ProjectFields, ProjectFilter, ProjectPayload},
    },
    errors::AppError,
    repositories::ProjectBackend,
};

const NOT_FOUND: &str = "Project not found";

pub struct ProjectHandler {
    pub backend: ProjectBackend,
}

impl ProjectHandler {
    pub fn new(backend: ProjectBackend) -> Self {
        ProjectHandler { backend }
    }

    /// Lists projects matching every supplied predicate, ordered by year
    pub async fn list_projects(&self, filter: &ProjectFilter, order: SortDirection) -> Result<Vec<Project>, AppError> {
        self.backend.reader().find_all_projects(filter, order).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        self.backend
            .reader()
            .find_project_by_id(id)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))
    }

    pub async fn create_project(&self, payload: ProjectPayload) -> Result<Project, AppError> {
        let repo = self.backend.writer()?;
        let fields = ProjectFields::try_from(payload)?;

        let created = repo.create_project(&fields).await?;
        tracing::info!(id = %created.id, title = %created.title, "Project created");

        Ok(created)
    }

    /// Merges a partial payload over the stored project and re-validates it
    pub async fn update_project(&self, id: &str, payload: ProjectPayload) -> Result<Project, AppError> {
        let repo = self.backend.writer()?;

        let existing = repo
            .find_project_by_id(id)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))?;

        let fields = ProjectFields::try_from(existing.to_draft().merge(payload))?;

        let updated = repo
            .update_project(id, &fields)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))?;
        tracing::info!(id = %updated.id, "Project updated");

        Ok(updated)
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        self.backend
            .writer()?
            .delete_project(id)
            .await
            .map_err(|e| e.with_not_found(NOT_FOUND))?;
        tracing::info!(%id, "Project deleted");

        Ok(())
    }
}
