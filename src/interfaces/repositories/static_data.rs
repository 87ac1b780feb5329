use async_trait::async_trait;

use crate::{
    entities::{
        experience::{sort_experiences, Experience},
        listing::SortDirection,
        project::{sort_projects, Project, ProjectFilter},
    },
    errors::AppError,
    repositories::{experience::ExperienceReader, project::ProjectReader},
};

const EXPERIENCE_DATA: &str = include_str!("../../../data/experience.json");
const PROJECT_DATA: &str = include_str!("../../../data/projects.json");

/// Read-only records compiled into the binary, served when no database is
/// configured. Shared across workers behind an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct StaticDataset {
    experiences: Vec<Experience>,
    projects: Vec<Project>,
}

impl StaticDataset {
    pub fn load() -> Result<Self, AppError> {
        let experiences: Vec<Experience> = serde_json::from_str(EXPERIENCE_DATA)?;
        let projects: Vec<Project> = serde_json::from_str(PROJECT_DATA)?;

        tracing::info!(
            experiences = experiences.len(),
            projects = projects.len(),
            "Loaded static dataset"
        );

        Ok(Self::from_records(experiences, projects))
    }

    pub fn from_records(experiences: Vec<Experience>, projects: Vec<Project>) -> Self {
        StaticDataset { experiences, projects }
    }
}

#[async_trait]
impl ExperienceReader for StaticDataset {
    async fn find_all_experiences(&self, order: SortDirection) -> Result<Vec<Experience>, AppError> {
        // Sort a copy; the shared sequence stays untouched for concurrent readers
        let mut records = self.experiences.clone();
        sort_experiences(&mut records, order);
        Ok(records)
    }

    async fn find_experience_by_id(&self, id: &str) -> Result<Experience, AppError> {
        self.experiences
            .iter()
            .find(|exp| exp.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    async fn find_experiences_by_company(&self, company: &str) -> Result<Vec<Experience>, AppError> {
        let mut records: Vec<Experience> = self
            .experiences
            .iter()
            .filter(|exp| exp.company_matches(company))
            .cloned()
            .collect();
        sort_experiences(&mut records, SortDirection::Desc);
        Ok(records)
    }
}

#[async_trait]
impl ProjectReader for StaticDataset {
    async fn find_all_projects(&self, filter: &ProjectFilter, order: SortDirection) -> Result<Vec<Project>, AppError> {
        let mut records: Vec<Project> = self
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        sort_projects(&mut records, order);
        Ok(records)
    }

    async fn find_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }
}
