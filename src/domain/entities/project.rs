use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    entities::{
        experience::{new_validation_error, non_blank, trimmed},
        listing::SortDirection,
        option_fields::{OptionField, PatchString, PatchVec},
    },
    errors::AppError,
};

// ───── Constants ──────────────────────────────────────────────────────
pub const MIN_PROJECT_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "completed",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Planned => "planned",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ProjectStatus::Completed),
            "in-progress" => Ok(ProjectStatus::InProgress),
            "planned" => Ok(ProjectStatus::Planned),
            other => Err(format!("Unknown project status: {}", other)),
        }
    }
}

// ───── Records ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub url: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub url: String,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub url: String,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub status: ProjectStatus,
}

/// Listing predicates; both are applied when both are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub featured_only: bool,
    pub status: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        (!self.featured_only || project.featured)
            && self.status.as_deref().is_none_or(|s| project.status.as_str() == s)
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[serde(default)]
    pub title: PatchString,
    #[serde(default)]
    pub description: PatchString,
    #[serde(default)]
    pub year: OptionField<i32>,
    #[serde(default)]
    pub url: PatchString,
    #[serde(default)]
    pub technologies: PatchVec<String>,
    #[serde(default)]
    pub featured: OptionField<bool>,
    #[serde(default)]
    pub image_url: PatchString,
    #[serde(default)]
    pub github_url: PatchString,
    #[serde(default)]
    pub live_url: PatchString,
    #[serde(default)]
    pub status: OptionField<ProjectStatus>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ProjectDraft {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title cannot be empty")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description cannot be empty")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Year is required"),
        custom(function = "validate_project_year")
    )]
    pub year: Option<i32>,

    #[validate(
        required(message = "URL is required"),
        length(min = 1, message = "URL cannot be empty")
    )]
    pub url: Option<String>,

    pub technologies: Vec<String>,
    pub featured: bool,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    pub fn merge(self, payload: ProjectPayload) -> Self {
        ProjectDraft {
            title: payload.title.map_value(trimmed).apply_to(self.title),
            description: payload.description.map_value(trimmed).apply_to(self.description),
            year: payload.year.apply_to(self.year),
            url: payload.url.map_value(trimmed).apply_to(self.url),
            technologies: payload
                .technologies
                .map_value(|techs| techs.into_iter().map(trimmed).collect())
                .apply_to(Some(self.technologies))
                .unwrap_or_default(),
            featured: payload.featured.apply_to(Some(self.featured)).unwrap_or(false),
            image_url: non_blank(payload.image_url.map_value(trimmed).apply_to(self.image_url)),
            github_url: non_blank(payload.github_url.map_value(trimmed).apply_to(self.github_url)),
            live_url: non_blank(payload.live_url.map_value(trimmed).apply_to(self.live_url)),
            status: payload.status.apply_to(Some(self.status)).unwrap_or_default(),
        }
    }
}

impl TryFrom<ProjectDraft> for ProjectFields {
    type Error = ValidationErrors;

    fn try_from(draft: ProjectDraft) -> Result<Self, Self::Error> {
        draft.validate()?;

        let year = draft.year.ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add("year", new_validation_error("year_required", "Year is required"));
            errors
        })?;

        Ok(ProjectFields {
            title: draft.title.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            year,
            url: draft.url.unwrap_or_default(),
            technologies: draft.technologies,
            featured: draft.featured,
            image_url: draft.image_url,
            github_url: draft.github_url,
            live_url: draft.live_url,
            status: draft.status,
        })
    }
}

impl TryFrom<ProjectPayload> for ProjectFields {
    type Error = ValidationErrors;

    fn try_from(payload: ProjectPayload) -> Result<Self, Self::Error> {
        ProjectFields::try_from(ProjectDraft::default().merge(payload))
    }
}

/// Latest accepted project year: next calendar year, evaluated at call time.
pub fn max_project_year() -> i32 {
    Utc::now().year() + 1
}

pub fn validate_project_year(year: i32) -> Result<(), ValidationError> {
    if (MIN_PROJECT_YEAR..=max_project_year()).contains(&year) {
        Ok(())
    } else {
        Err(new_validation_error("year_out_of_range", "Year must be between 2000 and next year"))
    }
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ProjectStatus>()
            .map_err(AppError::InternalError)?;

        Ok(Project {
            id: row.id.to_string(),
            title: row.title,
            description: row.description,
            year: row.year,
            url: row.url,
            technologies: row.technologies,
            featured: row.featured,
            image_url: row.image_url,
            github_url: row.github_url,
            live_url: row.live_url,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Project {
    pub fn from_fields(
        id: String,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Project {
            id,
            title: fields.title,
            description: fields.description,
            year: fields.year,
            url: fields.url,
            technologies: fields.technologies,
            featured: fields.featured,
            image_url: fields.image_url,
            github_url: fields.github_url,
            live_url: fields.live_url,
            status: fields.status,
            created_at,
            updated_at,
        }
    }

    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            year: Some(self.year),
            url: Some(self.url.clone()),
            technologies: self.technologies.clone(),
            featured: self.featured,
            image_url: self.image_url.clone(),
            github_url: self.github_url.clone(),
            live_url: self.live_url.clone(),
            status: self.status,
        }
    }
}

/// Orders by year, then by creation time, both in the requested direction.
pub fn sort_projects(records: &mut [Project], order: SortDirection) {
    records.sort_by(|a, b| {
        order.apply(
            a.year
                .cmp(&b.year)
                .then_with(|| a.created_at.cmp(&b.created_at)),
        )
    });
}
