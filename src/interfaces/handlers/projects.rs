use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::project::{ProjectFilter, ProjectPayload},
    errors::AppError,
    handlers::{envelope::Envelope, experience::sort_direction},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    pub featured: Option<String>,
    pub status: Option<String>,
    pub order: Option<String>,
}

impl ProjectListQuery {
    /// Only the literal `featured=true` narrows the listing.
    pub fn to_filter(&self) -> ProjectFilter {
        ProjectFilter {
            featured_only: self.featured.as_deref() == Some("true"),
            status: self
                .status
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

#[instrument(skip(state))]
pub async fn get_all_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let filter = query.to_filter();
    let order = sort_direction(query.order.as_deref());

    let projects = state.project_handler.list_projects(&filter, order).await?;

    Ok(HttpResponse::Ok().json(Envelope::list(projects)))
}

#[instrument(skip(state))]
pub async fn get_project_by_id(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(project)))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<ProjectPayload>,
) -> Result<impl Responder, AppError> {
    let created = state.project_handler.create_project(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(Envelope::data(created)))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectPayload>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .project_handler
        .update_project(&id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(Envelope::data(updated)))
}

#[instrument(skip(state))]
pub async fn delete_project(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Project deleted successfully")))
}
