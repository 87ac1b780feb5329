use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::{experience::ExperiencePayload, listing::SortDirection},
    errors::AppError,
    handlers::envelope::Envelope,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub order: Option<String>,
}

/// Unknown values fall back to the default newest-first order.
pub(crate) fn sort_direction(raw: Option<&str>) -> SortDirection {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("asc") => SortDirection::Asc,
        _ => SortDirection::Desc,
    }
}

#[instrument(skip(state, query))]
pub async fn get_all_experiences(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, AppError> {
    let order = sort_direction(query.order.as_deref());

    let experiences = state.experience_handler.list_experiences(order).await?;

    Ok(HttpResponse::Ok().json(Envelope::list(experiences)))
}

#[instrument(skip(state))]
pub async fn get_experience_by_id(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let experience = state.experience_handler.get_experience(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(experience)))
}

#[instrument(skip(state))]
pub async fn get_experiences_by_company(
    company: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let experiences = state.experience_handler.search_by_company(&company).await?;
    Ok(HttpResponse::Ok().json(Envelope::list(experiences)))
}

#[instrument(skip(state, data))]
pub async fn create_experience(
    state: web::Data<AppState>,
    data: web::Json<ExperiencePayload>,
) -> Result<impl Responder, AppError> {
    let created = state
        .experience_handler
        .create_experience(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(Envelope::data(created)))
}

#[instrument(skip(state, data))]
pub async fn update_experience(
    id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ExperiencePayload>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .experience_handler
        .update_experience(&id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(Envelope::data(updated)))
}

#[instrument(skip(state))]
pub async fn delete_experience(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.experience_handler.delete_experience(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Experience deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parameter_is_lenient() {
        assert_eq!(sort_direction(None), SortDirection::Desc);
        assert_eq!(sort_direction(Some("ASC")), SortDirection::Asc);
        assert_eq!(sort_direction(Some("desc")), SortDirection::Desc);
        assert_eq!(sort_direction(Some("sideways")), SortDirection::Desc);
    }
}
