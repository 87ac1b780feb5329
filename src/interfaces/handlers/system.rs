use actix_web::{HttpResponse, Responder, web};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheckResponse {
    status: &'static str,
    message: &'static str,
    data_source: String,
    database: &'static str,
    version: &'static str,
    uptime: String,
}

/// Liveness probe. Always 200; the database field reports store reachability.
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime = chrono::Utc::now()
        .signed_duration_since(*START_TIME)
        .num_seconds()
        .max(0) as u64;

    let database = match state.experience_handler.check_store().await {
        None => "Not configured",
        Some(Ok(())) => "OK",
        Some(Err(e)) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "Unavailable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "OK",
        message: "Portfolio Backend API is running",
        data_source: state.data_source.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
    })
}

pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" }))
}
