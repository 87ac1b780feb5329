use actix_web::web;

use crate::handlers::json_error::{json_error_handler, path_error_handler, query_error_handler};

/// Routes extractor failures into the response envelope.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(64 * 1024).error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}
