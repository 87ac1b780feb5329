use actix_web::web;

use crate::handlers::{chat, contact, json_error::contact_json_error_handler, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(system::health_check))
            .default_service(web::to(system::route_not_found))
    )
    .service(
        web::resource("/contact")
            .app_data(web::JsonConfig::default().limit(64 * 1024).error_handler(contact_json_error_handler))
            .route(web::post().to(contact::send_contact_email))
            .default_service(web::to(system::route_not_found))
    )
    .service(
        web::resource("/chat")
            .route(web::post().to(chat::post_chat_message))
            .default_service(web::to(system::route_not_found))
    );
}
