use actix_web::web;

use crate::handlers::{experience, system::route_not_found};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/experience")
            .service(
                web::resource("")
                    .route(web::get().to(experience::get_all_experiences))
                    .route(web::post().to(experience::create_experience))
                    .default_service(web::to(route_not_found))
            )
            .service(
                web::resource("/company/{company}")
                    .route(web::get().to(experience::get_experiences_by_company))
                    .default_service(web::to(route_not_found))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(experience::get_experience_by_id))
                    .route(web::put().to(experience::update_experience))
                    .route(web::delete().to(experience::delete_experience))
                    .default_service(web::to(route_not_found))
            )
    );
}
