use actix_web::web;

use crate::handlers::{projects, system::route_not_found};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::get_all_projects))
                    .route(web::post().to(projects::create_project))
                    .default_service(web::to(route_not_found))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(projects::get_project_by_id))
                    .route(web::put().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
                    .default_service(web::to(route_not_found))
            )
    );
}
