use actix_web::web;

use crate::handlers::system::route_not_found;

mod experience;
mod json_error;
mod misc;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);

    cfg.service(
        web::scope("/api")
            .configure(misc::config_routes)
            .configure(experience::config_routes)
            .configure(projects::config_routes)
            .default_service(web::to(route_not_found))
    );
}
