use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Builds the CORS policy for the configured origins. A `*` entry opens the
/// API to any origin without credentials; otherwise only the listed origins
/// are allowed and may send credentials.
pub fn build_cors(origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return base.allow_any_origin().send_wildcard();
    }

    origins
        .iter()
        .fold(base, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}
