use actix_web::{
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
    HttpRequest, HttpResponse,
};

use super::envelope::Envelope;

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(Envelope::<()>::failure(message))
}

fn json_message(err: &JsonPayloadError) -> String {
    tracing::debug!("Rejected JSON body: {}", err);
    match err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => format!("Invalid JSON payload: {}", other),
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = json_message(&err);
    InternalError::from_response(err, bad_request(message)).into()
}

/// The contact form answers with a bare `{error}` body, without the envelope.
pub fn contact_json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = json_message(&err);
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query string: {}", err);
    InternalError::from_response(err, bad_request(message)).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid path parameter: {}", err);
    InternalError::from_response(err, bad_request(message)).into()
}
