use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::handlers::envelope::Envelope;

pub const GENERIC_FAILURE: &str = "Something went wrong!";

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    ReadOnly(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Validation failed: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::ReadOnly(msg) => write!(f, "{}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::InternalError(detail) => {
                tracing::error!("Unexpected failure: {}", detail);
                GENERIC_FAILURE.to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(Envelope::<()>::failure(message))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReadOnly(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .errors()
            .iter()
            .flat_map(|(field, kind)| flatten_kind(&camel_case(field), kind))
            .collect();

        // HashMap iteration order is unstable; keep messages deterministic
        field_errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

        AppError::ValidationError(field_errors)
    }
}

/// Field names as clients send them: `end_date` becomes `endDate`.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn flatten_kind(field: &str, kind: &ValidationErrorsKind) -> Vec<FieldError> {
    match kind {
        ValidationErrorsKind::Field(errors) => errors
            .iter()
            .map(|e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
            .collect(),
        ValidationErrorsKind::Struct(inner) => inner
            .errors()
            .iter()
            .flat_map(|(nested, kind)| flatten_kind(&format!("{field}.{}", camel_case(nested)), kind))
            .collect(),
        ValidationErrorsKind::List(items) => items
            .iter()
            .flat_map(|(index, inner)| {
                inner
                    .errors()
                    .iter()
                    .flat_map(|(nested, kind)| flatten_kind(&format!("{field}[{index}].{}", camel_case(nested)), kind))
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}

impl AppError {
    /// Replaces a bare repository `NotFound` with an entity-specific message.
    pub fn with_not_found(self, message: &str) -> Self {
        match self {
            AppError::NotFound(_) => AppError::NotFound(message.to_string()),
            other => other,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::InternalError(format!("Migration error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("Malformed static dataset: {}", err))
    }
}

/// Failures of the contact form endpoint. Its wire contract is a bare
/// `{ "error": ... }` object rather than the record envelope.
#[derive(Debug, Display)]
pub enum ContactError {
    #[display("Missing required fields")]
    MissingFields,

    #[display("Email configuration not found. Please contact the administrator.")]
    NotConfigured,

    #[display("Failed to send email")]
    Transport(MailError),
}

impl ResponseError for ContactError {
    fn error_response(&self) -> HttpResponse {
        if let ContactError::Transport(cause) = self {
            tracing::error!("Mail transport failure: {}", cause);
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"error": self.to_string()}))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::MissingFields => StatusCode::BAD_REQUEST,
            ContactError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ContactError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ContactError {
    fn from(_: ValidationErrors) -> Self {
        ContactError::MissingFields
    }
}

impl From<MailError> for ContactError {
    fn from(err: MailError) -> Self {
        ContactError::Transport(err)
    }
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Mail relay unreachable: {_0}")]
    Connection(String),

    #[display("Mail relay rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[display("Unexpected mail relay response: {_0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MailError::InvalidResponse(err.to_string())
        } else {
            MailError::Connection(err.to_string())
        }
    }
}

#[derive(Debug, Display)]
pub enum ChatError {
    #[display("Message text cannot be empty")]
    EmptyMessage,

    #[display("Chat service is not configured")]
    NotConfigured,

    #[display("Chat service is unavailable")]
    Upstream(String),
}

impl ResponseError for ChatError {
    fn error_response(&self) -> HttpResponse {
        if let ChatError::Upstream(cause) = self {
            tracing::warn!("Chat backend failure: {}", cause);
        }
        HttpResponse::build(self.status_code())
            .json(Envelope::<()>::failure(self.to_string()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
            ChatError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ChatError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Upstream(err.to_string())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
