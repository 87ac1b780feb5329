use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{chat, db, mail, web};

use chat::{ChatService, HttpChatClient};
use errors::AppError;
use mail::{HttpMailer, Mailer};
use repositories::{
    sqlx_repo::{SqlxExperienceRepo, SqlxProjectRepo},
    static_data::StaticDataset,
    ExperienceBackend, ProjectBackend,
};
use settings::{AppConfig, DataSource};
use use_cases::{
    chat::ChatHandler, contact::ContactHandler, experience::ExperienceHandler,
    project::ProjectHandler,
};

pub struct AppState {
    pub experience_handler: ExperienceHandler,
    pub project_handler: ProjectHandler,
    pub contact_handler: ContactHandler,
    pub chat_handler: ChatHandler,
    pub data_source: DataSource,
}

impl AppState {
    /// Wires every handler. With a pool both entity kinds are served from
    /// Postgres; without one the embedded dataset is served read-only.
    pub fn new(config: &AppConfig, pool: Option<sqlx::PgPool>) -> Result<Self, AppError> {
        let (experiences, projects, data_source) = match pool {
            Some(pool) => {
                let timeout = config.database_timeout();
                (
                    ExperienceBackend::persistent(Arc::new(SqlxExperienceRepo::new(pool.clone(), timeout))),
                    ProjectBackend::persistent(Arc::new(SqlxProjectRepo::new(pool, timeout))),
                    DataSource::Postgres,
                )
            }
            None => {
                let dataset = Arc::new(StaticDataset::load()?);
                (
                    ExperienceBackend::from_static(dataset.clone()),
                    ProjectBackend::from_static(dataset),
                    DataSource::Static,
                )
            }
        };

        let http = reqwest::Client::new();

        let mail_settings = config.mail_settings();
        let recipient = mail_settings
            .as_ref()
            .map(|m| m.recipient.clone())
            .unwrap_or_default();
        let mailer = mail_settings
            .map(|m| Arc::new(HttpMailer::new(http.clone(), m)) as Arc<dyn Mailer>);
        if mailer.is_none() {
            tracing::warn!("Mail relay not configured; contact form submissions will be rejected");
        }

        let chat = config.chat_service_url.as_deref().map(|url| {
            Arc::new(HttpChatClient::new(http.clone(), url, config.chat_timeout())) as Arc<dyn ChatService>
        });

        Ok(AppState {
            experience_handler: ExperienceHandler::new(experiences),
            project_handler: ProjectHandler::new(projects),
            contact_handler: ContactHandler::new(mailer, recipient),
            chat_handler: ChatHandler::new(chat),
            data_source,
        })
    }
}
