use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{entities::contact::OutgoingMail, errors::MailError, settings::MailSettings};

const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Hands a rendered message to a mail transport and returns its message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError>;
}

/// Transactional mail relay reached over HTTPS with a bearer API key.
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    settings: MailSettings,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct RelayResponse {
    id: String,
}

impl HttpMailer {
    pub fn new(client: Client, settings: MailSettings) -> Self {
        HttpMailer { client, settings }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, MailError> {
        let body = RelayRequest {
            from: &self.settings.sender,
            to: [&mail.to],
            reply_to: &mail.reply_to,
            subject: &mail.subject,
            html: &mail.html,
        };

        let response = self
            .client
            .post(&self.settings.relay_url)
            .bearer_auth(&self.settings.api_key)
            .timeout(RELAY_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let accepted: RelayResponse = response.json().await?;
        tracing::debug!(message_id = %accepted.id, "Mail relay accepted message");

        Ok(accepted.id)
    }
}
