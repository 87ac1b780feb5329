use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    entities::chat::{ChatBackendRequest, ChatBackendResponse, ChatMessage, ChatReply},
    errors::ChatError,
};

/// The conversational backend behind the chat widget.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn reply(&self, message: &ChatMessage) -> Result<ChatReply, ChatError>;
}

#[derive(Clone)]
pub struct HttpChatClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpChatClient {
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        HttpChatClient {
            client,
            endpoint: format!("{}/chat", base_url.trim_end_matches('/')),
            timeout,
        }
    }
}

#[async_trait]
impl ChatService for HttpChatClient {
    async fn reply(&self, message: &ChatMessage) -> Result<ChatReply, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&ChatBackendRequest::from(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream(format!("{}: {}", status, body)));
        }

        let reply: ChatBackendResponse = response.json().await?;
        Ok(reply.into())
    }
}
