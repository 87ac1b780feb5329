use std::sync::Arc;

use crate::{
    chat::ChatService,
    entities::chat::{ChatMessage, ChatReply},
    errors::ChatError,
};

pub struct ChatHandler {
    pub service: Option<Arc<dyn ChatService>>,
}

impl ChatHandler {
    pub fn new(service: Option<Arc<dyn ChatService>>) -> Self {
        ChatHandler { service }
    }

    /// Relays a widget message to the chat backend
    pub async fn relay(&self, message: ChatMessage) -> Result<ChatReply, ChatError> {
        if message.text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let service = self.service.as_ref().ok_or(ChatError::NotConfigured)?;

        service.reply(&message).await
    }
}
