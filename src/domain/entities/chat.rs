use serde::{Deserialize, Serialize};

/// Message posted by the chat widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body forwarded to the chat backend, which speaks snake_case.
#[derive(Debug, Serialize)]
pub struct ChatBackendRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ChatBackendResponse {
    pub reply: String,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

impl From<ChatBackendResponse> for ChatReply {
    fn from(res: ChatBackendResponse) -> Self {
        ChatReply {
            reply: res.reply,
            session_id: res.session_id,
        }
    }
}

impl<'a> From<&'a ChatMessage> for ChatBackendRequest<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        ChatBackendRequest {
            text: msg.text.trim(),
            session_id: msg.session_id.as_deref(),
            user_id: msg.user_id.as_deref(),
        }
    }
}
