use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::chat::ChatMessage, errors::ChatError, handlers::envelope::Envelope, AppState};

#[instrument(skip(state, message))]
pub async fn post_chat_message(
    state: web::Data<AppState>,
    message: web::Json<ChatMessage>,
) -> Result<impl Responder, ChatError> {
    let reply = state.chat_handler.relay(message.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(reply)))
}
