use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::contact::ContactForm, errors::ContactError, AppState};

#[instrument(skip(state, form))]
pub async fn send_contact_email(
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, ContactError> {
    let response = state.contact_handler.send_message(form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
