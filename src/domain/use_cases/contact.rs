use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::contact::{ContactForm, ContactResponse},
    errors::ContactError,
    mail::Mailer,
};

pub struct ContactHandler {
    pub mailer: Option<Arc<dyn Mailer>>,
    pub recipient: String,
}

impl ContactHandler {
    pub fn new(mailer: Option<Arc<dyn Mailer>>, recipient: String) -> Self {
        ContactHandler { mailer, recipient }
    }

    /// Emails a contact form submission to the site owner
    pub async fn send_message(&self, form: ContactForm) -> Result<ContactResponse, ContactError> {
        form.validate()?;

        let Some(mailer) = &self.mailer else {
            tracing::error!("Contact form submitted but no mail transport is configured");
            return Err(ContactError::NotConfigured);
        };

        let mail = form.to_mail(&self.recipient);
        let message_id = mailer.send(&mail).await?;

        tracing::info!(%message_id, "Contact email sent");

        Ok(ContactResponse {
            message: "Email sent successfully".to_string(),
            message_id,
        })
    }
}
