use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,

    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,

    #[serde(default)]
    pub mob_no: Option<String>,

    #[validate(required, length(min = 1))]
    pub email_id: Option<String>,

    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

/// A message ready to hand to the mail transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub message: String,
    pub message_id: String,
}

impl ContactForm {
    /// Renders the notification mail. Every user-supplied value is escaped.
    /// Callers validate the form first; absent fields render as empty.
    pub fn to_mail(&self, recipient: &str) -> OutgoingMail {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        let email = self.email_id.as_deref().unwrap_or_default();
        let message = self.message.as_deref().unwrap_or_default();

        let phone = self
            .mob_no
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| format!("<p><strong>Phone:</strong> {}</p>", ammonia::clean_text(p)))
            .unwrap_or_default();

        let html = format!(
            concat!(
                "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
                "<h2>New Contact Form Submission</h2>",
                "<h3>Contact Information:</h3>",
                "<p><strong>Name:</strong> {first} {last}</p>",
                "<p><strong>Email:</strong> {email}</p>",
                "{phone}",
                "<h3>Message:</h3>",
                "<p style=\"line-height: 1.6; white-space: pre-wrap;\">{message}</p>",
                "<p>This message was sent from your portfolio contact form</p>",
                "</div>"
            ),
            first = ammonia::clean_text(first),
            last = ammonia::clean_text(last),
            email = ammonia::clean_text(email),
            phone = phone,
            message = ammonia::clean_text(message),
        );

        OutgoingMail {
            to: recipient.to_string(),
            reply_to: email.to_string(),
            subject: format!("Portfolio Contact Form - Message from {} {}", first, last),
            html,
        }
    }
}
