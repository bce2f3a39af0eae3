//! Deep links for the messaging center.

use crate::error::AppError;
use crate::models::Platform;

const EMAIL_SUBJECT: &str = "Message from J.A.R.V.I.S";

/// Builds the URL that opens `platform` with `message` pre-filled for `recipient`.
pub fn message_link(platform: Platform, recipient: &str, message: &str) -> Result<String, AppError> {
    let recipient = recipient.trim();
    if recipient.is_empty() || message.trim().is_empty() {
        return Err(AppError::Validation(
            "Recipient and message are required".to_string(),
        ));
    }

    let text = urlencoding::encode(message);
    let url = match platform {
        Platform::WhatsApp => {
            let number: String = recipient.chars().filter(|c| c.is_ascii_digit()).collect();
            format!("https://wa.me/{}?text={}", number, text)
        }
        Platform::Telegram => {
            let username = recipient.strip_prefix('@').unwrap_or(recipient);
            format!("https://t.me/{}?text={}", username, text)
        }
        Platform::Email => format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(EMAIL_SUBJECT),
            text
        ),
    };
    Ok(url)
}
