use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::collaborator::notifier::{BookingNotice, Notifier, ReleaseNotice};
use reqwest::Client;
use shared::config::MailerConfig;
use shared::error::{AppError, AppResult};

/// Mail delivery through an HTTP gateway that accepts a base64-encoded
/// RFC 822 message, e.g. a Gmail-API-compatible relay.
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(cfg: &MailerConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: cfg.endpoint.clone(),
            sender: cfg.sender.clone(),
        }
    }

    async fn deliver(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            self.sender, to, subject, body
        );
        let raw = general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes());

        let res = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail gateway: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "mail gateway returned {}",
                res.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn booking_confirmed(&self, notice: &BookingNotice) -> AppResult<()> {
        let dates = notice
            .dates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        let body = format!(
            "Your reservation for {} is confirmed on:\n{}",
            notice.schedule_label, dates
        );
        self.deliver(&notice.email, "Reservation confirmed", &body)
            .await
    }

    async fn booking_released(&self, notice: &ReleaseNotice) -> AppResult<()> {
        let body = format!(
            "{} reservation(s) have been cancelled. Any paid sessions will be refunded.",
            notice.released
        );
        self.deliver(&notice.email, "Reservation cancelled", &body)
            .await
    }
}
