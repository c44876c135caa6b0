//! Outbound email notifications for the alert board.

use crate::config::NotifierConfig;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub message: String,
}

pub trait Notifier {
    fn send(&self, email: &AlertEmail) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default = "ack_default")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn ack_default() -> bool {
    true
}

/// Posts the email as JSON to a mail relay and expects a 2xx JSON ack.
pub struct HttpNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpNotifier {
    pub fn new(cfg: &NotifierConfig) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            url: cfg.url.clone(),
            client,
        })
    }
}

impl Notifier for HttpNotifier {
    fn send(&self, email: &AlertEmail) -> AppResult<()> {
        tracing::debug!(url = %self.url, recipients = email.recipients.len(), "sending alert email");

        let resp = self.client.post(&self.url).json(email).send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let msg = format!("{} responded {}: {}", self.url, status, body.trim());
            // the relay may be restarting
            return Err(if status.is_server_error() {
                AppError::TransientIo(msg)
            } else {
                AppError::Notifier(msg)
            });
        }

        let ack: Ack = resp
            .json()
            .map_err(|e| AppError::Notifier(format!("invalid acknowledgement: {}", e)))?;
        if !ack.success {
            return Err(AppError::Notifier(
                ack.error.unwrap_or_else(|| "relay refused the message".into()),
            ));
        }
        Ok(())
    }
}

/// Used when notifications are disabled in the config.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn send(&self, email: &AlertEmail) -> AppResult<()> {
        tracing::debug!(recipients = email.recipients.len(), "notifier disabled, email dropped");
        Ok(())
    }
}

/// Notifier selected by the config: HTTP when enabled, no-op otherwise.
pub fn from_config(cfg: &NotifierConfig) -> AppResult<Box<dyn Notifier>> {
    if cfg.enabled {
        Ok(Box::new(HttpNotifier::new(cfg)?))
    } else {
        Ok(Box::new(NoopNotifier))
    }
}
