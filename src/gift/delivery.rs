//! Wish delivery: one remote attempt, then the mail-compose fallback.
//!
//! The remote path is a single POST to the configured endpoint — no
//! retries. Any failure (endpoint unset or still the sentinel, transport
//! error, non-success status) falls back to composing a `mailto:` URL and
//! handing it to the platform's default mail handler, fire-and-forget. The
//! user never sees a hard failure.

use crate::config::GiftConfig;
use crate::error::DeliveryError;
use reqwest::Client;
use std::time::Duration;

/// Exactly one of these comes out of every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint accepted the wish.
    Delivered,
    /// The mail-compose handoff was invoked instead.
    FallbackUsed,
}

/// Hands a composed `mailto:` URL to the platform. Injectable so tests can
/// capture the handoff instead of opening a mail client.
pub trait MailLauncher: Send + Sync {
    fn launch(&self, mailto_url: &str) -> anyhow::Result<()>;
}

/// Spawns the platform opener and does not wait for it.
pub struct PlatformMailLauncher;

impl MailLauncher for PlatformMailLauncher {
    fn launch(&self, mailto_url: &str) -> anyhow::Result<()> {
        let mut command = platform_opener();
        command.arg(mailto_url);
        command.spawn().map(drop).map_err(Into::into)
    }
}

#[cfg(target_os = "macos")]
fn platform_opener() -> tokio::process::Command {
    tokio::process::Command::new("open")
}

#[cfg(target_os = "windows")]
fn platform_opener() -> tokio::process::Command {
    let mut command = tokio::process::Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener() -> tokio::process::Command {
    tokio::process::Command::new("xdg-open")
}

/// Percent-encode a `mailto:` component the way mail clients expect
/// (spaces as `%20`, not `+`).
fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build the full `mailto:` URL with encoded subject and body.
pub fn compose_mailto(recipient: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_component(subject),
        encode_component(body)
    )
}

fn build_delivery_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Performs the single delivery attempt for a submitted wish.
pub struct GiftCourier {
    client: Client,
    endpoint: Option<String>,
    recipient: String,
    subject: String,
    launcher: Box<dyn MailLauncher>,
}

impl GiftCourier {
    pub fn new(config: &GiftConfig) -> Self {
        Self::with_launcher(config, Box::new(PlatformMailLauncher))
    }

    pub fn with_launcher(config: &GiftConfig, launcher: Box<dyn MailLauncher>) -> Self {
        Self {
            client: build_delivery_client(),
            endpoint: config.configured_endpoint().map(str::to_string),
            recipient: config.recipient.clone(),
            subject: config.subject.clone(),
            launcher,
        }
    }

    /// Deliver the wish: one remote attempt, fallback on any failure.
    /// Resolves into exactly one outcome; no partial state escapes.
    pub async fn deliver(&self, wish: &str) -> DeliveryOutcome {
        match self.try_remote(wish).await {
            Ok(()) => {
                tracing::info!("wish delivered to remote endpoint");
                DeliveryOutcome::Delivered
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote delivery unavailable, composing mail fallback");
                let mailto = compose_mailto(&self.recipient, &self.subject, wish);
                if let Err(launch_err) = self.launcher.launch(&mailto) {
                    // Still a fallback outcome: the user gets the
                    // "finish via your mail app" message either way.
                    tracing::warn!(error = %launch_err, "mail handoff could not be spawned");
                }
                DeliveryOutcome::FallbackUsed
            }
        }
    }

    async fn try_remote(&self, wish: &str) -> Result<(), DeliveryError> {
        let endpoint = self.endpoint.as_deref().ok_or(DeliveryError::Unconfigured)?;

        let response = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({
                "subject": self.subject,
                "wish": wish,
            }))
            .send()
            .await
            .map_err(|e| DeliveryError::RemoteSubmitFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DeliveryError::RemoteStatus {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
