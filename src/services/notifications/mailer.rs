//! Mail transport abstraction and the Resend implementation.
//!
//! [`EmailSender`] is the transport trait; [`ResendMailer`] talks to the
//! Resend HTTP API through the shared `HTTP_CLIENT`, and [`MemoryMailer`]
//! captures messages for tests. [`MailDispatcher`] wraps a transport with
//! the fixed branded sender address and carries the soft-disabled state used
//! when no API key is configured.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::templates::RenderedEmail;
use crate::config::MailConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

/// One outbound email, fully addressed and rendered.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Trait for mail transports.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All transports must be Send + Sync for use in async contexts.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends one email.
    ///
    /// # Returns
    /// Ok(()) once the transport has accepted the message; any transport
    /// error or non-success API status is a hard failure.
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;

    /// Returns the transport name for logging/debugging.
    fn name(&self) -> &'static str;
}

// ============================================================================
// Resend transport
// ============================================================================

/// Resend transactional-mail API transport.
///
/// Sends `POST {api_url}/emails` with bearer authentication and a JSON body
/// of `{from, to, subject, html}`. Uses the global `HTTP_CLIENT` for
/// connection pooling.
pub struct ResendMailer {
    api_key: String,
    api_url: String,
    timeout_seconds: u64,
}

impl ResendMailer {
    /// Creates a new Resend transport.
    ///
    /// # Arguments
    /// * `api_key` - Resend API key
    /// * `api_url` - API base URL (overridable for tests/staging)
    /// * `timeout_seconds` - per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout_seconds: u64,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            timeout_seconds,
        }
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let url = format!("{}/emails", self.api_url.trim_end_matches('/'));

        let response = HTTP_CLIENT
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .json(&json!({
                "from": message.from,
                "to": message.to,
                "subject": message.subject,
                "html": message.html,
            }))
            .send()
            .await
            .map_err(|e| AppError::MailDispatch {
                source: anyhow::Error::from(e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::MailDispatch {
                source: anyhow::anyhow!("mail API returned {}: {}", status, body),
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}

// ============================================================================
// In-memory transport (tests)
// ============================================================================

/// Collects sent messages in memory for assertion in tests.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MemoryMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Mail dispatcher: a transport plus the fixed branded sender identity.
///
/// A dispatcher without a transport is the soft-disabled state: dispatch
/// logs a warning and reports "not sent" instead of failing, so the calling
/// operation still succeeds. A configured transport that then fails is a
/// hard error. Both behaviors are part of the pipeline contract.
#[derive(Clone)]
pub struct MailDispatcher {
    sender: Option<Arc<dyn EmailSender>>,
    from: String,
}

impl MailDispatcher {
    /// Creates a dispatcher over the given transport.
    pub fn new(sender: Arc<dyn EmailSender>, from: impl Into<String>) -> Self {
        Self {
            sender: Some(sender),
            from: from.into(),
        }
    }

    /// Creates a soft-disabled dispatcher: sends are skipped with a warning.
    pub fn disabled(from: impl Into<String>) -> Self {
        Self {
            sender: None,
            from: from.into(),
        }
    }

    /// Builds a dispatcher from mail settings.
    ///
    /// An empty API key yields the disabled state rather than an error, so
    /// local environments run without outbound mail.
    pub fn from_config(config: &MailConfig) -> Self {
        if config.api_key.trim().is_empty() {
            tracing::warn!("mail API key not configured, outbound email disabled");
            return Self::disabled(&config.from);
        }
        Self::new(
            Arc::new(ResendMailer::new(
                &config.api_key,
                &config.api_url,
                config.timeout_seconds,
            )),
            &config.from,
        )
    }

    /// Whether a transport is configured.
    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Sends a rendered email to one recipient.
    ///
    /// # Returns
    /// `Ok(true)` when the transport accepted the message, `Ok(false)` when
    /// sending is disabled and the message was skipped.
    pub async fn dispatch(&self, to: &str, email: &RenderedEmail) -> AppResult<bool> {
        let Some(sender) = &self.sender else {
            tracing::warn!(
                to = %to,
                subject = %email.subject,
                "mail sending disabled, skipping dispatch"
            );
            return Ok(false);
        };

        sender
            .send(&EmailMessage {
                from: self.from.clone(),
                to: to.to_string(),
                subject: email.subject.clone(),
                html: email.html.clone(),
            })
            .await?;

        tracing::info!(
            to = %to,
            subject = %email.subject,
            transport = sender.name(),
            "email dispatched"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> RenderedEmail {
        RenderedEmail {
            subject: "Votre rendez-vous est confirmé - Salon Lumière".to_string(),
            html: "<p>Bonjour</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn memory_mailer_captures_messages() {
        let mailer = MemoryMailer::new();
        mailer
            .send(&EmailMessage {
                from: "GlowPlan <notifications@glowplan.fr>".to_string(),
                to: "marie@example.com".to_string(),
                subject: "Test".to_string(),
                html: "<p>.</p>".to_string(),
            })
            .await
            .unwrap();

        let sent = mailer.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "marie@example.com");
    }

    #[tokio::test]
    async fn dispatcher_stamps_sender_identity() {
        let mailer = Arc::new(MemoryMailer::new());
        let dispatcher =
            MailDispatcher::new(mailer.clone(), "GlowPlan <notifications@glowplan.fr>");

        let sent = dispatcher.dispatch("marie@example.com", &email()).await.unwrap();
        assert!(sent);

        let messages = mailer.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "GlowPlan <notifications@glowplan.fr>");
        assert_eq!(messages[0].subject, email().subject);
    }

    #[tokio::test]
    async fn disabled_dispatcher_skips_without_error() {
        let dispatcher = MailDispatcher::disabled("GlowPlan <notifications@glowplan.fr>");
        assert!(!dispatcher.is_enabled());

        let sent = dispatcher.dispatch("marie@example.com", &email()).await.unwrap();
        assert!(!sent);
    }

    #[test]
    fn from_config_disables_on_empty_key() {
        let config = MailConfig {
            api_key: String::new(),
            ..MailConfig::default()
        };
        assert!(!MailDispatcher::from_config(&config).is_enabled());

        let config = MailConfig {
            api_key: "re_test_key".to_string(),
            ..MailConfig::default()
        };
        assert!(MailDispatcher::from_config(&config).is_enabled());
    }
}
