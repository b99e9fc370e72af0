//! Notification authentication against a merchant configuration

use crate::error::{Result, WebhookError};
use crate::notification::Notification;
use crate::token::{generate_token, PASSWORD_KEY};

/// Stateless validator bound to one merchant terminal
///
/// Holds the expected terminal key and the shared signing secret, both
/// immutable after construction. Each [`validate`](Self::validate) call is
/// independent, so one validator is safe to share across threads and
/// connections without locking; a process serving several merchants simply
/// constructs one validator per terminal.
#[derive(Clone)]
pub struct NotificationValidator {
    /// Expected merchant terminal identifier
    terminal_key: String,
    /// Shared signing secret issued alongside the terminal
    password: String,
}

impl std::fmt::Debug for NotificationValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationValidator")
            .field("terminal_key", &self.terminal_key)
            .field("password", &"<secret>")
            .finish()
    }
}

impl NotificationValidator {
    /// Create a validator for one terminal configuration
    pub fn new(terminal_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            terminal_key: terminal_key.into(),
            password: password.into(),
        }
    }

    /// The terminal key this validator authenticates against
    pub fn terminal_key(&self) -> &str {
        &self.terminal_key
    }

    /// Parse and authenticate a raw callback body
    ///
    /// Runs the full pipeline: structural decode and format disambiguation,
    /// terminal identity check, then token recomputation and comparison.
    /// The identity check runs before any token work so that misdirected
    /// callbacks are rejected early regardless of what token they carry.
    ///
    /// On success the returned [`Notification`] is safe to act on; the
    /// caller should answer the gateway with
    /// [`SUCCESS_RESPONSE`](crate::notification::SUCCESS_RESPONSE) once it
    /// has accepted the notification. No acknowledgment is sent here.
    ///
    /// # Errors
    ///
    /// Propagates [`WebhookError::MalformedPayload`] and
    /// [`WebhookError::DataFieldCorrupt`] from decoding unchanged; fails
    /// with [`WebhookError::IdentityMismatch`] on a foreign terminal key and
    /// [`WebhookError::InvalidSignature`] on a token mismatch. Rejection is
    /// terminal for the payload — the gateway redelivers unacknowledged
    /// notifications on its own schedule.
    pub fn validate(&self, body: &[u8]) -> Result<Notification> {
        let notification = Notification::from_bytes(body).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected undecodable notification");
        })?;

        if notification.terminal_key != self.terminal_key {
            tracing::warn!(
                expected = %self.terminal_key,
                received = %notification.terminal_key,
                "notification for foreign terminal"
            );
            return Err(WebhookError::identity_mismatch(
                &self.terminal_key,
                &notification.terminal_key,
            ));
        }

        let mut values = notification.token_values();
        values.insert(PASSWORD_KEY.to_string(), self.password.clone());

        let expected = generate_token(&values);
        if expected != notification.token {
            // The serialized signing map and the expected token are both
            // secret-bearing. They exist for internal audit logs and must
            // never be echoed back over the wire.
            let token_values = serde_json::to_string(&values).unwrap_or_default();
            let body = String::from_utf8_lossy(body).into_owned();
            tracing::warn!(
                expected = %expected,
                received = %notification.token,
                "notification token mismatch"
            );
            return Err(WebhookError::InvalidSignature {
                expected,
                received: notification.token,
                token_values,
                body,
            });
        }

        Ok(notification)
    }
}
