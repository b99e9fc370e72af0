//! Error types for notification processing

use thiserror::Error;

/// Result type alias for notification operations
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Main error type for notification parsing and authentication
///
/// Every variant is a terminal, non-retryable outcome for the payload that
/// produced it. Rejection is all-or-nothing: no partially-validated
/// notification is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// Payload bytes are not a well-formed notification object, or a field
    /// carries the wrong type, or neither extra-data format is present
    #[error("malformed notification payload: {source}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
    },

    /// The `DATA` field matched structurally but its embedded serialized
    /// mapping is not itself valid
    #[error("can't unserialize DATA field: {source}")]
    DataFieldCorrupt {
        #[source]
        source: serde_json::Error,
    },

    /// Terminal key does not match the configured merchant identity
    #[error("invalid terminal key: expected {expected}, got {received}")]
    IdentityMismatch { expected: String, received: String },

    /// Recomputed token does not match the token supplied by the gateway
    ///
    /// Carries full diagnostic context for audit logging. The expected token
    /// is derived from the shared secret and the serialized signing map
    /// contains the secret itself, so this error must only ever reach
    /// internal logs — never the HTTP response to the notification sender.
    #[error(
        "invalid token: expected {expected} got {received}.\nValues for token: {token_values}.\nNotification: {body}"
    )]
    InvalidSignature {
        expected: String,
        received: String,
        token_values: String,
        body: String,
    },
}

impl WebhookError {
    /// Create a malformed payload error
    pub fn malformed_payload(source: serde_json::Error) -> Self {
        Self::MalformedPayload { source }
    }

    /// Create a corrupt DATA field error
    pub fn data_field_corrupt(source: serde_json::Error) -> Self {
        Self::DataFieldCorrupt { source }
    }

    /// Create an identity mismatch error
    pub fn identity_mismatch(expected: impl Into<String>, received: impl Into<String>) -> Self {
        Self::IdentityMismatch {
            expected: expected.into(),
            received: received.into(),
        }
    }

    /// Whether this rejection is a security failure (misdirected or forged
    /// payload) rather than a structural one
    ///
    /// Security failures map naturally to HTTP 403, structural ones to 400.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::IdentityMismatch { .. } | Self::InvalidSignature { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_authentication_failure_classification() {
        assert!(!WebhookError::malformed_payload(json_error()).is_authentication_failure());
        assert!(!WebhookError::data_field_corrupt(json_error()).is_authentication_failure());
        assert!(
            WebhookError::identity_mismatch("TEST_TERM", "OTHER_TERM")
                .is_authentication_failure()
        );
        assert!(WebhookError::InvalidSignature {
            expected: "aa".to_string(),
            received: "bb".to_string(),
            token_values: "{}".to_string(),
            body: "{}".to_string(),
        }
        .is_authentication_failure());
    }

    #[test]
    fn test_identity_mismatch_display() {
        let err = WebhookError::identity_mismatch("TEST_TERM", "OTHER_TERM");
        assert_eq!(
            err.to_string(),
            "invalid terminal key: expected TEST_TERM, got OTHER_TERM"
        );
    }

    #[test]
    fn test_invalid_signature_display_carries_diagnostics() {
        let err = WebhookError::InvalidSignature {
            expected: "deadbeef".to_string(),
            received: "beefdead".to_string(),
            token_values: r#"{"Amount":"100"}"#.to_string(),
            body: r#"{"Amount":100}"#.to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("expected deadbeef got beefdead"));
        assert!(rendered.contains(r#"{"Amount":"100"}"#));
    }
}
