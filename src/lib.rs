//! # tinkoff-webhook - Tinkoff Acquiring notification validation
//!
//! Consumes and authenticates the asynchronous callback payloads the Tinkoff
//! Acquiring gateway sends after payment state changes. The library decodes
//! either of the two historical payload shapes into one canonical
//! [`Notification`], checks the merchant terminal identity, recomputes the
//! SHA-256 request token, and returns the authenticated record or a typed
//! rejection.
//!
//! ```no_run
//! use tinkoff_webhook::NotificationValidator;
//!
//! let validator = NotificationValidator::new("TEST_TERM", "secret123");
//! let body: &[u8] = br#"{"TerminalKey":"TEST_TERM","OrderId":"ORD1","data":{}}"#;
//! match validator.validate(body) {
//!     Ok(notification) => println!("order {} is {}", notification.order_id, notification.status),
//!     Err(err) => eprintln!("rejected: {err}"),
//! }
//! ```
//!
//! Transport is out of scope: the caller owns the HTTP server, hands the raw
//! request body to the validator, and answers the gateway with
//! [`SUCCESS_RESPONSE`] once it has accepted the notification. A ready-made
//! axum endpoint is available behind the `axum` feature.

pub mod error;
pub mod notification;
pub mod token;
pub mod validator;

// Re-exports for convenience
pub use error::{Result, WebhookError};
pub use notification::{Notification, SUCCESS_RESPONSE};
pub use validator::NotificationValidator;

// Feature-gated framework support
#[cfg(feature = "axum")]
pub mod axum;

/// Current version of the tinkoff-webhook library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
