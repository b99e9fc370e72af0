//! Axum integration for receiving gateway notifications
//!
//! Wires a [`NotificationValidator`] into a webhook endpoint: the raw
//! request body goes through the full validation pipeline, accepted
//! notifications are handed to a caller-supplied hook, and the gateway gets
//! the acknowledgment body it expects. Error details never reach the
//! response — structural failures answer 400 and authentication failures
//! 403, both with empty bodies, while diagnostics go to `tracing`.

use crate::notification::{Notification, SUCCESS_RESPONSE};
use crate::validator::NotificationValidator;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::Arc;

/// Type alias for the accepted-notification hook
pub type NotificationHook = dyn Fn(Notification) + Send + Sync;

/// Type alias for the accepted-notification hook wrapped in Arc
pub type NotificationHookArc = Arc<NotificationHook>;

/// Shared state for the webhook endpoint
#[derive(Clone)]
pub struct WebhookState {
    /// Validator for the merchant terminal this endpoint serves
    validator: NotificationValidator,
    /// Invoked once per accepted notification, before acknowledging
    on_notification: NotificationHookArc,
}

impl std::fmt::Debug for WebhookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookState")
            .field("validator", &self.validator)
            .field("on_notification", &"<function>")
            .finish()
    }
}

impl WebhookState {
    /// Create webhook state from a validator and a notification hook
    pub fn new(
        validator: NotificationValidator,
        on_notification: impl Fn(Notification) + Send + Sync + 'static,
    ) -> Self {
        Self {
            validator,
            on_notification: Arc::new(on_notification),
        }
    }
}

/// Handle one gateway notification request
///
/// Answers `200` with body `"OK"` once the payload authenticates and the
/// hook has run; the gateway treats anything else as undelivered and
/// redelivers later.
pub async fn webhook_handler(State(state): State<WebhookState>, body: Bytes) -> Response {
    match state.validator.validate(&body) {
        Ok(notification) => {
            (state.on_notification)(notification);
            (StatusCode::OK, SUCCESS_RESPONSE).into_response()
        }
        Err(err) if err.is_authentication_failure() => StatusCode::FORBIDDEN.into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Create a router exposing the webhook handler at `path`
pub fn webhook_router(
    path: &str,
    validator: NotificationValidator,
    on_notification: impl Fn(Notification) + Send + Sync + 'static,
) -> Router {
    Router::new()
        .route(path, post(webhook_handler))
        .with_state(WebhookState::new(validator, on_notification))
}
