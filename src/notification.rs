//! Notification payload types and normalization
//!
//! The gateway has shipped two callback schemas over its lifetime. Format 1
//! carries merchant metadata as a `DATA` field whose value is itself a
//! serialized JSON object; format 2 carries it as a nested `data` object.
//! Merchants cannot control which shape any given transaction uses, so both
//! are accepted indefinitely and normalized into one [`Notification`].

use crate::error::{Result, WebhookError};
use crate::token::serialize_bool;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Fixed acknowledgment body to return to the gateway once a notification
/// has been accepted; anything else causes the gateway to redeliver
pub const SUCCESS_RESPONSE: &str = "OK";

/// Canonical notification record
///
/// Constructed fresh per inbound callback via [`Notification::from_bytes`]
/// and immutable once validation succeeds. The gateway omits fields freely,
/// so every wire field defaults to its zero value rather than failing the
/// decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notification {
    /// Merchant terminal identifier the gateway believes it is notifying
    #[serde(rename = "TerminalKey", default)]
    pub terminal_key: String,
    /// Merchant-assigned order identifier
    #[serde(rename = "OrderId", default)]
    pub order_id: String,
    /// Operation outcome flag
    #[serde(rename = "Success", default)]
    pub success: bool,
    /// Gateway-defined payment status code (e.g. "AUTHORIZED", "CONFIRMED")
    #[serde(rename = "Status", default)]
    pub status: String,
    /// Gateway-assigned payment identifier. Numeric on the wire for
    /// notifications, unlike Init/Cancel responses where the gateway sends
    /// it as a string
    #[serde(rename = "PaymentId", default)]
    pub payment_id: u64,
    /// Error code, empty when no error occurred
    #[serde(rename = "ErrorCode", default)]
    pub error_code: String,
    /// Current transaction amount in minor currency units (kopecks)
    #[serde(rename = "Amount", default)]
    pub amount: u64,
    /// Recurrent payment identifier; `0` means absent
    #[serde(rename = "RebillId", default)]
    pub rebill_id: u64,
    /// Bound card identifier; `0` means absent
    #[serde(rename = "CardId", default)]
    pub card_id: u64,
    /// Masked card number
    #[serde(rename = "Pan", default)]
    pub pan: String,
    /// Card expiration date
    #[serde(rename = "ExpDate", default)]
    pub expiration_date: String,
    /// Verbatim serialized form of [`data`](Self::data) when the payload
    /// arrived in format 1; empty otherwise. Preserved byte-for-byte because
    /// it participates as-is in token verification
    #[serde(skip)]
    pub raw_data: String,
    /// Merchant-supplied metadata echoed back by the gateway, resolved from
    /// exactly one of the two wire formats
    #[serde(skip)]
    pub data: HashMap<String, String>,
    /// Token supplied by the gateway for this payload
    #[serde(rename = "Token", default)]
    pub token: String,
}

/// Format 1 probe: metadata pre-encoded into a JSON string
#[derive(Deserialize)]
struct ExtraDataV1 {
    #[serde(rename = "DATA")]
    data: String,
}

/// Format 2 probe: metadata as a nested object
#[derive(Deserialize)]
struct ExtraDataV2 {
    data: HashMap<String, String>,
}

impl Notification {
    /// Decode a raw callback body into a canonical notification
    ///
    /// Format 1 is probed before format 2, and that order is a committed
    /// contract: a non-empty `DATA` string wins even when a `data` object is
    /// also present. An empty-but-present `DATA` string does not count as
    /// format 1 — the format 2 attempt still runs. A payload matching
    /// neither format is malformed.
    ///
    /// # Errors
    ///
    /// [`WebhookError::MalformedPayload`] if the bytes are not a well-formed
    /// notification object, a field carries the wrong type, or neither
    /// extra-data format is present. [`WebhookError::DataFieldCorrupt`] if
    /// format 1 matched but its embedded string is not a valid JSON string
    /// map — a hard failure, not a fallback trigger.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        let mut notification: Notification =
            serde_json::from_slice(body).map_err(WebhookError::malformed_payload)?;

        match serde_json::from_slice::<ExtraDataV1>(body) {
            Ok(v1) if !v1.data.is_empty() => {
                notification.data =
                    serde_json::from_str(&v1.data).map_err(WebhookError::data_field_corrupt)?;
                notification.raw_data = v1.data;
            }
            // DATA absent, wrong type, or present but empty: not format 1.
            _ => {
                let v2: ExtraDataV2 =
                    serde_json::from_slice(body).map_err(WebhookError::malformed_payload)?;
                notification.data = v2.data;
            }
        }

        Ok(notification)
    }

    /// Build the signing map this notification's token is computed over
    ///
    /// `CardId` and `RebillId` enter only when non-zero and `DATA` only when
    /// the payload arrived in format 1, using the verbatim raw string — a
    /// re-serialization of [`data`](Self::data) could reorder keys and
    /// change the signed bytes. The omission rule is specific to
    /// notification verification; outbound request flows sign zero values
    /// too. The shared secret is not inserted here, that is the validator's
    /// job.
    pub fn token_values(&self) -> BTreeMap<String, String> {
        let mut values = BTreeMap::from([
            ("TerminalKey".to_string(), self.terminal_key.clone()),
            ("OrderId".to_string(), self.order_id.clone()),
            ("Success".to_string(), serialize_bool(self.success).to_string()),
            ("Status".to_string(), self.status.clone()),
            ("PaymentId".to_string(), self.payment_id.to_string()),
            ("ErrorCode".to_string(), self.error_code.clone()),
            ("Amount".to_string(), self.amount.to_string()),
            ("Pan".to_string(), self.pan.clone()),
            ("ExpDate".to_string(), self.expiration_date.clone()),
        ]);

        if self.card_id != 0 {
            values.insert("CardId".to_string(), self.card_id.to_string());
        }

        if !self.raw_data.is_empty() {
            values.insert("DATA".to_string(), self.raw_data.clone());
        }

        if self.rebill_id != 0 {
            values.insert("RebillId".to_string(), self.rebill_id.to_string());
        }

        values
    }
}
