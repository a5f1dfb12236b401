//! Inbound configuration messages

use crate::config::WebAppConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// One configuration push from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// Log correlation id, generated on receipt
    #[serde(skip, default = "Uuid::new_v4")]
    pub request_id: Uuid,
    #[serde(default)]
    pub web_app_config: WebAppConfig,
    /// Dashboard filters, forwarded as-is
    #[serde(default)]
    pub filters: Value,
}

impl InboundMessage {
    pub fn new(web_app_config: WebAppConfig, filters: Value) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            web_app_config,
            filters,
        }
    }
}

/// Parse a raw channel message.
///
/// Payloads that are not a JSON object are ignored.
pub fn parse_message(raw: &str) -> Option<InboundMessage> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "ignoring non-JSON message");
            return None;
        }
    };
    if !value.is_object() {
        debug!("ignoring message that is not a JSON object");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(message) => Some(message),
        Err(e) => {
            debug!(error = %e, "ignoring malformed message");
            None
        }
    }
}
