//! Wire types for both legs of the erase relay.
//!
//! [`UploadRequest`] is what the downstream image service receives,
//! [`UploadReply`] is what it answers, and [`EraseResponse`] is the
//! camel-cased shape returned to the caller. Image and error code values
//! are opaque JSON and are never inspected beyond log labelling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code reported when the downstream exchange failed outright.
pub const FORWARD_FAILED: u8 = 90;

#[derive(Debug, Serialize)]
pub struct UploadRequest<'a> {
    pub image: &'a Value,
}

/// Fields read off the downstream body. Built only by [`UploadReply::from_value`]
/// so that non-object bodies still yield a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReply {
    pub cropped_image: Value,
    pub error_code: Value,
}

impl UploadReply {
    /// Read the reply fields off any JSON value.
    ///
    /// Missing fields, and every field of a non-object body, become `null`.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                cropped_image: map.remove("cropped_image").unwrap_or(Value::Null),
                error_code: map.remove("error_code").unwrap_or(Value::Null),
            },
            _ => Self {
                cropped_image: Value::Null,
                error_code: Value::Null,
            },
        }
    }

    #[must_use]
    pub fn forward_failed() -> Self {
        Self {
            cropped_image: Value::String(String::new()),
            error_code: Value::from(FORWARD_FAILED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EraseResponse {
    pub cropped_image: Value,
    pub error_code: Value,
}

impl From<UploadReply> for EraseResponse {
    fn from(reply: UploadReply) -> Self {
        Self {
            cropped_image: reply.cropped_image,
            error_code: reply.error_code,
        }
    }
}

/// Human-readable label for an error code, used in log lines only.
#[must_use]
pub fn describe_error_code(code: &Value) -> &'static str {
    match code.as_u64() {
        Some(0) => "ok",
        Some(1) => "image decode failed",
        Some(2) => "no object detected",
        Some(3) => "image encode failed",
        Some(c) if c == u64::from(FORWARD_FAILED) => "forward failed",
        _ => "unknown",
    }
}
