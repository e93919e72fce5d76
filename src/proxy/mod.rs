//! The erase relay handler.
//!
//! [`erase_handler`] receives an opaque JSON image, hands it to the
//! configured [`EraseBackend`](backend::EraseBackend) and answers with an
//! [`EraseResponse`](payload::EraseResponse). Any failed exchange becomes
//! the forward-failed sentinel, so callers always get a 200 with both
//! `croppedImage` and `errorCode` present.

pub mod backend;
pub mod payload;

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::server::{AppState, Stats};
use backend::EraseBackend;
use payload::{describe_error_code, EraseResponse, UploadReply};

/// Forward one image and turn the outcome into a caller-facing response.
///
/// Never fails: a [`ForwardError`](crate::error::ForwardError) is logged,
/// counted, and replaced by [`UploadReply::forward_failed`].
pub async fn relay(
    backend: &dyn EraseBackend,
    stats: &Stats,
    image: &Value,
    correlation_id: &str,
) -> EraseResponse {
    let reply = match backend.upload(image, correlation_id).await {
        Ok(reply) => {
            stats.relayed.fetch_add(1, Ordering::Relaxed);
            tracing::info!(
                correlation_id = %correlation_id,
                error_code = %reply.error_code,
                outcome = describe_error_code(&reply.error_code),
                "downstream responded"
            );
            reply
        }
        Err(e) => {
            stats.fallback.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                correlation_id = %correlation_id,
                downstream = %backend.endpoint(),
                kind = e.kind(),
                error = %e,
                "forwarding failed, returning fallback"
            );
            UploadReply::forward_failed()
        }
    };

    EraseResponse::from(reply)
}

pub async fn erase_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req_headers: HeaderMap,
    Json(image): Json<Value>,
) -> Response {
    let correlation_id = req_headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    tracing::info!(
        correlation_id = %correlation_id,
        client_ip = %addr.ip(),
        "request received"
    );

    let body = relay(&*state.backend, &state.stats, &image, &correlation_id).await;

    let mut response = Json(body).into_response();
    if let Ok(val) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert("x-correlation-id", val);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::error::ForwardError;

    struct Recording {
        reply: Option<Value>,
        seen: Mutex<Vec<(Value, String)>>,
    }

    #[async_trait]
    impl EraseBackend for Recording {
        fn endpoint(&self) -> &str {
            "test://recording"
        }

        async fn upload(
            &self,
            image: &Value,
            correlation_id: &str,
        ) -> Result<UploadReply, ForwardError> {
            self.seen
                .lock()
                .unwrap()
                .push((image.clone(), correlation_id.to_string()));
            self.reply
                .clone()
                .map(UploadReply::from_value)
                .ok_or(ForwardError::Timeout(Duration::from_millis(5)))
        }
    }

    fn recording(reply: Option<Value>) -> Recording {
        Recording {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn relays_downstream_fields() {
        let backend = recording(Some(json!({"cropped_image": "XYZ", "error_code": 0})));
        let stats = Stats::new();

        let response = relay(&backend, &stats, &json!("img"), "cid").await;

        assert_eq!(response.cropped_image, json!("XYZ"));
        assert_eq!(response.error_code, json!(0));
        assert_eq!(stats.relayed.load(Ordering::Relaxed), 1);
        assert_eq!(stats.fallback.load(Ordering::Relaxed), 0);
        assert_eq!(
            backend.seen.lock().unwrap().as_slice(),
            &[(json!("img"), "cid".to_string())]
        );
    }

    #[tokio::test]
    async fn failure_becomes_sentinel() {
        let backend = recording(None);
        let stats = Stats::new();

        let response = relay(&backend, &stats, &json!({"a": 1}), "cid").await;

        assert_eq!(response, EraseResponse::from(UploadReply::forward_failed()));
        assert_eq!(stats.fallback.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn application_errors_pass_through() {
        let backend = recording(Some(json!({"cropped_image": "", "error_code": 2})));
        let stats = Stats::new();

        let response = relay(&backend, &stats, &Value::Null, "cid").await;

        assert_eq!(response.error_code, json!(2));
        assert_eq!(stats.relayed.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn relay_is_repeatable() {
        let backend = recording(Some(json!({"cropped_image": "same", "error_code": 0})));
        let stats = Stats::new();

        let first = relay(&backend, &stats, &json!([1, 2]), "a").await;
        let second = relay(&backend, &stats, &json!([1, 2]), "b").await;

        assert_eq!(first, second);
    }
}
