//! The downstream image service as seen by the erase handler.
//!
//! [`EraseBackend`] is the seam between the handler and the network: one
//! fallible call-and-parse per request. [`HttpBackend`] implements it over
//! the pooled hyper client, bounding the whole exchange (connect, send,
//! body read) by the configured timeout.
//!
//! A non-2xx status is not a failure. Its body is parsed and relayed like
//! any other reply, with a warning logged.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, HeaderValue, Method};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use serde_json::Value;

use crate::config::model::DownstreamConfig;
use crate::error::{EraseProxyError, ForwardError};
use crate::server::HttpClient;

use super::payload::{UploadReply, UploadRequest};

// async_trait is required here because the backend is stored as Box<dyn EraseBackend>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait EraseBackend: Send + Sync {
    /// Where uploads are sent, for logs and `/health`.
    fn endpoint(&self) -> &str;

    async fn upload(&self, image: &Value, correlation_id: &str)
        -> Result<UploadReply, ForwardError>;
}

pub struct HttpBackend {
    client: HttpClient,
    uri: hyper::Uri,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(
        client: HttpClient,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, EraseProxyError> {
        let uri = url
            .parse::<hyper::Uri>()
            .map_err(|e| EraseProxyError::UriParse {
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            uri,
            endpoint: url.to_string(),
            timeout,
        })
    }

    pub fn from_config(
        client: HttpClient,
        downstream: &DownstreamConfig,
    ) -> Result<Self, EraseProxyError> {
        Self::new(client, &downstream.url, downstream.timeout())
    }

    fn build_request(
        &self,
        image: &Value,
        correlation_id: &str,
    ) -> Result<hyper::Request<Full<Bytes>>, ForwardError> {
        let payload =
            serde_json::to_vec(&UploadRequest { image }).map_err(ForwardError::Encode)?;

        let mut builder = hyper::Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(header::CONTENT_TYPE, "application/json");

        if let Ok(val) = HeaderValue::from_str(correlation_id) {
            builder = builder.header("x-correlation-id", val);
        }

        Ok(builder.body(Full::new(Bytes::from(payload)))?)
    }

    async fn exchange(
        &self,
        request: hyper::Request<Full<Bytes>>,
        correlation_id: &str,
    ) -> Result<UploadReply, ForwardError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| ForwardError::Transport {
                source: Box::new(e),
            })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ForwardError::Body {
                source: Box::new(e),
            })?
            .to_bytes();

        if !status.is_success() {
            tracing::warn!(
                correlation_id = %correlation_id,
                status = status.as_u16(),
                "downstream returned a non-success status, relaying its body"
            );
        }

        let value: Value = serde_json::from_slice(&body).map_err(ForwardError::Decode)?;
        Ok(UploadReply::from_value(value))
    }
}

#[async_trait]
impl EraseBackend for HttpBackend {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn upload(
        &self,
        image: &Value,
        correlation_id: &str,
    ) -> Result<UploadReply, ForwardError> {
        let request = self.build_request(image, correlation_id)?;
        let exchange = self.exchange(request, correlation_id);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| ForwardError::Timeout(limit))?,
            None => exchange.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_http_client;

    #[test]
    fn request_carries_json_payload_and_headers() {
        let backend =
            HttpBackend::new(build_http_client(), "http://localhost:5555/upload", None).unwrap();
        let image = serde_json::json!({"data": "AAAA"});

        let request = backend.build_request(&image, "cid-1").unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri(), "http://localhost:5555/upload");
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.headers().get("x-correlation-id").unwrap(), "cid-1");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = HttpBackend::new(build_http_client(), "http://bad host/", None);
        assert!(matches!(result, Err(EraseProxyError::UriParse { .. })));
    }

    #[test]
    fn from_config_uses_timeout() {
        let downstream = DownstreamConfig {
            url: "http://localhost:5555/upload".into(),
            timeout: 0,
        };
        let backend = HttpBackend::from_config(build_http_client(), &downstream).unwrap();
        assert!(backend.timeout.is_none());
        assert_eq!(backend.endpoint(), "http://localhost:5555/upload");
    }
}
