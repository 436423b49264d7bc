use std::time::Duration;

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use super::forward_method::ForwardMethod;
use crate::error::{Result, ServiceError};

/// Body sent with every forwarded POST.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPayload {
    pub random_int: i64,
}

impl ForwardPayload {
    pub const FIXED: ForwardPayload = ForwardPayload { random_int: 1 };
}

/// Outbound client used by the accept route.
///
/// Only success or failure is reported back; response bodies are drained so
/// connections can be reused, then discarded. No timeout is applied unless
/// one is configured.
pub struct ForwardClient {
    client: Client,
}

impl ForwardClient {
    pub fn new(timeout: Option<Duration>) -> Result<ForwardClient> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(ServiceError::HttpClient)?;
        Ok(ForwardClient { client })
    }

    /// Forwards to `endpoint` and returns `true` when the request completed
    /// and its body was read, whatever the status code.
    pub async fn forward(&self, endpoint: &str, method: ForwardMethod) -> bool {
        let result = match method {
            ForwardMethod::Get => self.send(method, endpoint, self.client.get(endpoint)).await,
            ForwardMethod::Post => match serde_json::to_vec(&ForwardPayload::FIXED) {
                Ok(payload) => {
                    let request = self
                        .client
                        .post(endpoint)
                        .header(CONTENT_TYPE, "application/json")
                        .body(payload);
                    self.send(method, endpoint, request).await
                }
                Err(e) => Err(ServiceError::Payload(e)),
            },
            ForwardMethod::Unsupported => {
                debug!(endpoint, "no supported forward method given, skipping forward");
                return false;
            }
        };

        match result {
            Ok(body) => {
                debug!(endpoint, %method, body_len = body.len(), "forward completed");
                true
            }
            Err(e) => {
                warn!(error = %e, "forward failed");
                false
            }
        }
    }

    async fn send(
        &self,
        method: ForwardMethod,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<Bytes> {
        let wrap = |source: reqwest::Error| ServiceError::Forward {
            method: method.name(),
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(wrap)?;
        let body: Bytes = response.bytes().await.map_err(wrap)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardPayload;

    #[test]
    fn payload_uses_camel_case_field() {
        let encoded = serde_json::to_string(&ForwardPayload::FIXED).unwrap();
        assert_eq!(encoded, r#"{"randomInt":1}"#);
    }
}
