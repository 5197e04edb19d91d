use crate::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Single-shot JSON POST shared by every provider client.
///
/// Issues exactly one request per call. Connection and timeout failures,
/// truncated bodies, non-2xx statuses and unparseable bodies surface as
/// distinct errors; the status code is kept whenever it was received.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn invoke<Req: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        headers: HeaderMap,
        payload: &Req,
        timeout: Duration,
    ) -> Result<Value> {
        let response = self
            .client
            .post(endpoint)
            .timeout(timeout)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", endpoint, e);
                Error::Transport {
                    endpoint: endpoint.to_string(),
                    source: e,
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(
                "Failed to read response body from {} (status {}): {}",
                endpoint,
                status,
                e
            );
            Error::ResponseBody {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                source: e,
            }
        })?;

        if !status.is_success() {
            tracing::error!("API error (status {}): {}", status, body);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {}\nBody: {}", e, body);
            Error::MalformedBody {
                status: status.as_u16(),
                body,
                source: e,
            }
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}
