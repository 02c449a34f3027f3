//! GitHub emoji catalogue client.
//!
//! `GET https://api.github.com/emojis` returns a JSON object mapping emoji
//! names to image URLs. The bearer token comes from configuration, never from
//! source code.

use async_trait::async_trait;
use emojis_core::config::SourceConfig;
use emojis_core::emoji::{EmojiSource, RemoteEmoji};
use emojis_core::error::{EmojisError, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use std::time::Duration;

const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Clone)]
pub struct GithubEmojiSource {
    client: Client,
    endpoint: String,
    token: String,
}

impl GithubEmojiSource {
    pub fn new(config: &SourceConfig, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmojisError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Converts the name → URL object into entries, keeping document order.
/// Entries whose value is not a string are skipped.
fn decode_catalogue(body: Map<String, Value>) -> Vec<RemoteEmoji> {
    body.into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(image_url) => Some(RemoteEmoji { name, image_url }),
            other => {
                tracing::warn!(emoji = %name, "Skipping entry with non-string URL: {}", other);
                None
            }
        })
        .collect()
}

#[async_trait]
impl EmojiSource for GithubEmojiSource {
    async fn fetch_all(&self) -> Result<Vec<RemoteEmoji>> {
        tracing::info!(endpoint = %self.endpoint, "Fetching emoji catalogue");

        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| {
                EmojisError::transport(format!("Request to {} failed: {}", self.endpoint, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmojisError::transport(format!(
                "{} responded with {}",
                self.endpoint, status
            )));
        }

        let body: Map<String, Value> = response.json().await.map_err(|e| {
            EmojisError::transport(format!(
                "Unexpected response body from {}: {}",
                self.endpoint, e
            ))
        })?;

        let emojis = decode_catalogue(body);
        tracing::debug!(count = emojis.len(), "Decoded emoji catalogue");
        Ok(emojis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one HTTP response and hands back the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}/emojis", addr), handle)
    }

    fn source(endpoint: String) -> GithubEmojiSource {
        let config = SourceConfig {
            endpoint,
            user_agent: "emojis-test".to_string(),
            timeout_secs: 5,
        };
        GithubEmojiSource::new(&config, "secret-token").unwrap()
    }

    #[test]
    fn test_decode_keeps_document_order_and_skips_non_strings() {
        let body: Map<String, Value> =
            serde_json::from_str(r#"{"zebra": "z.png", "ant": "a.png", "bad": 3, "moon": "m.png"}"#)
                .unwrap();
        let names: Vec<_> = decode_catalogue(body).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["zebra", "ant", "moon"]);
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let (endpoint, server) =
            serve_once("HTTP/1.1 200 OK", r#"{"+1": "https://x/plus1.png", "-1": "https://x/minus1.png"}"#)
                .await;

        let emojis = source(endpoint).fetch_all().await.unwrap();
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(emojis.len(), 2);
        assert_eq!(emojis[0], RemoteEmoji::new("+1", "https://x/plus1.png"));
        assert!(request.starts_with("get /emojis"));
        assert!(request.contains("authorization: bearer secret-token"));
        assert!(request.contains("user-agent: emojis-test"));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let (endpoint, server) = serve_once("HTTP/1.1 401 Unauthorized", r#"{"message": "Bad credentials"}"#).await;

        let err = source(endpoint).fetch_all().await.unwrap_err();
        server.await.unwrap();

        assert!(err.is_transport());
        assert!(err.to_string().contains("401"));
        assert!(!err.to_string().contains("secret-token"));
    }

    #[tokio::test]
    async fn test_non_object_body_is_transport_error() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"["not", "an", "object"]"#).await;

        let err = source(endpoint).fetch_all().await.unwrap_err();
        server.await.unwrap();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(format!("http://{}/emojis", addr)).fetch_all().await.unwrap_err();
        assert!(err.is_transport());
    }
}
