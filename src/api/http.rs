//! HTTP utilities for CaseLink REST API calls

use crate::error::{Error, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP client wrapper for CaseLink API calls
#[derive(Clone, Debug)]
pub struct CaseLinkHttp {
    client: Client,
}

impl CaseLinkHttp {
    /// Create a new HTTP client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("caselink/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// GET a single resource
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.send(Method::GET, url, self.client.get(url)).await
    }

    /// POST a JSON body, usually to a collection URL
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, url, self.client.post(url).json(body))
            .await
    }

    /// PUT a full representation to a resource URL
    pub async fn put(&self, url: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, url, self.client.put(url).json(body))
            .await
    }

    /// DELETE a resource
    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.send(Method::DELETE, url, self.client.delete(url)).await
    }

    async fn send(&self, method: Method, url: &str, request: RequestBuilder) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                "API error: {} {} -> {} - {}",
                method,
                url,
                status,
                sanitize_for_log(&body)
            );
            return Err(Error::Http {
                method: method_name(&method),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        // Handle empty response (204, DELETE)
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        _ => "REQUEST",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(logged.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("not\nfound\r"), "notfound");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let logged = sanitize_for_log(&body);
        assert!(logged.contains("300 bytes total"));
    }
}
