use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

/// Thin HTTP client over the Favorites API envelope format
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(server: &str, token: Option<String>) -> Result<Self> {
        let base = Url::parse(server).with_context(|| format!("invalid server URL '{}'", server))?;
        if base.cannot_be_a_base() {
            bail!("server URL '{}' cannot be used as a base", server);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
            token,
        })
    }

    /// Build an endpoint URL, percent-encoding each path segment
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("server URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Value> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        self.send(Method::GET, url, None).await
    }

    pub async fn post(&self, segments: &[&str], body: Option<&Value>) -> Result<Value> {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, url, body).await
    }

    pub async fn put(&self, segments: &[&str], body: &Value) -> Result<Value> {
        let url = self.endpoint(segments)?;
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint(segments)?;
        self.send(Method::DELETE, url, None).await
    }

    /// Send a request and unwrap the `data` member of a success envelope
    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            bail!("{}", error_message(status, &payload));
        }

        Ok(payload.get("data").cloned().unwrap_or(payload))
    }
}

fn error_message(status: StatusCode, payload: &Value) -> String {
    match payload.get("message").and_then(Value::as_str) {
        Some(message) => format!("{} ({})", message, status),
        None => format!("server responded with {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_encodes_segments() {
        let client = ApiClient::new("http://localhost:3000/", None).unwrap();
        let url = client.endpoint(&["favorites", "user 1", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/favorites/user%201/a%2Fb");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = ApiClient::new("https://example.com/api", None).unwrap();
        let url = client.endpoint(&["login"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/login");
    }

    #[test]
    fn rejects_invalid_server_url() {
        assert!(ApiClient::new("not a url", None).is_err());
        assert!(ApiClient::new("mailto:someone@example.com", None).is_err());
    }

    #[test]
    fn error_message_prefers_server_message() {
        let payload = json!({"error": true, "message": "Asset not found", "code": "NOT_FOUND"});
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, &payload),
            "Asset not found (404 Not Found)"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, &Value::Null),
            "server responded with 502 Bad Gateway"
        );
    }
}
