#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use favorites_api::app;
use favorites_api::config::{AppConfig, TokenPolicy};
use favorites_api::state::AppState;

/// In-process application with its own empty store and token registry
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::development())
    }

    pub fn with_token_policy(policy: TokenPolicy) -> Result<Self> {
        let mut config = AppConfig::development();
        config.security.token_policy = policy;
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        let state = AppState::new(&config.security).context("failed to build app state")?;
        let router = app::app(state.clone(), &config);
        Ok(Self { state, router })
    }

    /// Send a request and decode the JSON response body (Null when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Ok((status, json))
    }

    /// Obtain a token through POST /login
    pub async fn login(&self, user_id: &str) -> Result<String> {
        let (status, body) = self
            .send(Method::POST, "/login", None, Some(json!({ "user_id": user_id })))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed with {}: {}", status, body);

        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from login response")
    }

    pub async fn add(&self, token: &str, user_id: &str, asset: Value) -> Result<(StatusCode, Value)> {
        self.send(
            Method::POST,
            "/favorites",
            Some(token),
            Some(json!({ "user_id": user_id, "asset": asset })),
        )
        .await
    }

    pub async fn list(&self, token: &str, user_id: &str) -> Result<Vec<Value>> {
        let (status, body) = self
            .send(Method::GET, &format!("/favorites/{}", user_id), Some(token), None)
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "list failed with {}: {}", status, body);

        Ok(body["data"]["favorites"].as_array().cloned().unwrap_or_default())
    }
}

pub fn chart_payload(id: &str) -> Value {
    json!({
        "id": id,
        "type": "chart",
        "description": "Stock trends",
        "title": "Tech",
        "axes_titles": ["Time", "Price"],
        "data": [3500, 3600]
    })
}

pub fn audience_payload(id: &str) -> Value {
    json!({
        "id": id,
        "type": "audience",
        "description": "Young shoppers",
        "gender": "female",
        "birth_country": "Greece",
        "age_group": "24-35",
        "hours_online": 4,
        "purchases": 12
    })
}

pub fn insight_payload(id: &str) -> Value {
    json!({
        "id": id,
        "type": "insight",
        "description": "40% of millennials spend more than 3 hours on social media daily"
    })
}
