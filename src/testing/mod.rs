use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::favorites::{Asset, Audience, Chart, Insight};
use crate::state::AppState;

pub fn sample_chart(id: &str) -> Asset {
    Chart {
        id: id.to_string(),
        description: "Stock trends".to_string(),
        title: "Tech".to_string(),
        axes_titles: vec!["Time".to_string(), "Price".to_string()],
        data: vec![3500, 3600],
    }
    .into()
}

pub fn sample_insight(id: &str) -> Asset {
    Insight {
        id: id.to_string(),
        description: "40% of millennials spend more than 3 hours on social media daily".to_string(),
    }
    .into()
}

pub fn sample_audience(id: &str) -> Asset {
    Audience {
        id: id.to_string(),
        description: "Young shoppers".to_string(),
        gender: "female".to_string(),
        birth_country: "Greece".to_string(),
        age_group: "24-35".to_string(),
        hours_online: 4,
        purchases: 12,
    }
    .into()
}

/// Fresh state plus router for handler-level tests
pub struct TestContext {
    pub state: AppState,
    router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AppConfig::development();
        let state = AppState::new(&config.security).expect("development config has a JWT secret");
        let router = crate::app::router(state.clone());
        Self { state, router }
    }

    /// Issue a bearer token straight from the auth gate
    pub fn token_for(&self, user_id: &str) -> String {
        self.state
            .auth
            .issue_credential(user_id)
            .expect("token issuance")
            .token
    }

    /// Send one request through the router and decode the JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoriteAsset;
    use serde_json::json;

    #[test]
    fn fixtures_cover_every_kind() {
        let kinds: Vec<_> = [sample_chart("1"), sample_insight("2"), sample_audience("3")]
            .iter()
            .map(|a| a.kind())
            .collect();
        assert_eq!(kinds, crate::favorites::AssetKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_context_routes_requests() {
        let ctx = TestContext::new();
        let token = ctx.token_for("123");

        let (status, body) = ctx.send(Method::GET, "/favorites/123", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"favorites": []}}));
    }
}
