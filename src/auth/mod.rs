use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{SecurityConfig, TokenPolicy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub sub: String,
    /// Token id, the handle used for revocation
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: String, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            jti: Uuid::new_v4(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User ID is required")]
    MissingUserId,
    #[error("JWT secret not configured")]
    InvalidSecret,
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token invalidated")]
    Revoked,
}

/// Resolved identity of a request's bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub token_id: Uuid,
}

/// A freshly issued bearer token
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// Token ids that are currently accepted, per user, with their expiry
/// (unix seconds). Expired ids are pruned on every registration.
#[derive(Debug, Default)]
struct TokenRegistry {
    active: RwLock<HashMap<String, HashMap<Uuid, i64>>>,
}

impl TokenRegistry {
    fn register(&self, user_id: &str, token_id: Uuid, expires_at: i64, policy: TokenPolicy) {
        let now = Utc::now().timestamp();
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());

        active.retain(|_, tokens| {
            tokens.retain(|_, exp| *exp > now);
            !tokens.is_empty()
        });

        let tokens = active.entry(user_id.to_string()).or_default();
        if policy == TokenPolicy::Single {
            tokens.clear();
        }
        tokens.insert(token_id, expires_at);
    }

    fn is_active(&self, user_id: &str, token_id: &Uuid) -> bool {
        let now = Utc::now().timestamp();
        let expires_at = {
            let active = self.active.read().unwrap_or_else(|e| e.into_inner());
            match active.get(user_id).and_then(|tokens| tokens.get(token_id)) {
                Some(exp) => *exp,
                None => return false,
            }
        };

        if expires_at > now {
            return true;
        }

        self.revoke(user_id, token_id);
        false
    }

    fn revoke(&self, user_id: &str, token_id: &Uuid) -> bool {
        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        let Some(tokens) = active.get_mut(user_id) else {
            return false;
        };
        let removed = tokens.remove(token_id).is_some();
        if tokens.is_empty() {
            active.remove(user_id);
        }
        removed
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        let active = self.active.read().unwrap_or_else(|e| e.into_inner());
        active.values().map(HashMap::len).sum()
    }
}

/// Issues and validates revocable HS256 bearer tokens.
///
/// A token is accepted only while its signature and expiry check out and its
/// `jti` is still registered.
pub struct AuthGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_hours: u64,
    policy: TokenPolicy,
    registry: TokenRegistry,
}

impl AuthGate {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        if security.jwt_secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let secret = security.jwt_secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            expiry_hours: security.jwt_expiry_hours,
            policy: security.token_policy,
            registry: TokenRegistry::default(),
        })
    }

    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    pub fn issue_credential(&self, user_id: &str) -> Result<IssuedToken, AuthError> {
        if user_id.is_empty() {
            return Err(AuthError::MissingUserId);
        }

        let claims = Claims::new(user_id.to_string(), self.expiry_hours);
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))?;

        self.registry.register(user_id, claims.jti, claims.exp, self.policy);

        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }

    pub fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if !self.registry.is_active(&claims.sub, &claims.jti) {
            return Err(AuthError::Revoked);
        }

        Ok(AuthUser {
            user_id: claims.sub,
            token_id: claims.jti,
        })
    }

    /// Invalidate an authenticated token. Returns false if it was already gone.
    pub fn revoke(&self, user: &AuthUser) -> bool {
        self.registry.revoke(&user.user_id, &user.token_id)
    }
}
