use base64::Engine;
use serde::Deserialize;

use crate::core::config::SessionConfig;
use crate::features::auth::model::{Principal, RoleId};
use crate::features::auth::permissions::{evaluate, RolePermission};

/// Session context injected into every console entry point.
///
/// Holds the bearer credential for remote calls and the principal it resolves
/// to. Permissions are evaluated once when the session is built.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    token: String,
    permission: RolePermission,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Failed to decode token: {0}")]
    Decode(String),

    #[error("Token is missing claim: {0}")]
    MissingClaim(&'static str),
}

/// Numeric claims sometimes arrive as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumericClaim {
    Number(i64),
    Text(String),
}

impl NumericClaim {
    fn as_i64(&self) -> Option<i64> {
        match self {
            NumericClaim::Number(n) => Some(*n),
            NumericClaim::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    #[serde(alias = "sub", alias = "id", alias = "userId")]
    user_id: Option<NumericClaim>,
    #[serde(alias = "roleId", alias = "role")]
    role_id: Option<NumericClaim>,
    #[serde(default)]
    email: Option<String>,
}

impl Session {
    pub fn new(principal: Principal, token: impl Into<String>) -> Self {
        let permission = evaluate(principal.role);
        Self {
            principal,
            token: token.into(),
            permission,
        }
    }

    /// Resolve the principal from the stored token's payload claims.
    ///
    /// The signature is not verified; the backend checks it on every call.
    pub fn from_token(token: &str) -> Result<Self, SessionError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(SessionError::InvalidFormat);
        }

        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| SessionError::Decode(e.to_string()))?;

        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|e| SessionError::Decode(e.to_string()))?;

        let user_id = claims
            .user_id
            .as_ref()
            .and_then(NumericClaim::as_i64)
            .ok_or(SessionError::MissingClaim("user_id"))?;
        let role_id = claims
            .role_id
            .as_ref()
            .and_then(NumericClaim::as_i64)
            .ok_or(SessionError::MissingClaim("role_id"))?;

        Ok(Self::new(
            Principal::new(user_id, role_id, claims.email),
            token,
        ))
    }

    /// Build a session from configuration, decoding only what is not set explicitly.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        match (config.user_id, config.role_id) {
            (Some(user_id), Some(role_id)) => Ok(Self::new(
                Principal::new(user_id, role_id, config.email.clone()),
                config.token.clone(),
            )),
            _ => {
                let mut session = Self::from_token(&config.token)?;
                if let Some(user_id) = config.user_id {
                    session.principal.id = user_id;
                }
                if let Some(role_id) = config.role_id {
                    session.principal.role = RoleId::from(role_id);
                    session.permission = evaluate(session.principal.role);
                }
                if config.email.is_some() {
                    session.principal.email = config.email.clone();
                }
                Ok(session)
            }
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> i64 {
        self.principal.id
    }

    pub fn role(&self) -> RoleId {
        self.principal.role
    }

    pub fn permission(&self) -> &RolePermission {
        &self.permission
    }
}
