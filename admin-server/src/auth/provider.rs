//! Auth provider selection
//!
//! Which identity source the server uses is an explicit startup
//! decision, driven by `AUTH_MODE`:
//!
//! - `jwt` (default) — validate `Authorization: Bearer` tokens
//! - `fixture` — inject a fixed admin identity, for local development
//!   and integration tests only
//!
//! The fixture mode must be asked for by name; it is never inferred from
//! a missing environment variable, and it refuses to start in production.

use std::str::FromStr;
use std::sync::Arc;

use super::jwt::{CurrentUser, JwtError, JwtService};
use crate::utils::AppError;

/// Identity source selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Jwt,
    Fixture,
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "fixture" => Ok(Self::Fixture),
            other => Err(format!(
                "Unknown auth mode '{other}' (expected 'jwt' or 'fixture')"
            )),
        }
    }
}

/// Resolves the caller identity for protected routes
#[derive(Clone, Debug)]
pub enum AuthProvider {
    /// Validate JWT bearer tokens
    Jwt(Arc<JwtService>),
    /// Fixed identity for development and tests
    Fixture(CurrentUser),
}

impl AuthProvider {
    /// Build the provider for a given mode.
    ///
    /// `fixture` is rejected outright in production environments.
    pub fn from_mode(mode: AuthMode, jwt: JwtService, production: bool) -> Result<Self, AppError> {
        match mode {
            AuthMode::Jwt => Ok(Self::Jwt(Arc::new(jwt))),
            AuthMode::Fixture if production => Err(AppError::internal(
                "AUTH_MODE=fixture is not allowed in production",
            )),
            AuthMode::Fixture => {
                tracing::warn!("Auth fixture mode active: all requests run as the fixture admin");
                Ok(Self::Fixture(Self::fixture_admin()))
            }
        }
    }

    /// The identity injected in fixture mode
    pub fn fixture_admin() -> CurrentUser {
        CurrentUser {
            id: "fixture-admin".to_string(),
            username: "fixture-admin".to_string(),
            role: "admin".to_string(),
        }
    }

    /// Resolve the caller from the `Authorization` header.
    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<CurrentUser, AppError> {
        match self {
            Self::Fixture(user) => Ok(user.clone()),
            Self::Jwt(service) => {
                let header = auth_header.ok_or_else(AppError::unauthorized)?;
                let token = JwtService::extract_from_header(header)
                    .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;
                match service.validate_token(token) {
                    Ok(claims) => Ok(CurrentUser::from(claims)),
                    Err(JwtError::ExpiredToken) => Err(AppError::token_expired()),
                    Err(e) => Err(AppError::invalid_token(e.to_string())),
                }
            }
        }
    }
}
