//! Auth Extractor
//!
//! Custom extractor resolving the caller identity in handlers that need it

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// Extract [`CurrentUser`] in protected handlers.
///
/// Reuses the identity injected by the auth middleware when present,
/// otherwise resolves it through the configured [`AuthProvider`]
/// (relevant for routes mounted without the middleware, e.g. in tests).
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = state.auth.authenticate(auth_header).inspect_err(|e| {
            tracing::warn!(
                target: "security",
                error = %e,
                uri = %parts.uri,
                "Authentication failed"
            );
        })?;

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
