//! `AuthUser` extractor: the identity resolved by the session middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use shanyrak_core::error::AppError;
use shanyrak_service::context::RequestContext;

use crate::error::ApiError;
use crate::middleware::session::AuthIdentity;

/// Extracted authenticated user context available in handlers.
///
/// Token verification happens once, in the session middleware; this
/// extractor only reads its result.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<AuthIdentity>()
            .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

        Ok(AuthUser(RequestContext::new(identity.user_id)))
    }
}
