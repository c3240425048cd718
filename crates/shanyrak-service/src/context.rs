//! Request context carrying the authenticated identity.

use serde::{Deserialize, Serialize};

use shanyrak_core::types::UserId;

/// Context for the current authenticated request.
///
/// Derived once per request by the HTTP layer and passed explicitly into
/// every service method that acts on behalf of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
}

impl RequestContext {
    /// Creates a new request context for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
