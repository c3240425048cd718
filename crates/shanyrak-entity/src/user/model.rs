//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shanyrak_core::types::UserId;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name (an email address).
    pub username: String,
    /// Unique phone number.
    pub phone: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// City of residence.
    pub city: String,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name (email).
    pub username: String,
    /// Phone number.
    pub phone: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    /// New login name.
    pub username: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New city.
    pub city: Option<String>,
}

impl UserChanges {
    /// Returns `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.phone.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.city.is_none()
    }

    /// Apply the changes to an in-memory user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(city) = &self.city {
            user.city = city.clone();
        }
    }
}
