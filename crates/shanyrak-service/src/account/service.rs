//! Account lifecycle: signup, login, token refresh and profile updates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use shanyrak_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use shanyrak_auth::password::{PasswordHasher, PasswordValidator};
use shanyrak_core::error::AppError;
use shanyrak_core::result::AppResult;
use shanyrak_database::store::UserStore;
use shanyrak_entity::user::{NewUser, User, UserChanges};

use crate::context::RequestContext;

/// Handles user accounts and their credentials.
#[derive(Clone)]
pub struct AccountService {
    pub(crate) users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

/// Signup data with the plaintext password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Login name (email).
    pub username: String,
    /// Phone number.
    pub phone: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New login name.
    pub username: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New city.
    pub city: Option<String>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Register a new user. Duplicate username or phone yields `Conflict`.
    pub async fn signup(&self, account: NewAccount) -> AppResult<User> {
        self.validator.validate(&account.password)?;
        let password_hash = self.hasher.hash_password(&account.password)?;

        let user = self
            .users
            .create_user(&NewUser {
                username: account.username,
                phone: account.phone,
                password_hash,
                name: account.name,
                city: account.city,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue an access + refresh pair.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!(username = %username, "Login for unknown user");
                AppError::not_found("User not found")
            })?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login with incorrect password");
            return Err(AppError::unauthorized("Incorrect password"));
        }

        let pair = self.encoder.issue_pair(user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token itself is never reissued.
    pub fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let user_id = self
            .decoder
            .verify_refresh(refresh_token)
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        let token = self.encoder.issue_access(user_id)?;
        info!(user_id = %user_id, "Access token refreshed");
        Ok(token)
    }

    /// The caller's own profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update the caller's profile, re-hashing a new password.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: ProfileUpdate,
    ) -> AppResult<User> {
        let password_hash = match update.password {
            Some(password) => {
                self.validator.validate(&password)?;
                Some(self.hasher.hash_password(&password)?)
            }
            None => None,
        };

        let changes = UserChanges {
            username: update.username,
            phone: update.phone,
            password_hash,
            name: update.name,
            city: update.city,
        };

        let user = self.users.update_user(ctx.user_id, &changes).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }
}
