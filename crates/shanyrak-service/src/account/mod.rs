//! Signup, login, token refresh, profile and favorites.

pub mod favorites;
pub mod service;

pub use service::{AccountService, NewAccount, ProfileUpdate};
