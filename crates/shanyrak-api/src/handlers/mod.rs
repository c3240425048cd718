//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod comment;
pub mod favorites;
pub mod health;
pub mod shanyrak;
pub mod user;
