//! Axum middleware stack.

pub mod cookies;
pub mod cors;
pub mod logging;
pub mod session;
