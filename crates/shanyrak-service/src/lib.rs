//! # shanyrak-service
//!
//! Business logic service layer. Each service orchestrates the store
//! traits from `shanyrak-database` and the credential primitives from
//! `shanyrak-auth` to implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod comment;
pub mod context;
pub mod shanyrak;

pub use account::{AccountService, NewAccount, ProfileUpdate};
pub use comment::CommentService;
pub use context::RequestContext;
pub use shanyrak::ShanyrakService;
