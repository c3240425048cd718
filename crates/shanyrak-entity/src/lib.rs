//! # shanyrak-entity
//!
//! Domain entity models for the Shanyrak classifieds backend. Every struct
//! in this crate represents a database table row or a domain value
//! object. Row types additionally derive `sqlx::FromRow`.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::{NewPost, Post, PostChanges, PostDetails, PostSearch, PostType};
pub use user::{FavoriteEntry, NewUser, User, UserChanges};
