//! Listing (shanyrak) domain entities.

pub mod kind;
pub mod model;
pub mod search;

pub use kind::PostType;
pub use model::{NewPost, Post, PostChanges, PostDetails};
pub use search::PostSearch;
