//! # shanyrak-database
//!
//! PostgreSQL connection management, the store traits used by the service
//! layer, and two implementations of them: sqlx repositories and an
//! in-memory store.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{CommentStore, PostStore, StoreHealth, Stores, UserStore};
