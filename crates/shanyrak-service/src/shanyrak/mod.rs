//! Listing (shanyrak) use cases.

pub mod service;

pub use service::ShanyrakService;
