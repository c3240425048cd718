//! User domain entities.

pub mod favorite;
pub mod model;

pub use favorite::FavoriteEntry;
pub use model::{NewUser, User, UserChanges};
