//! sqlx repositories for every Shanyrak table.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::CommentRepository;
pub use post::PostRepository;
pub use user::UserRepository;

use shanyrak_core::error::{AppError, ErrorKind};

/// Name of the constraint a database error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

/// Wrap an unexpected sqlx error.
pub(crate) fn database_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
