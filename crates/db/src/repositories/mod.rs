//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Errors are returned as raw
//! `sqlx::Error`; callers classify them with [`crate::violation`].

pub mod author_repo;
pub mod character_repo;
pub mod novel_repo;

pub use author_repo::AuthorRepo;
pub use character_repo::CharacterRepo;
pub use novel_repo::NovelRepo;
