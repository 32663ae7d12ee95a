//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod catalog_repo;
pub mod character_repo;
pub mod transformation_repo;

pub use catalog_repo::{CatalogRepo, ClearCounts};
pub use character_repo::CharacterRepo;
pub use transformation_repo::TransformationRepo;
