//! Client for the external Dragon Ball character catalog.
//!
//! - [`api`] -- typed REST wrapper returning `Result`s.
//! - [`models`] -- wire shapes of catalog pages and characters.
//! - [`source`] -- the [`source::CatalogSource`] seam the synchronizer
//!   consumes, which collapses every failure to an absent result.

pub mod api;
pub mod models;
pub mod source;

pub use api::{CatalogApi, CatalogApiError};
pub use source::CatalogSource;
