//! Row structs for the catalog tables.
//!
//! Rows are written only by the synchronizer (from `dbz_core::catalog`
//! records), so there are no create/update DTOs here.

pub mod character;
pub mod transformation;
