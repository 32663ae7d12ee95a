//! Domain types shared by every crate in the catalog mirror.
//!
//! - [`types`] -- id aliases.
//! - [`error`] -- the domain error enum.
//! - [`catalog`] -- character/transformation records, column limits and
//!   the race/affiliation matching rules used by the synchronizer.

pub mod catalog;
pub mod error;
pub mod types;
