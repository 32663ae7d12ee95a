//! Wire types returned by the catalog API.
//!
//! The catalog uses camelCase keys and occasionally sends `null` for string
//! fields; those are read as empty strings.

use dbz_core::types::DbId;
use serde::{Deserialize, Deserializer};

/// One page of `GET /characters`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub items: Vec<ExternalCharacter>,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default)]
    pub links: PageLinks,
}

/// Pagination metadata. A missing `meta` block reads as zero pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: u32,
    pub item_count: u32,
    pub items_per_page: u32,
    pub total_pages: u32,
    pub current_page: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageLinks {
    pub first: Option<String>,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

/// A character as listed or as returned by `GET /characters/{id}`.
///
/// `transformations` is only populated on the detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalCharacter {
    pub id: DbId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub ki: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub race: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transformations: Vec<ExternalTransformation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalTransformation {
    pub id: DbId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub ki: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
