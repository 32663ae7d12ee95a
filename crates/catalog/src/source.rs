//! The catalog as seen by the synchronizer.
//!
//! Every failure (transport, status, decode) is logged here and reported
//! as `None`; callers only learn that the source was unavailable.

use async_trait::async_trait;
use dbz_core::types::DbId;

use crate::api::CatalogApi;
use crate::models::{CatalogPage, ExternalCharacter};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One page of the listing, or `None` if it could not be fetched.
    async fn list_page(&self, page: u32, limit: u32) -> Option<CatalogPage>;

    /// Full detail for one character, or `None` if missing or unavailable.
    async fn get_by_id(&self, id: DbId) -> Option<ExternalCharacter>;
}

#[async_trait]
impl CatalogSource for CatalogApi {
    async fn list_page(&self, page: u32, limit: u32) -> Option<CatalogPage> {
        match self.fetch_page(page, limit).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::error!(page, limit, error = %e, "Failed to fetch catalog page");
                None
            }
        }
    }

    async fn get_by_id(&self, id: DbId) -> Option<ExternalCharacter> {
        match self.fetch_character(id).await {
            Ok(Some(character)) => Some(character),
            Ok(None) => {
                tracing::warn!(character_id = id, "Character not found in catalog");
                None
            }
            Err(e) => {
                tracing::error!(character_id = id, error = %e, "Failed to fetch catalog character");
                None
            }
        }
    }
}
