//! What the synchronizer needs from persistence.

use async_trait::async_trait;
use dbz_core::catalog::{NewCharacter, NewTransformation};
use dbz_db::repositories::{CatalogRepo, CharacterRepo, TransformationRepo};
use dbz_db::DbPool;

#[async_trait]
pub trait SyncStore: Send + Sync {
    async fn has_characters(&self) -> Result<bool, sqlx::Error>;

    async fn has_transformations(&self) -> Result<bool, sqlx::Error>;

    /// Persist both row sets atomically.
    async fn insert_all(
        &self,
        characters: &[NewCharacter],
        transformations: &[NewTransformation],
    ) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SyncStore for DbPool {
    async fn has_characters(&self) -> Result<bool, sqlx::Error> {
        CharacterRepo::exists_any(self).await
    }

    async fn has_transformations(&self) -> Result<bool, sqlx::Error> {
        TransformationRepo::exists_any(self).await
    }

    async fn insert_all(
        &self,
        characters: &[NewCharacter],
        transformations: &[NewTransformation],
    ) -> Result<(), sqlx::Error> {
        CatalogRepo::insert_all(self, characters, transformations).await
    }
}
