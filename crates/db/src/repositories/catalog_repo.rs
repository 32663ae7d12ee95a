//! Whole-catalog writes: the synchronizer's bulk insert and the clear
//! operation. Both run inside a single transaction.

use dbz_core::catalog::{NewCharacter, NewTransformation};
use dbz_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

/// Row counts removed by [`CatalogRepo::clear_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearCounts {
    pub characters_deleted: u64,
    pub transformations_deleted: u64,
}

/// Writes spanning both catalog tables.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Insert all characters, then all transformations, in one transaction.
    ///
    /// Nothing is committed unless every row is written.
    pub async fn insert_all(
        pool: &PgPool,
        characters: &[NewCharacter],
        transformations: &[NewTransformation],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !characters.is_empty() {
            let ids: Vec<DbId> = characters.iter().map(|c| c.id).collect();
            let names: Vec<String> = characters.iter().map(|c| c.name.clone()).collect();
            let kis: Vec<Option<String>> = characters.iter().map(|c| c.ki.clone()).collect();
            let races: Vec<String> = characters.iter().map(|c| c.race.clone()).collect();
            let genders: Vec<String> = characters.iter().map(|c| c.gender.clone()).collect();
            let descriptions: Vec<String> =
                characters.iter().map(|c| c.description.clone()).collect();
            let affiliations: Vec<String> =
                characters.iter().map(|c| c.affiliation.clone()).collect();

            sqlx::query(
                "INSERT INTO characters \
                    (id, name, ki, race, gender, description, affiliation) \
                 SELECT * FROM UNNEST($1::integer[], $2::text[], $3::text[], $4::text[], \
                                      $5::text[], $6::text[], $7::text[])",
            )
            .bind(&ids)
            .bind(&names)
            .bind(&kis)
            .bind(&races)
            .bind(&genders)
            .bind(&descriptions)
            .bind(&affiliations)
            .execute(&mut *tx)
            .await?;
        }

        if !transformations.is_empty() {
            let ids: Vec<DbId> = transformations.iter().map(|t| t.id).collect();
            let names: Vec<String> = transformations.iter().map(|t| t.name.clone()).collect();
            let kis: Vec<Option<String>> = transformations.iter().map(|t| t.ki.clone()).collect();
            let owners: Vec<DbId> = transformations.iter().map(|t| t.character_id).collect();

            sqlx::query(
                "INSERT INTO transformations (id, name, ki, character_id) \
                 SELECT * FROM UNNEST($1::integer[], $2::text[], $3::text[], $4::integer[])",
            )
            .bind(&ids)
            .bind(&names)
            .bind(&kis)
            .bind(&owners)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            characters = characters.len(),
            transformations = transformations.len(),
            "Catalog rows inserted",
        );
        Ok(())
    }

    /// Delete every transformation, then every character, in one transaction.
    ///
    /// On error the transaction is dropped uncommitted, which rolls it back;
    /// a partial clear is never visible. Clearing an empty store succeeds.
    pub async fn clear_all(pool: &PgPool) -> Result<ClearCounts, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let transformations_deleted = sqlx::query("DELETE FROM transformations")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!(count = transformations_deleted, "Transformations deleted");

        let characters_deleted = sqlx::query("DELETE FROM characters")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::info!(count = characters_deleted, "Characters deleted");

        tx.commit().await?;

        Ok(ClearCounts {
            characters_deleted,
            transformations_deleted,
        })
    }
}
