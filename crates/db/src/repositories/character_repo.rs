//! Repository for the `characters` table.
//!
//! Every read returns characters together with their transformations.

use std::collections::HashMap;

use dbz_core::catalog::escape_like;
use dbz_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CharacterWithTransformations};
use crate::repositories::TransformationRepo;

const COLUMNS: &str = "id, name, ki, race, gender, description, affiliation";

/// Read access to characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Whether the table holds at least one row.
    pub async fn exists_any(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM characters)")
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// List every character, ordered by name ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CharacterWithTransformations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY name ASC, id ASC");
        let characters = sqlx::query_as::<_, Character>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_transformations(pool, characters).await
    }

    /// Find a character by its catalog id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CharacterWithTransformations>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        let character = sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match character {
            Some(character) => {
                let transformations =
                    TransformationRepo::list_by_characters(pool, &[character.id]).await?;
                Ok(Some(CharacterWithTransformations {
                    character,
                    transformations,
                }))
            }
            None => Ok(None),
        }
    }

    /// Characters whose name contains `fragment`, case-insensitively.
    ///
    /// `fragment` is matched literally; `%` and `_` are not wildcards.
    pub async fn search_by_name(
        pool: &PgPool,
        fragment: &str,
    ) -> Result<Vec<CharacterWithTransformations>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE name ILIKE '%' || $1 || '%' ESCAPE '\\'
             ORDER BY name ASC, id ASC"
        );
        let characters = sqlx::query_as::<_, Character>(&query)
            .bind(escape_like(fragment))
            .fetch_all(pool)
            .await?;
        Self::attach_transformations(pool, characters).await
    }

    /// Characters whose affiliation equals `affiliation`, case-insensitively.
    pub async fn list_by_affiliation(
        pool: &PgPool,
        affiliation: &str,
    ) -> Result<Vec<CharacterWithTransformations>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE LOWER(affiliation) = LOWER($1)
             ORDER BY name ASC, id ASC"
        );
        let characters = sqlx::query_as::<_, Character>(&query)
            .bind(affiliation)
            .fetch_all(pool)
            .await?;
        Self::attach_transformations(pool, characters).await
    }

    /// Load the transformations for `characters` in one query and nest them,
    /// preserving the order of `characters`.
    async fn attach_transformations(
        pool: &PgPool,
        characters: Vec<Character>,
    ) -> Result<Vec<CharacterWithTransformations>, sqlx::Error> {
        let ids: Vec<DbId> = characters.iter().map(|c| c.id).collect();
        let mut by_owner: HashMap<DbId, Vec<_>> = HashMap::new();
        for t in TransformationRepo::list_by_characters(pool, &ids).await? {
            by_owner.entry(t.character_id).or_default().push(t);
        }

        Ok(characters
            .into_iter()
            .map(|character| {
                let transformations = by_owner.remove(&character.id).unwrap_or_default();
                CharacterWithTransformations {
                    character,
                    transformations,
                }
            })
            .collect())
    }
}
