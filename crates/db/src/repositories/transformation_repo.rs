//! Repository for the `transformations` table.

use dbz_core::types::DbId;
use sqlx::PgPool;

use crate::models::transformation::Transformation;

const COLUMNS: &str = "id, name, ki, character_id";

/// Read access to transformations.
pub struct TransformationRepo;

impl TransformationRepo {
    /// Whether the table holds at least one row.
    pub async fn exists_any(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM transformations)")
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List every transformation, ordered by name ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Transformation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transformations ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Transformation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a transformation by its catalog id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Transformation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transformations WHERE id = $1");
        sqlx::query_as::<_, Transformation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the transformations owned by any of the given characters.
    pub async fn list_by_characters(
        pool: &PgPool,
        character_ids: &[DbId],
    ) -> Result<Vec<Transformation>, sqlx::Error> {
        if character_ids.is_empty() {
            return Ok(vec![]);
        }

        let query = format!(
            "SELECT {COLUMNS} FROM transformations
             WHERE character_id = ANY($1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Transformation>(&query)
            .bind(character_ids)
            .fetch_all(pool)
            .await
    }
}
