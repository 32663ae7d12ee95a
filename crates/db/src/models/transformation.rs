//! Transformation row model.

use dbz_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `transformations` table.
///
/// Serialized with `character_id` only; the owning character is never
/// embedded, which keeps character -> transformation output acyclic.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transformation {
    pub id: DbId,
    pub name: String,
    pub ki: Option<String>,
    pub character_id: DbId,
}
