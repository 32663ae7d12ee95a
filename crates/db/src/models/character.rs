//! Character row model.

use dbz_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::transformation::Transformation;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub ki: Option<String>,
    pub race: String,
    pub gender: String,
    pub description: String,
    pub affiliation: String,
}

/// A character together with the transformations it owns.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterWithTransformations {
    #[serde(flatten)]
    pub character: Character,
    pub transformations: Vec<Transformation>,
}
