//! Character and transformation records as they are written to the store,
//! plus the matching rules that decide which catalog entries are mirrored.

use serde::Serialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Only characters of this race are mirrored.
pub const MIRRORED_RACE: &str = "Saiyan";

/// Characters with this affiliation get their transformations fetched.
pub const DETAILED_AFFILIATION: &str = "Z Fighter";

/// A character row ready for insertion.
///
/// Length limits must match `db/migrations/*_create_catalog_tables.sql`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewCharacter {
    pub id: DbId,
    #[validate(length(max = 50))]
    pub name: String,
    #[validate(length(max = 50))]
    pub ki: Option<String>,
    #[validate(length(max = 25))]
    pub race: String,
    #[validate(length(max = 20))]
    pub gender: String,
    pub description: String,
    #[validate(length(max = 50))]
    pub affiliation: String,
}

/// A transformation row ready for insertion. Always parented to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewTransformation {
    pub id: DbId,
    #[validate(length(max = 50))]
    pub name: String,
    #[validate(length(max = 50))]
    pub ki: Option<String>,
    pub character_id: DbId,
}

impl NewCharacter {
    /// Check the row against the column limits.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("character {}: {e}", self.id)))
    }
}

impl NewTransformation {
    /// Check the row against the column limits.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("transformation {}: {e}", self.id)))
    }
}

/// Whether a catalog race value selects the character for mirroring.
pub fn is_mirrored_race(race: &str) -> bool {
    race.eq_ignore_ascii_case(MIRRORED_RACE)
}

/// Whether a catalog affiliation value requires a detail fetch.
pub fn needs_detail(affiliation: &str) -> bool {
    affiliation.eq_ignore_ascii_case(DETAILED_AFFILIATION)
}

/// Escape `%`, `_` and `\` so user input matches literally inside a
/// `LIKE`/`ILIKE` pattern using `ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
