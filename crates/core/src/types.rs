/// Primary keys are INTEGER columns whose values come from the external
/// catalog; they are never generated locally.
pub type DbId = i32;
