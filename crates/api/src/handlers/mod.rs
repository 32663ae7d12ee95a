pub mod auth;
pub mod characters;
pub mod data_management;
pub mod transformations;
