//! Component definitions assembled from control catalogs (target
//! components) and evaluation methods (validation components).

pub mod builder;
pub mod mapping;
pub mod rules;

pub use builder::DefinitionBuilder;
