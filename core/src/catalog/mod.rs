//! Guidance document → OSCAL catalog.

pub mod backmatter;
pub mod controls;
pub mod convert;

pub use convert::to_catalog;
