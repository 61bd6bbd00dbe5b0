//! Maps Gemara guidance, catalogs and evaluation results onto OSCAL
//! catalogs, component definitions and assessment results.

pub mod catalog;
pub mod component;
pub mod evaluation;
pub mod gemara;
pub mod ids;
pub mod normalize;
pub mod oscal;
pub mod validator;

pub mod error;
