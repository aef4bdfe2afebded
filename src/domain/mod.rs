//! Core domain types and logic.

pub mod artifact;
pub mod assembly;
pub mod config;
pub mod config_validation;
pub mod error;
pub mod raster;
pub mod selection;
pub mod table;
