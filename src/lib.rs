//! fvreport: assembles a PDF report from pre-generated financial tables
//! and chart images.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command-line entry in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
