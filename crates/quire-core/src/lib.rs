//! Core types and trait definitions for the Quire paper catalogue.
//!
//! This crate is deliberately free of database and file-format dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod inspect;
pub mod paper;
pub mod query;
pub mod store;

pub use paper::{NewPaper, Paper};
pub use query::{AdvancedQuery, SearchField, SortColumn};
