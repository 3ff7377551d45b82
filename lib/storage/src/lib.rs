//! # cbrx Storage
//!
//! Corpus suppliers: turn tabular indicator files or JSON case lists into
//! [`cbrx_core::Case`] records.

pub mod error;
pub mod json;
pub mod tabular;

pub use error::{Result, StorageError};
pub use json::{load_json_cases, parse_json_cases, write_json_cases};
pub use tabular::{Corpus, TabularLoader};
