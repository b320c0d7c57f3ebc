//! Preparation of delimited text datasets for fixed-vocabulary encoders.
//!
//! The pipeline loads a delimited file with a header row, cleans one text
//! column through a fixed regex normalization stage followed by a
//! dataset-specific [`TextCleaner`](clean::TextCleaner), builds a capped
//! frequency-ranked vocabulary over the cleaned column, and writes two
//! artifacts next to the input: the cleaned dataset (`clean_` prefix) and a
//! vocabulary metadata table (`metadata_` prefix).

pub mod clean;
pub mod config;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod table;
pub mod vocab;

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Word token from the cleaned corpus
pub type Token = Box<str>;
