//! Processing pipeline configuration

use std::{num::NonZeroUsize, path::PathBuf};

/// Prefix of the cleaned-dataset artifact, relative to the input name
pub const CLEAN_PREFIX: &str = "clean_";

/// Prefix of the vocabulary metadata artifact, relative to the input name
pub const METADATA_PREFIX: &str = "metadata_";

/// Default padding token literal
pub const DEFAULT_PAD_TOKEN: &str = "<PAD>";

/// Default unknown-word token literal
pub const DEFAULT_UNK_TOKEN: &str = "<UNK>";

/// Default end-of-sequence token literal
pub const DEFAULT_EOS_TOKEN: &str = "<EOS>";

/// Final pipeline configuration
///
/// This is the result of digesting and validating the CLI arguments (or, for
/// library users, of filling the fields directly). It is immutable for the
/// lifetime of the pipeline and shared via `Arc`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Directory holding the input dataset and receiving both artifacts
    pub dir: PathBuf,

    /// Name of the input dataset file within [`dir`](Self::dir)
    ///
    /// A `.gz` suffix makes the reader decompress on the fly; artifact names
    /// are derived from the name without that suffix.
    pub filename: String,

    /// Field separator of the input file, reused for both artifacts
    pub delimiter: u8,

    /// Cap on the vocabulary size, reserved tokens included
    pub vocabulary_size: NonZeroUsize,

    /// Padding token literal
    pub pad_token: Box<str>,

    /// Unknown-word token literal
    pub unk_token: Box<str>,

    /// End-of-sequence token literal
    pub eos_token: Box<str>,
}
//
impl Config {
    /// Path to the input dataset file
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    /// Path to the cleaned-dataset artifact
    pub fn clean_path(&self) -> PathBuf {
        self.artifact_path(CLEAN_PREFIX)
    }

    /// Path to the vocabulary metadata artifact
    pub fn metadata_path(&self) -> PathBuf {
        self.artifact_path(METADATA_PREFIX)
    }

    /// Reserved tokens in index order: padding, unknown, end-of-sequence
    pub fn reserved_tokens(&self) -> [&str; 3] {
        [&self.pad_token, &self.unk_token, &self.eos_token]
    }

    /// Derive an artifact path from the input name and an artifact prefix
    ///
    /// Artifacts are always written uncompressed, so a `.gz` input suffix
    /// does not carry over to their names.
    fn artifact_path(&self, prefix: &str) -> PathBuf {
        let stem = self
            .filename
            .strip_suffix(".gz")
            .unwrap_or(&self.filename);
        self.dir.join(format!("{prefix}{stem}"))
    }
}
