//! Clean a delimited text dataset and build its encoder vocabulary.
//!
//! Reads `DIR/FILENAME`, cleans the configured text column, then writes the
//! cleaned dataset to `DIR/clean_FILENAME` and the vocabulary metadata to
//! `DIR/metadata_FILENAME`.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};
use textprep::{
    clean::{MarkupCleaner, PlainCleaner, TextCleaner},
    config::{Config, DEFAULT_EOS_TOKEN, DEFAULT_PAD_TOKEN, DEFAULT_UNK_TOKEN},
    pipeline::Preprocessor,
    progress::ProgressReport,
    Result,
};

/// Clean one text column of a delimited dataset and build a capped,
/// frequency-ranked vocabulary over the result
///
/// Two artifacts are written next to the input: the cleaned dataset
/// ("clean_" prefix, same columns and separator) and the vocabulary metadata
/// table ("metadata_" prefix, Word/Frequency columns).
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Directory containing the input dataset
    ///
    /// Both output artifacts are written to this directory as well.
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Name of the input dataset file
    ///
    /// The first row must be a header naming the columns. A ".gz" suffix
    /// makes the reader decompress on the fly.
    #[arg(short, long)]
    filename: String,

    /// Field separator character
    #[arg(short, long, default_value_t = ',')]
    separator: char,

    /// Name of the text column to clean
    #[arg(short, long, default_value = "review")]
    column: String,

    /// Maximum vocabulary size, reserved tokens included
    ///
    /// The padding, unknown and end-of-sequence tokens always occupy the
    /// first three indices; the most frequent corpus tokens fill the rest.
    /// The effective size ends up smaller when the corpus has fewer distinct
    /// tokens.
    #[arg(short = 'n', long, default_value = "20000")]
    vocabulary_size: NonZeroUsize,

    /// Dataset-specific cleaning applied after the fixed regex stage
    #[arg(long, value_enum, default_value_t = CleanerKind::Plain)]
    cleaner: CleanerKind,

    /// Padding token literal
    #[arg(long, default_value = DEFAULT_PAD_TOKEN)]
    pad_token: String,

    /// Unknown-word token literal
    #[arg(long, default_value = DEFAULT_UNK_TOKEN)]
    unk_token: String,

    /// End-of-sequence token literal
    #[arg(long, default_value = DEFAULT_EOS_TOKEN)]
    eos_token: String,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        anyhow::ensure!(
            args.separator.is_ascii(),
            "the field separator must be a single ASCII character"
        );
        anyhow::ensure!(
            args.vocabulary_size.get() > 3,
            "the vocabulary size must leave room beyond the three reserved tokens"
        );
        Ok(args)
    }
}

/// Dataset-specific cleaning step selectable from the CLI
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CleanerKind {
    /// No cleaning beyond the fixed regex stage
    Plain,

    /// Drop residual HTML line-break artifacts (review corpora)
    Markup,
}
//
impl CleanerKind {
    /// Instantiate the selected cleaner
    fn build(self) -> Box<dyn TextCleaner> {
        match self {
            Self::Plain => Box::new(PlainCleaner),
            Self::Markup => Box::new(MarkupCleaner::new()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let args = Args::parse_and_check()?;
    let Args {
        dir,
        filename,
        separator,
        column,
        vocabulary_size,
        cleaner,
        pad_token,
        unk_token,
        eos_token,
    } = args;

    // Set up progress reporting
    let report = ProgressReport::new();

    // Run the pipeline: load, clean + build vocabulary, save
    let config = Arc::new(Config {
        dir,
        filename,
        delimiter: separator as u8,
        vocabulary_size,
        pad_token: pad_token.into(),
        unk_token: unk_token.into(),
        eos_token: eos_token.into(),
    });
    let mut preprocessor = Preprocessor::load(config, cleaner.build(), report).await?;
    preprocessor.apply_preprocessing(&column).await?;
    preprocessor.save_preprocessed_file().await?;
    Ok(())
}

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
