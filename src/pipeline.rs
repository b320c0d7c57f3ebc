//! Preprocessing pipeline
//!
//! A [`Preprocessor`] owns one dataset for one run: it loads the table
//! eagerly, cleans the text column over a full copy, builds the vocabulary
//! (writing the metadata artifact as it goes), and finally writes the cleaned
//! dataset. One instance belongs to one owner; nothing here is synchronized,
//! and concurrent use of a single instance is out of contract.

use crate::{
    clean::TextCleaner,
    config::Config,
    normalize::Normalizer,
    progress::ProgressReport,
    table::{self, Table},
    vocab::Vocabulary,
    Result,
};
use anyhow::Context;
use std::sync::Arc;

/// Single-run preprocessing pipeline over one delimited dataset
pub struct Preprocessor {
    /// Run configuration
    config: Arc<Config>,

    /// Fixed regex normalization stage
    normalizer: Normalizer,

    /// Dataset-specific cleaning stage
    cleaner: Box<dyn TextCleaner>,

    /// Progress reporting hook
    report: ProgressReport,

    /// Input table, as loaded
    data: Table,

    /// Cleaned table, pending until [`apply_preprocessing`] has run
    ///
    /// [`apply_preprocessing`]: Self::apply_preprocessing
    clean_data: Option<Table>,

    /// Vocabulary built over the cleaned column
    vocabulary: Option<Vocabulary>,
}
//
impl Preprocessor {
    /// Load the input dataset and set up the pipeline
    ///
    /// Fails right away if the file is missing or malformed; a constructed
    /// `Preprocessor` always holds loaded data.
    pub async fn load(
        config: Arc<Config>,
        cleaner: Box<dyn TextCleaner>,
        report: ProgressReport,
    ) -> Result<Self> {
        let path = config.input_path();
        let data = table::read(&path, config.delimiter)
            .await
            .with_context(|| format!("loading dataset {}", path.display()))?;
        log::debug!("Loaded {} records from {}", data.len(), path.display());
        Ok(Self {
            config,
            normalizer: Normalizer::new(),
            cleaner,
            report,
            data,
            clean_data: None,
            vocabulary: None,
        })
    }

    /// Clean the named text column and build the vocabulary over it
    ///
    /// Works on a full copy of the input table; the original stays loaded
    /// untouched. Writing the vocabulary metadata artifact is a side effect
    /// of this step, the cleaned table itself stays pending until
    /// [`save_preprocessed_file`](Self::save_preprocessed_file).
    pub async fn apply_preprocessing(&mut self, column_name: &str) -> Result<()> {
        let column = self
            .data
            .column_index(column_name)
            .with_context(|| format!("input data has no column named {column_name:?}"))?;

        let mut clean_data = self.data.clone();
        let progress = self.report.add("Cleaning text entries", clean_data.len());
        clean_data.map_column(column, |entry| {
            let entry = self.normalizer.apply(entry);
            let entry = self.cleaner.clean(&entry);
            progress.make_progress(1);
            entry
        });

        self.build_vocabulary(&clean_data, column).await?;
        self.clean_data = Some(clean_data);
        log::info!("Applied preprocessing to input data");
        Ok(())
    }

    /// Write the cleaned dataset artifact
    ///
    /// Fails, without touching the filesystem, if no preprocessing is
    /// pending.
    pub async fn save_preprocessed_file(&self) -> Result<()> {
        let clean_data = self.clean_data.as_ref().context(
            "no preprocessing has been applied, call apply_preprocessing before saving",
        )?;
        let path = self.config.clean_path();
        table::write(clean_data, &path, self.config.delimiter)
            .await
            .with_context(|| format!("saving the preprocessed dataset to {}", path.display()))?;
        log::info!("Successfully saved preprocessed file");
        Ok(())
    }

    /// Input table, as loaded
    pub fn data(&self) -> &Table {
        &self.data
    }

    /// Cleaned table, once preprocessing has run
    pub fn clean_data(&self) -> Option<&Table> {
        self.clean_data.as_ref()
    }

    /// Vocabulary over the cleaned column, once preprocessing has run
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// Effective vocabulary size
    ///
    /// The configured cap until a vocabulary has been built, the actual
    /// mapping size afterwards.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary
            .as_ref()
            .map(Vocabulary::len)
            .unwrap_or(self.config.vocabulary_size.get())
    }

    /// Build the vocabulary over the cleaned column and write the metadata
    /// artifact
    async fn build_vocabulary(&mut self, clean_data: &Table, column: usize) -> Result<()> {
        let progress = self.report.add("Counting token frequencies", clean_data.len());
        let vocabulary = Vocabulary::build(
            clean_data
                .column(column)
                .inspect(|_entry| progress.make_progress(1)),
            self.config.reserved_tokens(),
            self.config.vocabulary_size.get(),
        );
        log::info!("Built vocabulary with size: {}", vocabulary.len());

        let path = self.config.metadata_path();
        table::write_records(vocabulary.metadata(), &path, self.config.delimiter)
            .await
            .with_context(|| format!("saving vocabulary metadata to {}", path.display()))?;
        log::info!("Saved vocabulary to metadata file");

        self.vocabulary = Some(vocabulary);
        Ok(())
    }
}
