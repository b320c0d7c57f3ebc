//! In-memory delimited table and its whole-file I/O
//!
//! The whole dataset is loaded up front and written back in one pass; there
//! is no streaming or partial I/O. Inputs whose name ends in `.gz` are
//! decompressed on the fly; compression is inferred from the file extension
//! alone.

use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use csv_async::{AsyncReaderBuilder, AsyncWriterBuilder};
use futures::StreamExt;
use serde::Serialize;
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncRead, BufReader},
};

use crate::Result;

/// Ordered records from a delimited file, with the header row that names the
/// columns
///
/// Every row has exactly as many fields as the header; the reader enforces
/// this and fails on ragged input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    /// Column names from the header row
    headers: Vec<String>,

    /// Record fields, in file order
    rows: Vec<Vec<String>>,
}
//
impl Table {
    /// Column names from the header row
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Records in file order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of records, header row excluded
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column, if the header declares it
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Values of one column, in record order
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[column].as_str())
    }

    /// Rewrite every value of one column in place
    pub fn map_column(&mut self, column: usize, mut transform: impl FnMut(&str) -> String) {
        for row in &mut self.rows {
            row[column] = transform(&row[column]);
        }
    }
}

/// Load a whole delimited file into memory
///
/// Fails if the file is missing, not valid UTF-8, or has ragged records.
pub async fn read(path: &Path, delimiter: u8) -> Result<Table> {
    // Open the file, decompressing gzipped inputs transparently
    let file = File::open(path)
        .await
        .with_context(|| format!("opening dataset file {}", path.display()))?;
    let file = BufReader::new(file);
    let input: Box<dyn AsyncRead + Send + Unpin> =
        if path.extension().is_some_and(|extension| extension == "gz") {
            Box::new(GzipDecoder::new(file))
        } else {
            Box::new(file)
        };

    // Decode the header row, then every record behind it
    let mut reader = AsyncReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .create_reader(input);
    let headers = reader
        .headers()
        .await
        .context("reading the header row")?
        .iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let mut records = reader.into_records();
    let mut rows = Vec::new();
    while let Some(record) = records.next().await {
        let record = record.with_context(|| format!("parsing record {}", rows.len() + 1))?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(Table { headers, rows })
}

/// Write a table back to disk, header row first, no index column
pub async fn write(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let file = File::create(path)
        .await
        .with_context(|| format!("creating output file {}", path.display()))?;
    let mut writer = AsyncWriterBuilder::new()
        .delimiter(delimiter)
        .create_writer(file);
    writer
        .write_record(&table.headers)
        .await
        .context("writing the header row")?;
    for (index, row) in table.rows.iter().enumerate() {
        writer
            .write_record(row)
            .await
            .with_context(|| format!("writing record {}", index + 1))?;
    }
    writer.flush().await.context("flushing the output file")?;
    Ok(())
}

/// Write serializable records to disk, with a header row derived from the
/// record type's field names
pub async fn write_records<I>(records: I, path: &Path, delimiter: u8) -> Result<()>
where
    I: IntoIterator,
    I::Item: Serialize,
{
    let file = File::create(path)
        .await
        .with_context(|| format!("creating output file {}", path.display()))?;
    let mut writer = AsyncWriterBuilder::new()
        .delimiter(delimiter)
        .create_serializer(file);
    for record in records {
        writer
            .serialize(record)
            .await
            .context("writing an output record")?;
    }
    writer.flush().await.context("flushing the output file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_headers_and_records() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pets.csv");
        tokio::fs::write(&path, "name,species\nRex,dog\nFelix,cat\n").await?;

        let table = read(&path, b',').await?;
        assert_eq!(table.headers(), ["name", "species"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], ["Rex", "dog"]);
        assert_eq!(table.column_index("species"), Some(1));
        assert_eq!(table.column(1).collect::<Vec<_>>(), ["dog", "cat"]);
        Ok(())
    }

    #[tokio::test]
    async fn respects_the_configured_delimiter() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pets.tsv");
        tokio::fs::write(&path, "name\tspecies\nRex\tdog\n").await?;

        let table = read(&path, b'\t').await?;
        assert_eq!(table.rows()[0], ["Rex", "dog"]);
        Ok(())
    }

    #[tokio::test]
    async fn round_trips_through_write() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pets.csv");
        tokio::fs::write(&path, "name,species\nRex,dog\nFelix,cat\n").await?;

        let table = read(&path, b',').await?;
        let copy_path = dir.path().join("copy.csv");
        write(&table, &copy_path, b',').await?;
        assert_eq!(read(&copy_path, b',').await?, table);
        Ok(())
    }

    #[tokio::test]
    async fn map_column_rewrites_one_column_only() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pets.csv");
        tokio::fs::write(&path, "name,species\nRex,dog\n").await?;

        let mut table = read(&path, b',').await?;
        table.map_column(0, |name| name.to_uppercase());
        assert_eq!(table.rows()[0], ["REX", "dog"]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_fails_with_context() {
        let dir = tempfile::tempdir().expect("creating a temp dir should succeed");
        let path = dir.path().join("absent.csv");
        let error = read(&path, b',').await.expect_err("reading a missing file should fail");
        assert!(error.to_string().contains("absent.csv"));
    }

    #[tokio::test]
    async fn ragged_records_fail() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("ragged.csv");
        tokio::fs::write(&path, "name,species\nRex\n").await?;
        assert!(read(&path, b',').await.is_err());
        Ok(())
    }
}
