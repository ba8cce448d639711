//! Parsers for the archive and download-count documents.
//!
//! Both sources are required before the dependency graph can be built; a
//! parse failure here is a fatal startup condition for the model, never a
//! per-query error.

use std::fs;
use std::path::Path;

use super::types::{Archive, DownloadCounts};

/// Errors that can occur while reading the raw data sources.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The archive document is structurally valid JSON but unusable.
    #[error("Invalid archive document: {0}")]
    InvalidArchive(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses an archive document from a file path.
pub fn parse_archive_file(path: &Path) -> ParseResult<Archive> {
    let content = fs::read_to_string(path)?;
    parse_archive_str(&content)
}

/// Parses an archive document from a string.
///
/// # Example
///
/// ```
/// use melgraph::parser::parse_archive_str;
///
/// let json = r#"{"dash": {"desc": "A modern list library", "deps": null}}"#;
/// let archive = parse_archive_str(json).unwrap();
/// assert_eq!(archive.len(), 1);
/// ```
pub fn parse_archive_str(content: &str) -> ParseResult<Archive> {
    let archive: Archive = serde_json::from_str(content)?;
    Ok(archive)
}

/// Parses a download-count document from a file path.
pub fn parse_downloads_file(path: &Path) -> ParseResult<DownloadCounts> {
    let content = fs::read_to_string(path)?;
    parse_downloads_str(&content)
}

/// Parses a download-count document from a string.
///
/// Counts are non-negative integers; negative or fractional values are
/// rejected at this boundary.
pub fn parse_downloads_str(content: &str) -> ParseResult<DownloadCounts> {
    let downloads: DownloadCounts = serde_json::from_str(content)?;
    Ok(downloads)
}

/// Validates a parsed archive document.
///
/// The graph model has nothing to build from an empty archive, so that is
/// treated the same as a malformed source.
pub fn validate_archive(archive: &Archive) -> ParseResult<()> {
    if archive.is_empty() {
        return Err(ParseError::InvalidArchive(
            "archive document contains no packages".to_string(),
        ));
    }
    Ok(())
}
