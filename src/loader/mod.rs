//! Concurrent loading of the two raw data sources.
//!
//! The archive and downloads documents load in parallel and graph
//! construction is gated on both: if either read or parse fails, the join
//! fails and no partial graph is ever exposed. There is no retry and no
//! timeout; a failure here is a fatal initialization condition for the
//! caller to surface.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::graph::{DependencyGraph, GraphBuilder};
use crate::parser::{self, Archive, DownloadCounts, ParseError};

/// Error joining the two source loads.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// One of the sources failed to read or parse.
    #[error("Failed to load {}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    fn from_parse(path: &Path, source: ParseError) -> Self {
        Self::Source {
            path: path.to_path_buf(),
            source,
        }
    }
}

async fn load_archive(path: &Path) -> Result<Archive, LoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::from_parse(path, ParseError::Io(e)))?;

    let archive =
        parser::parse_archive_str(&content).map_err(|e| LoadError::from_parse(path, e))?;
    parser::validate_archive(&archive).map_err(|e| LoadError::from_parse(path, e))?;

    Ok(archive)
}

async fn load_downloads(path: &Path) -> Result<DownloadCounts, LoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::from_parse(path, ParseError::Io(e)))?;

    parser::parse_downloads_str(&content).map_err(|e| LoadError::from_parse(path, e))
}

/// Loads both raw documents concurrently, failing if either does.
pub async fn load_sources(
    archive_path: &Path,
    downloads_path: &Path,
) -> Result<(Archive, DownloadCounts), LoadError> {
    let (archive, downloads) =
        tokio::try_join!(load_archive(archive_path), load_downloads(downloads_path))?;

    debug!(
        packages = archive.len(),
        download_entries = downloads.len(),
        "loaded raw sources"
    );

    Ok((archive, downloads))
}

/// Loads both sources and builds the dependency graph.
pub async fn load_graph(
    archive_path: &Path,
    downloads_path: &Path,
) -> Result<DependencyGraph, LoadError> {
    let (archive, downloads) = load_sources(archive_path, downloads_path).await?;
    Ok(GraphBuilder::build(&archive, &downloads))
}
