//! Raw record types for the two input documents.
//!
//! These structs mirror the on-disk JSON schemas the visualizer is fed:
//! an archive document mapping package names to metadata records, and a
//! download-count document mapping package names to totals. Using typed
//! records means schema violations are rejected at the parse boundary
//! instead of leaking nulls into graph logic.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The archive document: package name -> metadata record.
///
/// A `BTreeMap` keeps declared-package ordering deterministic; JSON object
/// order is not recoverable through serde maps, so declared nodes are
/// ordered by name.
pub type Archive = BTreeMap<String, ArchiveRecord>;

/// The download-count document: package name -> non-negative total.
///
/// Packages absent from this document have *unknown* download counts,
/// which the model treats as distinct from a count of zero.
pub type DownloadCounts = BTreeMap<String, u64>;

/// A single package entry in the archive document.
///
/// Only the fields the graph model cares about are captured; any other
/// fields present in the archive (version tuples, recipe type, ...) are
/// ignored during deserialization.
///
/// # Example
///
/// ```
/// use melgraph::parser::ArchiveRecord;
///
/// let json = r#"{"desc": "A Git porcelain inside Emacs", "deps": {"dash": [2, 19, 1]}}"#;
/// let record: ArchiveRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.dep_count(), 1);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ArchiveRecord {
    /// One-line package description.
    #[serde(default)]
    pub desc: Option<String>,

    /// Optional extended properties (authors, keywords, ...).
    #[serde(default)]
    pub props: Option<PackageProps>,

    /// Declared dependencies, keyed by package name. The version payload is
    /// opaque to the graph model - only the keys matter - so it is retained
    /// as raw JSON.
    #[serde(default)]
    pub deps: Option<BTreeMap<String, serde_json::Value>>,
}

impl ArchiveRecord {
    /// Returns true if the record declares at least one dependency.
    pub fn has_deps(&self) -> bool {
        self.deps.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Returns the number of declared dependencies.
    pub fn dep_count(&self) -> usize {
        self.deps.as_ref().map_or(0, |d| d.len())
    }

    /// Iterates over the declared dependency names.
    pub fn dep_names(&self) -> impl Iterator<Item = &str> {
        self.deps.iter().flat_map(|d| d.keys()).map(String::as_str)
    }
}

/// Extended package properties nested under `props`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PackageProps {
    /// Package authors, when the recipe records them.
    #[serde(default)]
    pub authors: Option<Vec<String>>,

    /// Keywords attached to the package.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}
