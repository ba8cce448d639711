//! Graph module for package dependency modeling.
//!
//! This module provides the [`DependencyGraph`] built by [`GraphBuilder`]
//! from the two raw documents, plus the reachability and focus-distance
//! queries the filter engine composes.
//!
//! # Example
//!
//! ```
//! use melgraph::graph::GraphBuilder;
//! use melgraph::parser::{parse_archive_str, parse_downloads_str};
//!
//! let archive = parse_archive_str(
//!     r#"{"magit": {"desc": "A Git porcelain", "deps": {"dash": [2, 19]}}}"#,
//! ).unwrap();
//! let downloads = parse_downloads_str(r#"{"magit": 42}"#).unwrap();
//!
//! let graph = GraphBuilder::build(&archive, &downloads);
//! assert_eq!(graph.node_count(), 2); // "dash" is synthesized
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod dependency_graph;
mod distance;
mod traversal;

pub use dependency_graph::{DependencyGraph, GraphBuilder, PackageNode, UNLISTED_DESC};
pub use distance::DistanceResult;

/// Errors raised by graph queries.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The named package does not exist in the graph index.
    #[error("Package not found in graph: {0}")]
    PackageNotFound(String),
}
