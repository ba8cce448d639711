//! Filter engine: composes search, focus distances, and the download
//! predicate into a renderable subgraph.
//!
//! The response carries everything the view layer needs for one redraw:
//! the kept nodes (with derived parent/child name lists), the kept edges,
//! the metric range for color scaling, and the original search term for
//! anchoring that scale.
//!
//! # Example
//!
//! ```
//! use melgraph::filter::{filter_graph, FilterRequest};
//! use melgraph::graph::GraphBuilder;
//! use melgraph::parser::{parse_archive_str, parse_downloads_str};
//!
//! let archive = parse_archive_str(
//!     r#"{"b": {"desc": "x", "deps": {"a": [1]}}, "a": {"desc": "x", "deps": null}}"#,
//! ).unwrap();
//! let downloads = parse_downloads_str("{}").unwrap();
//! let graph = GraphBuilder::build(&archive, &downloads);
//!
//! let response = filter_graph(&graph, &FilterRequest::default());
//! assert_eq!(response.nodes.len(), 2);
//! assert_eq!(response.links.len(), 1);
//! ```

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::graph::{DependencyGraph, DistanceResult, GraphError};

/// One filter invocation, mirroring the UI controls.
#[derive(Debug, Clone)]
pub struct FilterRequest {
    /// Focus package name; empty selects the whole graph.
    pub search: String,
    /// Minimum download count a package must have to stay visible.
    pub min_downloads: u64,
    /// When true, packages without download data are dropped instead of
    /// passing the threshold by default.
    pub exclude_unknown_downloads: bool,
    /// Follow dependency (parent) edges from the focus.
    pub include_ancestors: bool,
    /// Follow dependent (child) edges from the focus.
    pub include_descendants: bool,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_downloads: 0,
            exclude_unknown_downloads: false,
            include_ancestors: true,
            include_descendants: true,
        }
    }
}

/// A kept package, materialized for the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct PackageInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    pub keywords: Vec<String>,
    /// Names of the packages this one depends on.
    pub parents: Vec<String>,
    /// Names of the packages depending on this one.
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
}

/// A kept edge: `source` is a dependency of `target`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkInfo {
    pub source: String,
    pub target: String,
}

/// The filtered subgraph handed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FilterResponse {
    pub nodes: Vec<PackageInfo>,
    pub links: Vec<LinkInfo>,
    /// `[min, max]` distance span for color scaling. `[0, 1]` is the
    /// neutral default when no focus distances were computed.
    pub metric_range: [i64; 2],
    /// The original search term, echoed for color-scale anchoring.
    pub search: String,
}

impl FilterResponse {
    /// Returns true if nothing matched the request.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Filters the graph according to `request`.
///
/// An empty search selects every package; a search term absent from the
/// index yields an empty response ("no matches"), never an error. The
/// download predicate then prunes the candidate set, and only edges with
/// both endpoints kept survive.
pub fn filter_graph(graph: &DependencyGraph, request: &FilterRequest) -> FilterResponse {
    let mut metric_range = [0, 1];
    // None = every package is a candidate
    let mut reached: Option<DistanceResult> = None;

    if !request.search.is_empty() {
        match graph.compute_distances(
            &request.search,
            request.include_ancestors,
            request.include_descendants,
        ) {
            Ok(result) => {
                metric_range = result.range;
                reached = Some(result);
            }
            Err(GraphError::PackageNotFound(_)) => {
                debug!(search = %request.search, "search term not in the index");
                reached = Some(DistanceResult::default());
            }
        }
    }

    let kept: HashSet<&str> = graph
        .nodes()
        .filter(|node| reached.as_ref().map_or(true, |r| r.contains(&node.name)))
        .filter(|node| match node.downloads {
            Some(count) => count >= request.min_downloads,
            None => !request.exclude_unknown_downloads,
        })
        .map(|node| node.name.as_str())
        .collect();

    let nodes: Vec<PackageInfo> = graph
        .nodes()
        .filter(|node| kept.contains(node.name.as_str()))
        .map(|node| PackageInfo {
            name: node.name.clone(),
            description: node.description.clone(),
            authors: node.authors.clone(),
            keywords: node.keywords.clone(),
            parents: graph.parents_of(&node.name),
            children: graph.children_of(&node.name),
            downloads: node.downloads,
        })
        .collect();

    let links: Vec<LinkInfo> = graph
        .links()
        .filter(|(source, target)| kept.contains(source) && kept.contains(target))
        .map(|(source, target)| LinkInfo {
            source: source.to_string(),
            target: target.to_string(),
        })
        .collect();

    debug!(
        nodes = nodes.len(),
        links = links.len(),
        ?metric_range,
        "filtered graph"
    );

    FilterResponse {
        nodes,
        links,
        metric_range,
        search: request.search.clone(),
    }
}
