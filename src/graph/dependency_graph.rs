//! Dependency graph storage and construction.
//!
//! The graph is built once from the two raw documents and is structurally
//! immutable afterwards. Nodes are packages; an edge points from a
//! dependency (parent) to the package that declares it (child). Cycles are
//! tolerated throughout - archives do contain them - so no query may assume
//! acyclicity.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

use crate::parser::{Archive, ArchiveRecord, DownloadCounts};

/// Description given to placeholder nodes synthesized for dependencies
/// that are absent from the archive document.
pub const UNLISTED_DESC: &str = "A package not listed in the archive.";

/// A single package in the dependency graph.
///
/// Parent and child relations live in the edge store, not on the node;
/// use [`DependencyGraph::parents_of`] and [`DependencyGraph::children_of`]
/// to read them.
#[derive(Debug, Clone)]
pub struct PackageNode {
    /// Unique package name, the graph-wide key.
    pub name: String,
    /// One-line description from the archive, or a placeholder text for
    /// synthesized nodes.
    pub description: Option<String>,
    /// Authors, when the archive records them.
    pub authors: Option<Vec<String>>,
    /// Keywords attached to the package (possibly empty).
    pub keywords: Vec<String>,
    /// Download total, when the downloads document has an entry. `None`
    /// means unknown, which is distinct from a count of zero.
    pub downloads: Option<u64>,
    /// True for placeholder nodes created for unlisted dependencies.
    pub synthesized: bool,
}

impl PackageNode {
    fn declared(name: &str, record: &ArchiveRecord) -> Self {
        let (authors, keywords) = match &record.props {
            Some(props) => (
                props.authors.clone(),
                props.keywords.clone().unwrap_or_default(),
            ),
            None => (None, Vec::new()),
        };

        Self {
            name: name.to_string(),
            description: record.desc.clone(),
            authors,
            keywords,
            downloads: None,
            synthesized: false,
        }
    }

    fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: Some(UNLISTED_DESC.to_string()),
            authors: None,
            keywords: Vec::new(),
            downloads: None,
            synthesized: true,
        }
    }

    /// Returns true if a download count is known for this package.
    pub fn has_downloads(&self) -> bool {
        self.downloads.is_some()
    }
}

/// Builds a [`DependencyGraph`] from the two raw documents.
///
/// The builder owns its index map while constructing and hands the finished
/// graph out by value; nothing ambient is mutated and the result is closed:
/// every declared dependency resolves to an index entry, synthesizing
/// placeholders where the archive has none.
pub struct GraphBuilder {
    graph: DiGraph<PackageNode, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    /// Builds the graph: declared nodes first (in document order), then
    /// dependency edges with placeholder synthesis, then download counts.
    pub fn build(archive: &Archive, downloads: &DownloadCounts) -> DependencyGraph {
        let mut builder = Self {
            graph: DiGraph::with_capacity(archive.len(), archive.len()),
            indices: HashMap::with_capacity(archive.len()),
        };

        builder.add_declared(archive);
        builder.link_parents(archive);
        builder.apply_downloads(downloads);

        DependencyGraph {
            graph: builder.graph,
            indices: builder.indices,
        }
    }

    fn add_declared(&mut self, archive: &Archive) {
        for (name, record) in archive {
            let idx = self.graph.add_node(PackageNode::declared(name, record));
            self.indices.insert(name.clone(), idx);
        }
    }

    /// Second pass: one edge per declared (parent, child) pair, no dedup.
    /// Synthesized placeholders index after every declared node because the
    /// first pass has already added all of those.
    fn link_parents(&mut self, archive: &Archive) {
        for (name, record) in archive {
            let Some(&child) = self.indices.get(name) else {
                continue;
            };

            for parent_name in record.dep_names() {
                let parent = match self.indices.get(parent_name) {
                    Some(&idx) => idx,
                    None => {
                        let idx = self.graph.add_node(PackageNode::placeholder(parent_name));
                        self.indices.insert(parent_name.to_string(), idx);
                        idx
                    }
                };
                self.graph.add_edge(parent, child, ());
            }
        }
    }

    /// Third pass: annotate matching nodes only. Synthesized nodes are full
    /// index citizens and take counts like any other; packages missing from
    /// the downloads document keep `downloads` unset.
    fn apply_downloads(&mut self, downloads: &DownloadCounts) {
        for (name, &count) in downloads {
            if let Some(&idx) = self.indices.get(name) {
                self.graph[idx].downloads = Some(count);
            }
        }
    }
}

/// The immutable package-dependency graph.
///
/// Backed by a petgraph `DiGraph` with a name index for O(1) lookup. Edges
/// point from dependency to dependent, so a node's parents are the sources
/// of its incoming edges.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    pub(super) graph: DiGraph<PackageNode, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Returns the number of packages in the graph, synthesized included.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of dependency edges. This equals the total count
    /// of declared dependency references across the archive.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no packages.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks whether a package exists in the index.
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Gets a package by name.
    pub fn get(&self, name: &str) -> Option<&PackageNode> {
        self.indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub(super) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.indices.get(name).copied()
    }

    /// Names of the packages `name` depends on. Empty for unknown names.
    pub fn parents_of(&self, name: &str) -> Vec<String> {
        self.neighbor_names(name, Direction::Incoming)
    }

    /// Names of the packages that depend on `name`. Empty for unknown names.
    pub fn children_of(&self, name: &str) -> Vec<String> {
        self.neighbor_names(name, Direction::Outgoing)
    }

    fn neighbor_names(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(idx) = self.index_of(name) else {
            return Vec::new();
        };

        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].name.clone())
            .collect()
    }

    /// Iterates over all packages, declared nodes first (in archive order),
    /// synthesized placeholders after.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.graph.node_weights()
    }

    /// Iterates over all edges as `(parent, child)` name pairs, in the
    /// order they were derived from the archive.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].name.as_str(),
                self.graph[edge.target()].name.as_str(),
            )
        })
    }

    /// Returns true if the graph contains at least one dependency cycle.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns the names of all packages participating in a cycle.
    pub fn nodes_in_cycles(&self) -> HashSet<String> {
        let mut names = HashSet::new();

        for scc in tarjan_scc(&self.graph) {
            let cyclic = scc.len() > 1
                || (scc.len() == 1 && self.graph.contains_edge(scc[0], scc[0]));
            if cyclic {
                for idx in scc {
                    names.insert(self.graph[idx].name.clone());
                }
            }
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_archive_str, parse_downloads_str};

    fn build(archive: &str, downloads: &str) -> DependencyGraph {
        let archive = parse_archive_str(archive).unwrap();
        let downloads = parse_downloads_str(downloads).unwrap();
        GraphBuilder::build(&archive, &downloads)
    }

    const CHAIN: &str = r#"{
        "a": {"desc": "base", "deps": null},
        "b": {"desc": "middle", "deps": {"a": [1, 0]}},
        "c": {"desc": "leaf", "deps": {"b": [1, 0]}}
    }"#;

    #[test]
    fn test_build_counts() {
        let graph = build(CHAIN, "{}");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_edge_count_equals_parent_references() {
        let archive_json = r#"{
            "a": {"desc": "x", "deps": null},
            "b": {"desc": "x", "deps": {"a": [1], "ext": [1]}},
            "c": {"desc": "x", "deps": {"a": [1], "b": [1], "ext": [1]}}
        }"#;
        let graph = build(archive_json, "{}");

        // 2 + 3 declared references, none dropped, none deduplicated
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_closure_invariant() {
        let archive_json = r#"{
            "b": {"desc": "x", "deps": {"a": [1], "outside": [1]}},
            "c": {"desc": "x", "deps": {"b": [1]}},
            "a": {"desc": "x", "deps": null}
        }"#;
        let graph = build(archive_json, "{}");

        for node in graph.nodes() {
            for parent in graph.parents_of(&node.name) {
                assert!(graph.contains(&parent), "dangling parent {parent}");
                assert!(
                    graph.children_of(&parent).contains(&node.name),
                    "missing back-reference {} -> {}",
                    parent,
                    node.name
                );
            }
        }
    }

    #[test]
    fn test_synthesized_node() {
        let archive_json = r#"{"pkg": {"desc": "x", "deps": {"cl-lib": [0, 5]}}}"#;
        let graph = build(archive_json, "{}");

        assert_eq!(graph.node_count(), 2);
        let ext = graph.get("cl-lib").unwrap();
        assert!(ext.synthesized);
        assert_eq!(ext.description.as_deref(), Some(UNLISTED_DESC));
        assert!(ext.keywords.is_empty());
        assert!(graph.parents_of("cl-lib").is_empty());
        assert_eq!(graph.children_of("cl-lib"), vec!["pkg"]);
    }

    #[test]
    fn test_synthesized_nodes_ordered_last() {
        let archive_json = r#"{
            "a": {"desc": "x", "deps": {"zz-external": [1]}},
            "b": {"desc": "x", "deps": null}
        }"#;
        let graph = build(archive_json, "{}");

        let names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "zz-external"]);
    }

    #[test]
    fn test_downloads_merge() {
        let graph = build(CHAIN, r#"{"a": 100, "b": 0, "unrelated": 7}"#);

        assert_eq!(graph.get("a").unwrap().downloads, Some(100));
        // zero is a known count, not the same as unknown
        assert_eq!(graph.get("b").unwrap().downloads, Some(0));
        assert!(graph.get("b").unwrap().has_downloads());
        assert_eq!(graph.get("c").unwrap().downloads, None);
        assert!(!graph.contains("unrelated"));
    }

    #[test]
    fn test_downloads_reach_synthesized_nodes() {
        let archive_json = r#"{"pkg": {"desc": "x", "deps": {"cl-lib": [0, 5]}}}"#;
        let graph = build(archive_json, r#"{"cl-lib": 999}"#);

        assert_eq!(graph.get("cl-lib").unwrap().downloads, Some(999));
    }

    #[test]
    fn test_node_attributes_from_props() {
        let archive_json = r#"{
            "magit": {
                "desc": "A Git porcelain",
                "deps": null,
                "props": {"authors": ["Jonas Bernoulli"], "keywords": ["git"]}
            },
            "plain": {"desc": "no props", "deps": null}
        }"#;
        let graph = build(archive_json, "{}");

        let magit = graph.get("magit").unwrap();
        assert_eq!(magit.authors.as_ref().unwrap()[0], "Jonas Bernoulli");
        assert_eq!(magit.keywords, vec!["git"]);

        let plain = graph.get("plain").unwrap();
        assert!(plain.authors.is_none());
        assert!(plain.keywords.is_empty());
    }

    #[test]
    fn test_parents_and_children() {
        let graph = build(CHAIN, "{}");

        assert_eq!(graph.parents_of("b"), vec!["a"]);
        assert_eq!(graph.children_of("b"), vec!["c"]);
        assert!(graph.parents_of("a").is_empty());
        assert!(graph.children_of("c").is_empty());
        assert!(graph.parents_of("nonexistent").is_empty());
    }

    #[test]
    fn test_cycles_tolerated() {
        let archive_json = r#"{
            "a": {"desc": "x", "deps": {"b": [1]}},
            "b": {"desc": "x", "deps": {"a": [1]}},
            "c": {"desc": "x", "deps": null}
        }"#;
        let graph = build(archive_json, "{}");

        assert!(graph.has_cycles());
        let cyclic = graph.nodes_in_cycles();
        assert!(cyclic.contains("a"));
        assert!(cyclic.contains("b"));
        assert!(!cyclic.contains("c"));
    }

    #[test]
    fn test_links_iteration() {
        let graph = build(CHAIN, "{}");

        let links: Vec<(&str, &str)> = graph.links().collect();
        assert_eq!(links.len(), 2);
        assert!(links.contains(&("a", "b")));
        assert!(links.contains(&("b", "c")));
    }
}
