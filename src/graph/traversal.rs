//! Single-direction reachability over the dependency graph.

use petgraph::Direction;
use std::collections::{HashSet, VecDeque};

use super::{DependencyGraph, GraphError};

impl DependencyGraph {
    /// Returns every package reachable from `name` by following dependency
    /// (parent) edges, `name` itself included.
    ///
    /// Fails with [`GraphError::PackageNotFound`] when `name` is absent;
    /// callers outside the filter path should check [`Self::contains`]
    /// first.
    pub fn ancestors_of(&self, name: &str) -> Result<HashSet<String>, GraphError> {
        self.reachable_names(name, Direction::Incoming)
    }

    /// Returns every package reachable from `name` by following dependent
    /// (child) edges, `name` itself included.
    pub fn descendants_of(&self, name: &str) -> Result<HashSet<String>, GraphError> {
        self.reachable_names(name, Direction::Outgoing)
    }

    /// Breadth-first walk in one direction. The visited set is seeded with
    /// the start node and each node is enqueued at most once, so cycles
    /// terminate.
    fn reachable_names(
        &self,
        name: &str,
        direction: Direction,
    ) -> Result<HashSet<String>, GraphError> {
        let start = self
            .index_of(name)
            .ok_or_else(|| GraphError::PackageNotFound(name.to_string()))?;

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, direction) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Ok(visited
            .into_iter()
            .map(|idx| self.graph[idx].name.clone())
            .collect())
    }
}
