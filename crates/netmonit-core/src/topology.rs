//! Directed topology graph built from link records.
//!
//! Links are followed strictly source -> target. Only known devices get an
//! adjacency entry, so edges whose source is not in the device inventory are
//! dropped. Duplicate edges are kept; traversal dedupes through its visited set.

use crate::telemetry::{Device, NetworkConnection};
use std::collections::{HashMap, HashSet, VecDeque};

/// Adjacency list keyed by device id
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph<'a> {
    adjacency: HashMap<&'a str, Vec<&'a str>>,
}

/// One newly reached node during breadth-first traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop<'a> {
    /// Id of the node the hop was discovered from
    pub parent: &'a str,
    /// Id of the newly reached node
    pub node: &'a str,
    /// Distance from the start node
    pub depth: usize,
}

impl<'a> TopologyGraph<'a> {
    pub fn build(devices: &'a [Device], connections: &'a [NetworkConnection]) -> Self {
        let mut adjacency: HashMap<&'a str, Vec<&'a str>> = devices
            .iter()
            .map(|d| (d.id.as_str(), Vec::new()))
            .collect();

        for link in connections {
            if let Some(neighbors) = adjacency.get_mut(link.source.as_str()) {
                neighbors.push(link.target.as_str());
            }
        }

        Self { adjacency }
    }

    /// Downstream neighbors in link order
    pub fn neighbors(&self, id: &str) -> &[&'a str] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Breadth-first walk from `start`, yielding every node reached for the
    /// first time. A global visited set makes cycles harmless.
    pub fn bfs(&self, start: &'a str) -> Vec<Hop<'a>> {
        let mut hops = Vec::new();
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<(&'a str, usize)> = VecDeque::new();

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            for &neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, depth + 1));
                    hops.push(Hop {
                        parent: current,
                        node: neighbor,
                        depth: depth + 1,
                    });
                }
            }
        }

        hops
    }
}
