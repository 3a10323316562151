use crate::config::NetworkPrefix;
use std::collections::{BTreeMap, BTreeSet};

/// Unordered device pair. Stored with the lexicographically smaller name first
/// so `{A, B}` and `{B, A}` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(String, String);

impl EdgeKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }

    pub fn is_self_loop(&self) -> bool {
        self.0 == self.1
    }
}

/// One physical link. Metadata is that of the most recently folded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyEdge {
    pub key: EdgeKey,
    pub label: String,
    pub subnet: Option<NetworkPrefix>,
    pub bandwidth_mbps: u64,
    /// Number of link records folded into this edge (usually 2, one per side).
    pub observations: u32,
    /// Devices whose dumps declared this link.
    pub observed_by: BTreeSet<String>,
}

impl TopologyEdge {
    /// Only one end declared the link (e.g. the neighbor's dump is missing).
    /// A self-loop has a single end, so it is never one-sided.
    pub fn is_one_sided(&self) -> bool {
        !self.key.is_self_loop() && self.observed_by.len() < 2
    }
}

/// Finished graph handed to layout and rendering. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyGraph {
    pub(crate) nodes: BTreeSet<String>,
    pub(crate) edges: BTreeMap<EdgeKey, TopologyEdge>,
}

impl TopologyGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = &TopologyEdge> {
        self.edges.values()
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<&TopologyEdge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Incident edge count; a self-loop counts twice.
    pub fn degree(&self, name: &str) -> usize {
        self.edges
            .keys()
            .map(|k| {
                let (a, b) = k.endpoints();
                usize::from(a == name) + usize::from(b == name)
            })
            .sum()
    }
}
