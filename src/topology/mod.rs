//! Topology model: deduplicated, undirected device graph built from link records.

pub mod assemble;
pub mod graph;

pub use assemble::assemble;
pub use graph::TopologyGraph;
