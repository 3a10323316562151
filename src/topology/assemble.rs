//! Fold of per-device link records into a [`TopologyGraph`].
//!
//! Each physical link is normally observed twice, once from each end. Both
//! observations map to the same unordered [`EdgeKey`]; the later one overwrites
//! the edge metadata (last-write-wins). Which side wins therefore depends on
//! corpus order, while the node and edge sets do not.

use crate::config::LinkRecord;
use crate::topology::graph::{EdgeKey, TopologyEdge, TopologyGraph};
use std::collections::BTreeSet;
use std::collections::btree_map::Entry;

#[derive(Debug, Default)]
pub struct TopologyAssembler {
    graph: TopologyGraph,
}

impl TopologyAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: LinkRecord) {
        let label = record.label();
        let LinkRecord {
            source,
            neighbor,
            subnet,
            bandwidth_mbps,
        } = record;

        let key = EdgeKey::new(&source, &neighbor);
        if key.is_self_loop() {
            log::debug!("{}: interface links to itself", source);
        }
        match self.graph.edges.entry(key) {
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(TopologyEdge {
                    key,
                    label,
                    subnet,
                    bandwidth_mbps,
                    observations: 1,
                    observed_by: BTreeSet::from([source.clone()]),
                });
            }
            Entry::Occupied(mut slot) => {
                let edge = slot.get_mut();
                if edge.label != label {
                    log::warn!(
                        "link {} <-> {}: label {:?} from {} replaces {:?}",
                        source,
                        neighbor,
                        label,
                        source,
                        edge.label
                    );
                }
                edge.label = label;
                edge.subnet = subnet;
                edge.bandwidth_mbps = bandwidth_mbps;
                edge.observations += 1;
                edge.observed_by.insert(source.clone());
            }
        }

        self.graph.nodes.insert(source);
        self.graph.nodes.insert(neighbor);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn finalize(self) -> TopologyGraph {
        self.graph
    }
}

/// Fold every device's records, in corpus order, into one graph.
pub fn assemble<D, R>(devices: impl IntoIterator<Item = (D, R)>) -> TopologyGraph
where
    D: AsRef<str>,
    R: IntoIterator<Item = LinkRecord>,
{
    let mut assembler = TopologyAssembler::new();
    for (device, records) in devices {
        let mut links = 0usize;
        for record in records {
            assembler.insert(record);
            links += 1;
        }
        log::debug!(
            "{}: {} link-bearing interfaces, {} devices known",
            device.as_ref(),
            links,
            assembler.node_count()
        );
    }
    assembler.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinkExtractor, NetworkPrefix};
    use pretty_assertions::assert_eq;

    fn rec(source: &str, neighbor: &str, subnet: Option<(&str, &str)>, bw: u64) -> LinkRecord {
        LinkRecord {
            source: source.to_string(),
            neighbor: neighbor.to_string(),
            subnet: subnet.map(|(a, m)| NetworkPrefix::from_address_mask(a, m).unwrap()),
            bandwidth_mbps: bw,
        }
    }

    fn edge_keys(g: &TopologyGraph) -> Vec<(String, String)> {
        g.edges()
            .map(|e| {
                let (a, b) = e.key.endpoints();
                (a.to_string(), b.to_string())
            })
            .collect()
    }

    #[test]
    fn both_sides_collapse_to_one_edge_in_either_order() {
        let ab = rec("A", "B", Some(("10.0.0.1", "255.255.255.252")), 100);
        let ba = rec("B", "A", Some(("10.0.0.2", "255.255.255.252")), 100);

        for order in [vec![ab.clone(), ba.clone()], vec![ba.clone(), ab.clone()]] {
            let mut asm = TopologyAssembler::new();
            for r in order {
                asm.insert(r);
            }
            let g = asm.finalize();
            assert_eq!(g.edge_count(), 1);
            assert_eq!(edge_keys(&g), vec![("A".to_string(), "B".to_string())]);
            assert_eq!(g.edge("B", "A").map(|e| e.observations), Some(2));
            assert!(!g.edge("A", "B").unwrap().is_one_sided());
        }
    }

    #[test]
    fn later_record_overwrites_label() {
        let mut asm = TopologyAssembler::new();
        asm.insert(rec("A", "B", Some(("10.0.0.1", "255.255.255.0")), 1000));
        asm.insert(rec("B", "A", None, 0));
        let g = asm.finalize();

        let edge = g.edge("A", "B").unwrap();
        assert_eq!(edge.label, "\n0 Mbps");
        assert_eq!(edge.subnet, None);
        assert_eq!(edge.bandwidth_mbps, 0);
    }

    #[test]
    fn neighbor_without_own_config_is_still_a_node() {
        let g = assemble([("R1", vec![rec("R1", "R9", None, 10)])]);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["R1", "R9"]);
        assert_eq!(g.degree("R9"), 1);
    }

    #[test]
    fn parallel_interfaces_from_one_side_stay_one_sided() {
        let g = assemble([(
            "R1",
            vec![rec("R1", "R9", None, 100), rec("R1", "R9", None, 1000)],
        )]);
        let edge = g.edge("R1", "R9").unwrap();
        assert_eq!(edge.observations, 2);
        assert_eq!(edge.observed_by, BTreeSet::from(["R1".to_string()]));
        assert!(edge.is_one_sided());
    }

    #[test]
    fn self_loop_is_never_one_sided() {
        let g = assemble([("R1", vec![rec("R1", "R1", None, 0)])]);
        assert!(!g.edge("R1", "R1").unwrap().is_one_sided());
    }

    #[test]
    fn self_link_is_a_loop_edge() {
        let g = assemble([("R1", vec![rec("R1", "R1", None, 0)])]);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 1);
        assert!(g.edge("R1", "R1").unwrap().key.is_self_loop());
        assert_eq!(g.degree("R1"), 2);
    }

    #[test]
    fn device_without_links_is_absent() {
        let g = assemble([("R1", Vec::new()), ("R2", vec![rec("R2", "R3", None, 0)])]);
        assert!(!g.nodes().any(|n| n == "R1"));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn node_set_grows_monotonically_and_is_bounded() {
        let records = vec![
            rec("R1", "R2", None, 0),
            rec("R2", "R1", None, 0),
            rec("R2", "SW1", None, 0),
            rec("SW1", "SW2", None, 0),
            rec("SW2", "SW2", None, 0),
            rec("R3", "R4", None, 0),
        ];

        let mut asm = TopologyAssembler::new();
        let mut prev = 0;
        for (n, r) in records.into_iter().enumerate() {
            asm.insert(r);
            let now = asm.node_count();
            assert!(now >= prev);
            assert!(now <= 2 * (n + 1));
            prev = now;
        }
        assert_eq!(prev, 6);
    }

    #[test]
    fn edge_set_is_order_independent() {
        let records = vec![
            rec("R1", "R2", None, 1),
            rec("R2", "SW1", None, 2),
            rec("SW1", "R2", None, 3),
            rec("R2", "R1", None, 4),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let g1 = assemble([("all", records)]);
        let g2 = assemble([("all", reversed)]);
        assert_eq!(edge_keys(&g1), edge_keys(&g2));
        assert_eq!(g1.nodes().collect::<Vec<_>>(), g2.nodes().collect::<Vec<_>>());
    }

    #[test]
    fn router_switch_scenario() {
        let r1 = "interface Gi0/0\n description link to SW1\n ip address 192.168.1.1 255.255.255.0\n bandwidth 1000\n!\n";
        let sw1 = "interface Gi0/1\n description link to R1\n!\n";
        let ex = LinkExtractor::new().unwrap();

        let r1_last = assemble([("SW1", ex.extract("SW1", sw1)), ("R1", ex.extract("R1", r1))]);
        let sw1_last = assemble([("R1", ex.extract("R1", r1)), ("SW1", ex.extract("SW1", sw1))]);

        for g in [&r1_last, &sw1_last] {
            assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["R1", "SW1"]);
            assert_eq!(g.edge_count(), 1);
        }
        assert_eq!(r1_last.edge("R1", "SW1").unwrap().label, "192.168.1.0/24\n1000 Mbps");
        assert_eq!(sw1_last.edge("R1", "SW1").unwrap().label, "\n0 Mbps");
    }

    #[test]
    fn empty_corpus_yields_empty_graph() {
        let g = assemble(Vec::<(String, Vec<LinkRecord>)>::new());
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }
}
