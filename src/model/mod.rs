//! Render model: combine the assembled graph, layout positions and glyph
//! categories into one serializable view.

use crate::Result;
use crate::glyph::{Classifier, GlyphCategory};
use crate::layout::Positions;
use crate::topology::TopologyGraph;

use anyhow::bail;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub name: String,
    pub category: GlyphCategory,
    pub x: f64,
    pub y: f64,
    pub degree: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub a: String,
    pub b: String,
    /// Two lines: subnet (possibly empty), then bandwidth.
    pub label: String,
    pub subnet: Option<String>,
    pub bandwidth_mbps: u64,

    pub observations: u32,
    pub observed_by: Vec<String>,

    /// Only one end declared the link (e.g. the neighbor's dump is missing).
    pub one_sided: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopologyView {
    pub title: String,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub totals: TotalsView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    pub devices: usize,
    pub links: usize,
    pub routers: usize,
    pub switches: usize,
    pub other: usize,
    pub one_sided_links: usize,
}

/// Build the render view. Every node must have a position.
pub fn build_view(
    graph: &TopologyGraph,
    positions: &Positions,
    classifier: &dyn Classifier,
    title: &str,
) -> Result<TopologyView> {
    let mut totals = TotalsView::default();

    let mut nodes = Vec::with_capacity(graph.node_count());
    for name in graph.nodes() {
        let Some(p) = positions.get(name) else {
            bail!("layout assigned no position to device {}", name);
        };
        let category = classifier.classify(name);
        match category {
            GlyphCategory::Router => totals.routers += 1,
            GlyphCategory::Switch => totals.switches += 1,
            GlyphCategory::Fallback => totals.other += 1,
        }
        nodes.push(NodeView {
            name: name.to_string(),
            category,
            x: p.x,
            y: p.y,
            degree: graph.degree(name),
        });
    }

    let edges: Vec<EdgeView> = graph
        .edges()
        .map(|e| {
            let (a, b) = e.key.endpoints();
            EdgeView {
                a: a.to_string(),
                b: b.to_string(),
                label: e.label.clone(),
                subnet: e.subnet.map(|s| s.to_string()),
                bandwidth_mbps: e.bandwidth_mbps,
                observations: e.observations,
                observed_by: e.observed_by.iter().cloned().collect(),
                one_sided: e.is_one_sided(),
            }
        })
        .collect();

    totals.devices = nodes.len();
    totals.links = edges.len();
    totals.one_sided_links = edges.iter().filter(|e| e.one_sided).count();

    Ok(TopologyView {
        title: title.to_string(),
        nodes,
        edges,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkRecord;
    use crate::glyph::NamePrefixClassifier;
    use crate::layout::{Layout, SpringLayout};
    use crate::topology::assemble;
    use pretty_assertions::assert_eq;

    fn link(a: &str, b: &str) -> LinkRecord {
        LinkRecord {
            source: a.to_string(),
            neighbor: b.to_string(),
            subnet: None,
            bandwidth_mbps: 100,
        }
    }

    #[test]
    fn totals_and_categories() {
        let g = assemble([
            ("R1", vec![link("R1", "SW1"), link("R1", "FW1")]),
            ("SW1", vec![link("SW1", "R1")]),
        ]);
        let pos = SpringLayout::default().positions(&g);
        let view = build_view(&g, &pos, &NamePrefixClassifier, "t").unwrap();

        assert_eq!(
            view.totals,
            TotalsView {
                devices: 3,
                links: 2,
                routers: 1,
                switches: 1,
                other: 1,
                one_sided_links: 1,
            }
        );
        let categories: Vec<_> = view.nodes.iter().map(|n| (n.name.as_str(), n.category)).collect();
        assert_eq!(
            categories,
            vec![
                ("FW1", GlyphCategory::Fallback),
                ("R1", GlyphCategory::Router),
                ("SW1", GlyphCategory::Switch),
            ]
        );
        assert_eq!(view.nodes[1].degree, 2);
    }

    #[test]
    fn one_sided_counts_reporting_devices_not_records() {
        let g = assemble([
            ("R1", vec![link("R1", "R9"), link("R1", "R9")]),
            ("R2", vec![link("R2", "R2")]),
        ]);
        let pos = SpringLayout::default().positions(&g);
        let view = build_view(&g, &pos, &NamePrefixClassifier, "t").unwrap();

        let flags: Vec<_> = view
            .edges
            .iter()
            .map(|e| (e.a.as_str(), e.b.as_str(), e.one_sided))
            .collect();
        assert_eq!(flags, vec![("R1", "R9", true), ("R2", "R2", false)]);
        assert_eq!(view.totals.one_sided_links, 1);
        assert_eq!(view.edges[0].observed_by, vec!["R1".to_string()]);
    }

    #[test]
    fn missing_position_is_an_error() {
        let g = assemble([("R1", vec![link("R1", "R2")])]);
        let err = build_view(&g, &Positions::new(), &NamePrefixClassifier, "t").unwrap_err();
        assert!(err.to_string().contains("no position"));
    }

    #[test]
    fn serializes_category_in_lowercase() {
        let g = assemble([("SW1", vec![link("SW1", "SW2")])]);
        let pos = SpringLayout::default().positions(&g);
        let view = build_view(&g, &pos, &NamePrefixClassifier, "t").unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["nodes"][0]["category"], "switch");
        assert_eq!(json["edges"][0]["label"], "\n100 Mbps");
    }
}
