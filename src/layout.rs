//! Planar position assignment for the topology graph.
//!
//! [`SpringLayout`] is a Fruchterman-Reingold force-directed placement:
//! every pair of nodes repels, linked nodes attract, and a cooling temperature
//! caps how far a node may move per iteration. Initial positions come from a
//! seeded RNG so a given corpus always produces the same picture.

use crate::topology::TopologyGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub type Positions = BTreeMap<String, Point>;

pub trait Layout {
    fn positions(&self, graph: &TopologyGraph) -> Positions;
}

#[derive(Debug, Clone, Copy)]
pub struct SpringLayout {
    pub iterations: usize,
    pub seed: u64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
        }
    }
}

const MIN_DISTANCE: f64 = 0.01;

impl Layout for SpringLayout {
    fn positions(&self, graph: &TopologyGraph) -> Positions {
        let names: Vec<&str> = graph.nodes().collect();
        let n = names.len();
        match n {
            0 => return Positions::new(),
            1 => {
                return Positions::from([(names[0].to_string(), Point { x: 0.0, y: 0.0 })]);
            }
            _ => {}
        }

        let index: BTreeMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();
        let mut adjacent = BTreeSet::new();
        for edge in graph.edges() {
            let (a, b) = edge.key.endpoints();
            if let (Some(&i), Some(&j)) = (index.get(a), index.get(b)) {
                if i != j {
                    adjacent.insert((i, j));
                    adjacent.insert((j, i));
                }
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pos: Vec<(f64, f64)> = (0..n).map(|_| (rng.r#gen(), rng.r#gen())).collect();

        // Optimal pairwise distance for a unit area.
        let k = (1.0 / n as f64).sqrt();
        let mut temperature = 0.1;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for _ in 0..self.iterations {
            let mut disp = vec![(0.0f64, 0.0f64); n];
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let d = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let attraction = if adjacent.contains(&(i, j)) { d / k } else { 0.0 };
                    let force = k * k / (d * d) - attraction;
                    disp[i].0 += dx * force;
                    disp[i].1 += dy * force;
                }
            }

            for (p, (dx, dy)) in pos.iter_mut().zip(disp) {
                let len = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                p.0 += dx * temperature / len;
                p.1 += dy * temperature / len;
            }
            temperature -= cooling;
        }

        rescale(&mut pos);

        names
            .into_iter()
            .zip(pos)
            .map(|(name, (x, y))| (name.to_string(), Point { x, y }))
            .collect()
    }
}

/// Center on the origin and scale so the largest coordinate magnitude is 1.
fn rescale(pos: &mut [(f64, f64)]) {
    let n = pos.len() as f64;
    let (cx, cy) = pos
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (cx, cy) = (cx / n, cy / n);

    let mut extent = 0.0f64;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        extent = extent.max(p.0.abs()).max(p.1.abs());
    }
    if extent > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= extent;
            p.1 /= extent;
        }
    }
}
