use crate::graph::{DirectedGraph, Edge};
use crate::weight::scalar::ScalarWeight;
use crate::weight::weigher::EdgeWeigher;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use std::hash::{Hash, Hasher};

/// A directed link between two numbered nodes, carrying a nominal cost.
///
/// Identity (equality and hash) covers only the endpoints: two links between
/// the same pair of nodes are the same link regardless of cost.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub src: u32,
    pub dst: u32,
    pub cost: OrderedFloat<f64>,
}

impl Link {
    pub fn new(src: u32, dst: u32, cost: f64) -> Self {
        Link {
            src,
            dst,
            cost: OrderedFloat(cost),
        }
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src && self.dst == other.dst
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.src.hash(state);
        self.dst.hash(state);
    }
}

impl Edge<u32> for Link {
    fn src(&self) -> &u32 {
        &self.src
    }

    fn dst(&self) -> &u32 {
        &self.dst
    }
}

/// Weigher reading each link's nominal cost
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkCostWeigher;

impl EdgeWeigher<u32, Link> for LinkCostWeigher {
    type W = ScalarWeight;

    fn weight(&self, edge: &Link) -> ScalarWeight {
        ScalarWeight::new(edge.cost.0)
    }

    fn initial_weight(&self) -> ScalarWeight {
        ScalarWeight::zero()
    }

    fn non_viable_weight(&self) -> ScalarWeight {
        ScalarWeight::non_viable()
    }
}

/// Generates a bidirectional ring of n nodes with unit link costs.
///
/// Every node pair has exactly two link-disjoint (and node-disjoint) routes,
/// which makes rings the smallest interesting protection-path topology.
pub fn generate_ring(n: u32) -> DirectedGraph<u32, Link> {
    assert!(n >= 3, "a ring needs at least three nodes");

    let mut links = Vec::new();
    for i in 0..n {
        let next = (i + 1) % n;
        links.push(Link::new(i, next, 1.0));
        links.push(Link::new(next, i, 1.0));
    }

    DirectedGraph::new(0..n, links)
}

/// Generates a rectangular grid with unit costs and bidirectional links
pub fn generate_grid(width: u32, height: u32) -> DirectedGraph<u32, Link> {
    let mut links = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let node = y * width + x;
            if x + 1 < width {
                links.push(Link::new(node, node + 1, 1.0));
                links.push(Link::new(node + 1, node, 1.0));
            }
            if y + 1 < height {
                links.push(Link::new(node, node + width, 1.0));
                links.push(Link::new(node + width, node, 1.0));
            }
        }
    }

    DirectedGraph::new(0..width * height, links)
}

/// Generates a random geometric mesh: n nodes placed uniformly in the unit
/// square, bidirectionally linked when within `radius`, link cost equal to
/// the Euclidean distance. Seeded for reproducibility.
pub fn generate_geometric(n: u32, radius: f64, seed: u64) -> DirectedGraph<u32, Link> {
    let mut rng = StdRng::seed_from_u64(seed);

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    let mut links = Vec::new();
    for i in 0..n as usize {
        for j in 0..n as usize {
            if i == j {
                continue;
            }
            let dx = points[i].0 - points[j].0;
            let dy = points[i].1 - points[j].1;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= radius {
                links.push(Link::new(i as u32, j as u32, dist));
            }
        }
    }

    DirectedGraph::new(0..n, links)
}
