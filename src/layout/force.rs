//! Scatter placement around the canvas center. This is a cosmetic spread,
//! not a force simulation: each node gets a pseudo-random angle and a radius
//! between the engine's scatter bounds. The generator is seeded from the
//! node-id set so identical input always produces identical output.

use super::{LayoutEngine, Point, PositionMap};
use crate::graph::LineageGraph;
use std::hash::{DefaultHasher, Hash, Hasher};

pub(super) fn compute(
    engine: &LayoutEngine,
    graph: &LineageGraph,
    width: f64,
    height: f64,
) -> PositionMap {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let mut rng = XorShift::new(seed_from_ids(graph));
    let radius_span = engine.scatter_max_radius - engine.scatter_min_radius;

    let mut positions = PositionMap::new();
    for node in &graph.nodes {
        let angle = rng.next_f64() * std::f64::consts::TAU;
        let radius = engine.scatter_min_radius + rng.next_f64() * radius_span;
        positions.insert(
            node.id.clone(),
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin()),
        );
    }
    positions
}

fn seed_from_ids(graph: &LineageGraph) -> u64 {
    let mut hasher = DefaultHasher::new();
    for node in &graph.nodes {
        node.id.hash(&mut hasher);
    }
    // xorshift must not start at zero.
    hasher.finish() | 1
}

/// xorshift64*, small enough that pulling in a rand crate is not warranted.
struct XorShift {
    state: u64,
}

impl XorShift {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;

    fn graph(ids: &[&str]) -> LineageGraph {
        let nodes: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id": "{id}", "name": "{id}", "type": "table"}}"#))
            .collect();
        LineageGraph::from_json(&format!(
            r#"{{"nodes": [{}], "edges": []}}"#,
            nodes.join(",")
        ))
        .unwrap()
    }

    #[test]
    fn test_scatter_stays_within_radius_bounds() {
        let engine = LayoutEngine::default();
        let positions = compute(&engine, &graph(&["a", "b", "c", "d", "e"]), 600.0, 600.0);
        for p in positions.values() {
            let d = ((p.x - 300.0).powi(2) + (p.y - 300.0).powi(2)).sqrt();
            assert!(d >= 50.0 - 1e-9 && d <= 150.0 + 1e-9, "distance {d}");
        }
    }

    #[test]
    fn test_seed_is_stable_for_same_ids() {
        let engine = LayoutEngine::default();
        let first = compute(&engine, &graph(&["a", "b"]), 400.0, 400.0);
        let second = compute(&engine, &graph(&["a", "b"]), 400.0, 400.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_ids_scatter_differently() {
        let engine = LayoutEngine::default();
        let first = compute(&engine, &graph(&["a", "b"]), 400.0, 400.0);
        let second = compute(&engine, &graph(&["x", "y"]), 400.0, 400.0);
        let same = first["a"] == second["x"] && first["b"] == second["y"];
        assert!(!same);
    }

    #[test]
    fn test_xorshift_uniform_range() {
        let mut rng = XorShift::new(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
