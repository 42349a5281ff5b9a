//! Ring placement: nodes spaced evenly on a circle in input order, with no
//! adjacency consideration.

use super::{LayoutEngine, Point, PositionMap};
use crate::graph::LineageGraph;

pub(super) fn compute(
    engine: &LayoutEngine,
    graph: &LineageGraph,
    width: f64,
    height: f64,
) -> PositionMap {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = width.min(height) / 2.0 - engine.ring_margin;
    let count = graph.nodes.len();

    let mut positions = PositionMap::new();
    for (index, node) in graph.nodes.iter().enumerate() {
        let angle = std::f64::consts::TAU * index as f64 / count as f64;
        positions.insert(
            node.id.clone(),
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin()),
        );
    }
    positions
}
