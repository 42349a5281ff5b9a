//! Layered DAG placement: nodes are grouped into horizontal bands by their
//! breadth-first distance from the root set.

use super::{LayoutEngine, Point, PositionMap};
use crate::graph::LineageGraph;
use std::collections::{HashMap, VecDeque};

pub(super) fn compute(
    engine: &LayoutEngine,
    graph: &LineageGraph,
    width: f64,
    height: f64,
) -> PositionMap {
    let levels = assign_levels(graph);
    let max_level = levels.values().copied().max().unwrap_or(0);

    // Group into bands, keeping node-list order within each band.
    let mut bands: HashMap<usize, Vec<&str>> = HashMap::new();
    for node in &graph.nodes {
        let level = levels.get(node.id.as_str()).copied().unwrap_or(0);
        bands.entry(level).or_default().push(node.id.as_str());
    }

    let band_height = (height - engine.band_margin * 2.0) / (max_level + 1) as f64;

    let mut positions = PositionMap::new();
    for (level, ids) in &bands {
        let count = ids.len();
        let y = engine.band_margin + *level as f64 * band_height;
        for (index, id) in ids.iter().enumerate() {
            let x = width / (count + 1) as f64 * (index + 1) as f64;
            positions.insert((*id).to_string(), Point::new(x, y));
        }
    }
    positions
}

/// Breadth-first level assignment. Each node takes its level the first time
/// any frontier reaches it and is never revisited, so a node reachable via
/// multiple paths keeps whichever level arrived first (path-order-dependent,
/// not guaranteed shortest). Nodes unreached from any root stay at level 0,
/// as does everything when the root set is empty (cyclic input).
pub(super) fn assign_levels(graph: &LineageGraph) -> HashMap<&str, usize> {
    let mut levels: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    for root in graph.roots() {
        levels.insert(root, 0);
        queue.push_back(root);
    }

    while let Some(id) = queue.pop_front() {
        let level = levels[id];
        for edge in &graph.edges {
            if edge.source != id {
                continue;
            }
            let target = edge.target.as_str();
            // Dangling targets are skipped; visited nodes keep their level.
            if !graph.contains(target) || levels.contains_key(target) {
                continue;
            }
            levels.insert(target, level + 1);
            queue.push_back(target);
        }
    }

    for node in &graph.nodes {
        levels.entry(node.id.as_str()).or_insert(0);
    }
    levels
}
