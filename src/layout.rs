pub mod circular;
pub mod force;
pub mod hierarchical;

use crate::graph::LineageGraph;
use std::collections::HashMap;

/// Layout strategy selected by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Hierarchical,
    Circular,
    Force,
}

impl LayoutMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hierarchical" => Some(Self::Hierarchical),
            "circular" => Some(Self::Circular),
            "force" => Some(Self::Force),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::Circular => "circular",
            Self::Force => "force",
        }
    }
}

/// A layout coordinate in canvas space, before the viewport offset is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node id -> position. Ephemeral: fully recomputed on every layout pass,
/// never persisted or partially updated.
pub type PositionMap = HashMap<String, Point>;

/// Margins shared by the layout strategies.
pub struct LayoutEngine {
    pub(crate) band_margin: f64,
    pub(crate) ring_margin: f64,
    pub(crate) scatter_min_radius: f64,
    pub(crate) scatter_max_radius: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            band_margin: 50.0,
            ring_margin: 60.0,
            scatter_min_radius: 50.0,
            scatter_max_radius: 150.0,
        }
    }
}

impl LayoutEngine {
    /// Compute a position for every node. An empty node set yields an empty
    /// map; the caller renders a placeholder instead of drawing.
    pub fn compute(
        &self,
        graph: &LineageGraph,
        mode: LayoutMode,
        width: f64,
        height: f64,
    ) -> PositionMap {
        if graph.nodes.is_empty() {
            return PositionMap::new();
        }
        log::debug!(
            "layout pass: mode={} nodes={} edges={}",
            mode.as_str(),
            graph.nodes.len(),
            graph.edges.len()
        );
        match mode {
            LayoutMode::Hierarchical => hierarchical::compute(self, graph, width, height),
            LayoutMode::Circular => circular::compute(self, graph, width, height),
            LayoutMode::Force => force::compute(self, graph, width, height),
        }
    }
}
