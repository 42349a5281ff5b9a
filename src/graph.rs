use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The kind of a lineage node. Selects shape, fill color, and legend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Table,
    View,
    Column,
    EtlTask,
    Dataset,
}

impl NodeKind {
    /// All kinds, in legend order.
    pub const ALL: [NodeKind; 5] = [
        Self::Table,
        Self::View,
        Self::Column,
        Self::EtlTask,
        Self::Dataset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::View => "View",
            Self::Column => "Column",
            Self::EtlTask => "ETL Task",
            Self::Dataset => "Dataset",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Table => "#1677ff",
            Self::View => "#52c41a",
            Self::Column => "#faad14",
            Self::EtlTask => "#722ed1",
            Self::Dataset => "#13c2c2",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// A directed data-flow dependency. Duplicate source/target pairs are
/// permitted and rendered independently.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid lineage payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// An immutable lineage graph as handed over by the data service.
///
/// Edges may reference ids absent from the node set; nothing in this crate
/// is allowed to panic on such an edge, consumers skip it instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineageGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl LineageGraph {
    pub fn from_json(payload: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Nodes that never appear as an edge target, in node-list order.
    /// Cyclic graphs may yield an empty root set; callers treat that as
    /// "everything stays at level 0", not as an error.
    pub fn roots(&self) -> Vec<&str> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.target.as_str()).collect();
        self.nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| !targets.contains(id))
            .collect()
    }

    /// Whether a direct edge connects `a` and `b` in either direction.
    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.edges
            .iter()
            .any(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }
}
