use serde::{Deserialize, Serialize};

use crate::element::element_model::ElementDescriptor;
use crate::hasher::state_vector::StateVector;

// ============================================================================
// Crawl graph data model — the single JSON interchange format
// ============================================================================

/// One observed page. Owned by the crawl session; the core reads it and may
/// attach a computed `state_vector` (attach-once per run), nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: String,
    pub url: String,
    pub title: String,

    /// Snapshot time, epoch milliseconds
    pub timestamp: u64,

    /// Finalized element observations from the instrumentation layer
    #[serde(default)]
    pub elements: Vec<ElementDescriptor>,

    /// Lazily computed feature summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_vector: Option<StateVector>,

    /// Opaque screenshot references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
}

/// A directed navigation edge between two pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,

    /// Transition kind as reported by the crawler (e.g. "link", "form")
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Directed graph of discovered pages and observed navigations. May contain
/// cycles, self-loops, and duplicate edges; the core enforces no uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlGraph {
    pub nodes: Vec<PageRecord>,
    pub edges: Vec<Edge>,
}

impl CrawlGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&PageRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
