use serde::{Deserialize, Serialize};

use crate::cluster::cluster_model::Cluster;
use crate::graph::graph_model::CrawlGraph;

// ============================================================================
// Coverage gaps and recommendations
// ============================================================================

/// A node whose page exposes more link-category elements than the crawler
/// has followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnexploredPath {
    pub node: String,
    pub potential_links: usize,
    pub explored_links: usize,
    /// potential_links - explored_links
    pub surplus: usize,
}

/// A detected deficiency in crawl coverage. Each kind is reported at most
/// once per analysis, aggregating every offending node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gap {
    /// Nodes with no edges at all, in or out
    IsolatedNodes { nodes: Vec<String>, count: usize },

    /// Nodes with fewer than two total connections
    LowConnectivity { nodes: Vec<String>, count: usize },

    /// Nodes whose link-rich pages have barely been followed
    UnexploredPaths {
        paths: Vec<UnexploredPath>,
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// What a recommendation points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSubject {
    Nodes(Vec<String>),
    Paths(Vec<UnexploredPath>),
}

/// A prioritized crawl action derived from one gap kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub description: String,
    pub subject: RecommendationSubject,
}

/// Result of pruning a crawl graph to cluster representatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneResult {
    pub pruned: CrawlGraph,
    pub clusters: Vec<Cluster>,
    pub reduction_ratio: f64,
}

/// How well the pruned graph stands in for the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationScore {
    pub reduction_ratio: f64,
    pub coverage_score: f64,
    pub connectivity_score: f64,
    pub overall_score: f64,
}
