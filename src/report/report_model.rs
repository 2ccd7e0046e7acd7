use serde::{Deserialize, Serialize};

use crate::cluster::cluster_model::Cluster;
use crate::graph::gap_model::{Gap, OptimizationScore, Recommendation};
use crate::graph::graph_model::CrawlGraph;

// ============================================================================
// Analysis report — aggregates one full pipeline run
// ============================================================================

/// Everything one analysis run produces: the pruned graph, the clusters
/// behind it, detected coverage gaps with recommendations, and the
/// optimization score. Safely serializable; consumed by the console
/// reporter and the JSON output path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Node count of the input graph
    pub original_nodes: usize,

    /// Edge count of the input graph
    pub original_edges: usize,

    /// Similarity threshold the run used
    pub threshold: f64,

    pub pruned: CrawlGraph,
    pub clusters: Vec<Cluster>,
    pub gaps: Vec<Gap>,
    pub recommendations: Vec<Recommendation>,
    pub score: OptimizationScore,
}

impl AnalysisReport {
    /// Number of representative pages the pruned graph kept.
    pub fn representative_count(&self) -> usize {
        self.pruned.nodes.len()
    }
}
