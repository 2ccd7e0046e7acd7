use crate::{
    cluster::clustering::cluster,
    element::markers::FeatureCatalog,
    error::EngineError,
    graph::{
        analyzer::{identify_gaps, optimization_score, prune, recommend},
        graph_model::CrawlGraph,
    },
    hasher::state_vector::enrich_state_vectors,
    report::report_model::AnalysisReport,
};

pub mod cli;
pub mod cluster;
pub mod element;
pub mod error;
pub mod graph;
pub mod hasher;
pub mod report;
pub mod similarity;

/// Default similarity threshold for functional equivalence.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Options for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Similarity threshold in [0, 1]
    pub threshold: f64,

    /// Recognized functional data-markers
    pub catalog: FeatureCatalog,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            catalog: FeatureCatalog::default(),
        }
    }
}

/// Run the full functional-equivalence pipeline over a frozen crawl
/// snapshot: hash pages into state vectors (in parallel), cluster them,
/// prune the graph to representatives, detect coverage gaps, and score the
/// result.
///
/// The input graph is never mutated; the report carries new values only.
/// Clustering and graph analysis run single-threaded — their determinism
/// depends on processing pages in the caller-supplied order.
pub fn analyze(
    graph: &CrawlGraph,
    options: &AnalysisOptions,
) -> Result<AnalysisReport, EngineError> {
    // ---- Feature hashing (parallel, attach-once) ----
    let mut nodes = graph.nodes.clone();
    enrich_state_vectors(&mut nodes, &options.catalog);

    let enriched = CrawlGraph {
        nodes,
        edges: graph.edges.clone(),
    };

    // ---- Clustering + pruning ----
    let prune_result = prune(&enriched, options.threshold)?;

    // ---- Coverage analysis ----
    let gaps = identify_gaps(&enriched);
    let recommendations = recommend(&gaps);
    let score = optimization_score(&enriched, &prune_result.pruned.nodes);

    Ok(AnalysisReport {
        original_nodes: graph.nodes.len(),
        original_edges: graph.edges.len(),
        threshold: options.threshold,
        pruned: prune_result.pruned,
        clusters: prune_result.clusters,
        gaps,
        recommendations,
        score,
    })
}

/// Cluster a graph's pages without pruning, after parallel vector
/// enrichment. Entry point for the `cluster` subcommand.
pub fn cluster_pages(
    graph: &CrawlGraph,
    options: &AnalysisOptions,
) -> Result<Vec<cluster::cluster_model::Cluster>, EngineError> {
    let mut nodes = graph.nodes.clone();
    enrich_state_vectors(&mut nodes, &options.catalog);
    cluster(&nodes, options.threshold)
}
