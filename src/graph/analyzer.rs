use std::collections::{BTreeSet, HashMap, HashSet};

use crate::cluster::clustering::cluster;
use crate::element::element_model::TagCategory;
use crate::error::EngineError;
use crate::graph::gap_model::{
    Gap, OptimizationScore, Priority, PruneResult, Recommendation, RecommendationSubject,
    UnexploredPath,
};
use crate::graph::graph_model::{CrawlGraph, PageRecord};

// ============================================================================
// Graph pruning
// ============================================================================

/// Overall score weights: reduction and coverage dominate, connectivity is
/// a minor term (and a weak one, see `connectivity_score`).
const REDUCTION_WEIGHT: f64 = 0.4;
const COVERAGE_WEIGHT: f64 = 0.4;
const CONNECTIVITY_WEIGHT: f64 = 0.2;

/// Prune a crawl graph down to one representative page per functional
/// cluster.
///
/// Every cluster contributes its representative (no cap here); an edge
/// survives only when both endpoints are representatives. The input graph
/// is untouched — the pruned graph is a new value.
pub fn prune(graph: &CrawlGraph, threshold: f64) -> Result<PruneResult, EngineError> {
    let clusters = cluster(&graph.nodes, threshold)?;

    let representatives: Vec<PageRecord> =
        clusters.iter().map(|c| c.representative.clone()).collect();
    let representative_ids: HashSet<&str> =
        representatives.iter().map(|r| r.id.as_str()).collect();

    let edges = graph
        .edges
        .iter()
        .filter(|e| {
            representative_ids.contains(e.from.as_str())
                && representative_ids.contains(e.to.as_str())
        })
        .cloned()
        .collect();

    let reduction_ratio = reduction_ratio(graph.nodes.len(), representatives.len());

    Ok(PruneResult {
        pruned: CrawlGraph {
            nodes: representatives,
            edges,
        },
        clusters,
        reduction_ratio,
    })
}

/// 1 - representatives/original, in [0, 1). Zero exactly when every node
/// formed a singleton cluster (or the graph is empty).
fn reduction_ratio(original: usize, representatives: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    1.0 - representatives as f64 / original as f64
}

// ============================================================================
// Coverage gap detection
// ============================================================================

/// Detect under-explored regions of the graph.
///
/// Three gap kinds, each aggregated into at most one entry:
/// isolated nodes (zero edges), low-connectivity nodes (fewer than two
/// total connections — degree-zero nodes appear here too), and unexplored
/// paths (pages whose link-category element count exceeds twice their
/// outgoing edges).
pub fn identify_gaps(graph: &CrawlGraph) -> Vec<Gap> {
    let mut degree: HashMap<&str, usize> = HashMap::new();
    let mut out_degree: HashMap<&str, usize> = HashMap::new();

    for edge in &graph.edges {
        *degree.entry(edge.from.as_str()).or_insert(0) += 1;
        *degree.entry(edge.to.as_str()).or_insert(0) += 1;
        *out_degree.entry(edge.from.as_str()).or_insert(0) += 1;
    }

    let mut isolated = Vec::new();
    let mut low_connectivity = Vec::new();
    let mut unexplored = Vec::new();

    for node in &graph.nodes {
        let total = *degree.get(node.id.as_str()).unwrap_or(&0);
        let outgoing = *out_degree.get(node.id.as_str()).unwrap_or(&0);

        if total == 0 {
            isolated.push(node.id.clone());
        }
        if total < 2 {
            low_connectivity.push(node.id.clone());
        }

        let potential_links = node
            .elements
            .iter()
            .filter(|el| el.is_navigation_link())
            .count();

        if potential_links > outgoing * 2 {
            unexplored.push(UnexploredPath {
                node: node.id.clone(),
                potential_links,
                explored_links: outgoing,
                surplus: potential_links - outgoing,
            });
        }
    }

    let mut gaps = Vec::new();

    if !isolated.is_empty() {
        gaps.push(Gap::IsolatedNodes {
            count: isolated.len(),
            nodes: isolated,
        });
    }
    if !low_connectivity.is_empty() {
        gaps.push(Gap::LowConnectivity {
            count: low_connectivity.len(),
            nodes: low_connectivity,
        });
    }
    if !unexplored.is_empty() {
        gaps.push(Gap::UnexploredPaths {
            count: unexplored.len(),
            paths: unexplored,
        });
    }

    gaps
}

/// Turn detected gaps into prioritized crawl actions — one recommendation
/// per present gap kind, with a fixed priority mapping.
pub fn recommend(gaps: &[Gap]) -> Vec<Recommendation> {
    gaps.iter()
        .map(|gap| match gap {
            Gap::IsolatedNodes { nodes, count } => Recommendation {
                priority: Priority::High,
                action: "explore_connections".to_string(),
                description: format!(
                    "{} isolated node(s) have no observed navigation; crawl into and out of them",
                    count
                ),
                subject: RecommendationSubject::Nodes(nodes.clone()),
            },
            Gap::LowConnectivity { nodes, count } => Recommendation {
                priority: Priority::Medium,
                action: "increase_connectivity".to_string(),
                description: format!(
                    "{} node(s) have fewer than two connections; revisit to find more transitions",
                    count
                ),
                subject: RecommendationSubject::Nodes(nodes.clone()),
            },
            Gap::UnexploredPaths { paths, count } => Recommendation {
                priority: Priority::High,
                action: "explore_paths".to_string(),
                description: format!(
                    "{} page(s) expose far more links than were followed; schedule their links",
                    count
                ),
                subject: RecommendationSubject::Paths(paths.clone()),
            },
        })
        .collect()
}

// ============================================================================
// Optimization scoring
// ============================================================================

/// Score how well a representative set stands in for the original graph.
///
/// Coverage is the ratio of distinct element tag categories retained by the
/// representatives. The connectivity score is kept exactly as historically
/// defined — distinct representative ids over representative count, capped
/// at 1 — which saturates at 1 whenever ids are unique. It is a known
/// low-information metric; replacing it with a real graph-connectivity
/// measure would silently change downstream scores.
pub fn optimization_score(
    original: &CrawlGraph,
    representatives: &[PageRecord],
) -> OptimizationScore {
    let reduction_ratio = reduction_ratio(original.nodes.len(), representatives.len());

    let original_categories = category_set(&original.nodes);
    let coverage_score = if original_categories.is_empty() {
        1.0
    } else {
        let kept = category_set(representatives)
            .intersection(&original_categories)
            .count();
        kept as f64 / original_categories.len() as f64
    };

    let connectivity_score = if representatives.is_empty() {
        0.0
    } else {
        let distinct_ids: HashSet<&str> = representatives.iter().map(|r| r.id.as_str()).collect();
        (distinct_ids.len() as f64 / representatives.len() as f64).min(1.0)
    };

    let overall_score = REDUCTION_WEIGHT * reduction_ratio
        + COVERAGE_WEIGHT * coverage_score
        + CONNECTIVITY_WEIGHT * connectivity_score;

    OptimizationScore {
        reduction_ratio,
        coverage_score,
        connectivity_score,
        overall_score,
    }
}

fn category_set(pages: &[PageRecord]) -> BTreeSet<TagCategory> {
    pages
        .iter()
        .flat_map(|p| p.elements.iter().map(|el| el.tag))
        .collect()
}
