use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::graph_model::PageRecord;

// ============================================================================
// Cluster data model
// ============================================================================

/// Consensus feature summary for one cluster. Shaped like a `StateVector`
/// except that counts are arithmetic means rather than integers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    pub element_counts: BTreeMap<String, f64>,
    pub functional_features: BTreeMap<String, bool>,
    pub content_features: BTreeMap<String, bool>,
    pub state_features: BTreeMap<String, bool>,
    pub accessibility_features: BTreeMap<String, bool>,
}

/// One functional-equivalence cluster from a single clustering run.
///
/// `members` is non-empty and always contains `representative`. Clusters
/// partition their input page set; a new run produces new cluster values,
/// never updates to old ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: usize,
    pub representative: PageRecord,
    pub members: Vec<PageRecord>,
    pub centroid: Centroid,
    pub size: usize,
}
