use std::collections::{BTreeMap, BTreeSet};

use crate::cluster::cluster_model::{Centroid, Cluster};
use crate::error::{validate_threshold, EngineError};
use crate::graph::graph_model::PageRecord;
use crate::hasher::state_vector::StateVector;
use crate::similarity::engine::page_similarity;

// ============================================================================
// Greedy functional-equivalence clustering
// ============================================================================

/// Group pages into functional-equivalence clusters.
///
/// Single-pass greedy assignment, deliberately order-dependent and not
/// globally optimal: pages are scanned in input order, each unassigned page
/// seeds a new cluster, and every later unassigned page joins it when its
/// similarity *to the seed* (not a running centroid) reaches the threshold.
/// Downstream consumers rely on this exact cost/runtime tradeoff; O(n²)
/// pairwise comparisons are acceptable at crawl-graph sizes in the low
/// thousands.
pub fn cluster(pages: &[PageRecord], threshold: f64) -> Result<Vec<Cluster>, EngineError> {
    validate_threshold(threshold)?;

    let mut clusters = Vec::new();
    let mut assigned = vec![false; pages.len()];

    for i in 0..pages.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;

        let seed = &pages[i];
        let mut members = vec![seed.clone()];

        for j in (i + 1)..pages.len() {
            if assigned[j] {
                continue;
            }
            if page_similarity(seed, &pages[j]) >= threshold {
                assigned[j] = true;
                members.push(pages[j].clone());
            }
        }

        let centroid = centroid(&members);
        let representative = select_representative(&members, &centroid);
        let size = members.len();

        clusters.push(Cluster {
            id: clusters.len(),
            representative,
            members,
            centroid,
            size,
        });
    }

    Ok(clusters)
}

/// Consensus summary across cluster members.
///
/// Count keys average arithmetically over *all* members — a page lacking a
/// key (or a state vector entirely) contributes 0. Boolean keys become true
/// only on a strict majority; an exact tie resolves to false.
pub fn centroid(members: &[PageRecord]) -> Centroid {
    if members.is_empty() {
        return Centroid::default();
    }

    let vectors: Vec<&StateVector> = members
        .iter()
        .filter_map(|m| m.state_vector.as_ref())
        .collect();

    let member_count = members.len() as f64;

    let mut count_keys: BTreeSet<&String> = BTreeSet::new();
    let mut flag_keys: [BTreeSet<&String>; 4] = Default::default();

    for v in &vectors {
        count_keys.extend(v.element_counts.keys());
        flag_keys[0].extend(v.functional_features.keys());
        flag_keys[1].extend(v.content_features.keys());
        flag_keys[2].extend(v.state_features.keys());
        flag_keys[3].extend(v.accessibility_features.keys());
    }

    let element_counts: BTreeMap<String, f64> = count_keys
        .iter()
        .map(|key| {
            let sum: f64 = vectors
                .iter()
                .map(|v| *v.element_counts.get(*key).unwrap_or(&0) as f64)
                .sum();
            ((*key).clone(), sum / member_count)
        })
        .collect();

    let majority = |group: usize, pick: fn(&StateVector) -> &BTreeMap<String, bool>| {
        flag_keys[group]
            .iter()
            .map(|key| {
                let true_count = vectors
                    .iter()
                    .filter(|v| *pick(v).get(*key).unwrap_or(&false))
                    .count();
                ((*key).clone(), true_count as f64 > member_count / 2.0)
            })
            .collect::<BTreeMap<String, bool>>()
    };

    Centroid {
        element_counts,
        functional_features: majority(0, |v| &v.functional_features),
        content_features: majority(1, |v| &v.content_features),
        state_features: majority(2, |v| &v.state_features),
        accessibility_features: majority(3, |v| &v.accessibility_features),
    }
}

/// Similarity between a member's state vector and a cluster centroid: same
/// matched/compared scoring as `vector_similarity`, with the tolerance band
/// applied to the fractional centroid means.
pub fn centroid_similarity(vector: &StateVector, centroid: &Centroid) -> f64 {
    let mut matched = 0usize;
    let mut total = 0usize;

    let count_keys: BTreeSet<&String> = vector
        .element_counts
        .keys()
        .chain(centroid.element_counts.keys())
        .collect();

    for key in &count_keys {
        let va = *vector.element_counts.get(*key).unwrap_or(&0) as f64;
        let vb = *centroid.element_counts.get(*key).unwrap_or(&0.0);
        if (va - vb).abs() <= 1.0 {
            matched += 1;
        }
    }
    total += count_keys.len();

    for (fa, fb) in [
        (&vector.functional_features, &centroid.functional_features),
        (&vector.content_features, &centroid.content_features),
        (&vector.state_features, &centroid.state_features),
        (
            &vector.accessibility_features,
            &centroid.accessibility_features,
        ),
    ] {
        let keys: BTreeSet<&String> = fa.keys().chain(fb.keys()).collect();
        for key in &keys {
            if fa.get(*key).unwrap_or(&false) == fb.get(*key).unwrap_or(&false) {
                matched += 1;
            }
        }
        total += keys.len();
    }

    if total == 0 {
        return 1.0;
    }
    matched as f64 / total as f64
}

/// Pick the member closest to the centroid.
///
/// Single member returns itself. Ties break to the earliest member, so the
/// choice is stable and deterministic across runs. Members without a state
/// vector score 0 against the centroid.
pub fn select_representative(members: &[PageRecord], centroid: &Centroid) -> PageRecord {
    if members.len() == 1 {
        return members[0].clone();
    }

    let mut best = &members[0];
    let mut best_score = representative_score(&members[0], centroid);

    for member in &members[1..] {
        let score = representative_score(member, centroid);
        if score > best_score {
            best = member;
            best_score = score;
        }
    }

    best.clone()
}

fn representative_score(member: &PageRecord, centroid: &Centroid) -> f64 {
    member
        .state_vector
        .as_ref()
        .map(|v| centroid_similarity(v, centroid))
        .unwrap_or(0.0)
}

/// Collect up to `max_pages` representatives, largest clusters first.
///
/// The sort is stable, so clusters of equal size keep their creation order.
pub fn select_representatives(clusters: &[Cluster], max_pages: usize) -> Vec<PageRecord> {
    let mut ordered: Vec<&Cluster> = clusters.iter().collect();
    ordered.sort_by_key(|c| std::cmp::Reverse(c.size));

    ordered
        .iter()
        .take(max_pages)
        .map(|c| c.representative.clone())
        .collect()
}
