use std::collections::{BTreeMap, BTreeSet};

use crate::element::element_model::{ElementDescriptor, TagCategory};
use crate::graph::graph_model::PageRecord;
use crate::hasher::fingerprint::canonicalize_url;
use crate::hasher::state_vector::StateVector;
use crate::similarity::levenshtein::normalized_similarity;

// ============================================================================
// Similarity engine — all scores are in [0, 1] and symmetric
// ============================================================================

/// Tolerance band for count-valued features: minor render differences
/// (one extra button, one missing thumbnail) still count as a match.
const COUNT_TOLERANCE: i64 = 1;

/// Blend weights for page similarity when no state vectors are available.
const URL_WEIGHT: f64 = 0.3;
const HISTOGRAM_WEIGHT: f64 = 0.4;
const FEATURE_WEIGHT: f64 = 0.3;

/// Compare two state vectors feature by feature.
///
/// Every key present in either vector is compared (missing = 0/false):
/// count keys match within the tolerance band, boolean keys match exactly.
/// The score is matched/compared across all five groups combined — groups
/// with more distinct keys proportionally dominate. That un-weighted
/// behavior is load-bearing: clustering thresholds are calibrated against
/// it, so it must not be per-group normalized.
pub fn vector_similarity(a: &StateVector, b: &StateVector) -> f64 {
    let mut matched = 0usize;
    let mut total = 0usize;

    let (m, t) = compare_counts(&a.element_counts, &b.element_counts);
    matched += m;
    total += t;

    for (fa, fb) in [
        (&a.functional_features, &b.functional_features),
        (&a.content_features, &b.content_features),
        (&a.state_features, &b.state_features),
        (&a.accessibility_features, &b.accessibility_features),
    ] {
        let (m, t) = compare_flags(fa, fb);
        matched += m;
        total += t;
    }

    if total == 0 {
        return 1.0;
    }
    matched as f64 / total as f64
}

fn compare_counts(a: &BTreeMap<String, u32>, b: &BTreeMap<String, u32>) -> (usize, usize) {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    let mut matched = 0;

    for key in &keys {
        let va = *a.get(*key).unwrap_or(&0) as i64;
        let vb = *b.get(*key).unwrap_or(&0) as i64;
        if (va - vb).abs() <= COUNT_TOLERANCE {
            matched += 1;
        }
    }

    (matched, keys.len())
}

fn compare_flags(a: &BTreeMap<String, bool>, b: &BTreeMap<String, bool>) -> (usize, usize) {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    let mut matched = 0;

    for key in &keys {
        let va = *a.get(*key).unwrap_or(&false);
        let vb = *b.get(*key).unwrap_or(&false);
        if va == vb {
            matched += 1;
        }
    }

    (matched, keys.len())
}

/// URL similarity: 0 when hostnames differ, otherwise normalized edit
/// distance over the placeholder-normalized paths. Both paths empty → 1.
/// Malformed URLs degrade to the sentinel structure and compare normally.
pub fn url_similarity(url1: &str, url2: &str) -> f64 {
    let s1 = canonicalize_url(url1);
    let s2 = canonicalize_url(url2);

    if s1.hostname != s2.hostname {
        return 0.0;
    }

    normalized_similarity(&s1.path, &s2.path)
}

/// Histogram overlap of element tag categories: sum of per-category minima
/// over sum of per-category maxima. Two empty element lists score 0.
pub fn element_histogram_similarity(
    elements1: &[ElementDescriptor],
    elements2: &[ElementDescriptor],
) -> f64 {
    let h1 = tag_histogram(elements1);
    let h2 = tag_histogram(elements2);

    let categories: BTreeSet<&TagCategory> = h1.keys().chain(h2.keys()).collect();

    let mut min_sum = 0u64;
    let mut max_sum = 0u64;

    for cat in categories {
        let c1 = *h1.get(cat).unwrap_or(&0) as u64;
        let c2 = *h2.get(cat).unwrap_or(&0) as u64;
        min_sum += c1.min(c2);
        max_sum += c1.max(c2);
    }

    if max_sum == 0 {
        return 0.0;
    }
    min_sum as f64 / max_sum as f64
}

/// Count elements by tag category.
pub fn tag_histogram(elements: &[ElementDescriptor]) -> BTreeMap<TagCategory, u32> {
    let mut histogram = BTreeMap::new();
    for el in elements {
        *histogram.entry(el.tag).or_insert(0) += 1;
    }
    histogram
}

/// Equality ratio over the union of keys from both maps. A key missing on
/// one side is compared against the value type's default, preserving the
/// "missing = 0/false" semantics. An empty union scores 1.
pub fn feature_map_similarity<V: Default + PartialEq>(
    map1: &BTreeMap<String, V>,
    map2: &BTreeMap<String, V>,
) -> f64 {
    let keys: BTreeSet<&String> = map1.keys().chain(map2.keys()).collect();
    if keys.is_empty() {
        return 1.0;
    }

    let default = V::default();
    let matched = keys
        .iter()
        .filter(|key| {
            map1.get(**key).unwrap_or(&default) == map2.get(**key).unwrap_or(&default)
        })
        .count();

    matched as f64 / keys.len() as f64
}

/// Presence map of recognized functional markers across a page's elements.
pub fn marker_presence(page: &PageRecord) -> BTreeMap<String, bool> {
    let mut markers = BTreeMap::new();
    for el in &page.elements {
        for key in el.data_markers.keys() {
            markers.insert(key.clone(), true);
        }
    }
    markers
}

/// Overall page similarity.
///
/// When both pages carry a precomputed state vector the vector score is
/// authoritative. Otherwise fall back to a weighted blend of URL structure,
/// element histogram, and functional marker overlap. Symmetric in its
/// arguments either way.
pub fn page_similarity(p1: &PageRecord, p2: &PageRecord) -> f64 {
    if let (Some(v1), Some(v2)) = (&p1.state_vector, &p2.state_vector) {
        return vector_similarity(v1, v2);
    }

    URL_WEIGHT * url_similarity(&p1.url, &p2.url)
        + HISTOGRAM_WEIGHT * element_histogram_similarity(&p1.elements, &p2.elements)
        + FEATURE_WEIGHT * feature_map_similarity(&marker_presence(p1), &marker_presence(p2))
}
