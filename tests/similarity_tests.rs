use std::collections::BTreeMap;

use page_equivalence::element::markers::FeatureCatalog;
use page_equivalence::hasher::state_vector::compute_state_vector;
use page_equivalence::similarity::engine::{
    element_histogram_similarity, feature_map_similarity, page_similarity, url_similarity,
    vector_similarity,
};
use page_equivalence::similarity::levenshtein::{levenshtein, normalized_similarity};

use crate::common::fixtures::{button, hashed_page, link, product_page, with_marker};

mod common;

// ============================================================================
// Levenshtein
// ============================================================================

#[test]
fn levenshtein_basics() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", ""), 3);
    assert_eq!(levenshtein("same", "same"), 0);
}

#[test]
fn normalized_similarity_of_two_empty_strings_is_one() {
    assert_eq!(normalized_similarity("", ""), 1.0);
}

// ============================================================================
// Vector similarity
// ============================================================================

#[test]
fn vector_similarity_identity_and_symmetry() {
    let catalog = FeatureCatalog::default();
    let a = compute_state_vector(&[button(), link()], &catalog);
    let b = compute_state_vector(&[button(), button(), button(), link()], &catalog);

    assert_eq!(vector_similarity(&a, &a), 1.0, "Self-similarity is 1");
    assert_eq!(
        vector_similarity(&a, &b),
        vector_similarity(&b, &a),
        "Similarity must be symmetric"
    );

    let score = vector_similarity(&a, &b);
    assert!((0.0..=1.0).contains(&score), "Score out of bounds: {}", score);
}

#[test]
fn count_differences_within_tolerance_still_match() {
    let catalog = FeatureCatalog::default();
    let two = compute_state_vector(&[button(), button()], &catalog);
    let three = compute_state_vector(&[button(), button(), button()], &catalog);
    let five = compute_state_vector(&vec![button(); 5], &catalog);

    assert_eq!(
        vector_similarity(&two, &three),
        1.0,
        "A count delta of 1 is within the render-noise tolerance band"
    );
    assert!(
        vector_similarity(&two, &five) < 1.0,
        "A count delta of 3 must not match"
    );
}

// ============================================================================
// URL similarity
// ============================================================================

#[test]
fn url_similarity_is_zero_across_hostnames() {
    assert_eq!(
        url_similarity("https://a.example.com/x", "https://b.example.com/x"),
        0.0
    );
}

#[test]
fn url_similarity_normalizes_ids_away() {
    let score = url_similarity(
        "https://shop.example.com/product/123",
        "https://shop.example.com/product/456",
    );
    assert_eq!(score, 1.0, "Both paths normalize to product/{{id}}");
}

#[test]
fn malformed_urls_share_the_sentinel_structure() {
    // Both degrade to hostname "unknown" with empty paths; analysis proceeds
    assert_eq!(url_similarity("%%%", ":::"), 1.0);
}

// ============================================================================
// Histogram similarity
// ============================================================================

#[test]
fn histogram_similarity_is_min_over_max() {
    let left = vec![button(), button(), link()];
    let right = vec![button(), link(), link()];

    // button: min 1 / max 2, link: min 1 / max 2 -> 2/4
    assert_eq!(element_histogram_similarity(&left, &right), 0.5);
}

#[test]
fn histogram_similarity_of_two_empty_pages_is_zero() {
    assert_eq!(element_histogram_similarity(&[], &[]), 0.0);
}

// ============================================================================
// Feature map similarity
// ============================================================================

#[test]
fn missing_keys_compare_against_defaults() {
    let mut present = BTreeMap::new();
    present.insert("cart".to_string(), true);

    let empty: BTreeMap<String, bool> = BTreeMap::new();

    assert_eq!(
        feature_map_similarity(&present, &empty),
        0.0,
        "true vs missing(false) is a mismatch"
    );

    let mut explicit_false = BTreeMap::new();
    explicit_false.insert("cart".to_string(), false);
    assert_eq!(
        feature_map_similarity(&explicit_false, &empty),
        1.0,
        "false vs missing(false) matches"
    );
}

// ============================================================================
// Page similarity
// ============================================================================

#[test]
fn templated_product_pages_blend_to_full_similarity() {
    // Spec scenario: identical elements, same hostname, ids differ only in
    // the numeric segment. No state vectors -> weighted blend.
    let p1 = product_page("p1", "https://shop.example.com/product/123");
    let p2 = product_page("p2", "https://shop.example.com/product/456");

    let score = page_similarity(&p1, &p2);
    assert!(
        (score - 1.0).abs() < 1e-9,
        "0.3*1 + 0.4*1 + 0.3*1 should be 1.0, got {}",
        score
    );
}

#[test]
fn page_similarity_is_symmetric_without_vectors() {
    let p1 = product_page("p1", "https://shop.example.com/product/123");
    let p2 = hashed_page(
        "p2",
        "https://shop.example.com/cart",
        vec![with_marker(button(), "checkout")],
    );
    // One page has a vector, one does not -> still the blended path
    assert_eq!(page_similarity(&p1, &p2), page_similarity(&p2, &p1));
}

#[test]
fn precomputed_vectors_take_priority_over_the_blend() {
    // Same elements but wildly different URLs: the vector path ignores URLs
    let p1 = hashed_page("p1", "https://a.example.com/x", vec![button(), link()]);
    let p2 = hashed_page("p2", "https://b.example.com/y/z", vec![button(), link()]);

    assert_eq!(
        page_similarity(&p1, &p2),
        1.0,
        "Identical vectors dominate regardless of URL"
    );
}
