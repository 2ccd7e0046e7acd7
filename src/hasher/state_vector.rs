use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::element::{
    element_model::{ElementDescriptor, TagCategory},
    markers::FeatureCatalog,
};
use crate::graph::graph_model::PageRecord;

// ============================================================================
// StateVector — aggregated per-page feature summary
// ============================================================================

/// Canonical element-count keys. Feature maps never grow keys beyond the
/// canonical sets; similarity treats absent keys as 0/false.
pub const COUNT_KEYS: [&str; 6] = ["interactive", "link", "button", "input", "form", "media"];

pub const CONTENT_KEYS: [&str; 4] = ["has_text", "has_images", "has_forms", "has_links"];

pub const STATE_KEYS: [&str; 5] = [
    "has_visible",
    "has_enabled",
    "has_selected",
    "has_checked",
    "has_expanded",
];

pub const ACCESSIBILITY_KEYS: [&str; 3] = ["has_labels", "has_descriptions", "has_hidden"];

/// Aggregated summary of one page's elements: five fixed feature groups,
/// each keyed by a canonical feature name. Built once per page snapshot and
/// never mutated; recomputation produces a new vector.
///
/// BTreeMap keeps key iteration sorted, which makes the serialized form and
/// the vector hash independent of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVector {
    pub element_counts: BTreeMap<String, u32>,
    pub functional_features: BTreeMap<String, bool>,
    pub content_features: BTreeMap<String, bool>,
    pub state_features: BTreeMap<String, bool>,
    pub accessibility_features: BTreeMap<String, bool>,
}

impl StateVector {
    /// Total number of observed elements is not stored here; counts are
    /// per-category. This reports the sum of all category counts.
    pub fn total_count(&self) -> u32 {
        self.element_counts.values().sum()
    }
}

/// Aggregate a page's element descriptors into a `StateVector`.
///
/// One pass over the list: category counts are summed, boolean groups are
/// OR-ed. Order-independent and deterministic — the same descriptor list
/// always yields an identical vector. Functional feature keys come from the
/// catalog only; unrecognized data-markers are ignored.
pub fn compute_state_vector(
    elements: &[ElementDescriptor],
    catalog: &FeatureCatalog,
) -> StateVector {
    let mut counts: BTreeMap<String, u32> =
        COUNT_KEYS.iter().map(|k| (k.to_string(), 0)).collect();

    let mut functional: BTreeMap<String, bool> = catalog
        .functional_markers
        .iter()
        .map(|k| (k.clone(), false))
        .collect();

    let mut content: BTreeMap<String, bool> =
        CONTENT_KEYS.iter().map(|k| (k.to_string(), false)).collect();

    let mut state: BTreeMap<String, bool> =
        STATE_KEYS.iter().map(|k| (k.to_string(), false)).collect();

    let mut accessibility: BTreeMap<String, bool> = ACCESSIBILITY_KEYS
        .iter()
        .map(|k| (k.to_string(), false))
        .collect();

    for el in elements {
        if el.is_interactive() {
            bump(&mut counts, "interactive");
        }
        if el.is_navigation_link() {
            bump(&mut counts, "link");
        }
        if el.tag == TagCategory::Button {
            bump(&mut counts, "button");
        }
        if el.tag == TagCategory::Input || el.is_form_field {
            bump(&mut counts, "input");
        }
        if el.tag == TagCategory::Form {
            bump(&mut counts, "form");
        }
        if el.tag == TagCategory::Media || el.has_image {
            bump(&mut counts, "media");
        }

        for marker in el.data_markers.keys() {
            if let Some(v) = functional.get_mut(marker) {
                *v = true;
            }
        }

        set_if(&mut content, "has_text", el.has_text);
        set_if(&mut content, "has_images", el.has_image);
        set_if(&mut content, "has_forms", el.tag == TagCategory::Form || el.is_form_field);
        set_if(&mut content, "has_links", el.is_navigation_link());

        set_if(&mut state, "has_visible", el.visible);
        set_if(&mut state, "has_enabled", el.enabled);
        set_if(&mut state, "has_selected", el.selected);
        set_if(&mut state, "has_checked", el.checked);
        set_if(&mut state, "has_expanded", el.expanded);

        set_if(&mut accessibility, "has_labels", el.has_label);
        set_if(&mut accessibility, "has_descriptions", el.has_description);
        set_if(&mut accessibility, "has_hidden", el.aria_hidden);
    }

    StateVector {
        element_counts: counts,
        functional_features: functional,
        content_features: content,
        state_features: state,
        accessibility_features: accessibility,
    }
}

/// Attach a computed `StateVector` to every page that lacks one.
///
/// Attach-once: pages that already carry a vector are left untouched, so a
/// vector is never overwritten within one run. Hashing is embarrassingly
/// parallel (no shared mutable state), so pages are processed on the rayon
/// pool; downstream clustering stays single-threaded.
pub fn enrich_state_vectors(nodes: &mut [PageRecord], catalog: &FeatureCatalog) {
    nodes.par_iter_mut().for_each(|page| {
        if page.state_vector.is_none() {
            page.state_vector = Some(compute_state_vector(&page.elements, catalog));
        }
    });
}

fn bump(counts: &mut BTreeMap<String, u32>, key: &str) {
    if let Some(v) = counts.get_mut(key) {
        *v += 1;
    }
}

fn set_if(flags: &mut BTreeMap<String, bool>, key: &str, observed: bool) {
    if observed {
        if let Some(v) = flags.get_mut(key) {
            *v = true;
        }
    }
}
