use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::hasher::state_vector::StateVector;

// ============================================================================
// URL structure
// ============================================================================

/// Canonicalized URL shape: hostname plus a placeholder-normalized path.
/// Numeric path segments collapse to `{id}` and long hex-like segments to
/// `{uuid}`, so `/product/123` and `/product/456` share one structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStructure {
    pub hostname: String,
    pub path: String,
    pub has_query: bool,
    pub has_fragment: bool,
}

impl UrlStructure {
    /// Sentinel for unparseable input. Callers must tolerate sentinel
    /// fingerprints; a bad URL never aborts analysis of the graph.
    pub fn unknown() -> Self {
        UrlStructure {
            hostname: "unknown".to_string(),
            path: String::new(),
            has_query: false,
            has_fragment: false,
        }
    }
}

/// Parse and canonicalize a URL. Malformed input degrades to the sentinel
/// structure rather than propagating an error.
pub fn canonicalize_url(raw: &str) -> UrlStructure {
    let parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(_) => return UrlStructure::unknown(),
    };

    let hostname = match parsed.host_str() {
        Some(h) => h.to_string(),
        None => return UrlStructure::unknown(),
    };

    UrlStructure {
        hostname,
        path: normalize_path(parsed.path()),
        has_query: parsed.query().is_some(),
        has_fragment: parsed.fragment().is_some(),
    }
}

/// Replace purely-numeric path segments with `{id}` and 8+ character
/// hex-like segments with `{uuid}`. Leading/trailing slashes are dropped.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            if segment.chars().all(|c| c.is_ascii_digit()) {
                "{id}"
            } else if is_hex_like(segment) {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hex_like(segment: &str) -> bool {
    segment.len() >= 8
        && segment
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-')
}

// ============================================================================
// Title keywords
// ============================================================================

const STOP_WORDS: [&str; 24] = [
    "a", "an", "the", "and", "or", "but", "of", "to", "in", "on", "for", "with", "at", "by",
    "from", "is", "are", "was", "were", "be", "this", "that", "it", "as",
];

/// Reduce a title to at most 5 lowercase, punctuation-stripped,
/// stop-word-filtered tokens, preserving original order.
pub fn title_keywords(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(&w.as_str()))
        .take(5)
        .collect()
}

// ============================================================================
// Fingerprint
// ============================================================================

/// Composite, time-independent page identity.
///
/// `vector_hash`, `url_structure`, and `title_keywords` are the
/// identity-bearing fields; `element_count`, `functional_features`, and
/// `captured_at` are metadata and excluded from equality and hashing. Two
/// pages with identical observed features and URL structure compare equal
/// no matter when they were captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprint {
    pub vector_hash: String,
    pub url_structure: UrlStructure,
    pub title_keywords: Vec<String>,
    pub element_count: u32,
    pub functional_features: BTreeMap<String, bool>,
    /// Capture time, epoch milliseconds. Metadata only.
    pub captured_at: u64,
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.vector_hash == other.vector_hash
            && self.url_structure == other.url_structure
            && self.title_keywords == other.title_keywords
    }
}

impl Eq for Fingerprint {}

impl Hash for Fingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vector_hash.hash(state);
        self.url_structure.hash(state);
        self.title_keywords.hash(state);
    }
}

/// Derive a page fingerprint from its state vector, URL, and title.
pub fn fingerprint(vector: &StateVector, url: &str, title: &str) -> Fingerprint {
    let captured_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    Fingerprint {
        vector_hash: vector_hash(vector),
        url_structure: canonicalize_url(url),
        title_keywords: title_keywords(title),
        element_count: vector.total_count(),
        functional_features: vector.functional_features.clone(),
        captured_at,
    }
}

/// Stable digest over the vector's sorted-key serialization.
///
/// The feature maps are BTreeMaps, so iteration is already sorted by key;
/// two structurally-equal vectors always serialize — and hash — identically
/// regardless of how they were built.
pub fn vector_hash(vector: &StateVector) -> String {
    use sha1::{Digest, Sha1};

    let mut canonical = String::new();

    canonical.push_str("counts:");
    for (k, v) in &vector.element_counts {
        canonical.push_str(&format!("{}={};", k, v));
    }
    for (group, map) in [
        ("functional", &vector.functional_features),
        ("content", &vector.content_features),
        ("state", &vector.state_features),
        ("accessibility", &vector.accessibility_features),
    ] {
        canonical.push_str(&format!("|{}:", group));
        for (k, v) in map {
            canonical.push_str(&format!("{}={};", k, v));
        }
    }

    let mut hasher = Sha1::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}
