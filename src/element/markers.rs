use serde::{Deserialize, Serialize};

// ============================================================================
// Functional marker catalog
// ============================================================================

/// Versioned enumeration of the data-markers the Feature Hasher recognizes.
///
/// The marker set is configuration, not compiled-in literals: loading a
/// different catalog changes which functional features appear in every
/// `StateVector` without touching comparison logic. Bump `version` whenever
/// the marker list changes so fingerprints from different catalogs can be
/// told apart downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCatalog {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Recognized functional data-marker keys
    #[serde(default = "default_markers")]
    pub functional_markers: Vec<String>,
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self {
            version: default_version(),
            functional_markers: default_markers(),
        }
    }
}

impl FeatureCatalog {
    /// Load a catalog from a YAML file. Returns defaults if the file is
    /// missing or malformed, mirroring config loading elsewhere.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

fn default_version() -> u32 {
    1
}

fn default_markers() -> Vec<String> {
    [
        "cart",
        "checkout",
        "search",
        "login",
        "signup",
        "logout",
        "pagination",
        "filter",
        "sort",
        "share",
        "subscribe",
        "download",
        "upload",
        "edit",
        "delete",
        "favorite",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
