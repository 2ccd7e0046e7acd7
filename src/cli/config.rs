use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::element::markers::FeatureCatalog;
use crate::{AnalysisOptions, DEFAULT_THRESHOLD};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "page-equivalence",
    version,
    about = "Functional-equivalence engine for black-box crawl graphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: page-equivalence.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: cluster, prune, detect gaps, score
    Analyze {
        /// Path to a crawl graph JSON file ({ nodes, edges })
        #[arg(long)]
        graph: String,

        /// Similarity threshold in [0, 1]
        #[arg(long)]
        threshold: Option<f64>,

        /// Output format: console or json
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Cluster pages and list clusters with capped representatives
    Cluster {
        /// Path to a crawl graph JSON file
        #[arg(long)]
        graph: String,

        /// Similarity threshold in [0, 1]
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum representatives to select
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Print per-page fingerprints as JSON
    Fingerprint {
        /// Path to a crawl graph JSON file
        #[arg(long)]
        graph: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `page-equivalence.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Recognized functional data-markers; defaults to the built-in catalog
    #[serde(default)]
    pub markers: FeatureCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_pages: default_max_pages(),
        }
    }
}

// Serde default helpers
fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}
fn default_max_pages() -> usize {
    50
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("page-equivalence.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Option Builders (merge CLI args with config file)
// ============================================================================

/// Build AnalysisOptions from resolved CLI/config values (CLI wins).
pub fn build_analysis_options(config: &AppConfig, threshold: Option<f64>) -> AnalysisOptions {
    AnalysisOptions {
        threshold: threshold.unwrap_or(config.analysis.threshold),
        catalog: config.markers.clone(),
    }
}
