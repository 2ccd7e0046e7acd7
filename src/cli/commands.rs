use crate::cli::config::{build_analysis_options, AppConfig};
use crate::cluster::clustering::select_representatives;
use crate::error::EngineError;
use crate::graph::graph_model::CrawlGraph;
use crate::hasher::fingerprint::fingerprint;
use crate::hasher::state_vector::compute_state_vector;
use crate::report::console::{format_cluster_line, format_console_report};
use crate::{analyze, cluster_pages};

// ============================================================================
// analyze subcommand
// ============================================================================

pub fn cmd_analyze(
    graph_path: &str,
    threshold: Option<f64>,
    format: &str,
    output: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(graph_path)?;
    let options = build_analysis_options(config, threshold);

    if verbose > 0 {
        eprintln!(
            "Analyzing {} ({} nodes, {} edges, threshold={})...",
            graph_path,
            graph.node_count(),
            graph.edge_count(),
            options.threshold
        );
    }

    let report = analyze(&graph, &options)?;

    let output_content = match format {
        "json" => serde_json::to_string_pretty(&report)?,
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(())
}

// ============================================================================
// cluster subcommand
// ============================================================================

pub fn cmd_cluster(
    graph_path: &str,
    threshold: Option<f64>,
    max_pages: Option<usize>,
    config: &AppConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(graph_path)?;
    let options = build_analysis_options(config, threshold);
    let max_pages = max_pages.unwrap_or(config.analysis.max_pages);

    if verbose > 0 {
        eprintln!(
            "Clustering {} pages (threshold={})...",
            graph.node_count(),
            options.threshold
        );
    }

    let clusters = cluster_pages(&graph, &options)?;

    println!("{} cluster(s) from {} page(s):", clusters.len(), graph.node_count());
    for c in &clusters {
        println!("{}", format_cluster_line(c.id, c.size, &c.representative.url));
    }

    let representatives = select_representatives(&clusters, max_pages);
    println!("\nRepresentatives (max {}):", max_pages);
    for rep in &representatives {
        println!("  {} — {}", rep.id, rep.url);
    }

    Ok(())
}

// ============================================================================
// fingerprint subcommand
// ============================================================================

pub fn cmd_fingerprint(
    graph_path: &str,
    output: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = load_graph(graph_path)?;

    if verbose > 0 {
        eprintln!("Fingerprinting {} pages...", graph.node_count());
    }

    let fingerprints: Vec<_> = graph
        .nodes
        .iter()
        .map(|page| {
            let vector = page
                .state_vector
                .clone()
                .unwrap_or_else(|| compute_state_vector(&page.elements, &config.markers));
            let fp = fingerprint(&vector, &page.url, &page.title);
            serde_json::json!({ "id": page.id, "fingerprint": fp })
        })
        .collect();

    let output_content = serde_json::to_string_pretty(&fingerprints)?;

    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => println!("{}", output_content),
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a crawl graph from its JSON interchange form.
pub fn load_graph(path: &str) -> Result<CrawlGraph, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|source| EngineError::GraphRead {
        path: path.to_string(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| EngineError::GraphParse {
        path: path.to_string(),
        source,
    })
}
