use crate::graph::gap_model::{Gap, Priority};
use crate::report::report_model::AnalysisReport;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format an analysis report for terminal output.
///
/// Produces output like:
/// ```text
/// === Crawl Graph Analysis ===
///
/// Pages: 42 -> 9 representatives (78.6% reduction)
/// Clusters: 9 (largest: 12 pages)
///
/// Gaps:
///   - isolated nodes: 2
///   - unexplored paths: 3
///
/// Recommendations:
///   [HIGH]   explore_connections — 2 isolated node(s) ...
///
/// === Score: 0.81 (reduction 0.79, coverage 1.00, connectivity 1.00) ===
/// ```
pub fn format_console_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Graph Analysis ===\n\n");

    out.push_str(&format!(
        "Pages: {} -> {} representatives ({:.1}% reduction)\n",
        report.original_nodes,
        report.representative_count(),
        report.score.reduction_ratio * 100.0
    ));
    out.push_str(&format!(
        "Edges: {} -> {}\n",
        report.original_edges,
        report.pruned.edges.len()
    ));

    let largest = report.clusters.iter().map(|c| c.size).max().unwrap_or(0);
    out.push_str(&format!(
        "Clusters: {} (largest: {} pages)\n",
        report.clusters.len(),
        largest
    ));

    if report.gaps.is_empty() {
        out.push_str("\nNo coverage gaps detected.\n");
    } else {
        out.push_str("\nGaps:\n");
        for gap in &report.gaps {
            out.push_str(&format!("  - {}\n", format_gap(gap)));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &report.recommendations {
            out.push_str(&format!(
                "  [{}] {} — {}\n",
                format_priority(rec.priority),
                rec.action,
                rec.description
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Score: {:.2} (reduction {:.2}, coverage {:.2}, connectivity {:.2}) ===\n",
        report.score.overall_score,
        report.score.reduction_ratio,
        report.score.coverage_score,
        report.score.connectivity_score
    ));

    out
}

fn format_gap(gap: &Gap) -> String {
    match gap {
        Gap::IsolatedNodes { count, .. } => format!("isolated nodes: {}", count),
        Gap::LowConnectivity { count, .. } => format!("low-connectivity nodes: {}", count),
        Gap::UnexploredPaths { count, .. } => format!("unexplored paths: {}", count),
    }
}

fn format_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
    }
}

/// One-line cluster summary for the `cluster` subcommand.
pub fn format_cluster_line(id: usize, size: usize, representative_url: &str) -> String {
    format!(
        "  cluster {:>3}: {:>4} page(s), representative {}",
        id, size, representative_url
    )
}
