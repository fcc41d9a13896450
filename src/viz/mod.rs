//! Visualization generation module

use anyhow::Result;
use crate::cluster::{Cluster, Report};
use crate::graph::Graph;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Generate visualization inputs from analysis results.
///
/// `graph` is the input graph the report was computed from.
pub fn generate_visualizations(report: &Report, graph: &Graph, output_dir: &str) -> Result<()> {
    log::info!("Generating visualizations for {} clusters", report.clusters.len());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    let membership = cluster_membership(&report.clusters);

    generate_network_data(graph, &membership, &viz_dir)?;
    generate_stats_visualizations(report, &viz_dir)?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

fn cluster_membership(clusters: &[Cluster]) -> HashMap<&str, u32> {
    clusters
        .iter()
        .flat_map(|c| c.members.iter().map(move |m| (m.as_str(), c.id)))
        .collect()
}

/// GraphML of the whole input graph plus a node table, both tagged with cluster ids
fn generate_network_data(
    graph: &Graph,
    membership: &HashMap<&str, u32>,
    viz_dir: &Path,
) -> Result<()> {
    log::info!("Generating network data files");

    let mut file = File::create(viz_dir.join("clusters.graphml"))?;

    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"cluster\" for=\"node\" attr.name=\"cluster\" attr.type=\"int\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"undirected\">")?;

    for &node in graph.nodes() {
        let label = graph.key(node).unwrap_or("Unknown");
        write!(file, "    <node id=\"n{}\">\n      <data key=\"label\">{}</data>", node, xml_escape(label))?;
        if let Some(cluster) = membership.get(label) {
            write!(file, "\n      <data key=\"cluster\">{}</data>", cluster)?;
        }
        writeln!(file, "\n    </node>")?;
    }

    for edge in graph.edges() {
        if let Some((a, b)) = graph.edge(edge).map(|e| e.endpoints()) {
            writeln!(file, "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>", edge, a, b)?;
        }
    }

    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;

    let mut nodes_file = File::create(viz_dir.join("nodes.csv"))?;
    writeln!(nodes_file, "id,label,degree,cluster_id")?;

    for &node in graph.nodes() {
        let label = graph.key(node).unwrap_or("Unknown");
        let cluster = membership
            .get(label)
            .map(|id| id.to_string())
            .unwrap_or_default();
        writeln!(nodes_file, "{},{},{},{}", node, csv_field(label), graph.degree(node), cluster)?;
    }

    Ok(())
}

/// Per-cluster statistics and the removal curve of the run
fn generate_stats_visualizations(report: &Report, viz_dir: &Path) -> Result<()> {
    log::info!("Generating statistical visualizations");

    let mut stats_file = File::create(viz_dir.join("cluster_stats.csv"))?;
    writeln!(stats_file, "cluster_id,size,edge_count,density")?;

    for cluster in &report.clusters {
        let density = if cluster.density.is_finite() {
            format!("{:.6}", cluster.density)
        } else {
            String::new()
        };
        writeln!(stats_file, "{},{},{},{}", cluster.id, cluster.size, cluster.edge_count, density)?;
    }

    // Fraction of input nodes gone after each step, against what is left's clustering
    let mut curve_file = File::create(viz_dir.join("removal_curve.csv"))?;
    writeln!(curve_file, "step,item,score,fraction_removed,cluster_coefficient")?;

    let total = report.node_count.max(1) as f64;
    let mut removed = 0;
    for (i, step) in report.steps.iter().enumerate() {
        removed += step.removed;
        writeln!(
            curve_file,
            "{},{},{},{:.6},{:.6}",
            i + 1,
            csv_field(&step.item.to_string()),
            step.score,
            removed as f64 / total,
            step.cluster_coefficient
        )?;
    }

    Ok(())
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
