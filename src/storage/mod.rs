//! Results persistence module

use anyhow::Result;
use crate::cluster::Report;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};

/// Save analysis results to the specified directory
pub fn save_results(report: &Report, output_dir: &str) -> Result<()> {
    log::info!("Saving {} clusters to {}", report.clusters.len(), output_dir);

    // Create output directory
    fs::create_dir_all(output_dir)?;

    // JSON files first, then the human-readable report
    save_summary(report, output_dir)?;
    save_steps(report, output_dir)?;
    save_clusters(report, output_dir)?;

    let path = Path::new(output_dir).join("report.txt");
    let mut file = File::create(path)?;
    write_text_report(report, &mut file)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(report: &Report, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    // Calculate cluster size statistics
    let sizes: Vec<usize> = report.clusters.iter().map(|c| c.size).collect();
    let cluster_count = sizes.len();

    // Create summary JSON
    let summary = json!({
        "config": report.config,
        "graph_stats": {
            "node_count": report.node_count,
            "edge_count": report.edge_count,
            "density": density(report.node_count, report.edge_count),
        },
        "cluster_stats": {
            "cluster_count": cluster_count,
            "round_count": report.steps.len(),
            "singleton_count": sizes.iter().filter(|&&s| s == 1).count(),
            "largest_cluster_size": sizes.iter().copied().max().unwrap_or(0),
            "smallest_cluster_size": sizes.iter().copied().min().unwrap_or(0),
            "avg_cluster_size": sizes.iter().sum::<usize>() as f64 /
                                if cluster_count == 0 { 1.0 } else { cluster_count as f64 },
        },
        "validity": {
            "davies_bouldin": finite_or_null(report.davies_bouldin),
            "silhouette": finite_or_null(report.silhouette),
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the removal steps in execution order
fn save_steps(report: &Report, output_dir: &str) -> Result<()> {
    log::info!("Saving {} removal steps", report.steps.len());

    let path = Path::new(output_dir).join("steps.json");
    let mut file = File::create(path)?;

    let steps: Vec<_> = report
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            json!({
                "round": i + 1,
                "item": step.item.to_string(),
                "score": step.score,
                "removed": step.removed,
                "cluster_coefficient": step.cluster_coefficient,
            })
        })
        .collect();

    file.write_all(to_string_pretty(&steps)?.as_bytes())?;

    Ok(())
}

/// Save individual cluster information
fn save_clusters(report: &Report, output_dir: &str) -> Result<()> {
    log::info!("Saving individual cluster information");

    let clusters_dir = Path::new(output_dir).join("clusters");
    fs::create_dir_all(&clusters_dir)?;

    // One file per cluster, full member list included
    for cluster in &report.clusters {
        let path = clusters_dir.join(format!("cluster_{}.json", cluster.id));
        let mut file = File::create(path)?;

        let cluster_json = json!({
            "id": cluster.id,
            "size": cluster.size,
            "edge_count": cluster.edge_count,
            "density": finite_or_null(cluster.density),
            "members": cluster.members,
        });

        file.write_all(to_string_pretty(&cluster_json)?.as_bytes())?;
    }

    // Index of all clusters without members
    let all_clusters_path = Path::new(output_dir).join("all_clusters.json");
    let mut all_clusters_file = File::create(all_clusters_path)?;

    let clusters_json = json!({
        "clusters": report.clusters.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size,
                "density": finite_or_null(c.density),
            })
        }).collect::<Vec<_>>()
    });

    all_clusters_file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

/// Plain-text report: removal steps, clusters and validity scores
pub fn write_text_report<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    // Removal steps, one row per round
    writeln!(out, "Top Items Removed:\n")?;
    writeln!(out, "\t#\t-\tItem\t-\tRank\t-\tNodes Removed\t-\tClustering Coefficient\n")?;
    for (i, step) in report.steps.iter().enumerate() {
        writeln!(
            out,
            "\t{}.\t{}\t-\t{}\t-\t{}\t-\t{}",
            i + 1,
            step.item,
            step.score,
            step.removed,
            step.cluster_coefficient
        )?;
    }

    // Members of each accepted cluster
    writeln!(out, "\nClusters:\n")?;
    for cluster in &report.clusters {
        writeln!(out, "\t{}", cluster.members.join(", "))?;
    }

    // Validity scores
    writeln!(out)?;
    writeln!(out, "DB Index:\t\t\t\t{}", report.davies_bouldin)?;
    writeln!(out, "Average Silhouette Coefficient:\t{}", report.silhouette)?;

    Ok(())
}

fn density(nodes: usize, edges: usize) -> Option<f64> {
    if nodes < 2 {
        None
    } else {
        Some((2 * edges) as f64 / (nodes * (nodes - 1)) as f64)
    }
}

/// JSON has no infinity; undefined scores are written as null
fn finite_or_null(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
