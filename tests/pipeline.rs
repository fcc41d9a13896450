use bridgecut::{analyze, build_graph, data, storage, viz, Config, Strategy};
use polars::prelude::*;
use std::fs;

const BOWTIE: &str = "# two triangles joined by C - D
A B
B C
C A
C D
D E
E F
F D
";

#[test]
fn edgelist_to_results_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("bowtie.txt");
    fs::write(&input, BOWTIE)?;

    let pairs = data::load_edge_pairs(input.to_str().unwrap(), "source", "target")?;
    let graph = build_graph(pairs)?;
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 7);

    let report = analyze(&graph, &Config::new(Strategy::EdgeBetweenness, 0.5, 1, 0.25))?;
    let out = dir.path().join("out");
    let out = out.to_str().unwrap();
    storage::save_results(&report, out)?;
    viz::generate_visualizations(&report, &graph, out)?;

    let steps: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("out/steps.json"))?)?;
    assert_eq!(steps[0]["item"], "C <-> D");
    assert_eq!(steps[0]["removed"], 6);

    let cluster: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/clusters/cluster_1.json"))?)?;
    assert_eq!(cluster["members"], serde_json::json!(["D", "E", "F"]));
    assert_eq!(cluster["density"], 1.0);

    let text = fs::read_to_string(dir.path().join("out/report.txt"))?;
    assert!(text.contains("Average Silhouette Coefficient:"));

    assert!(dir.path().join("out/visualizations/removal_curve.csv").exists());
    Ok(())
}

#[test]
fn malformed_edgelist_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.txt");
    fs::write(&input, "A B\nC\n").unwrap();

    let err = data::load_edge_pairs(input.to_str().unwrap(), "source", "target").unwrap_err();
    assert!(err.to_string().contains("record #1"), "{}", err);
}

#[test]
fn self_loop_is_rejected_at_build_time() {
    let err = build_graph([("A", "B"), ("B", "B")]).unwrap_err();
    assert!(err.to_string().contains("self-loop"));
}

#[test]
fn parquet_columns_are_read_as_keys() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("edges.parquet");

    let mut df = df!(
        "from" => &[1i64, 2, 3, 3, 4, 5, 6],
        "to" => &[2i64, 3, 1, 4, 5, 6, 4],
        "weight" => &[1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
    )?;
    ParquetWriter::new(fs::File::create(&path)?).finish(&mut df)?;

    let pairs = data::load_edge_pairs(path.to_str().unwrap(), "from", "to")?;
    assert_eq!(pairs.len(), 7);
    assert_eq!(pairs[0], ("1".to_string(), "2".to_string()));

    let graph = build_graph(pairs)?;
    let report = analyze(&graph, &Config::new(Strategy::EdgeBetweenness, 0.5, 1, 0.25))?;
    assert_eq!(report.clusters.len(), 2);
    assert_eq!(report.clusters[0].members, vec!["1", "2", "3"]);
    Ok(())
}
