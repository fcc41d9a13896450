use anyhow::Result;
use bridgecut::{analyze, build_graph, data, storage, viz, BetweennessKind, Config, Strategy};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "bridgecut",
    about = "Bridge-removal cluster analysis of undirected graphs"
)]
struct Cli {
    /// Path to input edge list (text, or Parquet with a .parquet extension)
    #[clap(long)]
    input: String,

    /// Cut strategy: edge-betweenness, edge-bridging, vertex-betweenness, vertex-bridging
    /// (or edge-b, edge-c, vertex-b, vertex-c)
    #[clap(long, default_value = "edge-betweenness")]
    strategy: Strategy,

    /// Components denser than this are accepted as clusters
    #[clap(long, default_value = "0.5")]
    threshold: f64,

    /// Bridging depth
    #[clap(long, default_value = "1")]
    depth: usize,

    /// Share of candidates re-ranked when depth is above 1
    #[clap(long, default_value = "0.25")]
    top_percentile: f64,

    /// Betweenness family override: global or egocentric
    #[clap(long)]
    betweenness: Option<BetweennessKind>,

    /// Source key column for Parquet input
    #[clap(long, default_value = "source")]
    source_column: String,

    /// Target key column for Parquet input
    #[clap(long, default_value = "target")]
    target_column: String,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    // Build and check the run configuration before touching any data
    let mut config = Config::new(args.strategy, args.threshold, args.depth, args.top_percentile);
    if let Some(kind) = args.betweenness {
        config = config.with_betweenness(kind);
    }
    config.validate()?;

    log::info!("Starting BridgeCut analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load data
    let pairs = data::load_edge_pairs(&args.input, &args.source_column, &args.target_column)?;

    // 2. Build the graph
    let graph = build_graph(pairs)?;
    log::info!("Loaded graph with {} nodes and {} edges", graph.node_count(), graph.edge_count());

    // 3. Cluster and score
    let report = analyze(&graph, &config)?;
    log::info!("Found {} clusters in {} rounds", report.clusters.len(), report.steps.len());

    // 4. Save results
    storage::save_results(&report, &args.output_dir)?;

    // 5. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&report, &graph, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    // Scores go to stdout for scripting; everything else went to the log
    println!("{}\t{}", report.davies_bouldin, report.silhouette);

    Ok(())
}
