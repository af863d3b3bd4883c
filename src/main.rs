use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use adjacency_clusters::cluster::{metrics, ClusterStrategy, ClusteringAction, TieBreak};
use adjacency_clusters::config::ClusteringConfig;
use adjacency_clusters::data;
use adjacency_clusters::graph::AdjacencyView;
use adjacency_clusters::storage::{self, FrameReport};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Connected,
    UnionFind,
    Density,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    Largest,
    LowestMember,
}

#[derive(Parser, Debug)]
#[clap(
    name = "adjacency-clusters",
    about = "Cluster the nodes of a trajectory of adjacency matrices"
)]
struct Cli {
    /// Path to input JSON file with adjacency frames
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// JSON configuration file (command line flags take precedence)
    #[clap(long)]
    config: Option<String>,

    /// Minimum weight an entry must exceed to count as an edge
    #[clap(long)]
    threshold: Option<f64>,

    /// Clustering algorithm
    #[clap(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Minimum neighbor count of a core node (density strategy)
    #[clap(long, default_value = "2")]
    min_neighbors: usize,

    /// Ordering of cluster ids
    #[clap(long, value_enum)]
    tie_break: Option<TieBreakArg>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn clustering_config(&self) -> Result<ClusteringConfig> {
        let mut config = match &self.config {
            Some(path) => ClusteringConfig::from_json_file(path)?,
            None => ClusteringConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.edge_threshold = threshold;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = match strategy {
                StrategyArg::Connected => ClusterStrategy::ConnectedComponents,
                StrategyArg::UnionFind => ClusterStrategy::UnionFind,
                StrategyArg::Density => ClusterStrategy::DensityThreshold {
                    min_neighbors: self.min_neighbors,
                },
            };
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = match tie_break {
                TieBreakArg::Largest => TieBreak::LargestFirst,
                TieBreakArg::LowestMember => TieBreak::LowestMemberFirst,
            };
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = args.clustering_config()?;

    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load frames
    let frames = data::load_frames(&args.input)?;
    let Some(first) = frames.first() else {
        log::warn!("No frames in {}, nothing to do", args.input);
        return Ok(());
    };

    // 2. Cluster every frame with one action; the node count is fixed by the first frame
    let action = ClusteringAction::new(first.shape().0, config)?;
    let mut reports = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let (result, neighbors) = action
            .compute_with_neighbors(frame)
            .map_err(|e| anyhow!("frame {}: {}", index, e))?;

        log::info!(
            "Frame {}: {} clusters over {} nodes",
            index,
            result.number_of_clusters(),
            result.node_count()
        );

        let summaries = metrics::summarize(&result, &neighbors)
            .map_err(|e| anyhow!("frame {}: {}", index, e))?;
        reports.push(FrameReport {
            frame: index,
            result,
            summaries,
        });
    }

    // 3. Save results
    storage::save_results(&reports, action.config(), &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
