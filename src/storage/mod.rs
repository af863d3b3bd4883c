//! Results persistence module

use crate::cluster::metrics::{self, ClusterSummary};
use crate::cluster::ClusterResult;
use crate::config::ClusteringConfig;
use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Everything written for one clustered frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: usize,
    pub result: ClusterResult,
    pub summaries: Vec<ClusterSummary>,
}

/// Save analysis results to the specified directory
pub fn save_results<P: AsRef<Path>>(
    reports: &[FrameReport],
    config: &ClusteringConfig,
    output_dir: P,
) -> Result<()> {
    let output_dir = output_dir.as_ref();
    log::info!("Saving {} frames to {}", reports.len(), output_dir.display());

    fs::create_dir_all(output_dir)?;

    save_summary(reports, config, output_dir)?;
    save_frames(reports, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save one line of statistics per frame
fn save_summary(reports: &[FrameReport], config: &ClusteringConfig, output_dir: &Path) -> Result<()> {
    log::info!("Saving summary information");

    let path = output_dir.join("summary.json");
    let mut file = File::create(path)?;

    let frames: Vec<_> = reports
        .iter()
        .map(|report| {
            let result = &report.result;
            json!({
                "frame": report.frame,
                "node_count": result.node_count(),
                "cluster_count": result.number_of_clusters(),
                "largest_cluster_size": result.sizes().next().map_or(0, |entry| entry.size),
                "singleton_count": result.sizes().filter(|entry| entry.size == 1).count(),
            })
        })
        .collect();

    let summary = json!({
        "config": config,
        "frame_count": reports.len(),
        "frames": frames,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the full assignment and cluster table of every frame
fn save_frames(reports: &[FrameReport], output_dir: &Path) -> Result<()> {
    log::info!("Saving individual frame results");

    let frames_dir = output_dir.join("frames");
    fs::create_dir_all(&frames_dir)?;

    for report in reports {
        let path = frames_dir.join(format!("frame_{}.json", report.frame));
        let mut file = File::create(path)?;

        let size_distribution: Vec<_> = metrics::size_distribution(&report.result)
            .into_iter()
            .map(|(size, count)| json!({ "size": size, "count": count }))
            .collect();
        let cluster_sizes: Vec<_> = report.result.sizes().collect();

        let frame_json = json!({
            "frame": report.frame,
            "which_cluster": report.result.assignment(),
            "cluster_sizes": cluster_sizes,
            "size_distribution": size_distribution,
            "clusters": report.summaries,
        });

        file.write_all(to_string_pretty(&frame_json)?.as_bytes())?;
    }

    Ok(())
}
