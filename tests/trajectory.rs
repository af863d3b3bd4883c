//! End-to-end run over a small trajectory: load, cluster, save.

use adjacency_clusters::cluster::metrics;
use adjacency_clusters::data::parse_frames;
use adjacency_clusters::storage::{save_results, FrameReport};
use adjacency_clusters::{AdjacencyView, ClusterError, ClusteringAction, ClusteringConfig};
use std::fs;

const TRAJECTORY: &str = r#"{
    "frames": [
        {"dense": [
            [1, 1, 0, 0, 0],
            [1, 1, 1, 0, 0],
            [0, 1, 1, 0, 0],
            [0, 0, 0, 1, 1],
            [0, 0, 0, 1, 1]
        ]},
        {"sparse": {"size": 5, "entries": []}},
        {"sparse": {"size": 5, "entries": [[0, 4, 0.2], [4, 0, 0.2]]}}
    ]
}"#;

#[test]
fn clusters_every_frame_and_writes_results() {
    let frames = parse_frames(TRAJECTORY).unwrap();
    let config = ClusteringConfig::default();
    let action = ClusteringAction::new(frames[0].shape().0, config).unwrap();

    let reports: Vec<FrameReport> = frames
        .iter()
        .enumerate()
        .map(|(frame, adjacency)| {
            let (result, neighbors) = action.compute_with_neighbors(adjacency).unwrap();
            let summaries = metrics::summarize(&result, &neighbors).unwrap();
            FrameReport {
                frame,
                result,
                summaries,
            }
        })
        .collect();

    let counts: Vec<usize> = reports
        .iter()
        .map(|report| report.result.number_of_clusters())
        .collect();
    assert_eq!(counts, vec![2, 5, 4]);

    // Frame 2: {0,4} is the only pair, every other node is alone
    let pair = reports[2].result.cluster_of(0).unwrap();
    assert_eq!(pair.get(), 1);
    assert_eq!(reports[2].result.cluster_of(4), Some(pair));

    let dir = tempfile::tempdir().unwrap();
    save_results(&reports, &config, dir.path()).unwrap();

    for frame in 0..3 {
        assert!(dir.path().join("frames").join(format!("frame_{frame}.json")).exists());
    }

    let first: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("frames").join("frame_0.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(first["which_cluster"], serde_json::json!([1, 1, 1, 2, 2]));
    assert_eq!(first["clusters"][0]["members"], serde_json::json!([0, 1, 2]));
    assert_eq!(first["clusters"][0]["internal_edges"], 2);
}

#[test]
fn frame_with_a_different_node_count_is_rejected() {
    let frames = parse_frames(r#"{"frames": [{"dense": [[0, 1], [1, 0]]}, {"dense": [[0]]}]}"#)
        .unwrap();
    let action = ClusteringAction::new(2, ClusteringConfig::default()).unwrap();

    assert!(action.compute(&frames[0]).is_ok());
    assert_eq!(
        action.compute(&frames[1]),
        Err(ClusterError::ShapeMismatch {
            rows: 1,
            cols: 1,
            expected: 2
        })
    );
}
