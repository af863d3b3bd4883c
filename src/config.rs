//! Configuration management for the cluster engine

use crate::cluster::{ClusterStrategy, TieBreak};
use crate::error::ClusterError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options recognised by the clustering action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Weights must be strictly above this value to count as an edge
    pub edge_threshold: f64,

    /// Rule used to order clusters into canonical ids
    pub tie_break: TieBreak,

    /// Clustering algorithm
    pub strategy: ClusterStrategy,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 0.0,
            tie_break: TieBreak::LargestFirst,
            strategy: ClusterStrategy::ConnectedComponents,
        }
    }
}

impl ClusteringConfig {
    /// Create a new configuration with custom values
    pub fn new(edge_threshold: f64, tie_break: TieBreak, strategy: ClusterStrategy) -> Self {
        Self {
            edge_threshold,
            tie_break,
            strategy,
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Reading clustering configuration: {}", path.display());

        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is inside its domain
    pub fn validate(&self) -> Result<(), ClusterError> {
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(ClusterError::Config {
                reason: format!(
                    "edge_threshold must be finite and non-negative, got {}",
                    self.edge_threshold
                ),
            });
        }
        Ok(())
    }
}
