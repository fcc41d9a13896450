//! Configuration management for the BridgeCut analyzer

use crate::cluster::strategy::Strategy;
use crate::error::{BridgeCutError, Result};
use crate::scoring::BetweennessKind;
use serde::{Deserialize, Serialize};

/// Parameters for one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Which element to cut and how to score it
    pub strategy: Strategy,

    /// A component is accepted once its density is strictly above this value
    pub density_threshold: f64,

    /// Bridging radius; above one, bridging strategies re-rank their best
    /// candidates at every depth up to this value
    pub depth: usize,

    /// Share of candidates re-ranked during depth escalation
    pub top_percentile: f64,

    /// Override the betweenness family the strategy would normally use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub betweenness: Option<BetweennessKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::EdgeBetweenness,
            density_threshold: 0.5,
            depth: 1,
            top_percentile: 0.25,
            betweenness: None,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(strategy: Strategy, density_threshold: f64, depth: usize, top_percentile: f64) -> Self {
        Self {
            strategy,
            density_threshold,
            depth,
            top_percentile,
            betweenness: None,
        }
    }

    /// Use the given betweenness family regardless of strategy
    pub fn with_betweenness(mut self, kind: BetweennessKind) -> Self {
        self.betweenness = Some(kind);
        self
    }

    /// Betweenness family in effect for this run
    pub fn betweenness_kind(&self) -> BetweennessKind {
        self.betweenness
            .unwrap_or_else(|| self.strategy.default_betweenness())
    }

    /// Check every value is in range before anything runs
    pub fn validate(&self) -> Result<()> {
        if !(self.density_threshold.is_finite() && self.density_threshold > 0.0) {
            return Err(BridgeCutError::invalid_config(
                "density_threshold",
                format!("must be a finite value above 0, got {}", self.density_threshold),
            ));
        }
        if self.depth < 1 {
            return Err(BridgeCutError::invalid_config(
                "depth",
                "must be at least 1",
            ));
        }
        if !(self.top_percentile > 0.0 && self.top_percentile <= 1.0) {
            return Err(BridgeCutError::invalid_config(
                "top_percentile",
                format!("must be in (0, 1], got {}", self.top_percentile),
            ));
        }
        Ok(())
    }
}
