//! Error types for the BridgeCut engine

use thiserror::Error;

/// Result alias used by the graph and clustering core
pub type Result<T> = std::result::Result<T, BridgeCutError>;

/// Failures raised while validating input at the engine boundary.
///
/// Once a [`Graph`](crate::graph::Graph) is built every internal operation is total,
/// so these only surface from graph construction and configuration checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeCutError {
    /// An edge record could not be turned into an undirected edge
    #[error("malformed edge record #{record}: {reason}")]
    MalformedInput {
        /// Zero-based position of the offending record
        record: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Requested strategy is not one of the four supported variants
    #[error(
        "unknown strategy '{0}' (expected edge-betweenness, edge-bridging, vertex-betweenness or vertex-bridging)"
    )]
    UnknownStrategy(String),

    /// Requested betweenness family is not known
    #[error("unknown betweenness kind '{0}' (expected global or egocentric)")]
    UnknownBetweenness(String),

    /// A configuration value is out of range
    #[error("invalid configuration value for '{name}': {message}")]
    InvalidConfig {
        /// Name of the offending parameter
        name: &'static str,
        /// Why it was rejected
        message: String,
    },
}

impl BridgeCutError {
    pub(crate) fn malformed(record: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            record,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name,
            message: message.into(),
        }
    }
}
