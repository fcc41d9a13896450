//! BridgeCut cluster detection

use crate::cluster::strategy::Cut;
use crate::cluster::{Clustering, StepRecord};
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use std::collections::VecDeque;

/// Iterative split / expand / accept clustering.
///
/// Each round the configured strategy cuts the best-ranked edge or vertex of the
/// live graph. The components around the cut are then expanded one by one; a
/// component denser than the threshold is accepted as a cluster and leaves the live
/// graph, anything else stays for a later round. The run ends when no node is left.
#[derive(Debug, Clone)]
pub struct BridgeCut {
    config: Config,
}

impl BridgeCut {
    /// Validate the configuration and create an engine
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cluster a copy of `graph`; the input is left untouched.
    ///
    /// Every round destroys at least one edge or retires at least one node, so the
    /// loop always terminates. An empty graph yields no steps and no clusters.
    pub fn run(&self, graph: &Graph) -> Clustering {
        log::info!(
            "Running {} (threshold {}, depth {}, {} betweenness) on {} nodes and {} edges",
            self.config.strategy,
            self.config.density_threshold,
            self.config.depth,
            self.config.betweenness_kind(),
            graph.node_count(),
            graph.edge_count()
        );

        // Work on a private copy; accepted clusters leave it as the run goes
        let mut live = graph.clone();
        let mut clustering = Clustering::default();

        while !live.is_empty() {
            let size = live.node_count();

            // SPLIT: rank the live graph and cut the winner
            let Some(split) = self.config.strategy.split(&mut live, &self.config) else {
                break;
            };

            // EXPAND + ACCEPT
            match split.cut {
                // Nothing was cut, so the node's component is taken as it is
                Cut::Exhausted(node) => {
                    let cluster = live.expand(node);
                    live.remove(&cluster);
                    clustering.clusters.push(cluster);
                }
                Cut::Separated(affected) => {
                    self.expand_affected(&mut live, affected, &mut clustering.clusters);
                }
            }

            // Record the round against what is still live
            let step = StepRecord {
                item: split.item,
                score: split.score,
                removed: size - live.node_count(),
                cluster_coefficient: live.cluster_coefficient(),
            };

            log::debug!(
                "Round {}: cut {} (score {}), {} nodes removed, {} left, clustering coefficient {:.4}",
                clustering.steps.len() + 1,
                step.item,
                step.score,
                step.removed,
                live.node_count(),
                step.cluster_coefficient
            );

            clustering.steps.push(step);
        }

        log::info!(
            "BridgeCut finished after {} rounds with {} clusters",
            clustering.steps.len(),
            clustering.clusters.len()
        );

        clustering
    }

    /// Expand every node touched by a cut, accepting components above the threshold
    fn expand_affected(&self, live: &mut Graph, affected: Vec<NodeId>, clusters: &mut Vec<Graph>) {
        let mut pending: VecDeque<NodeId> = affected.into();

        while let Some(node) = pending.pop_front() {
            // Already accepted as part of an earlier component
            if live.node(node).is_none() {
                continue;
            }

            let component = live.expand(node);

            // One expansion may cover several pending nodes
            pending.retain(|&other| {
                live.key(other)
                    .is_some_and(|key| !component.contains(key))
            });

            // Accept; a sparser component stays live for a later round
            if component.density() > self.config.density_threshold {
                live.remove(&component);
                clusters.push(component);
            }
        }
    }
}
