//! PageRank over a [`WebGraph`] by power iteration.
//!
//! Dangling pages spread their whole rank uniformly over the corpus, so the
//! total mass stays near 1 instead of leaking away each pass.

use crate::dict::HashDictionary;
use crate::error::{ContainerError, Result};
use crate::graph::WebGraph;
use crate::Page;
use serde::{Deserialize, Serialize};

/// Page URI to authority score.
pub type RankTable = HashDictionary<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following an outbound link.
    pub decay: f64,
    /// Stop once no rank moves by more than this between passes.
    pub epsilon: f64,
    /// Hard bound on passes; reaching it is not an error.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            decay: 0.85,
            epsilon: 1e-4,
            max_iterations: 100,
        }
    }
}

impl PageRankConfig {
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(ContainerError::InvalidArgument("decay must lie strictly between 0 and 1"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ContainerError::InvalidArgument("epsilon must be positive and finite"));
        }
        Ok(())
    }
}

/// Stationary authority scores for every page of a corpus.
#[derive(Debug, Clone)]
pub struct PageRankAnalyzer {
    ranks: RankTable,
    iterations: usize,
    converged: bool,
    final_delta: f64,
}

impl PageRankAnalyzer {
    /// Builds the web graph for `pages` and ranks it. The graph itself is
    /// dropped once the ranks are known.
    pub fn new(pages: &[Page], config: PageRankConfig) -> Result<Self> {
        let graph = WebGraph::build(pages);
        Self::from_graph(&graph, config)
    }

    pub fn from_graph(graph: &WebGraph, config: PageRankConfig) -> Result<Self> {
        config.validate()?;
        let n = graph.len();
        let mut ranks = RankTable::with_buckets(n.max(1) * 2 + 1);
        if n == 0 {
            return Ok(Self {
                ranks,
                iterations: 0,
                converged: true,
                final_delta: 0.0,
            });
        }

        let n_f = n as f64;
        let decay = config.decay;
        for (uri, _) in graph.iter() {
            ranks.put(uri.to_string(), 1.0 / n_f);
        }

        let mut iterations = 0;
        let mut delta = f64::INFINITY;
        while iterations < config.max_iterations {
            iterations += 1;

            let mut dangling_mass = 0.0;
            for uri in graph.dangling_pages() {
                dangling_mass += *ranks.get(uri)?;
            }
            let base = (1.0 - decay) / n_f + decay * dangling_mass / n_f;

            let mut next = RankTable::with_buckets(ranks.bucket_count());
            for (uri, _) in graph.iter() {
                next.put(uri.to_string(), base);
            }
            for (uri, out) in graph.iter() {
                if out.is_empty() {
                    continue;
                }
                let share = decay * *ranks.get(uri)? / out.len() as f64;
                for target in out.iter() {
                    *next.get_mut(target.as_str())? += share;
                }
            }

            delta = 0.0;
            for (uri, rank) in &next {
                delta = f64::max(delta, (rank - *ranks.get(uri.as_str())?).abs());
            }
            ranks = next;
            tracing::debug!(iteration = iterations, delta, "pagerank pass");

            if delta <= config.epsilon {
                break;
            }
        }

        let converged = delta <= config.epsilon;
        if converged {
            tracing::info!(pages = n, iterations, delta, "pagerank converged");
        } else {
            tracing::warn!(
                pages = n,
                iterations,
                delta,
                epsilon = config.epsilon,
                "pagerank hit iteration limit before converging"
            );
        }

        Ok(Self {
            ranks,
            iterations,
            converged,
            final_delta: delta,
        })
    }

    /// Rank of one page of the analyzed corpus.
    pub fn compute_page_rank(&self, uri: &str) -> Result<f64> {
        self.ranks.get(uri).copied()
    }

    pub fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Largest per-page change in the final pass. Infinite when
    /// `max_iterations` is zero and no pass ran.
    pub fn final_delta(&self) -> f64 {
        self.final_delta
    }

    pub fn total_mass(&self) -> f64 {
        self.ranks.values().sum()
    }
}
