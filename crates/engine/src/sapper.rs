//! Classifier entry point

use crate::prune::Pruner;
use crate::score::ScoreEngine;
use crate::tree::TreeBuilder;
use sap_common::errors::Result;
use sap_common::metrics::ClassifyMetrics;
use sap_common::{CitationGraph, ClassifierConfig, Role};
use tracing::{info, instrument, warn};

/// Runs scoring, pruning and tree building under one configuration
///
/// The configuration is fixed at construction; the classifier holds no other
/// state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    engine: ScoreEngine,
    pruner: Pruner,
}

/// Name used by the command line front end
pub type Sapper = Classifier;

impl Classifier {
    /// Create a new classifier
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            pruner: Pruner::new(&config),
            engine: ScoreEngine::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a graph using the configured `clear_graph`
    ///
    /// The input graph is left untouched; a new annotated graph is returned.
    pub fn classify(&self, graph: &CitationGraph) -> Result<CitationGraph> {
        self.classify_with(graph, self.config.clear_graph)
    }

    /// Classify a graph, overriding `clear_graph` for this call
    #[instrument(skip_all, fields(papers = graph.paper_count(), citations = graph.edge_count()))]
    pub fn classify_with(&self, graph: &CitationGraph, clear_graph: bool) -> Result<CitationGraph> {
        let metrics = ClassifyMetrics::start();

        let scored = match self.engine.score(graph) {
            Ok(scored) => scored,
            Err(e) => {
                warn!(error = %e, "Graph rejected");
                metrics.fail(e.code().as_code());
                return Err(e);
            }
        };

        let selection = self.pruner.select(&scored);
        for role in Role::ALL {
            if selection.is_empty(role) {
                info!(role = %role, "No members selected");
            }
        }

        let tree = TreeBuilder::build(&scored, &selection, clear_graph);

        info!(
            roots = selection.roots.len(),
            trunk = selection.trunk.len(),
            leaves = selection.leaves.len(),
            papers = tree.paper_count(),
            "Graph classified"
        );
        metrics.finish(selection.roots.len(), selection.trunk.len(), selection.leaves.len());

        Ok(tree)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sap_common::errors::SapError;
    use sap_common::{Count, Paper};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_dag(seed: u64, papers: usize, density: f64) -> CitationGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = CitationGraph::new();
        let indices: Vec<_> = (0..papers)
            .map(|i| {
                let year = 1950 + (i as i32) / 4;
                graph.add_paper(Paper::new(format!("p{}", i), format!("Paper {}", i), year))
            })
            .collect();
        for i in 0..papers {
            for j in (i + 1)..papers {
                if rng.gen_bool(density) {
                    graph.add_citation(indices[i], indices[j]);
                }
            }
        }
        graph
    }

    #[test]
    fn test_classify_is_deterministic() {
        let graph = random_dag(7, 150, 0.04);
        let classifier = Classifier::new(ClassifierConfig {
            max_roots: Count::Bounded(10),
            max_trunk: Count::Bounded(20),
            max_leaves: Count::Bounded(30),
            max_leaf_age: Count::Bounded(15),
            ..ClassifierConfig::default()
        });

        let first = classifier.classify(&graph).unwrap();
        let second = classifier.classify(&graph).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.selected_trunk(), second.selected_trunk());
        assert!(first.selected_roots().len() <= 10);
        assert!(first.selected_trunk().len() <= 20);
        assert!(first.selected_leaves().len() <= 30);
    }

    #[test]
    fn test_input_graph_is_not_modified() {
        let graph = random_dag(11, 40, 0.1);
        let before = graph.clone();
        let _ = Classifier::default().classify(&graph).unwrap();
        assert_eq!(graph, before);
    }

    #[test]
    fn test_classify_with_overrides_clear_graph() {
        let graph = random_dag(3, 30, 0.1);
        let classifier = Classifier::new(ClassifierConfig {
            max_trunk: Count::Bounded(1),
            max_roots: Count::Bounded(1),
            max_leaves: Count::Bounded(1),
            ..ClassifierConfig::default()
        });

        let whole = classifier.classify_with(&graph, false).unwrap();
        assert_eq!(whole.paper_count(), graph.paper_count());

        let cleared = classifier.classify(&graph).unwrap();
        assert!(cleared.paper_count() <= 3);
    }

    #[test]
    fn test_cyclic_graph_is_an_error() {
        let mut graph = CitationGraph::new();
        let a = graph.add_paper(Paper::new("a", "A", 2000));
        let b = graph.add_paper(Paper::new("b", "B", 2000));
        graph.add_citation(a, b);
        graph.add_citation(b, a);

        let err = Classifier::default().classify(&graph).unwrap_err();
        assert!(matches!(err, SapError::CyclicGraph { .. }));
    }
}
