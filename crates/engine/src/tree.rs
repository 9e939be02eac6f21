//! Output tree assembly

use crate::prune::Selection;
use crate::score::ScoredGraph;
use sap_common::{CitationGraph, PaperIndex, Role};
use std::collections::HashSet;
use tracing::debug;

/// Builds the annotated output graph
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    /// Annotate the scored graph with the selection
    ///
    /// A paper keeps its computed score for every role it was selected for
    /// and gets 0 for the others. With `clear_graph` only selected papers and
    /// the citations between them remain.
    pub fn build(scored: &ScoredGraph<'_>, selection: &Selection, clear_graph: bool) -> CitationGraph {
        let members: Vec<(Role, HashSet<PaperIndex>)> = Role::ALL
            .iter()
            .map(|&role| (role, selection.members(role).iter().copied().collect()))
            .collect();

        let tree = scored.graph().filter_map_papers(|idx, paper| {
            let mut paper = paper.clone();
            for (role, set) in &members {
                let score = if set.contains(&idx) {
                    scored.score(idx, *role)
                } else {
                    0.0
                };
                paper.set_score(*role, score);
            }
            if clear_graph && !paper.is_member() {
                None
            } else {
                Some(paper)
            }
        });

        debug!(
            clear_graph,
            papers = tree.paper_count(),
            citations = tree.edge_count(),
            "Tree built"
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::Pruner;
    use crate::score::ScoreEngine;
    use sap_common::{ClassifierConfig, Count, Paper};

    /// r -> m1 -> l, r -> m2 -> l, m2 -> x
    fn fork() -> CitationGraph {
        let mut graph = CitationGraph::new();
        for (id, year) in [("r", 1990), ("m1", 1995), ("m2", 1996), ("l", 2000), ("x", 2001)] {
            graph.add_paper(Paper::new(id, id.to_uppercase(), year));
        }
        for (cited, citing) in [("r", "m1"), ("r", "m2"), ("m1", "l"), ("m2", "l"), ("m2", "x")] {
            graph.add_citation_by_id(cited, citing).unwrap();
        }
        graph
    }

    fn build(graph: &CitationGraph, config: ClassifierConfig) -> CitationGraph {
        let scored = ScoreEngine::new().score(graph).unwrap();
        let selection = Pruner::new(&config).select(&scored);
        TreeBuilder::build(&scored, &selection, config.clear_graph)
    }

    #[test]
    fn test_unselected_scores_are_zeroed() {
        let graph = fork();
        let config = ClassifierConfig {
            max_leaves: Count::Bounded(1),
            clear_graph: false,
            ..ClassifierConfig::default()
        };
        let tree = build(&graph, config);

        // l is supported by 3 papers, x by 2
        assert_eq!(tree.paper_by_id("l").unwrap().leaf_score, 3.0);
        assert_eq!(tree.paper_by_id("x").unwrap().leaf_score, 0.0);
        assert_eq!(tree.paper_count(), graph.paper_count());
        assert_eq!(tree.edge_count(), graph.edge_count());
    }

    #[test]
    fn test_clear_graph_drops_non_members() {
        let graph = fork();
        let config = ClassifierConfig {
            max_roots: Count::Bounded(1),
            max_trunk: Count::Bounded(1),
            max_leaves: Count::Bounded(1),
            ..ClassifierConfig::default()
        };
        let tree = build(&graph, config);

        // trunk: r carries 3 paths (r-m1-l, r-m2-l, r-m2-x), every other paper fewer
        let kept: HashSet<_> = tree.papers().map(|(_, p)| p.id.clone()).collect();
        let expected: HashSet<String> = ["r", "l"].iter().map(|s| s.to_string()).collect();
        assert_eq!(kept, expected);
        // r -> l is not a direct citation
        assert_eq!(tree.edge_count(), 0);
        let r = tree.paper_by_id("r").unwrap();
        assert_eq!(r.root_score, 4.0);
        assert_eq!(r.trunk_score, 3.0);
    }

    #[test]
    fn test_clear_graph_keeps_edges_between_members() {
        let graph = fork();
        let config = ClassifierConfig {
            max_trunk: Count::Bounded(0),
            ..ClassifierConfig::default()
        };
        let tree = build(&graph, config);

        // Only roots and leaves remain: r, l, x
        assert_eq!(tree.paper_count(), 3);
        assert!(tree.paper_by_id("m1").is_none());
        assert_eq!(tree.edge_count(), 0);
        assert!(tree.papers().all(|(_, p)| p.trunk_score == 0.0));
    }
}
