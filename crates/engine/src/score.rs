//! Structural scoring
//!
//! Every score is a pure function of topology:
//! - root: papers reachable from a paper without references
//! - leaf: papers reaching a paper nobody cites
//! - trunk: root-to-paper paths times paper-to-leaf paths (main-path flow)

use petgraph::algo::toposort;
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;
use sap_common::errors::{Result, SapError};
use sap_common::{CitationGraph, Paper, PaperIndex, Role};
use tracing::{debug, instrument};

/// Citation graph with per-paper role scores
///
/// Borrows the graph it was computed from; the graph itself is not changed.
#[derive(Debug, Clone)]
pub struct ScoredGraph<'g> {
    graph: &'g CitationGraph,
    root: Vec<f64>,
    trunk: Vec<f64>,
    leaf: Vec<f64>,
    root_paths: Vec<f64>,
}

impl<'g> ScoredGraph<'g> {
    /// Graph the scores belong to
    pub fn graph(&self) -> &'g CitationGraph {
        self.graph
    }

    /// Raw score of a paper for one role
    pub fn score(&self, idx: PaperIndex, role: Role) -> f64 {
        let scores = match role {
            Role::Root => &self.root,
            Role::Trunk => &self.trunk,
            Role::Leaf => &self.leaf,
        };
        scores[idx.index()]
    }

    /// Number of distinct paths from any root to this paper
    pub fn root_paths(&self, idx: PaperIndex) -> f64 {
        self.root_paths[idx.index()]
    }

    /// Papers with a positive score for `role`, in graph order
    pub fn candidates(&self, role: Role) -> Vec<PaperIndex> {
        self.graph
            .papers()
            .map(|(idx, _)| idx)
            .filter(|&idx| self.score(idx, role) > 0.0)
            .collect()
    }

    /// Copy of a paper carrying its raw scores
    pub fn scored_paper(&self, idx: PaperIndex) -> Paper {
        let mut paper = self.graph.paper(idx).clone();
        for role in Role::ALL {
            paper.set_score(role, self.score(idx, role));
        }
        paper
    }

    /// Full copy of the graph annotated with raw scores
    pub fn to_graph(&self) -> CitationGraph {
        self.graph
            .filter_map_papers(|idx, _| Some(self.scored_paper(idx)))
    }
}

/// Computes root, trunk and leaf scores
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score every paper of an acyclic graph
    ///
    /// Fails with [`SapError::CyclicGraph`] when citations form a cycle.
    #[instrument(skip_all, fields(papers = graph.paper_count()))]
    pub fn score<'g>(&self, graph: &'g CitationGraph) -> Result<ScoredGraph<'g>> {
        let dag = graph.inner();
        let order = toposort(dag, None).map_err(|cycle| SapError::CyclicGraph {
            paper: graph.paper(cycle.node_id()).name.clone(),
        })?;

        let n = graph.paper_count();
        let mut root = vec![0.0; n];
        let mut leaf = vec![0.0; n];

        for (idx, _) in graph.papers() {
            if graph.reference_count(idx) == 0 {
                let mut dfs = Dfs::new(dag, idx);
                let mut reached = 0usize;
                while dfs.next(dag).is_some() {
                    reached += 1;
                }
                root[idx.index()] = (reached - 1) as f64;
            }
            if graph.citation_count(idx) == 0 {
                let reversed = Reversed(dag);
                let mut dfs = Dfs::new(reversed, idx);
                let mut reached = 0usize;
                while dfs.next(reversed).is_some() {
                    reached += 1;
                }
                leaf[idx.index()] = (reached - 1) as f64;
            }
        }

        let root_paths = count_paths(graph, &order, Direction::Incoming);
        let mut reverse_order = order;
        reverse_order.reverse();
        let leaf_paths = count_paths(graph, &reverse_order, Direction::Outgoing);

        let trunk = root_paths
            .iter()
            .zip(&leaf_paths)
            .map(|(forward, backward)| forward * backward)
            .collect();

        debug!(
            roots = root.iter().filter(|s| **s > 0.0).count(),
            leaves = leaf.iter().filter(|s| **s > 0.0).count(),
            "Graph scored"
        );

        Ok(ScoredGraph {
            graph,
            root,
            trunk,
            leaf,
            root_paths,
        })
    }
}

/// Count paths reaching each paper from the papers with no neighbour on `from`
///
/// `order` must visit every paper after all of its `from` neighbours.
fn count_paths(graph: &CitationGraph, order: &[PaperIndex], from: Direction) -> Vec<f64> {
    let dag = graph.inner();
    let mut paths = vec![0.0; graph.paper_count()];
    for &idx in order {
        let mut sources = dag.neighbors_directed(idx, from).peekable();
        let count = if sources.peek().is_none() {
            1.0
        } else {
            sources.map(|s| paths[s.index()]).sum()
        };
        paths[idx.index()] = count;
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(papers: &[(&str, i32)], citations: &[(&str, &str)]) -> CitationGraph {
        let mut graph = CitationGraph::new();
        for &(id, year) in papers {
            graph.add_paper(Paper::new(id, id.to_uppercase(), year));
        }
        for &(cited, citing) in citations {
            graph.add_citation_by_id(cited, citing).unwrap();
        }
        graph
    }

    fn score_of(scored: &ScoredGraph, id: &str, role: Role) -> f64 {
        scored.score(scored.graph().index_of(id).unwrap(), role)
    }

    #[test]
    fn test_chain_scores() {
        let graph = graph_of(
            &[("a", 1990), ("b", 1995), ("c", 2000)],
            &[("a", "b"), ("b", "c")],
        );
        let scored = ScoreEngine::new().score(&graph).unwrap();

        assert_eq!(score_of(&scored, "a", Role::Root), 2.0);
        assert_eq!(score_of(&scored, "b", Role::Root), 0.0);
        assert_eq!(score_of(&scored, "c", Role::Leaf), 2.0);
        assert_eq!(score_of(&scored, "b", Role::Leaf), 0.0);
        for id in ["a", "b", "c"] {
            assert_eq!(score_of(&scored, id, Role::Trunk), 1.0);
        }
    }

    #[test]
    fn test_diamond_path_counts() {
        //   a -> b -> d
        //   a -> c -> d -> e
        let graph = graph_of(
            &[("a", 1990), ("b", 1995), ("c", 1996), ("d", 2000), ("e", 2005)],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")],
        );
        let scored = ScoreEngine::new().score(&graph).unwrap();

        let d = graph.index_of("d").unwrap();
        assert_eq!(scored.root_paths(d), 2.0);
        // Both routes through d: 2 paths in, 1 path out
        assert_eq!(score_of(&scored, "d", Role::Trunk), 2.0);
        assert_eq!(score_of(&scored, "a", Role::Trunk), 2.0);
        assert_eq!(score_of(&scored, "b", Role::Trunk), 1.0);
        assert_eq!(score_of(&scored, "a", Role::Root), 4.0);
        assert_eq!(score_of(&scored, "e", Role::Leaf), 4.0);
    }

    #[test]
    fn test_reachability_counts_distinct_papers() {
        // Two roots sharing descendants
        let graph = graph_of(
            &[("r1", 1980), ("r2", 1982), ("m", 1990), ("l1", 2000), ("l2", 2001)],
            &[("r1", "m"), ("r2", "m"), ("m", "l1"), ("m", "l2"), ("r1", "l1")],
        );
        let scored = ScoreEngine::new().score(&graph).unwrap();

        assert_eq!(score_of(&scored, "r1", Role::Root), 3.0);
        assert_eq!(score_of(&scored, "r2", Role::Root), 3.0);
        assert_eq!(score_of(&scored, "l1", Role::Leaf), 3.0);
        assert_eq!(score_of(&scored, "l2", Role::Leaf), 3.0);
        // r1 -> l1 directly, r1 -> m -> l1, r2 -> m -> l1
        assert_eq!(scored.root_paths(graph.index_of("l1").unwrap()), 3.0);
    }

    #[test]
    fn test_isolated_paper_holds_no_end_role() {
        let graph = graph_of(&[("solo", 2000)], &[]);
        let scored = ScoreEngine::new().score(&graph).unwrap();

        assert_eq!(score_of(&scored, "solo", Role::Root), 0.0);
        assert_eq!(score_of(&scored, "solo", Role::Leaf), 0.0);
        assert_eq!(score_of(&scored, "solo", Role::Trunk), 1.0);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let graph = graph_of(
            &[("a", 2000), ("b", 2000), ("c", 2000)],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        );
        let err = ScoreEngine::new().score(&graph).unwrap_err();
        assert!(matches!(err, SapError::CyclicGraph { .. }));
    }

    #[test]
    fn test_empty_graph() {
        let graph = CitationGraph::new();
        let scored = ScoreEngine::new().score(&graph).unwrap();
        assert!(scored.candidates(Role::Root).is_empty());
        assert!(scored.to_graph().is_empty());
    }

    #[test]
    fn test_to_graph_carries_raw_scores() {
        let graph = graph_of(&[("a", 1990), ("b", 1995)], &[("a", "b")]);
        let scored = ScoreEngine::new().score(&graph).unwrap();
        let annotated = scored.to_graph();

        assert_eq!(annotated.paper_by_id("a").unwrap().root_score, 1.0);
        assert_eq!(annotated.paper_by_id("b").unwrap().leaf_score, 1.0);
        // Input is left unscored
        assert_eq!(graph.paper_by_id("a").unwrap().root_score, 0.0);
    }
}
