//! Citation graph representation
//!
//! Papers are vertices and citations are edges. Edges follow the flow of
//! knowledge: they run from the cited (older) paper to the citing (newer)
//! paper, so foundational work has no incoming edge and the most recent work
//! has no outgoing edge.

mod paper;
mod role;

pub use paper::Paper;
pub use role::{compare_ranked, Role, RoleEntry};

use crate::errors::{Result, SapError};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Position of a paper inside one [`CitationGraph`]
pub type PaperIndex = NodeIndex;

/// In-memory citation graph
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    /// Papers and cited -> citing edges
    graph: DiGraph<Paper, ()>,

    /// Paper id -> vertex
    index: HashMap<String, PaperIndex>,
}

impl CitationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paper, returning its vertex
    ///
    /// Ids are unique: adding a paper whose id is already present returns the
    /// existing vertex and leaves it untouched.
    pub fn add_paper(&mut self, paper: Paper) -> PaperIndex {
        if let Some(&existing) = self.index.get(&paper.id) {
            return existing;
        }
        let id = paper.id.clone();
        let idx = self.graph.add_node(paper);
        self.index.insert(id, idx);
        idx
    }

    /// Record that `citing` cites `cited`
    ///
    /// Duplicate citations and self-citations are ignored; returns whether a
    /// new edge was added.
    pub fn add_citation(&mut self, cited: PaperIndex, citing: PaperIndex) -> bool {
        if cited == citing || self.graph.contains_edge(cited, citing) {
            return false;
        }
        self.graph.add_edge(cited, citing, ());
        true
    }

    /// Record a citation between two papers identified by id
    pub fn add_citation_by_id(&mut self, cited: &str, citing: &str) -> Result<bool> {
        let cited = self.require(cited)?;
        let citing = self.require(citing)?;
        Ok(self.add_citation(cited, citing))
    }

    fn require(&self, id: &str) -> Result<PaperIndex> {
        self.index_of(id)
            .ok_or_else(|| SapError::PaperNotFound { id: id.to_string() })
    }

    /// Vertex of the paper with this id
    pub fn index_of(&self, id: &str) -> Option<PaperIndex> {
        self.index.get(id).copied()
    }

    /// Paper at a vertex
    pub fn paper(&self, idx: PaperIndex) -> &Paper {
        &self.graph[idx]
    }

    /// Paper with this id
    pub fn paper_by_id(&self, id: &str) -> Option<&Paper> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// All papers in insertion order
    pub fn papers(&self) -> impl Iterator<Item = (PaperIndex, &Paper)> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// All citations as (cited, citing) pairs
    pub fn citations(&self) -> impl Iterator<Item = (PaperIndex, PaperIndex)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
    }

    /// Papers cited by this paper
    pub fn references_of(&self, idx: PaperIndex) -> impl Iterator<Item = PaperIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    /// Papers citing this paper
    pub fn cited_by(&self, idx: PaperIndex) -> impl Iterator<Item = PaperIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Number of papers citing this paper
    pub fn citation_count(&self, idx: PaperIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// Number of papers this paper cites
    pub fn reference_count(&self, idx: PaperIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    pub fn paper_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Publication year of the newest paper
    pub fn newest_year(&self) -> Option<i32> {
        self.graph.node_weights().map(|p| p.year).max()
    }

    /// Publication year of the oldest paper
    pub fn oldest_year(&self) -> Option<i32> {
        self.graph.node_weights().map(|p| p.year).min()
    }

    /// Underlying petgraph structure
    pub fn inner(&self) -> &DiGraph<Paper, ()> {
        &self.graph
    }

    /// Build a new graph from the papers `f` keeps
    ///
    /// Citations survive when both endpoints are kept. Relative order of the
    /// kept papers and citations is preserved.
    pub fn filter_map_papers<F>(&self, mut f: F) -> CitationGraph
    where
        F: FnMut(PaperIndex, &Paper) -> Option<Paper>,
    {
        let graph = self.graph.filter_map(|idx, paper| f(idx, paper), |_, _| Some(()));
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].id.clone(), idx))
            .collect();
        CitationGraph { graph, index }
    }

    /// Papers whose score for `role` is positive, best first
    pub fn selected(&self, role: Role) -> Vec<RoleEntry> {
        let mut ranked: Vec<(f64, &Paper)> = self
            .graph
            .node_weights()
            .map(|paper| (paper.score(role), paper))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        ranked.sort_by(|a, b| compare_ranked(*a, *b));
        ranked
            .into_iter()
            .map(|(score, paper)| RoleEntry::new(score, paper))
            .collect()
    }

    /// Selected roots, best first
    pub fn selected_roots(&self) -> Vec<RoleEntry> {
        self.selected(Role::Root)
    }

    /// Selected trunk papers, best first
    pub fn selected_trunk(&self) -> Vec<RoleEntry> {
        self.selected(Role::Trunk)
    }

    /// Selected leaves, best first
    pub fn selected_leaves(&self) -> Vec<RoleEntry> {
        self.selected(Role::Leaf)
    }
}

impl PartialEq for CitationGraph {
    /// Same papers (with scores) and same citations, compared by id
    fn eq(&self, other: &Self) -> bool {
        if self.paper_count() != other.paper_count() || self.edge_count() != other.edge_count() {
            return false;
        }
        let same_papers = self.papers().all(|(_, paper)| {
            other
                .paper_by_id(&paper.id)
                .map_or(false, |theirs| theirs == paper)
        });
        same_papers
            && self.citations().all(|(cited, citing)| {
                match (
                    other.index_of(&self.paper(cited).id),
                    other.index_of(&self.paper(citing).id),
                ) {
                    (Some(a), Some(b)) => other.graph.contains_edge(a, b),
                    _ => false,
                }
            })
    }
}
