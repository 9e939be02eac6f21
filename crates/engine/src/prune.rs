//! Candidate pruning
//!
//! Applies, in order: candidate pools, leaf age filter, leaf connectivity
//! filter, then per-role size truncation by rank.

use crate::score::ScoredGraph;
use sap_common::graph::compare_ranked;
use sap_common::{ClassifierConfig, Count, PaperIndex, Role};
use tracing::{debug, instrument};

/// Papers kept for each role, best first
///
/// Roles may overlap; any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub roots: Vec<PaperIndex>,
    pub trunk: Vec<PaperIndex>,
    pub leaves: Vec<PaperIndex>,
}

impl Selection {
    /// Members of one role, best first
    pub fn members(&self, role: Role) -> &[PaperIndex] {
        match role {
            Role::Root => &self.roots,
            Role::Trunk => &self.trunk,
            Role::Leaf => &self.leaves,
        }
    }

    pub fn contains(&self, role: Role, idx: PaperIndex) -> bool {
        self.members(role).contains(&idx)
    }

    pub fn is_empty(&self, role: Role) -> bool {
        self.members(role).is_empty()
    }
}

/// Applies the configured limits to scored candidates
#[derive(Debug, Clone, Copy)]
pub struct Pruner {
    max_roots: Count,
    max_trunk: Count,
    max_leaves: Count,
    max_leaf_age: Count,
    min_leaf_connections: Count,
}

impl Pruner {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            max_roots: config.max_roots,
            max_trunk: config.max_trunk,
            max_leaves: config.max_leaves,
            max_leaf_age: config.max_leaf_age,
            min_leaf_connections: config.min_leaf_connections,
        }
    }

    /// Select the members of every role
    #[instrument(skip_all)]
    pub fn select(&self, scored: &ScoredGraph<'_>) -> Selection {
        let roots = scored.candidates(Role::Root);
        let trunk = scored.candidates(Role::Trunk);
        let mut leaves = scored.candidates(Role::Leaf);

        if let (Some(max_age), Some(newest)) =
            (self.max_leaf_age.limit(), scored.graph().newest_year())
        {
            let before = leaves.len();
            leaves.retain(|&idx| {
                let age = i64::from(newest) - i64::from(scored.graph().paper(idx).year);
                i64::try_from(max_age).map_or(true, |max| age <= max)
            });
            debug!(newest, max_age, dropped = before - leaves.len(), "Leaf age filter");
        }

        if let Some(min_paths) = self.min_leaf_connections.limit() {
            let before = leaves.len();
            leaves.retain(|&idx| scored.root_paths(idx) >= min_paths as f64);
            debug!(min_paths, dropped = before - leaves.len(), "Leaf connectivity filter");
        }

        Selection {
            roots: top(scored, Role::Root, roots, self.max_roots),
            trunk: top(scored, Role::Trunk, trunk, self.max_trunk),
            leaves: top(scored, Role::Leaf, leaves, self.max_leaves),
        }
    }
}

/// Rank candidates and keep the best `limit`
fn top(scored: &ScoredGraph<'_>, role: Role, mut candidates: Vec<PaperIndex>, limit: Count) -> Vec<PaperIndex> {
    let graph = scored.graph();
    candidates.sort_by(|&a, &b| {
        compare_ranked(
            (scored.score(a, role), graph.paper(a)),
            (scored.score(b, role), graph.paper(b)),
        )
    });
    if let Some(n) = limit.limit() {
        candidates.truncate(n);
    }
    candidates
}
