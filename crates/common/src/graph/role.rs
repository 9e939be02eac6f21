//! Structural roles and ranking order

use super::Paper;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Structural role of a paper in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Foundational work
    Root,
    /// Main citation path between roots and leaves
    Trunk,
    /// Recent influential endpoint
    Leaf,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Root, Role::Trunk, Role::Leaf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Trunk => "trunk",
            Role::Leaf => "leaf",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order two scored papers, best first
///
/// Higher score first, then older year, then name, then id. The id makes the
/// order total, so repeated runs always agree.
pub fn compare_ranked(a: (f64, &Paper), b: (f64, &Paper)) -> Ordering {
    let (score_a, paper_a) = a;
    let (score_b, paper_b) = b;
    score_b
        .total_cmp(&score_a)
        .then_with(|| paper_a.year.cmp(&paper_b.year))
        .then_with(|| paper_a.name.cmp(&paper_b.name))
        .then_with(|| paper_a.id.cmp(&paper_b.id))
}

/// One member of a role, as shown in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub score: f64,
    pub name: String,
    pub doi: Option<String>,
    pub year: i32,
}

impl RoleEntry {
    pub fn new(score: f64, paper: &Paper) -> Self {
        Self {
            score,
            name: paper.name.clone(),
            doi: paper.doi.clone(),
            year: paper.year,
        }
    }

    /// Resolvable URL for the DOI, if there is one
    pub fn doi_url(&self, resolver: &str) -> Option<String> {
        self.doi
            .as_deref()
            .filter(|doi| !doi.is_empty())
            .map(|doi| format!("{}{}", resolver, doi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        let old = Paper::new("1", "Zeta", 1990);
        let young = Paper::new("2", "Alpha", 2000);
        let same_year = Paper::new("3", "Beta", 1990);

        // Score wins first
        assert_eq!(compare_ranked((5.0, &young), (3.0, &old)), Ordering::Less);
        // Then older year
        assert_eq!(compare_ranked((3.0, &old), (3.0, &young)), Ordering::Less);
        // Then name
        assert_eq!(compare_ranked((3.0, &same_year), (3.0, &old)), Ordering::Less);
        assert_eq!(compare_ranked((3.0, &old), (3.0, &old)), Ordering::Equal);
    }

    #[test]
    fn test_doi_url() {
        let paper = Paper::new("1", "A", 2000).with_doi("10.1000/xyz");
        let entry = RoleEntry::new(1.0, &paper);
        assert_eq!(
            entry.doi_url("https://dx.doi.org/").as_deref(),
            Some("https://dx.doi.org/10.1000/xyz")
        );

        let bare = RoleEntry::new(1.0, &Paper::new("2", "B", 2000));
        assert_eq!(bare.doi_url("https://dx.doi.org/"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Trunk.to_string(), "trunk");
        assert_eq!(Role::ALL.len(), 3);
    }
}
