//! Paper vertex

use super::Role;
use serde::{Deserialize, Serialize};

/// A paper in the citation graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Stable key, unique within one graph
    pub id: String,

    /// Display label
    pub name: String,

    /// Publication year
    pub year: i32,

    /// Digital Object Identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Root importance (0 = not a root)
    #[serde(default)]
    pub root_score: f64,

    /// Trunk importance (0 = not on the trunk)
    #[serde(default)]
    pub trunk_score: f64,

    /// Leaf importance (0 = not a leaf)
    #[serde(default)]
    pub leaf_score: f64,
}

impl Paper {
    /// Create an unscored paper
    pub fn new(id: impl Into<String>, name: impl Into<String>, year: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year,
            doi: None,
            root_score: 0.0,
            trunk_score: 0.0,
            leaf_score: 0.0,
        }
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Score for one role
    pub fn score(&self, role: Role) -> f64 {
        match role {
            Role::Root => self.root_score,
            Role::Trunk => self.trunk_score,
            Role::Leaf => self.leaf_score,
        }
    }

    pub fn set_score(&mut self, role: Role, score: f64) {
        match role {
            Role::Root => self.root_score = score,
            Role::Trunk => self.trunk_score = score,
            Role::Leaf => self.leaf_score = score,
        }
    }

    /// Whether the paper holds any role
    pub fn is_member(&self) -> bool {
        Role::ALL.iter().any(|&role| self.score(role) > 0.0)
    }
}
