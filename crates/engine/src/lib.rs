//! SAP classification engine
//!
//! Classifies the papers of a citation graph into the three parts of a tree:
//! - Roots: foundational works nobody in the corpus precedes
//! - Trunk: papers carrying the most root-to-leaf citation paths
//! - Leaves: recent endpoints supported by much of the corpus
//!
//! The pipeline is [`ScoreEngine`] -> [`Pruner`] -> [`TreeBuilder`], driven by
//! [`Classifier`] under one immutable [`ClassifierConfig`].

mod prune;
mod sapper;
mod score;
mod tree;

pub use prune::{Pruner, Selection};
pub use sapper::{Classifier, Sapper};
pub use score::{ScoreEngine, ScoredGraph};
pub use tree::TreeBuilder;

pub use sap_common::{CitationGraph, ClassifierConfig, Count, Paper, Role, RoleEntry};
