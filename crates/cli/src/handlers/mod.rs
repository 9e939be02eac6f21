//! Command handlers

pub mod describe;
pub mod export;
pub mod listing;

use sap_common::errors::{Result, SapError};
use sap_common::CitationGraph;
use sap_engine::Classifier;
use sap_ingestion::{load, Collection};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{error, warn};

/// State shared by every command of one invocation
pub struct Context {
    pub classifier: Classifier,
    pub doi_resolver: String,
}

/// Output file, or standard output when no path is given
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Classify every graph of a collection and hand each tree to `f`
///
/// Sources that produced no papers are skipped with a warning. A graph
/// rejected by the classifier is skipped and the remaining graphs are still
/// processed; the first rejection is returned at the end. Loader errors stop
/// immediately.
pub fn for_each_tree<F>(ctx: &Context, collection: Collection, mut f: F) -> Result<()>
where
    F: FnMut(usize, &CitationGraph) -> Result<()>,
{
    let mut deferred: Option<SapError> = None;
    for (position, graph) in load(collection).enumerate() {
        let graph = graph?;
        if graph.is_empty() {
            warn!(graph = position, "Source produced no papers, skipped");
            continue;
        }
        match ctx.classifier.classify(&graph) {
            Ok(tree) => f(position, &tree)?,
            Err(e) if e.is_graph_local() => {
                error!(graph = position, error = %e, "Graph skipped");
                deferred.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }
    deferred.map_or(Ok(()), Err)
}
