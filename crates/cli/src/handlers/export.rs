//! `sap export`

use super::{open_output, Context};
use crate::cli::{ExportArgs, ExportFormat};
use crate::render::{write_graphml, write_json};
use anyhow::bail;
use sap_common::errors::Result;
use sap_common::CitationGraph;
use sap_ingestion::{load, Collection};
use std::io::Write;
use tracing::{info, warn};

pub fn run(ctx: &Context, args: &ExportArgs) -> anyhow::Result<()> {
    let Some(tree) = classify_first(ctx, Collection::from_paths(&args.input.sources))? else {
        return Ok(());
    };

    let mut out = open_output(args.input.output.as_deref())?;
    export(&tree, args.format, &mut out)?;
    out.flush()?;

    info!(
        papers = tree.paper_count(),
        citations = tree.edge_count(),
        format = ?args.format,
        "Tree exported"
    );
    Ok(())
}

/// Classify the first graph of a collection
///
/// Later sources are never opened. Returns `None` when the first source
/// produced no papers.
pub fn classify_first(ctx: &Context, collection: Collection) -> anyhow::Result<Option<CitationGraph>> {
    let mut graphs = load(collection);
    let Some(graph) = graphs.next() else {
        bail!("no input source");
    };
    let graph = graph?;
    if graphs.len() > 0 {
        info!(ignored = graphs.len(), "Only the first source is exported");
    }
    drop(graphs);

    if graph.is_empty() {
        warn!(graph = 0, "Source produced no papers, skipped");
        return Ok(None);
    }
    Ok(Some(ctx.classifier.classify(&graph)?))
}

/// Write a classified graph in the requested format
pub fn export<W: Write>(tree: &CitationGraph, format: ExportFormat, out: &mut W) -> Result<()> {
    match format {
        ExportFormat::Graphml => write_graphml(tree, out)?,
        ExportFormat::Json => write_json(tree, out)?,
    }
    Ok(())
}
