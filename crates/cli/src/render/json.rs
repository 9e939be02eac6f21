//! JSON export

use sap_common::errors::Result;
use sap_common::CitationGraph;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    nodes: Vec<NodeRecord<'a>>,
    edges: Vec<EdgeRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct NodeRecord<'a> {
    id: &'a str,
    name: &'a str,
    year: i32,
    doi: Option<&'a str>,
    root: f64,
    trunk: f64,
    leaf: f64,
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    source: &'a str,
    target: &'a str,
}

/// Write a classified graph as a JSON document
///
/// Edges refer to papers by id and run from the cited paper to the citing one.
pub fn write_json<W: Write>(graph: &CitationGraph, mut out: W) -> Result<()> {
    let nodes = graph
        .papers()
        .map(|(_, paper)| NodeRecord {
            id: &paper.id,
            name: &paper.name,
            year: paper.year,
            doi: paper.doi.as_deref(),
            root: paper.root_score,
            trunk: paper.trunk_score,
            leaf: paper.leaf_score,
        })
        .collect();
    let edges = graph
        .citations()
        .map(|(cited, citing)| EdgeRecord {
            source: &graph.paper(cited).id,
            target: &graph.paper(citing).id,
        })
        .collect();

    serde_json::to_writer_pretty(&mut out, &GraphDocument { nodes, edges })?;
    writeln!(out)?;
    Ok(())
}
