//! Graph loading
//!
//! Turns each source of a [`Collection`] into one connected citation graph,
//! lazily and in order.

use crate::collection::{Collection, Source};
use crate::reference::{record_key, CitedReference};
use crate::wos::{self, WosRecord};
use petgraph::unionfind::UnionFind;
use sap_common::errors::Result;
use sap_common::metrics::record_graph_loaded;
use sap_common::{CitationGraph, Paper, PaperIndex};
use std::collections::HashMap;
use std::iter::FusedIterator;
use tracing::{debug, info, instrument, warn};

/// Lazy sequence of graphs, one per source
///
/// Each call to `next` opens, parses and closes exactly one source. The
/// sequence cannot be restarted; dropping it leaves the remaining sources
/// unopened.
pub struct Graphs {
    sources: std::vec::IntoIter<Box<dyn Source>>,
}

impl Iterator for Graphs {
    type Item = Result<CitationGraph>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.sources.next()?;
        Some(load_source(source.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sources.size_hint()
    }
}

impl ExactSizeIterator for Graphs {}

impl FusedIterator for Graphs {}

/// Load every source of a collection, one graph at a time
pub fn load(collection: Collection) -> Graphs {
    Graphs {
        sources: collection.into_sources().into_iter(),
    }
}

#[instrument(skip_all, fields(source = %source.name()))]
fn load_source(source: &dyn Source) -> Result<CitationGraph> {
    let records = {
        let reader = source.open()?;
        wos::parse(reader, &source.name())?
    };

    let graph = largest_component(&build_graph(&records));
    record_graph_loaded(graph.paper_count(), graph.edge_count());
    info!(
        records = records.len(),
        papers = graph.paper_count(),
        citations = graph.edge_count(),
        "Graph loaded"
    );
    Ok(graph)
}

/// Build the citation graph of a set of records
///
/// Records are added before any reference so their metadata wins when a
/// reference points back to a record. Citations run from the cited paper to
/// the citing one; citations of a paper published after the citing record
/// are dropped.
pub fn build_graph(records: &[WosRecord]) -> CitationGraph {
    let mut graph = CitationGraph::new();
    let mut citing: Vec<(PaperIndex, &WosRecord)> = Vec::with_capacity(records.len());

    for record in records {
        let (Some(key), Some(year)) = (record_key(record), record.year()) else {
            warn!(label = %record.label(), "Record without publication year skipped");
            continue;
        };
        let mut paper = Paper::new(key, record.label(), year);
        paper.doi = record.doi().map(str::to_string);
        citing.push((graph.add_paper(paper), record));
    }

    let mut skipped_references = 0usize;
    let mut dropped_citations = 0usize;
    for (citing_idx, record) in citing {
        let citing_year = graph.paper(citing_idx).year;
        for text in record.references() {
            let Some(reference) = CitedReference::parse(text) else {
                skipped_references += 1;
                continue;
            };
            let cited_idx = match graph.index_of(&reference.key()) {
                Some(idx) => idx,
                None => {
                    let mut paper = Paper::new(reference.key(), reference.label.clone(), reference.year);
                    paper.doi = reference.doi.clone();
                    graph.add_paper(paper)
                }
            };
            if graph.paper(cited_idx).year > citing_year {
                dropped_citations += 1;
                continue;
            }
            graph.add_citation(cited_idx, citing_idx);
        }
    }

    debug!(
        papers = graph.paper_count(),
        citations = graph.edge_count(),
        skipped_references,
        dropped_citations,
        "Citation graph built"
    );
    graph
}

/// Keep the largest weakly connected component
///
/// Ties go to the component holding the earliest inserted paper.
pub fn largest_component(graph: &CitationGraph) -> CitationGraph {
    let n = graph.paper_count();
    if n == 0 {
        return graph.clone();
    }

    let mut components = UnionFind::<usize>::new(n);
    for (cited, citing) in graph.citations() {
        components.union(cited.index(), citing.index());
    }

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for i in 0..n {
        *sizes.entry(components.find(i)).or_default() += 1;
    }

    let mut best: Option<(usize, usize)> = None;
    for i in 0..n {
        let component = components.find(i);
        let size = sizes[&component];
        if best.map_or(true, |(_, best_size)| size > best_size) {
            best = Some((component, size));
        }
    }

    let Some((component, size)) = best else {
        return graph.clone();
    };
    debug!(component_size = size, total = n, "Largest component selected");
    graph.filter_map_papers(|idx, paper| {
        (components.find(idx.index()) == component).then(|| paper.clone())
    })
}
