//! Structural summary and ranked listings

use sap_common::{CitationGraph, Role, RoleEntry};
use std::io::{self, Write};

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Root => "roots",
        Role::Trunk => "trunk",
        Role::Leaf => "leaves",
    }
}

/// Write the structural summary of a classified graph
pub fn write_summary<W: Write>(graph: &CitationGraph, mut out: W) -> io::Result<()> {
    let years = match (graph.oldest_year(), graph.newest_year()) {
        (Some(oldest), Some(newest)) => format!("{}-{}", oldest, newest),
        _ => "n/a".to_string(),
    };
    writeln!(
        out,
        "SAP graph: {} papers, {} citations, years {}",
        graph.paper_count(),
        graph.edge_count(),
        years
    )?;
    for role in Role::ALL {
        let entries = graph.selected(role);
        match entries.first() {
            Some(best) => writeln!(
                out,
                "{}: {} (max score {})",
                role_label(role),
                entries.len(),
                best.score
            )?,
            None => writeln!(out, "{}: 0", role_label(role))?,
        }
    }
    Ok(())
}

/// Listing lines, best first
///
/// Each line is the score relative to the best one, the paper name and its
/// DOI link when the paper has one.
pub fn ranked_listing(entries: &[RoleEntry], resolver: &str) -> Vec<String> {
    let Some(max) = entries.first().map(|e| e.score).filter(|s| *s > 0.0) else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| {
            let line = format!("{:.2} {}", entry.score / max, entry.name);
            match entry.doi_url(resolver) {
                Some(url) => format!("{} {}", line, url),
                None => line,
            }
        })
        .collect()
}
