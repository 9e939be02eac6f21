//! GraphML export

use sap_common::{CitationGraph, Role};
use std::io::{self, Write};

const KEYS: [(&str, &str); 6] = [
    ("name", "string"),
    ("year", "int"),
    ("doi", "string"),
    ("root", "double"),
    ("trunk", "double"),
    ("leaf", "double"),
];

/// Write a classified graph as GraphML
///
/// Papers become `n{index}` nodes carrying their metadata and role scores.
pub fn write_graphml<W: Write>(graph: &CitationGraph, mut out: W) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(out, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#)?;
    for (key, kind) in KEYS {
        writeln!(
            out,
            r#"  <key id="{key}" for="node" attr.name="{key}" attr.type="{kind}"/>"#
        )?;
    }
    writeln!(out, r#"  <graph id="sap" edgedefault="directed">"#)?;

    for (idx, paper) in graph.papers() {
        writeln!(out, r#"    <node id="n{}">"#, idx.index())?;
        writeln!(out, r#"      <data key="name">{}</data>"#, escape(&paper.name))?;
        writeln!(out, r#"      <data key="year">{}</data>"#, paper.year)?;
        if let Some(doi) = &paper.doi {
            writeln!(out, r#"      <data key="doi">{}</data>"#, escape(doi))?;
        }
        for role in Role::ALL {
            writeln!(
                out,
                r#"      <data key="{}">{}</data>"#,
                role.as_str(),
                paper.score(role)
            )?;
        }
        writeln!(out, "    </node>")?;
    }

    for (cited, citing) in graph.citations() {
        writeln!(
            out,
            r#"    <edge source="n{}" target="n{}"/>"#,
            cited.index(),
            citing.index()
        )?;
    }

    writeln!(out, "  </graph>")?;
    writeln!(out, "</graphml>")?;
    out.flush()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
