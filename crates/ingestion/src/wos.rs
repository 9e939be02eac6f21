//! Web of Science tagged export parser
//!
//! Parses the "plain text" export format: two-letter field tags in the first
//! two columns, continuation lines indented by three spaces, `ER` closing each
//! record and `EF` closing the file.

use sap_common::errors::{Result, SapError};
use std::collections::HashMap;
use std::io::BufRead;
use tracing::debug;

/// One exported record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WosRecord {
    fields: HashMap<String, Vec<String>>,
}

impl WosRecord {
    /// All values of a field, one per line
    pub fn values(&self, tag: &str) -> &[String] {
        self.fields.get(tag).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// First value of a field
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.values(tag)
            .first()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Authors in cited-reference form ("Smith, J" -> "Smith J")
    pub fn first_author(&self) -> Option<String> {
        self.first("AU").map(|author| author.replace(',', ""))
    }

    pub fn title(&self) -> Option<&str> {
        self.first("TI")
    }

    pub fn year(&self) -> Option<i32> {
        self.first("PY").and_then(|y| y.parse().ok())
    }

    /// Abbreviated source title, falling back to the full one
    pub fn source(&self) -> Option<&str> {
        self.first("J9").or_else(|| self.first("SO"))
    }

    pub fn volume(&self) -> Option<&str> {
        self.first("VL")
    }

    pub fn first_page(&self) -> Option<&str> {
        self.first("BP")
    }

    pub fn doi(&self) -> Option<&str> {
        self.first("DI")
    }

    /// Cited references, one per entry
    pub fn references(&self) -> &[String] {
        self.values("CR")
    }

    /// Label in cited-reference style
    ///
    /// `AUTHOR, YEAR, SOURCE, V<vol>, P<page>, DOI <doi>` with absent parts
    /// left out, so a record reads like the references that point to it.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(author) = self.first_author() {
            parts.push(author);
        }
        if let Some(year) = self.year() {
            parts.push(year.to_string());
        }
        if let Some(source) = self.source() {
            parts.push(source.to_string());
        }
        if let Some(volume) = self.volume() {
            parts.push(format!("V{}", volume));
        }
        if let Some(page) = self.first_page() {
            parts.push(format!("P{}", page));
        }
        if let Some(doi) = self.doi() {
            parts.push(format!("DOI {}", doi));
        }
        parts.join(", ")
    }

    fn push(&mut self, tag: &str, value: &str) {
        self.fields
            .entry(tag.to_string())
            .or_default()
            .push(value.to_string());
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse every record of an export
pub fn parse<R: BufRead>(mut reader: R, source_name: &str) -> Result<Vec<WosRecord>> {
    let mut records = Vec::new();
    let mut current = WosRecord::default();
    let mut last_tag: Option<String> = None;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let text = String::from_utf8_lossy(&buf);
        let mut line = text.trim_end_matches(['\n', '\r']);
        if line_no == 1 {
            line = line.trim_start_matches('\u{feff}');
        }

        if line.trim().is_empty() {
            continue;
        }

        if let Some(value) = line.strip_prefix("   ") {
            let tag = last_tag.as_deref().ok_or_else(|| SapError::Parse {
                source_name: source_name.to_string(),
                line: line_no,
                message: "continuation line outside of a field".to_string(),
            })?;
            current.push(tag, value.trim());
            continue;
        }

        let (tag, value) = split_tag(line).ok_or_else(|| SapError::Parse {
            source_name: source_name.to_string(),
            line: line_no,
            message: format!("expected a field tag, found {:?}", truncate(line, 40)),
        })?;

        match tag {
            "FN" | "VR" => last_tag = None,
            "EF" => break,
            "ER" => {
                if !current.is_empty() {
                    records.push(std::mem::take(&mut current));
                }
                last_tag = None;
            }
            _ => {
                current.push(tag, value);
                last_tag = Some(tag.to_string());
            }
        }
    }

    if !current.is_empty() {
        // Missing final ER
        records.push(current);
    }

    debug!(source = source_name, records = records.len(), "Export parsed");
    Ok(records)
}

/// Split `XX value` into its tag and value
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let tag = line.get(..2)?;
    if !tag.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return None;
    }
    let rest = &line[2..];
    if rest.is_empty() {
        return Some((tag, ""));
    }
    rest.strip_prefix(' ').map(|value| (tag, value.trim()))
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
