//! Cited reference parsing and paper identity
//!
//! References look like `Doe A, 2001, J STUD, V10, P1, DOI 10.1000/abc`.
//! A paper's identity is its DOI when known, otherwise the
//! `AUTHOR, YEAR, SOURCE` prefix, so a record and the references pointing to
//! it land on the same vertex.

use crate::wos::WosRecord;
use regex_lite::Regex;
use std::sync::OnceLock;

/// A parsed cited reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitedReference {
    /// Reference text as exported
    pub label: String,
    pub author: String,
    pub year: i32,
    pub source: Option<String>,
    pub doi: Option<String>,
}

impl CitedReference {
    /// Parse a reference; `None` when it carries no publication year
    pub fn parse(text: &str) -> Option<Self> {
        let label = text.trim();
        let caps = reference_pattern().captures(label)?;
        let author = caps.name("author")?.as_str().trim().to_string();
        let year = caps.name("year")?.as_str().parse().ok()?;
        let source = caps
            .name("source")
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let doi = doi_pattern()
            .captures(label)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        Some(Self {
            label: label.to_string(),
            author,
            year,
            source,
            doi,
        })
    }

    /// Identity key shared with the record it refers to
    pub fn key(&self) -> String {
        identity_key(
            self.doi.as_deref(),
            &self.author,
            self.year,
            self.source.as_deref(),
        )
    }
}

/// Identity key of an exported record
pub fn record_key(record: &WosRecord) -> Option<String> {
    let year = record.year()?;
    let author = record.first_author().unwrap_or_default();
    Some(identity_key(record.doi(), &author, year, record.source()))
}

fn identity_key(doi: Option<&str>, author: &str, year: i32, source: Option<&str>) -> String {
    match doi {
        Some(doi) if !doi.is_empty() => format!("doi:{}", doi.to_lowercase()),
        _ => format!(
            "{}, {}, {}",
            author.to_uppercase(),
            year,
            source.unwrap_or_default().to_uppercase()
        ),
    }
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<author>[^,]*),\s*(?P<year>\d{4})(?:,\s*(?P<source>[^,]+))?")
            .expect("reference pattern is valid")
    })
}

fn doi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"DOI\s+\[?([^\s,\]]+)").expect("doi pattern is valid")
    })
}
