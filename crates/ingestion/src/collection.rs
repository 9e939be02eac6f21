//! Lazy input collections
//!
//! A [`Collection`] is an ordered list of sources that have not been read
//! yet. Nothing is opened until the loader asks for the source's graph.

use sap_common::errors::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Something a graph can be read from
pub trait Source: Send {
    /// Name used in logs and errors
    fn name(&self) -> String;

    /// Open the source for reading
    ///
    /// The returned reader is dropped as soon as the source is parsed.
    fn open(&self) -> Result<Box<dyn BufRead + '_>>;
}

/// Export file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Standard input
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl Source for StdinSource {
    fn name(&self) -> String {
        "<stdin>".to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(std::io::stdin().lock()))
    }
}

/// Export held in memory
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl Source for TextSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }
}

/// Ordered, unread input sources
#[derive(Default)]
pub struct Collection {
    sources: Vec<Box<dyn Source>>,
}

impl Collection {
    pub fn new(sources: Vec<Box<dyn Source>>) -> Self {
        Self { sources }
    }

    /// Collection over file paths; `-` stands for standard input
    ///
    /// An empty path list reads standard input.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut sources: Vec<Box<dyn Source>> = paths
            .into_iter()
            .map(|path| -> Box<dyn Source> {
                let path = path.as_ref();
                if path == Path::new("-") {
                    Box::new(StdinSource)
                } else {
                    Box::new(FileSource::new(path))
                }
            })
            .collect();
        if sources.is_empty() {
            sources.push(Box::new(StdinSource));
        }
        Self { sources }
    }

    /// Append a source
    pub fn push(&mut self, source: impl Source + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source names in order
    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub(crate) fn into_sources(self) -> Vec<Box<dyn Source>> {
        self.sources
    }
}

/// Build a collection from ready sources
pub fn make_collection<I>(sources: I) -> Collection
where
    I: IntoIterator<Item = Box<dyn Source>>,
{
    Collection::new(sources.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_from_paths_maps_dash_to_stdin() {
        let collection = Collection::from_paths(["a.txt", "-", "b.txt"]);
        assert_eq!(collection.names(), vec!["a.txt", "<stdin>", "b.txt"]);
    }

    #[test]
    fn test_empty_paths_read_stdin() {
        let collection = Collection::from_paths(Vec::<PathBuf>::new());
        assert_eq!(collection.names(), vec!["<stdin>"]);
    }

    #[test]
    fn test_construction_does_not_open_files() {
        // A missing file only fails once it is opened
        let collection = Collection::from_paths(["/definitely/not/here.txt"]);
        assert_eq!(collection.len(), 1);

        let source = FileSource::new("/definitely/not/here.txt");
        assert!(source.open().is_err());
    }

    #[test]
    fn test_text_source() {
        let source = TextSource::new("memory", "PT J\nER\n");
        let mut text = String::new();
        source.open().unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "PT J\nER\n");

        let mut collection = Collection::default();
        collection.push(source);
        assert_eq!(collection.names(), vec!["memory"]);
    }
}
