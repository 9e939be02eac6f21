//! SAP Loader
//!
//! Reads Web of Science exports into citation graphs:
//! - Tagged export parsing ([`wos`])
//! - Cited reference parsing and paper identity ([`reference`])
//! - Lazy source collections ([`Collection`])
//! - One connected graph per source ([`load`])

pub mod collection;
pub mod loader;
pub mod reference;
pub mod wos;

pub use collection::{make_collection, Collection, FileSource, Source, StdinSource, TextSource};
pub use loader::{build_graph, largest_component, load, Graphs};
pub use reference::CitedReference;
pub use wos::WosRecord;
