//! Output renderers
//!
//! Everything here writes to an `io::Write`; the caller decides whether that
//! is a file or standard output.

mod graphml;
mod json;
mod summary;

pub use graphml::write_graphml;
pub use json::write_json;
pub use summary::{ranked_listing, write_summary};
