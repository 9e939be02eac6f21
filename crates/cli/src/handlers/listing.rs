//! `sap root`, `sap trunk` and `sap leaf`

use super::{for_each_tree, open_output, Context};
use crate::cli::ListArgs;
use crate::render::ranked_listing;
use sap_common::errors::Result;
use sap_common::Role;
use sap_ingestion::Collection;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

pub fn run(ctx: &Context, role: Role, args: &ListArgs) -> anyhow::Result<()> {
    let mut out = open_output(args.input.output.as_deref())?;
    let urls = list(ctx, role, Collection::from_paths(&args.input.sources), &mut out)?;
    out.flush()?;

    if args.open {
        for url in urls {
            if let Err(e) = open_in_browser(&url) {
                warn!(url = %url, error = %e, "Could not open browser");
            }
        }
    }
    Ok(())
}

/// Write the ranked members of `role` for every graph
///
/// Graphs where the role is empty are skipped with a warning. Returns the DOI
/// links of every listed paper, in listing order.
pub fn list<W: Write>(
    ctx: &Context,
    role: Role,
    collection: Collection,
    out: &mut W,
) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    let mut listed = 0usize;

    for_each_tree(ctx, collection, |position, tree| {
        let entries = tree.selected(role);
        if entries.is_empty() {
            warn!(graph = position, role = %role, "No {} selected, graph skipped", role);
            return Ok(());
        }
        if listed > 0 {
            writeln!(out)?;
        }
        for line in ranked_listing(&entries, &ctx.doi_resolver) {
            writeln!(out, "{}", line)?;
        }
        urls.extend(entries.iter().filter_map(|e| e.doi_url(&ctx.doi_resolver)));
        listed += 1;
        Ok(())
    })?;

    debug!(role = %role, graphs = listed, "Listing written");
    Ok(urls)
}

fn open_in_browser(url: &str) -> io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{collection, context, EXPORT};
    use sap_common::{ClassifierConfig, Count};

    fn listing(config: ClassifierConfig, role: Role, texts: &[&str]) -> (String, Vec<String>) {
        let ctx = context(config);
        let mut out = Vec::new();
        let urls = list(&ctx, role, collection(texts), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), urls)
    }

    #[test]
    fn test_trunk_listing() {
        let (text, urls) = listing(ClassifierConfig::default(), Role::Trunk, &[EXPORT]);
        assert_eq!(
            text,
            "1.00 Classic C, 1990, NATURE\n\
             1.00 Adams A, 2018, SCIENTOMETRICS\n\
             0.50 Baker B, 2010, SCIENTOMETRICS, DOI 10.1007/tree.2010 https://dx.doi.org/10.1007/tree.2010\n"
        );
        assert_eq!(urls, vec!["https://dx.doi.org/10.1007/tree.2010"]);
    }

    #[test]
    fn test_graphs_are_separated() {
        let (text, _) = listing(ClassifierConfig::default(), Role::Root, &[EXPORT, EXPORT]);
        assert_eq!(text, "1.00 Classic C, 1990, NATURE\n\n1.00 Classic C, 1990, NATURE\n");
    }

    #[test]
    fn test_empty_role_skips_graph() {
        // The only leaf is reached by two root paths
        let config = ClassifierConfig {
            min_leaf_connections: Count::Bounded(3),
            ..ClassifierConfig::default()
        };
        let (text, urls) = listing(config, Role::Leaf, &[EXPORT]);
        assert!(text.is_empty());
        assert!(urls.is_empty());
    }
}
