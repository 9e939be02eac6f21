//! `sap describe`

use super::{for_each_tree, open_output, Context};
use crate::cli::InputArgs;
use crate::render::write_summary;
use sap_common::errors::Result;
use sap_ingestion::Collection;
use std::io::Write;

pub fn run(ctx: &Context, args: &InputArgs) -> anyhow::Result<()> {
    let mut out = open_output(args.output.as_deref())?;
    describe(ctx, Collection::from_paths(&args.sources), &mut out)?;
    out.flush()?;
    Ok(())
}

/// One summary per graph, separated by blank lines
pub fn describe<W: Write>(ctx: &Context, collection: Collection, out: &mut W) -> Result<()> {
    let mut described = 0usize;
    for_each_tree(ctx, collection, |_, tree| {
        if described > 0 {
            writeln!(out)?;
        }
        write_summary(tree, &mut *out)?;
        described += 1;
        Ok(())
    })
}
