//! Command line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use sap_common::AppConfig;
use std::path::PathBuf;

/// Tree of Science classification for citation networks
///
/// Reads Web of Science exports, builds one citation graph per source and
/// splits it into roots, trunk and leaves.
///
/// Examples:
///   sap describe savedrecs.txt
///   sap -r 10 -l 30 -a 5 root savedrecs.txt
///   sap export --format json -o tree.json savedrecs.txt
///   cat savedrecs.txt | sap leaf -
#[derive(Parser, Debug)]
#[command(name = "sap")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Maximum number of roots (0 or negative: unlimited)
    #[arg(short = 'r', long, global = true, allow_negative_numbers = true)]
    pub max_roots: Option<i64>,

    /// Maximum number of trunk papers (0 or negative: unlimited)
    #[arg(short = 't', long, global = true, allow_negative_numbers = true)]
    pub max_trunk: Option<i64>,

    /// Maximum number of leaves (0 or negative: unlimited)
    #[arg(short = 'l', long, global = true, allow_negative_numbers = true)]
    pub max_leaves: Option<i64>,

    /// Maximum leaf age in years, relative to the newest paper
    #[arg(short = 'a', long, global = true, allow_negative_numbers = true)]
    pub max_leaf_age: Option<i64>,

    /// Minimum number of root paths reaching a leaf
    #[arg(short = 'c', long = "min-leaf-conns", global = true, allow_negative_numbers = true)]
    pub min_leaf_connections: Option<i64>,

    /// Keep papers outside the selected roles
    #[arg(short = 'w', long, global = true)]
    pub whole_graph: bool,

    /// Extra configuration file, layered over config/ and under SAP__* variables
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify the first graph and write it as GraphML or JSON
    Export(ExportArgs),

    /// Print a structural summary of every graph
    Describe(InputArgs),

    /// List the roots of every graph
    Root(ListArgs),

    /// List the trunk of every graph
    Trunk(ListArgs),

    /// List the leaves of every graph
    Leaf(ListArgs),
}

/// Sources and output shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Write to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Web of Science exports; `-` or nothing reads standard input
    #[arg(value_name = "SOURCES")]
    pub sources: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Graphml)]
    pub format: ExportFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Open every DOI link in the browser
    #[arg(long)]
    pub open: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Graphml,
    Json,
}

impl Cli {
    /// Layer command line limits over the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        let limits = &mut config.limits;
        let overrides = [
            (&mut limits.max_roots, self.max_roots),
            (&mut limits.max_trunk, self.max_trunk),
            (&mut limits.max_leaves, self.max_leaves),
            (&mut limits.max_leaf_age, self.max_leaf_age),
            (&mut limits.min_leaf_connections, self.min_leaf_connections),
        ];
        for (slot, value) in overrides {
            if value.is_some() {
                *slot = value;
            }
        }
        if self.whole_graph {
            limits.clear_graph = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sap_common::Count;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_limits_anywhere() {
        let cli = Cli::parse_from(["sap", "-r", "3", "root", "-l", "-1", "a.txt", "b.txt"]);
        assert_eq!(cli.max_roots, Some(3));
        assert_eq!(cli.max_leaves, Some(-1));
        match cli.command {
            Command::Root(args) => {
                assert_eq!(args.input.sources.len(), 2);
                assert!(!args.open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_export_format() {
        let cli = Cli::parse_from(["sap", "export", "--format", "json", "-o", "out.json", "-"]);
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.format, ExportFormat::Json);
                assert_eq!(args.input.output, Some(PathBuf::from("out.json")));
                assert_eq!(args.input.sources, vec![PathBuf::from("-")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_win_over_config() {
        let mut config = AppConfig::default();
        config.limits.max_trunk = Some(7);
        config.limits.max_roots = Some(4);

        let cli = Cli::parse_from(["sap", "-r", "0", "-a", "5", "-w", "describe"]);
        cli.apply_overrides(&mut config);

        let classifier = config.classifier_config();
        assert_eq!(classifier.max_roots, Count::Unlimited);
        assert_eq!(classifier.max_trunk, Count::Bounded(7));
        assert_eq!(classifier.max_leaf_age, Count::Bounded(5));
        assert!(!classifier.clear_graph);
    }
}
