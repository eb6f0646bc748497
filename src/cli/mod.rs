//! [Command-line interface](Cli) (CLI) of the main binary.

use crate::tree::{convert, lca, nodes, stats};
use crate::Verbosity;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
/// ---
/// The CLI is intended for parsing user input from the command-line in the main function. This is achieved with the `parse` function, which parses the command line arguments from [`std::env::args`](https://doc.rust-lang.org/std/env/fn.args.html).
/// ```no_run
/// use clap::Parser;
/// let args = arbor::Cli::parse();
/// ```
/// The command-line arguments from `std::env::args` are simply a vector of space separated strings. Here is a manual example of setting the command-line input:
/// ```rust
/// # use clap::Parser;
/// let input = ["arbor", "convert", "tree.nwk", "--output", "tree.dot", "--format", "dot", "--verbosity", "debug"];
/// let args = arbor::Cli::parse_from(input);
/// let json = serde_json::to_string_pretty(&args)?;
/// assert!(json.contains("\"format\": \"Dot\""));
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
/// With the following pretty JSON representation:
/// ```json
/// {
///   "command": {
///     "Convert": {
///       "tree": "tree.nwk",
///       "output": "tree.dot",
///       "format": "Dot"
///     }
///   },
///   "verbosity": "Debug"
/// }
/// ```
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(name = "arbor", author, version)]
#[clap(about = "arbor loads, indexes, queries and converts phylogenetic trees in Newick format.")]
pub struct Cli {
    #[clap(subcommand)]
    /// Pass CLI arguments to a particular [Command].
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(hide_possible_values = false)]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants). Used to decide which runtime [Command](#variants) the CLI arguments should be passed to.
#[derive(Debug, Deserialize, Serialize, Subcommand)]
pub enum Command {
    /// Pass CLI arguments to [stats::summary].
    #[clap(about = "Print summary statistics of a tree as JSON.")]
    Stats(stats::Args),

    /// Pass CLI arguments to [convert::write].
    #[clap(about = "Convert a tree to Newick, jplace Newick or DOT.")]
    Convert(convert::Args),

    /// Pass CLI arguments to [lca::ancestor].
    /// <br>
    /// ```rust
    /// use arbor::{cli::Command, Cli};
    /// use clap::Parser;
    /// let args = Cli::parse_from(["arbor", "lca", "tree.nwk", "A", "B"]);
    /// match args.command {
    ///   Command::Lca(args) => assert_eq!(args.labels, ["A", "B"]),
    ///   _ => unreachable!(),
    /// }
    /// ```
    #[clap(about = "Print the lowest common ancestor of labelled nodes as JSON.")]
    Lca(lca::Args),

    /// Pass CLI arguments to [nodes::list].
    #[clap(about = "Print every node of a tree, in post-order, as JSON.")]
    Nodes(nodes::Args),
}
