use arbor::tree::{convert, lca, nodes, stats};
use arbor::{cli, cli::Cli};
use clap::Parser;
use color_eyre::eyre::{Report, Result};

fn main() -> Result<(), Report> {
    // ------------------------------------------------------------------------
    // CLI Setup

    // Parse CLI parameters
    let args = Cli::parse();

    // initialize color_eyre crate for colorized logs
    color_eyre::install()?;

    // Set logging/verbosity level via RUST_LOG
    std::env::set_var("RUST_LOG", args.verbosity.to_string());

    // initialize env_logger crate for logging/verbosity level
    env_logger::init();

    // check which CLI command we're running (stats, convert, lca, nodes)
    match args.command {
        cli::Command::Stats(args) => println!("{}", serde_json::to_string_pretty(&stats::summary(&args)?)?),
        cli::Command::Convert(args) => convert::write(&args)?,
        cli::Command::Lca(args) => println!("{}", serde_json::to_string_pretty(&lca::ancestor(&args)?)?),
        cli::Command::Nodes(args) => println!("{}", serde_json::to_string_pretty(&nodes::list(&args)?)?),
    }

    Ok(())
}
