use arbor_phylo::newick;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// Structs

/// Output format of a converted tree.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
pub enum Format {
    /// Newick, with a branch length on every node.
    #[default]
    Newick,
    /// Newick with the post-order id of each node, as `{id}` after its branch length.
    Jplace,
    /// Graphviz DOT.
    Dot,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let lowercase = format!("{:?}", self).to_lowercase();
        write!(f, "{lowercase}")
    }
}

/// Arguments for tree conversion.
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Newick tree file.
    pub tree: PathBuf,

    /// Output file path.
    #[clap(short = 'o', long)]
    pub output: PathBuf,

    /// Output format.
    #[clap(short = 'f', long)]
    #[clap(value_enum, default_value_t = Format::default())]
    pub format: Format,
}

// ----------------------------------------------------------------------------
// Functions

/// Loads a tree and writes it to the output path in the requested format.
pub fn write(args: &Args) -> Result<(), Report> {
    let tree = newick::load_newick(&args.tree)?;
    let output = &args.output;
    info!("Writing {} output: {output:?}", args.format);

    match args.format {
        Format::Newick => newick::save_tree(&tree, output)?,
        Format::Jplace => {
            let mut file = File::create(output).wrap_err_with(|| eyre!("Failed to create file: {output:?}"))?;
            newick::write_tree(&tree, &mut file, true)?;
        }
        Format::Dot => {
            std::fs::write(output, tree.to_dot()).wrap_err_with(|| eyre!("Failed to write file: {output:?}"))?
        }
    }

    Ok(())
}
