use crate::tree::{convert, lca, nodes, stats};
use color_eyre::eyre::{Report, Result};
use indoc::indoc;
use std::path::PathBuf;
use tempfile::TempDir;

const NEWICK: &str = "(((A:0.1,B:0.2)N1:0.3,(C:0.4,D:0.5)N2:0.6)N3:0.7,(E:0.8,F:0.9,G:1.0)N4:1.1)Root:1.2;";

/// Writes the example tree to a new temporary directory.
fn setup() -> Result<(TempDir, PathBuf), Report> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tree.nwk");
    std::fs::write(&path, NEWICK)?;
    Ok((dir, path))
}

#[test]
fn stats_summary() -> Result<(), Report> {
    let (_dir, tree) = setup()?;
    let observed = stats::summary(&stats::Args { tree })?;

    assert_eq!(observed.nodes, 12);
    assert_eq!(observed.leaves, 7);
    assert!(observed.rooted);
    assert_eq!(observed.max_depth, 3);
    assert!((observed.total_branch_length - 6.6).abs() < 1e-9);
    Ok(())
}

#[test]
fn stats_missing_file() -> Result<(), Report> {
    let (dir, _tree) = setup()?;
    let args = stats::Args { tree: dir.path().join("missing.nwk") };
    assert!(stats::summary(&args).is_err());
    Ok(())
}

#[test]
fn lca_ancestor() -> Result<(), Report> {
    let (_dir, tree) = setup()?;
    let labels = ["A", "D"].map(String::from).to_vec();
    let observed = lca::ancestor(&lca::Args { tree, labels })?;

    let expected = lca::Ancestor { label: "N3".to_string(), postorder_id: Some(6), depth: 1 };
    assert_eq!(observed, expected);
    Ok(())
}

#[test]
fn lca_unknown_label() -> Result<(), Report> {
    let (_dir, tree) = setup()?;
    let labels = ["A", "X"].map(String::from).to_vec();
    assert!(lca::ancestor(&lca::Args { tree, labels }).is_err());
    Ok(())
}

#[test]
fn nodes_list() -> Result<(), Report> {
    let (_dir, tree) = setup()?;
    let observed = nodes::list(&nodes::Args { tree })?;

    let labels: Vec<_> = observed.iter().map(|n| n.label()).collect();
    assert_eq!(labels, ["A", "B", "N1", "C", "D", "N2", "N3", "E", "F", "G", "N4", "Root"]);
    let ids: Vec<_> = observed.iter().filter_map(|n| n.postorder_id()).collect();
    assert_eq!(ids, (0..12).collect::<Vec<_>>());

    let json = serde_json::to_value(&observed)?;
    assert_eq!(json[0]["label"], "A");
    assert_eq!(json[11]["num_leaves"], 7);
    Ok(())
}

#[test]
fn convert_newick() -> Result<(), Report> {
    let (dir, tree) = setup()?;
    let output = dir.path().join("output.nwk");
    let args = convert::Args { tree, output: output.clone(), format: convert::Format::Newick };
    convert::write(&args)?;

    let expected = "(((A:0.1,B:0.2)N1:0.3,(C:0.4,D:0.5)N2:0.6)N3:0.7,(E:0.8,F:0.9,G:1)N4:1.1)Root:1.2;\n";
    assert_eq!(std::fs::read_to_string(&output)?, expected);
    Ok(())
}

#[test]
fn convert_jplace() -> Result<(), Report> {
    let (dir, tree) = setup()?;
    let output = dir.path().join("output.jplace.nwk");
    let args = convert::Args { tree, output: output.clone(), format: convert::Format::Jplace };
    convert::write(&args)?;

    let observed = std::fs::read_to_string(&output)?;
    assert!(observed.starts_with("(((A:0.1{0},B:0.2{1})N1:0.3{2},"));
    assert!(observed.ends_with(")Root:1.2{11};\n"));
    Ok(())
}

#[test]
fn convert_dot() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    let tree = dir.path().join("tree.nwk");
    std::fs::write(&tree, "(A:1,B:2)R;")?;
    let output = dir.path().join("tree.dot");
    let args = convert::Args { tree, output: output.clone(), format: convert::Format::Dot };
    convert::write(&args)?;

    let expected = indoc! {r#"
        digraph {
            rankdir="LR"
            0 [ label="R" ]
            1 [ label="A" ]
            2 [ label="B" ]
            0 -> 1 [ label="1" ]
            0 -> 2 [ label="2" ]
        }
    "#};
    assert_eq!(std::fs::read_to_string(&output)?, expected);
    Ok(())
}
