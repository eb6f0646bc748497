use crate::{examples, lca, Node, Tree};
use color_eyre::eyre::{Report, Result};

fn nodes<'t>(tree: &'t Tree, labels: &[&str]) -> Vec<&'t Node> {
    labels.iter().filter_map(|l| tree.get_by_label(l)).collect()
}

fn lca_label(tree: &Tree, labels: &[&str]) -> Option<String> {
    tree.lca_all(nodes(tree, labels)).map(|n| n.label().to_string())
}

#[test]
fn siblings() -> Result<(), Report> {
    let tree = examples::example_1()?;
    assert_eq!(lca_label(&tree, &["A", "B"]).as_deref(), Some("N1"));
    assert_eq!(lca_label(&tree, &["C", "D"]).as_deref(), Some("N2"));
    assert_eq!(lca_label(&tree, &["E", "G"]).as_deref(), Some("N4"));
    Ok(())
}

#[test]
fn different_depths() -> Result<(), Report> {
    let tree = examples::example_1()?;
    assert_eq!(lca_label(&tree, &["A", "N2"]).as_deref(), Some("N3"));
    assert_eq!(lca_label(&tree, &["B", "F"]).as_deref(), Some("Root"));
    assert_eq!(lca_label(&tree, &["N4", "D"]).as_deref(), Some("Root"));
    Ok(())
}

#[test]
fn ancestor_and_self() -> Result<(), Report> {
    let tree = examples::example_1()?;
    assert_eq!(lca_label(&tree, &["N3", "C"]).as_deref(), Some("N3"));
    assert_eq!(lca_label(&tree, &["A", "A"]).as_deref(), Some("A"));
    assert_eq!(lca_label(&tree, &["Root", "G"]).as_deref(), Some("Root"));
    Ok(())
}

#[test]
fn symmetric() -> Result<(), Report> {
    let tree = examples::example_1()?;
    for x in &tree {
        for y in &tree {
            let xy = lca::lca(tree.arena(), x, y).map(|n| n.id());
            let yx = lca::lca(tree.arena(), y, x).map(|n| n.id());
            assert_eq!(xy, yx);
            assert!(xy.is_some());
        }
    }
    Ok(())
}

#[test]
fn many() -> Result<(), Report> {
    let tree = examples::example_1()?;
    assert_eq!(lca_label(&tree, &["E", "F", "G"]).as_deref(), Some("N4"));
    assert_eq!(lca_label(&tree, &["A", "B", "C"]).as_deref(), Some("N3"));
    assert_eq!(lca_label(&tree, &["A", "B", "C", "E"]).as_deref(), Some("Root"));
    assert_eq!(lca_label(&tree, &["F"]).as_deref(), Some("F"));
    assert_eq!(lca_label(&tree, &[]), None);
    Ok(())
}
