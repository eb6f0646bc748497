use crate::{examples, newick, FromNewick, NodeArena, Order, ToNewick, Tree};
use color_eyre::eyre::{Report, Result};
use indoc::indoc;

#[test]
fn postorder_ids_dense() -> Result<(), Report> {
    let tree = examples::example_1()?;
    let ids: Vec<_> = tree.iter().filter_map(|n| n.postorder_id()).collect();
    let expected: Vec<_> = (0..tree.node_count()).collect();
    assert_eq!(ids, expected);
    assert_eq!(tree.root_node().postorder_id(), Some(tree.node_count() - 1));
    Ok(())
}

#[test]
fn preorder_ids_dense() -> Result<(), Report> {
    let tree = examples::example_1()?;
    let ids: Vec<_> = tree.preorder(tree.root())?.filter_map(|n| n.preorder_id()).collect();
    let expected: Vec<_> = (0..tree.node_count()).collect();
    assert_eq!(ids, expected);
    assert_eq!(tree.root_node().preorder_id(), Some(0));
    Ok(())
}

#[test]
fn lookup_round_trip() -> Result<(), Report> {
    let tree = examples::example_1()?;
    for node in &tree {
        let pre = node.preorder_id().and_then(|id| tree.get_by_preorder_id(id));
        let post = node.postorder_id().and_then(|id| tree.get_by_postorder_id(id));
        let label = tree.get_by_label(node.label());
        assert_eq!(pre.map(|n| n.id()), Some(node.id()));
        assert_eq!(post.map(|n| n.id()), Some(node.id()));
        assert_eq!(label.map(|n| n.id()), Some(node.id()));
    }
    assert!(tree.get_by_preorder_id(12).is_none());
    assert!(tree.get_by_label("Z").is_none());
    Ok(())
}

#[test]
fn depth() -> Result<(), Report> {
    let tree = examples::example_1()?;
    let depth = |label: &str| tree.get_by_label(label).map(|n| n.depth());

    assert_eq!(depth("Root"), Some(0));
    assert_eq!(depth("N4"), Some(1));
    assert_eq!(depth("N1"), Some(2));
    assert_eq!(depth("A"), Some(3));
    assert_eq!(depth("G"), Some(2));

    for node in &tree {
        if let Some(parent) = node.parent() {
            assert_eq!(node.depth(), tree[parent].depth() + 1);
        }
    }
    Ok(())
}

#[test]
fn subtree_aggregates() -> Result<(), Report> {
    let tree = examples::example_1()?;

    let root = tree.root_node();
    assert_eq!(root.num_nodes(), 11);
    assert_eq!(root.num_leaves(), 7);
    assert!((root.subtree_branch_length() - 6.6).abs() < 1e-9);

    let n3 = tree.get_by_label("N3").unwrap();
    assert_eq!(n3.num_nodes(), 6);
    assert_eq!(n3.num_leaves(), 4);
    assert!((n3.subtree_branch_length() - 2.1).abs() < 1e-9);

    let a = tree.get_by_label("A").unwrap();
    assert_eq!(a.num_nodes(), 0);
    assert_eq!(a.num_leaves(), 1);
    assert_eq!(a.subtree_branch_length(), 0.0);
    Ok(())
}

#[test]
fn duplicate_labels() -> Result<(), Report> {
    let tree = Tree::from_newick("((A:1,B:2)X:3,(C:4,D:5)X:6)R;")?;
    // the last X visited in post-order wins
    let x = tree.get_by_label("X").unwrap();
    assert_eq!(x.branch_length(), 6.0);
    // unnamed nodes are all indexed under ""
    let tree = examples::example_2()?;
    assert_eq!(tree.get_by_label("").map(|n| n.id()), Some(tree.root()));
    Ok(())
}

#[test]
fn is_rooted() -> Result<(), Report> {
    assert!(Tree::from_newick("A;")?.is_rooted());
    assert!(Tree::from_newick("(A);")?.is_rooted());
    assert!(Tree::from_newick("(A,B);")?.is_rooted());
    assert!(!Tree::from_newick("(A,B,C);")?.is_rooted());
    Ok(())
}

#[test]
fn new_non_root() -> Result<(), Report> {
    let tree = examples::example_1()?;
    let n1 = tree.get_by_label("N1").unwrap().id();
    assert!(Tree::new(tree.arena().clone(), n1).is_err());
    Ok(())
}

#[test]
fn set_root() -> Result<(), Report> {
    let mut tree = examples::example_1()?;
    let mut arena = NodeArena::new();
    let r = arena.add_node("R", 0.0);
    let a = arena.add_node("A", 2.0);
    arena.add_child(r, a)?;

    // a failed replacement keeps the current tree
    assert!(tree.set_root(arena.clone(), a).is_err());
    assert_eq!(tree.node_count(), 12);

    tree.set_root(arena, r)?;
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.get_by_postorder_id(0).map(|n| n.label()), Some("A"));
    assert!(tree.get_by_label("N1").is_none());
    Ok(())
}

#[test]
fn copy_independent() -> Result<(), Report> {
    let tree = examples::example_1()?;
    let mut copy = tree.clone();

    let root = copy.root();
    copy.visit_mut(root, Order::PostOrder, |node| node.set_branch_length(0.0))?;
    copy.index()?;

    assert_eq!(copy.root_node().subtree_branch_length(), 0.0);
    assert!((tree.root_node().subtree_branch_length() - 6.6).abs() < 1e-9);
    assert!(copy.to_newick()?.contains("A:0,B:0"));

    // ids and lookups of the copy point into the copy
    for node in &copy {
        assert_eq!(copy.get_by_label(node.label()).map(|n| n.id()), Some(node.id()));
    }
    Ok(())
}

#[test]
fn relabel_and_reindex() -> Result<(), Report> {
    let mut tree = examples::example_1()?;
    let a = tree.get_by_label("A").unwrap().id();
    if let Some(node) = tree.node_mut(a) {
        node.set_label("Z");
    }
    // the label index is refreshed by the next index
    assert!(tree.get_by_label("Z").is_none());
    tree.index()?;
    assert_eq!(tree.get_by_label("Z").map(|n| n.id()), Some(a));
    assert!(tree.get_by_label("A").is_none());
    Ok(())
}

#[test]
fn to_graph() -> Result<(), Report> {
    let tree = examples::example_2()?;
    let graph = tree.to_graph();
    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 6);
    let weight: f64 = graph.edge_weights().sum();
    assert!((weight - 1.05).abs() < 1e-9);
    Ok(())
}

#[test]
fn to_dot() -> Result<(), Report> {
    let tree = newick::parse_newick("((A:1,B:2)C:3,D:4)R;")?;
    let observed = tree.to_dot();
    let expected = indoc! {r#"
        digraph {
            rankdir="LR"
            0 [ label="R" ]
            1 [ label="C" ]
            2 [ label="A" ]
            3 [ label="B" ]
            4 [ label="D" ]
            0 -> 1 [ label="3" ]
            1 -> 2 [ label="1" ]
            1 -> 3 [ label="2" ]
            0 -> 4 [ label="4" ]
        }
    "#};
    assert_eq!(observed, expected);
    Ok(())
}

#[test]
fn node_equality() -> Result<(), Report> {
    let tree = examples::example_1()?;

    // lookups return nodes equal to the source
    for node in &tree {
        assert_eq!(node.preorder_id().and_then(|id| tree.get_by_preorder_id(id)), Some(node));
        assert_eq!(node.postorder_id().and_then(|id| tree.get_by_postorder_id(id)), Some(node));
        assert_eq!(tree.get_by_label(node.label()), Some(node));
    }

    // same label, different post-order ids
    let twins = Tree::from_newick("((A,B)X,(C,D)X)R;")?;
    let x: Vec<_> = twins.iter().filter(|n| n.label() == "X").collect();
    assert_eq!(x.len(), 2);
    assert_ne!(x[0], x[1]);

    // a copy with a child removed keeps its post-order id and label
    let n3 = tree.get_by_label("N3").unwrap();
    let (mut copy, root) = tree.arena().copy_subtree(n3.id())?;
    let n1 = copy[root].children()[0];
    let (_subtree, _) = copy.remove_child(root, n1)?;
    assert_eq!(copy[root].children().len(), 1);
    assert_ne!(copy[root].children(), n3.children());
    assert_eq!(&copy[root], n3);
    Ok(())
}
