use crate::{Node, NodeId, Tree};

use itertools::Itertools;

/// Characters that can't appear in an unquoted label.
const RESERVED: &[char] = &['(', ')', ',', ';', ':', '\''];

/// Number of significant digits written for branch lengths.
const PRECISION: usize = 10;

/// Work items of the iterative writer.
enum Step {
    Open(NodeId),
    Close(NodeId),
    Comma,
}

/// Returns `tree` as a Newick string.
///
/// Every node gets its branch length (`:len`). With `jplace`, the post-order id of each
/// node follows its branch length as `{id}`.
///
/// ## Examples
///
/// ```rust
/// use arbor_phylo::newick;
/// let tree = newick::parse_newick("((A:0.1,B:0.2)C:0.3,D:0.4);")?;
/// assert_eq!(newick::to_newick(&tree, false), "((A:0.1,B:0.2)C:0.3,D:0.4):0;");
/// assert_eq!(newick::to_newick(&tree, true), "((A:0.1{0},B:0.2{1})C:0.3{2},D:0.4{3}):0{4};");
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn to_newick(tree: &Tree, jplace: bool) -> String {
    let mut newick = String::new();
    let mut stack = vec![Step::Open(tree.root())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                let node = &tree[id];
                match node.is_leaf() {
                    true => write_node(&mut newick, node, jplace),
                    false => {
                        newick.push('(');
                        stack.push(Step::Close(id));
                        // reversed, so that the leftmost child is written first
                        let children = node.children().iter().rev().map(|id| Step::Open(*id));
                        stack.extend(Itertools::intersperse_with(children, || Step::Comma));
                    }
                }
            }
            Step::Close(id) => {
                newick.push(')');
                write_node(&mut newick, &tree[id], jplace);
            }
            Step::Comma => newick.push(','),
        }
    }

    newick.push(';');
    newick
}

/// Writes the label, branch length and optional post-order id of one node.
fn write_node(newick: &mut String, node: &Node, jplace: bool) {
    newick.push_str(&quote_label(node.label()));
    newick.push(':');
    newick.push_str(&format_length(node.branch_length()));
    if jplace {
        let id = node.postorder_id().map(|id| id.to_string()).unwrap_or_default();
        newick.push_str(&format!("{{{id}}}"));
    }
}

/// Quotes labels that would otherwise be read back as structure.
fn quote_label(label: &str) -> String {
    match label.contains(RESERVED) || label.contains(char::is_whitespace) {
        true => format!("'{label}'"),
        false => label.to_string(),
    }
}

/// Formats a number with [`PRECISION`] significant digits, like C's `%.10g`.
///
/// ```text
/// 0.35         -> 0.35
/// 1.0          -> 1
/// 0.1 + 0.2    -> 0.3
/// 0.000001234  -> 1.234e-6
/// 9999999999.7 -> 1e10
/// ```
pub(crate) fn format_length(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return match value == 0.0 {
            true => "0".to_string(),
            false => value.to_string(),
        };
    }

    // the exponent after rounding to PRECISION digits picks the notation
    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else { return scientific };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };

    match exponent < -5 || exponent >= PRECISION as i32 {
        true => format!("{}e{exponent}", trim_zeros(mantissa)),
        false => {
            let decimals = (PRECISION as i32 - 1 - exponent).max(0) as usize;
            trim_zeros(&format!("{value:.decimals$}")).to_string()
        }
    }
}

/// Removes trailing zeros of a decimal fraction, and the point if nothing is left.
fn trim_zeros(number: &str) -> &str {
    match number.contains('.') {
        true => number.trim_end_matches('0').trim_end_matches('.'),
        false => number,
    }
}
