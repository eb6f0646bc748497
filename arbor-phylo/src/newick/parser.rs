use crate::{NodeArena, NodeId, Tree};

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use log::debug;

/// The quote that toggles literal (label) mode.
const QUOTE: u8 = b'\'';

/// An incremental [Newick](https://en.wikipedia.org/wiki/Newick_format) parser.
///
/// The parser is a byte-at-a-time state machine, [`NewickParser::parse`] can be called once
/// per chunk of input and chunk boundaries can fall anywhere. Parsing ends at the first
/// `;`, after which [`NewickParser::into_tree`] hands the finished structure to
/// [`Tree::new`].
///
/// A parser is single-use. After an error, or after the tree was taken, create a new one.
///
/// ## Examples
///
/// ```rust
/// use arbor_phylo::newick::NewickParser;
///
/// let mut parser = NewickParser::new();
/// parser.parse("((A:0.1,'B ")?;
/// parser.parse("(x)':0.2)C:0")?;
/// assert!(!parser.is_finished());
/// parser.parse(".3);")?;
///
/// let tree = parser.into_tree()?;
/// let labels: Vec<_> = tree.iter().map(|n| n.label()).collect();
/// assert_eq!(labels, ["A", "B (x)", "C", ""]);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Debug, Default)]
pub struct NewickParser {
    arena: NodeArena,
    /// Nodes whose description has been opened but not closed, innermost last.
    stack: Vec<NodeId>,
    root: Option<NodeId>,
    /// Pending `label:length` text of the current node.
    text: Vec<u8>,
    /// True when the current node accepts text, false right after `(` or `,`.
    parsing_node: bool,
    /// True inside a quoted label.
    quoted: bool,
    finished: bool,
}

impl NewickParser {
    pub fn new() -> Self {
        NewickParser::default()
    }

    /// Parses the next chunk of input.
    ///
    /// Input after the terminating `;` is ignored.
    ///
    /// - If a branch length is not a number, returns an Error.
    /// - If parentheses are unbalanced or there is more than one root, returns an Error.
    pub fn parse<B: AsRef<[u8]>>(&mut self, chunk: B) -> Result<(), Report> {
        for byte in chunk.as_ref() {
            if self.finished {
                break;
            }
            self.parse_byte(*byte)?;
        }
        Ok(())
    }

    /// Returns true once the terminating `;` has been parsed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the handle of the root, [`None`] until the terminating `;` has been parsed.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the nodes parsed so far.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Consumes the parser and returns the indexed [`Tree`].
    ///
    /// - If the terminating `;` was never reached, returns an Error.
    pub fn into_tree(self) -> Result<Tree, Report> {
        match self.root {
            Some(root) => Tree::new(self.arena, root),
            None => Err(eyre!("Failed to build tree, incomplete newick input: missing ';'.")),
        }
    }

    fn parse_byte(&mut self, byte: u8) -> Result<(), Report> {
        if self.quoted && byte != QUOTE {
            self.push_text(byte);
            return Ok(());
        }
        match byte {
            QUOTE => self.quoted = !self.quoted,
            b'(' => self.handle_left_parenthesis()?,
            b')' => self.handle_right_parenthesis()?,
            b',' => self.handle_comma()?,
            b';' => self.handle_semicolon()?,
            // line breaks and tabs between tokens are layout, not label text
            b'\n' | b'\r' | b'\t' => (),
            // so are spaces before the text of a node
            b' ' if self.text.is_empty() => (),
            _ => self.push_text(byte),
        }
        Ok(())
    }

    /// Opens a node whose children come first, its own text follows the `)`.
    fn handle_left_parenthesis(&mut self) -> Result<(), Report> {
        // '(' is only valid at the start, or after '(' or ','
        if self.parsing_node {
            let text = String::from_utf8_lossy(&self.text);
            Err(eyre!("Failed to parse newick, unexpected '(' after node text {text:?} (missing ','?)."))?
        }
        self.start_node();
        Ok(())
    }

    /// Closes the last child, the following text belongs to the parent.
    fn handle_right_parenthesis(&mut self) -> Result<(), Report> {
        self.finish_child()?;
        self.parsing_node = true;
        Ok(())
    }

    /// Closes a node, a sibling follows.
    fn handle_comma(&mut self) -> Result<(), Report> {
        self.finish_child()
    }

    /// Closes the last node, which becomes the root.
    fn handle_semicolon(&mut self) -> Result<(), Report> {
        // right after '(' or ',' a node description is still missing
        if !self.parsing_node {
            Err(eyre!("Failed to parse newick, no node description before ';'."))?
        }
        let root = self.finish_node()?;
        if !self.stack.is_empty() {
            Err(eyre!("Failed to parse newick, unbalanced parentheses: {} unclosed '('.", self.stack.len()))?
        }
        self.root = Some(root);
        self.finished = true;
        debug!("Parsed newick tree of {} nodes.", self.arena.len());
        Ok(())
    }

    fn push_text(&mut self, byte: u8) {
        // A node can start with a parenthesis, "(A,B)C", or directly with a label, "A".
        // In the second case the node is created by its first character.
        if !self.parsing_node {
            self.start_node();
            self.parsing_node = true;
        }
        self.text.push(byte);
    }

    fn start_node(&mut self) {
        let id = self.arena.add_node("", 0.0);
        self.stack.push(id);
    }

    /// Finishes the current node and attaches it to its parent.
    fn finish_child(&mut self) -> Result<(), Report> {
        // an empty description, as in "(,A)" or "()", is an unnamed leaf
        if !self.parsing_node {
            self.start_node();
        }
        let node = self.finish_node()?;
        let parent = self
            .stack
            .last()
            .copied()
            .ok_or_else(|| eyre!("Failed to parse newick, node has no enclosing '(' (unbalanced parentheses or multiple roots)."))?;
        self.arena.add_child(parent, node)
    }

    /// Applies the pending text to the current node and pops it.
    fn finish_node(&mut self) -> Result<NodeId, Report> {
        let id = self
            .stack
            .pop()
            .ok_or_else(|| eyre!("Failed to parse newick, unbalanced parentheses."))?;
        let text = std::mem::take(&mut self.text);
        self.parsing_node = false;
        if text.is_empty() {
            return Ok(id);
        }

        let text = String::from_utf8(text).wrap_err("Failed to parse newick, node text is not valid UTF-8.")?;
        // the content can be "label:length", ":length", "label" or ""
        let (label, length) = match text.rfind(':') {
            Some(i) => (&text[..i], Some(&text[i + 1..])),
            None => (text.as_str(), None),
        };
        let label = match text.starts_with(':') {
            true => "",
            false => label,
        };
        let node = &mut self.arena[id];
        node.set_label(label);
        if let Some(length) = length {
            let length = length
                .trim()
                .parse::<f64>()
                .wrap_err_with(|| eyre!("Failed to parse branch length from newick: {text:?}"))?;
            node.set_branch_length(length);
        }
        Ok(id)
    }
}
