//! Text renderings of a tree shape.
//!
//! The traversal strings write entries as `key`, or `(key | payload)` when a
//! payload is present. [`Vertical`] and [`Boxed`] draw the shape itself.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display, Write};
use core::iter;

use crate::traversal::{InOrder, PostOrder, PreOrder};
use crate::view::NodeView;

struct Label<'a, K, D>(&'a K, Option<&'a D>);

impl<K: Display, D: Display> Display for Label<'_, K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(payload) => write!(f, "({} | {payload})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

fn join<'a, K, D>(entries: impl Iterator<Item = (&'a K, Option<&'a D>)>) -> String
where
    K: Display + 'a,
    D: Display + 'a,
{
    let mut line = String::new();
    for (key, payload) in entries {
        if !line.is_empty() {
            line.push(' ');
        }
        // Writing into a `String` cannot fail.
        let _ = write!(line, "{}", Label(key, payload));
    }
    line
}

/// Space-separated entries in pre-order; empty for an empty shape.
///
/// # Examples
///
/// ```
/// use keyed_trees::{OrderedTree, render};
///
/// let mut tree = OrderedTree::new();
/// tree.insert(2, Some("two"));
/// tree.insert_keys([1, 3]);
/// assert_eq!(render::pre_order(tree.root()), "(2 | two) 1 3");
/// ```
pub fn pre_order<'a, N>(root: Option<N>) -> String
where
    N: NodeView<'a>,
    N::Key: Display,
    N::Payload: Display,
{
    join(PreOrder::new(root))
}

/// Space-separated entries in in-order; empty for an empty shape.
pub fn in_order<'a, N>(root: Option<N>) -> String
where
    N: NodeView<'a>,
    N::Key: Display,
    N::Payload: Display,
{
    join(InOrder::new(root))
}

/// Space-separated entries in post-order; empty for an empty shape.
pub fn post_order<'a, N>(root: Option<N>) -> String
where
    N: NodeView<'a>,
    N::Key: Display,
    N::Payload: Display,
{
    join(PostOrder::new(root))
}

/// Indented, one-node-per-line rendering of a tree shape.
///
/// Left children are drawn with `|-- `, right children and the root with
/// `\-- `; every entry is boxed as `[ key ]` or `[ key | payload ]`.
///
/// # Examples
///
/// ```
/// use keyed_trees::OrderedTree;
/// use keyed_trees::render::Vertical;
///
/// let tree: OrderedTree<i32, &str> = OrderedTree::from_keys([5, 3, 8]);
/// let drawing = Vertical::new(tree.root()).to_string();
/// assert_eq!(drawing, "\\-- [ 5 ]\n    |-- [ 3 ]\n    \\-- [ 8 ]\n");
/// ```
pub struct Vertical<N> {
    root: Option<N>,
}

impl<N> Vertical<N> {
    /// Draws the shape below `root`; `None` draws nothing.
    pub fn new(root: Option<N>) -> Self {
        Self { root }
    }
}

impl<'a, N> Display for Vertical<N>
where
    N: NodeView<'a>,
    N::Key: Display,
    N::Payload: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // (node, drawn as a left child, indentation inherited from the parent)
        let mut pending: Vec<(N, bool, String)> = self.root.map(|root| (root, false, String::new())).into_iter().collect();

        while let Some((node, is_left, prefix)) = pending.pop() {
            f.write_str(&prefix)?;
            f.write_str(if is_left { "|-- " } else { "\\-- " })?;
            match node.payload() {
                Some(payload) => writeln!(f, "[ {} | {payload} ]", node.key())?,
                None => writeln!(f, "[ {} ]", node.key())?,
            }

            let mut child_prefix = prefix;
            child_prefix.push_str(if is_left { "|   " } else { "    " });
            if let Some(right) = node.right() {
                pending.push((right, false, child_prefix.clone()));
            }
            if let Some(left) = node.left() {
                pending.push((left, true, child_prefix));
            }
        }
        Ok(())
    }
}

/// Level-by-level drawing of a tree shape, every entry boxed and joined to
/// its parent by connector lines.
///
/// Each level is twice as wide as the one below it, so the drawing grows
/// exponentially with the height of the shape; it is meant for small trees.
/// Trailing spaces are trimmed from every line.
///
/// # Examples
///
/// ```
/// use keyed_trees::OrderedTree;
/// use keyed_trees::render::Boxed;
///
/// let tree: OrderedTree<i32, u8> = OrderedTree::from_keys([2, 1, 3]);
/// let expected = "        ┌───┐\n        │ 2 │\n        └───┘\n     ┌────┴────┐\n   ┌───┐     ┌───┐\n   │ 1 │     │ 3 │\n   └───┘     └───┘\n";
/// assert_eq!(Boxed::new(tree.root()).to_string(), expected);
/// ```
pub struct Boxed<N> {
    root: Option<N>,
}

impl<N> Boxed<N> {
    /// Draws the shape below `root`; `None` draws nothing.
    pub fn new(root: Option<N>) -> Self {
        Self { root }
    }
}

#[derive(Clone, Copy)]
enum BoxRow {
    Top,
    Label,
    Bottom,
}

fn push_repeated(row: &mut String, c: char, count: usize) {
    row.extend(iter::repeat_n(c, count));
}

/// One text row across a level: each cell is `cell` characters wide with its
/// box centred, an empty cell for a missing node.
fn write_box_row(f: &mut fmt::Formatter<'_>, labels: &[Option<String>], cell: usize, part: BoxRow) -> fmt::Result {
    let mut row = String::new();
    for label in labels {
        let label = label.as_deref().unwrap_or("");
        let width = label.chars().count();
        let gap = cell.saturating_sub(width);
        push_repeated(&mut row, ' ', gap.div_ceil(2));
        if width > 0 {
            let corners = match part {
                BoxRow::Top => Some(('┌', '┐')),
                BoxRow::Bottom => Some(('└', '┘')),
                BoxRow::Label => None,
            };
            match corners {
                Some((left, right)) => {
                    row.push(left);
                    push_repeated(&mut row, '─', width.saturating_sub(2));
                    row.push(right);
                }
                None => row.push_str(label),
            }
        }
        push_repeated(&mut row, ' ', gap / 2);
    }
    writeln!(f, "{}", row.trim_end())
}

/// The connector row above a level, joining each sibling pair to the centre
/// of its parent's cell.
fn write_connector_row(f: &mut fmt::Formatter<'_>, labels: &[Option<String>], cell: usize) -> fmt::Result {
    let arm = cell / 2 - 1;
    let mut row = String::new();
    for (index, label) in labels.iter().enumerate() {
        let joint = if index % 2 == 0 {
            ' '
        } else {
            match (labels[index - 1].is_some(), label.is_some()) {
                (true, true) => '┴',
                (true, false) => '┘',
                (false, true) => '└',
                (false, false) => ' ',
            }
        };
        row.push(joint);

        match label {
            None => push_repeated(&mut row, ' ', cell - 1),
            Some(_) if index % 2 == 0 => {
                push_repeated(&mut row, ' ', arm);
                row.push('┌');
                push_repeated(&mut row, '─', arm);
            }
            Some(_) => {
                push_repeated(&mut row, '─', arm);
                row.push('┐');
                push_repeated(&mut row, ' ', arm);
            }
        }
    }
    writeln!(f, "{}", row.trim_end())
}

impl<'a, N> Display for Boxed<N>
where
    N: NodeView<'a>,
    N::Key: Display,
    N::Payload: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return Ok(());
        };

        // Every level keeps a cell for each position of a complete tree, so
        // children line up under their parents.
        let mut levels: Vec<Vec<Option<String>>> = Vec::new();
        let mut widest = 0;
        let mut nodes: Vec<Option<N>> = alloc::vec![Some(root)];
        while nodes.iter().any(Option::is_some) {
            let mut labels = Vec::with_capacity(nodes.len());
            let mut below = Vec::with_capacity(nodes.len() * 2);
            for &node in &nodes {
                let Some(node) = node else {
                    labels.push(None);
                    below.extend([None, None]);
                    continue;
                };
                let label = match node.payload() {
                    Some(payload) => format!("│ {} | {payload} │", node.key()),
                    None => format!("│ {} │", node.key()),
                };
                widest = widest.max(label.chars().count());
                labels.push(Some(label));
                below.extend([node.left(), node.right()]);
            }
            levels.push(labels);
            nodes = below;
        }
        widest += widest % 2;

        let mut cell = levels.last().map_or(0, Vec::len) * (widest + 4);
        for (depth, labels) in levels.iter().enumerate() {
            if depth > 0 {
                write_connector_row(f, labels, cell)?;
            }
            write_box_row(f, labels, cell, BoxRow::Top)?;
            write_box_row(f, labels, cell, BoxRow::Label)?;
            write_box_row(f, labels, cell, BoxRow::Bottom)?;
            cell /= 2;
        }
        Ok(())
    }
}
