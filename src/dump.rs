use std::fmt;

use crate::pattern::{Contents, Pattern};

/// An indented, one-node-per-line rendering of a pattern's tree, for debugging.
pub struct Tree<'p, 'a, S>(&'p Pattern<'a, S>);

impl<'a, S> Pattern<'a, S> {
    pub fn tree(&self) -> Tree<'_, 'a, S> {
        Tree(self)
    }
}

impl<S: fmt::Debug> fmt::Display for Tree<'_, '_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

fn write_node<S: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    pattern: &Pattern<'_, S>,
    depth: usize,
) -> fmt::Result {
    use Contents::*;

    let indent = depth * 2;
    match pattern.contents() {
        Symbol(s) => writeln!(f, "{:indent$}symbol({:?})", "", s, indent = indent),
        Epsilon => writeln!(f, "{:indent$}ε", "", indent = indent),
        Empty => writeln!(f, "{:indent$}∅", "", indent = indent),
        Concat(x, y) => {
            writeln!(f, "{:indent$}concat", "", indent = indent)?;
            write_node(f, x, depth + 1)?;
            write_node(f, y, depth + 1)
        }
        Or(x, y) => {
            writeln!(f, "{:indent$}or", "", indent = indent)?;
            write_node(f, x, depth + 1)?;
            write_node(f, y, depth + 1)
        }
        Star(x) => {
            writeln!(f, "{:indent$}star", "", indent = indent)?;
            write_node(f, x, depth + 1)
        }
    }
}
