use std::fmt;

use colored::Colorize;

use crate::expansion::ExpansionState;
use crate::presenter::Action;
use crate::tree::{Entry, NodeId};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Folder { open: bool },
    File,
}

/// One visible line of the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    /// Nesting level, used for indentation only.
    pub depth: usize,
    pub name: String,
    pub kind: RowKind,
}

impl Row {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RowKind::Folder { .. })
    }

    pub fn affords(&self, action: Action) -> bool {
        action.is_available(self.is_folder())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RowKind::Folder { open } => {
                let chevron = if open { '▾' } else { '▸' };
                write!(f, "{} {}", chevron, self.name.as_str().blue().bold())
            }
            RowKind::File => write!(f, "  {}", self.name),
        }
    }
}

/// The rows currently visible, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    rows: Vec<Row>,
}

impl Outline {
    pub fn build(root: &Entry, expansion: &ExpansionState) -> Self {
        let mut rows = Vec::new();
        Self::push_rows(root, 0, expansion, &mut rows);
        Outline { rows }
    }

    fn push_rows(entry: &Entry, depth: usize, expansion: &ExpansionState, rows: &mut Vec<Row>) {
        let kind = match entry {
            Entry::File(_) => RowKind::File,
            Entry::Folder(_) => RowKind::Folder {
                open: expansion.is_open(entry.id()),
            },
        };
        rows.push(Row {
            id: entry.id(),
            depth,
            name: entry.name().to_owned(),
            kind,
        });

        if kind == (RowKind::Folder { open: true }) {
            for child in entry.children() {
                Self::push_rows(child, depth + 1, expansion, rows);
            }
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Looks a row up by the 1-based number it is printed with.
    pub fn row(&self, number: usize) -> Option<&Row> {
        number.checked_sub(1).and_then(|index| self.rows.get(index))
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().iter().enumerate() {
            writeln!(f, "{:>3} {}{}", index + 1, INDENT.repeat(row.depth), row)?;
        }
        Ok(())
    }
}
