// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

/// Position of a token's first byte in the source text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    row: usize,
    column: usize,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
        }
    }

    /// One-based line number
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// One-based column number
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl From<SourceLocation> for (usize, usize) {
    fn from(value: SourceLocation) -> Self {
        (value.row(), value.column())
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{},{}", self.row, self.column))
    }
}
