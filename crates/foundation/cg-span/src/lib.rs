//! Source locations attached to graph nodes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Identifier of a source unit known to the graph builder
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FileId(pub u32);

/// Half-open byte range in a source unit
///
/// `start <= end` always holds; [`Span::new`] normalizes reversed bounds.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Create a span, swapping the bounds if they arrive reversed
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// First byte
    #[must_use]
    pub fn start(self) -> u32 {
        self.start
    }

    /// One past the last byte
    #[must_use]
    pub fn end(self) -> u32 {
        self.end
    }

    /// Byte range for slicing the source text
    #[must_use]
    pub fn range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Number of bytes covered
    #[must_use]
    pub fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}..{}", self.start, self.end)
    }
}

/// Where a declaration was written
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Source unit
    pub file: FileId,
    /// Byte range inside `file`
    pub span: Span,
}

impl Location {
    /// Create a location
    #[must_use]
    pub fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "file#{}@{}", self.file.0, self.span)
    }
}
