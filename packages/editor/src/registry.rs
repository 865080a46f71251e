//! Per-category collections of painted ranges.
//!
//! A registry plays the role of the host's highlight table: one collection
//! per [`TokenKind`], each holding ranges over text nodes. Every range
//! remembers which buffer painted it, so repainting one buffer never touches
//! another buffer's ranges.

use crate::buffer::{BufferId, NodeId};
use crate::errors::RangeError;
use codepad_lexer::TokenKind;
use std::collections::BTreeMap;

/// A labelled span over a buffer's text, `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HighlightRange {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    /// Build a range over a node of `len` characters
    pub fn new(kind: TokenKind, start: usize, end: usize, len: usize) -> Result<Self, RangeError> {
        if end > len || start >= len {
            return Err(RangeError::OutOfBounds { start, end, len });
        }
        if start >= end {
            return Err(RangeError::Empty { start });
        }
        Ok(Self { kind, start, end })
    }
}

/// A range as stored in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintedRange {
    pub buffer: BufferId,
    pub node: NodeId,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct HighlightRegistry {
    highlights: BTreeMap<TokenKind, Vec<PaintedRange>>,
}

impl HighlightRegistry {
    /// Registry with an empty collection for every token kind
    pub fn new() -> Self {
        Self {
            highlights: TokenKind::ALL.into_iter().map(|k| (k, Vec::new())).collect(),
        }
    }

    pub fn add(&mut self, buffer: BufferId, node: NodeId, range: HighlightRange) {
        self.highlights.entry(range.kind).or_default().push(PaintedRange {
            buffer,
            node,
            start: range.start,
            end: range.end,
        });
    }

    /// Remove every range painted by `buffer`; returns how many were removed
    pub fn clear_buffer(&mut self, buffer: BufferId) -> usize {
        let mut removed = 0;
        for ranges in self.highlights.values_mut() {
            let before = ranges.len();
            ranges.retain(|r| r.buffer != buffer);
            removed += before - ranges.len();
        }
        removed
    }

    pub fn clear(&mut self) {
        for ranges in self.highlights.values_mut() {
            ranges.clear();
        }
    }

    pub fn ranges(&self, kind: TokenKind) -> &[PaintedRange] {
        self.highlights.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ranges painted by `buffer`, ordered by offset
    pub fn ranges_for(&self, buffer: BufferId) -> Vec<HighlightRange> {
        let mut ranges: Vec<HighlightRange> = self
            .highlights
            .iter()
            .flat_map(|(kind, ranges)| {
                ranges
                    .iter()
                    .filter(move |r| r.buffer == buffer)
                    .map(move |r| HighlightRange {
                        kind: *kind,
                        start: r.start,
                        end: r.end,
                    })
            })
            .collect();
        ranges.sort_by_key(|r| (r.start, r.end));
        ranges
    }

    /// Total number of ranges across all kinds
    pub fn len(&self) -> usize {
        self.highlights.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HighlightRegistry {
    fn default() -> Self {
        Self::new()
    }
}
