//! Coalesces edits into at most one repaint per buffer per frame.
//!
//! Edits only mark a buffer as pending. The host calls
//! [`HighlightScheduler::run_frame`] once per rendering opportunity; each
//! pending buffer is tokenized from its content at that moment, so however
//! many edits landed in between, the single repaint sees the newest text.

use crate::buffer::EditableBuffer;
use crate::painter::{PaintOutcome, PaintStats, TokenPainter};
use crate::registry::HighlightRegistry;
use codepad_common::Fragment;
use codepad_lexer::Tokenize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Why a buffer is waiting for a repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintReason {
    Edit,
    /// Content was replaced wholesale
    Replaced,
    /// A previous pass was skipped
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub frame: u64,
    pub painted: Vec<(Fragment, PaintStats)>,
    /// Buffers with no text whose ranges were cleared
    pub cleared: Vec<Fragment>,
    /// Buffers that were skipped and re-queued for the next frame
    pub retried: Vec<Fragment>,
}

impl FrameReport {
    pub fn repaints(&self) -> usize {
        self.painted.len() + self.cleared.len()
    }
}

#[derive(Debug, Default)]
pub struct HighlightScheduler {
    pending: BTreeMap<Fragment, RepaintReason>,
    frame: u64,
}

impl HighlightScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint after an edit. Returns false if one was already
    /// pending and the request was folded into it.
    pub fn schedule(&mut self, fragment: Fragment) -> bool {
        match self.pending.get(&fragment) {
            Some(_) => false,
            None => {
                self.pending.insert(fragment, RepaintReason::Edit);
                true
            }
        }
    }

    /// Request a repaint after a wholesale replacement. Any pending repaint
    /// is superseded rather than doubled; returns whether one existed.
    pub fn supersede(&mut self, fragment: Fragment) -> bool {
        self.pending.insert(fragment, RepaintReason::Replaced).is_some()
    }

    pub fn is_pending(&self, fragment: Fragment) -> bool {
        self.pending.contains_key(&fragment)
    }

    pub fn reason(&self, fragment: Fragment) -> Option<RepaintReason> {
        self.pending.get(&fragment).copied()
    }

    pub fn pending(&self) -> Vec<Fragment> {
        self.pending.keys().copied().collect()
    }

    /// Number of frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run every pending repaint, in fragment order.
    ///
    /// A buffer that is fragmented when its turn comes is skipped,
    /// normalized, and re-queued for the next frame.
    pub fn run_frame<T>(
        &mut self,
        buffers: &mut [EditableBuffer],
        registry: &mut HighlightRegistry,
        tokenizer: &T,
    ) -> FrameReport
    where
        T: Tokenize + ?Sized,
    {
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };

        let due = std::mem::take(&mut self.pending);
        let mut painter = TokenPainter::new(registry);

        for (fragment, reason) in due {
            let Some(buffer) = buffers.iter_mut().find(|b| b.fragment() == fragment) else {
                warn!(%fragment, "No buffer for pending repaint");
                continue;
            };

            let text = buffer.text();
            let tokens = tokenizer.tokenize(&text, fragment);

            match painter.paint(buffer, &tokens) {
                PaintOutcome::Painted(stats) => {
                    debug!(%fragment, ?reason, ranges = stats.ranges, "Repainted");
                    report.painted.push((fragment, stats));
                }
                PaintOutcome::Empty => report.cleared.push(fragment),
                PaintOutcome::Skipped(_) => {
                    buffer.normalize();
                    self.pending.insert(fragment, RepaintReason::Retry);
                    report.retried.push(fragment);
                }
            }
        }

        report
    }
}
