//! # Editor Session
//!
//! The three editors of one playground page: a buffer per fragment, the
//! highlight registry they paint into, and the scheduler that decides when
//! they repaint.

use crate::buffer::{EditableBuffer, Key, KeyOutcome};
use crate::registry::{HighlightRange, HighlightRegistry};
use crate::scheduler::{FrameReport, HighlightScheduler};
use codepad_common::{Fragment, FragmentSet};
use codepad_lexer::Tokenize;

pub struct EditorSession {
    /// One buffer per fragment, in `Fragment::ALL` order
    buffers: Vec<EditableBuffer>,
    registry: HighlightRegistry,
    scheduler: HighlightScheduler,
}

impl EditorSession {
    /// Session seeded with the compiled-in defaults
    pub fn new() -> Self {
        Self::with_content(&FragmentSet::defaults())
    }

    /// Session seeded with `content`; every buffer starts with a pending
    /// repaint so the first frame highlights everything
    pub fn with_content(content: &FragmentSet) -> Self {
        let buffers = Fragment::ALL
            .into_iter()
            .map(|f| EditableBuffer::new(f, content.get(f)))
            .collect();

        let mut scheduler = HighlightScheduler::new();
        for fragment in Fragment::ALL {
            scheduler.schedule(fragment);
        }

        Self {
            buffers,
            registry: HighlightRegistry::new(),
            scheduler,
        }
    }

    pub fn buffer(&self, fragment: Fragment) -> &EditableBuffer {
        &self.buffers[Self::index(fragment)]
    }

    pub fn buffer_mut(&mut self, fragment: Fragment) -> &mut EditableBuffer {
        &mut self.buffers[Self::index(fragment)]
    }

    pub fn registry(&self) -> &HighlightRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &HighlightScheduler {
        &self.scheduler
    }

    /// Dispatch a key press; every key press requests a repaint
    pub fn key_down(&mut self, fragment: Fragment, key: Key) -> KeyOutcome {
        let outcome = self.buffer_mut(fragment).key_down(key);
        self.scheduler.schedule(fragment);
        outcome
    }

    /// Key release: mirror the text for submission and merge text nodes
    pub fn key_up(&mut self, fragment: Fragment) {
        let buffer = self.buffer_mut(fragment);
        buffer.key_up();
        buffer.normalize();
    }

    /// Insert a whole string at the caret, as a paste does
    pub fn paste(&mut self, fragment: Fragment, text: &str) -> bool {
        let changed = self.buffer_mut(fragment).insert_text(text);
        if changed {
            self.scheduler.schedule(fragment);
        }
        changed
    }

    /// Replace every buffer with stored content, superseding pending repaints
    pub fn load(&mut self, content: &FragmentSet) {
        for (fragment, text) in content.iter() {
            let buffer = &mut self.buffers[Self::index(fragment)];
            buffer.set_content(text);
            buffer.sync();
            self.scheduler.supersede(fragment);
        }
    }

    /// Run one frame of pending repaints
    pub fn run_frame<T>(&mut self, tokenizer: &T) -> FrameReport
    where
        T: Tokenize + ?Sized,
    {
        self.scheduler
            .run_frame(&mut self.buffers, &mut self.registry, tokenizer)
    }

    /// Current ranges for one editor, ordered by offset
    pub fn highlights(&self, fragment: Fragment) -> Vec<HighlightRange> {
        self.registry.ranges_for(self.buffer(fragment).id())
    }

    /// The shadow values, as sent on submit
    pub fn submission(&self) -> FragmentSet {
        let mut set = FragmentSet::default();
        for buffer in &self.buffers {
            set.set(buffer.fragment(), buffer.shadow());
        }
        set
    }

    fn index(fragment: Fragment) -> usize {
        match fragment {
            Fragment::Markup => 0,
            Fragment::Styles => 1,
            Fragment::Script => 2,
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
