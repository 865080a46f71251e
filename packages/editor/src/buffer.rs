//! # Editable Buffer
//!
//! One logical text buffer per document part.
//!
//! The visible content is held as a list of text nodes, the way an editable
//! region in a browser is. Typing inserts new nodes next to the caret, so the
//! list fragments as the user edits; [`EditableBuffer::normalize`] merges it
//! back into a single node, which is what highlighting needs.
//!
//! All offsets are character offsets into the concatenated text.
//!
//! ```text
//! key_down → nodes fragment → key_up → sync shadow + normalize
//! ```

use codepad_common::{default_content, Fragment};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Process-unique identity of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

/// Process-unique identity of a text node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    id: NodeId,
    text: String,
}

impl TextNode {
    fn new(text: impl Into<String>) -> Self {
        Self {
            id: NodeId(next_id()),
            text: text.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split at a character offset; the tail becomes a new node
    fn split_off(&mut self, at: usize) -> TextNode {
        let byte = byte_offset(&self.text, at);
        TextNode::new(self.text.split_off(byte))
    }

    fn remove_chars(&mut self, start: usize, end: usize) {
        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, end);
        self.text.replace_range(from..to, "");
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Anchor/focus pair in character offsets; collapsed when both are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub focus: usize,
}

impl Selection {
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            focus: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Result of dispatching a key to a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The visible text changed
    pub changed: bool,
    /// The host must suppress its default action (e.g. moving focus on Tab)
    pub prevent_default: bool,
}

#[derive(Debug, Clone)]
pub struct EditableBuffer {
    id: BufferId,
    fragment: Fragment,
    nodes: Vec<TextNode>,
    selection: Selection,
    shadow: String,
    dirty: bool,
}

impl EditableBuffer {
    pub fn new(fragment: Fragment, content: &str) -> Self {
        let mut buffer = Self {
            id: BufferId(next_id()),
            fragment,
            nodes: Vec::new(),
            selection: Selection::default(),
            shadow: String::new(),
            dirty: false,
        };
        buffer.set_content(content);
        buffer.sync();
        buffer
    }

    /// Buffer holding the compiled-in default content for `fragment`
    pub fn with_default(fragment: Fragment) -> Self {
        Self::new(fragment, default_content(fragment))
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn fragment(&self) -> Fragment {
        self.fragment
    }

    /// Visible text
    pub fn text(&self) -> String {
        self.nodes.iter().map(|n| n.text.as_str()).collect()
    }

    /// Length of the visible text in characters
    pub fn len(&self) -> usize {
        self.nodes.iter().map(TextNode::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[TextNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The text node, only when the buffer holds exactly one
    pub fn text_node(&self) -> Option<&TextNode> {
        match self.nodes.as_slice() {
            [node] => Some(node),
            _ => None,
        }
    }

    /// Value last copied by [`sync`](Self::sync); this is what gets submitted
    pub fn shadow(&self) -> &str {
        &self.shadow
    }

    /// Visible text changed since the last sync
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamping both ends to the text
    pub fn set_selection(&mut self, anchor: usize, focus: usize) {
        let len = self.len();
        self.selection = Selection {
            anchor: anchor.min(len),
            focus: focus.min(len),
        };
    }

    /// Merge all text nodes into one, dropping empty ones.
    ///
    /// The first remaining node keeps its identity. Offsets are global, so
    /// the selection is unaffected. Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let had_empty = self.nodes.iter().any(TextNode::is_empty);
        if self.nodes.len() <= 1 && !had_empty {
            return false;
        }

        self.nodes.retain(|n| !n.is_empty());
        if let Some((first, rest)) = self.nodes.split_first_mut() {
            for node in rest.iter() {
                first.text.push_str(&node.text);
            }
        }
        self.nodes.truncate(1);
        true
    }

    /// Copy the visible text into the shadow value
    pub fn sync(&mut self) {
        self.shadow = self.text();
        self.dirty = false;
    }

    /// Replace the content wholesale with exactly one fresh node, or none
    /// for empty text. The caret moves to the end.
    pub fn set_content(&mut self, text: &str) {
        self.nodes.clear();
        if !text.is_empty() {
            self.nodes.push(TextNode::new(text));
        }
        self.selection = Selection::caret(self.len());
        self.dirty = self.text() != self.shadow;
    }

    /// Insert at the selection, replacing it if it is not collapsed.
    ///
    /// The inserted text lands in a node of its own, splitting the node
    /// under the caret.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let removed = self.delete_selection();
        if text.is_empty() {
            return removed;
        }

        let caret = self.selection.start();
        let index = self.split_at(caret);
        self.nodes.insert(index, TextNode::new(text));
        self.selection = Selection::caret(caret + text.chars().count());
        self.dirty = true;
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }
        let caret = self.selection.focus;
        caret > 0 && self.delete_range(caret - 1, caret)
    }

    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_collapsed() {
            return self.delete_selection();
        }
        let caret = self.selection.focus;
        self.delete_range(caret, caret + 1)
    }

    pub fn key_down(&mut self, key: Key) -> KeyOutcome {
        let mut scratch = [0u8; 4];
        match key {
            // A literal tab, never a focus change
            Key::Tab => KeyOutcome {
                changed: self.insert_text("\t"),
                prevent_default: true,
            },
            Key::Char(c) => KeyOutcome {
                changed: self.insert_text(c.encode_utf8(&mut scratch)),
                prevent_default: false,
            },
            Key::Enter => KeyOutcome {
                changed: self.insert_text("\n"),
                prevent_default: false,
            },
            Key::Backspace => KeyOutcome {
                changed: self.delete_backward(),
                prevent_default: false,
            },
            Key::Delete => KeyOutcome {
                changed: self.delete_forward(),
                prevent_default: false,
            },
            Key::ArrowLeft => {
                let target = if self.selection.is_collapsed() {
                    self.selection.focus.saturating_sub(1)
                } else {
                    self.selection.start()
                };
                self.selection = Selection::caret(target);
                KeyOutcome::default()
            }
            Key::ArrowRight => {
                let target = if self.selection.is_collapsed() {
                    (self.selection.focus + 1).min(self.len())
                } else {
                    self.selection.end()
                };
                self.selection = Selection::caret(target);
                KeyOutcome::default()
            }
            Key::Other => KeyOutcome::default(),
        }
    }

    /// End of a keystroke: mirror the text into the shadow value
    pub fn key_up(&mut self) {
        self.sync();
    }

    fn delete_selection(&mut self) -> bool {
        if self.selection.is_collapsed() {
            return false;
        }
        self.delete_range(self.selection.start(), self.selection.end())
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        let end = end.min(self.len());
        if start >= end {
            return false;
        }

        let mut node_start = 0;
        for node in &mut self.nodes {
            let len = node.len();
            let from = start.max(node_start);
            let to = end.min(node_start + len);
            if from < to {
                node.remove_chars(from - node_start, to - node_start);
            }
            node_start += len;
        }
        self.nodes.retain(|n| !n.is_empty());

        self.selection = Selection::caret(start);
        self.dirty = true;
        true
    }

    /// Make a node boundary fall at `offset`; returns the index of the first
    /// node starting at or after it
    fn split_at(&mut self, offset: usize) -> usize {
        let mut node_start = 0;
        for i in 0..self.nodes.len() {
            let len = self.nodes[i].len();
            if offset == node_start {
                return i;
            }
            if offset < node_start + len {
                let tail = self.nodes[i].split_off(offset - node_start);
                self.nodes.insert(i + 1, tail);
                return i + 1;
            }
            node_start += len;
        }
        self.nodes.len()
    }
}
