//! Pretty-printers applied to submitted fragments.

use async_trait::async_trait;
use codepad_common::Fragment;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Closing tag </{tag}> on line {line} has no open element")]
    UnmatchedClose { tag: String, line: usize },
}

#[async_trait]
pub trait Formatter: Send + Sync {
    async fn format(&self, text: &str, language: Fragment) -> Result<String, FormatError>;
}

/// Returns its input unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

#[async_trait]
impl Formatter for Passthrough {
    async fn format(&self, text: &str, _language: Fragment) -> Result<String, FormatError> {
        Ok(text.to_string())
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is left exactly as written
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "pre", "textarea"];

/// Re-indents markup line by line, two spaces per open element.
///
/// Only markup is touched; other languages pass through unchanged.
#[derive(Debug, Clone)]
pub struct MarkupIndenter {
    indent: String,
}

impl MarkupIndenter {
    pub fn new() -> Self {
        Self::with_indent(2)
    }

    pub fn with_indent(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }

    pub fn indent_markup(&self, text: &str) -> Result<String, FormatError> {
        let mut open: Vec<String> = Vec::new();
        let mut raw: Option<String> = None;
        let mut out = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            let trimmed = line.trim();

            if let Some(name) = &raw {
                let closing = format!("</{name}");
                let lowered = trimmed.to_ascii_lowercase();
                match lowered.find(&closing) {
                    None => {
                        out.push(line.to_string());
                        continue;
                    }
                    Some(0) => raw = None,
                    Some(_) => {
                        out.push(line.to_string());
                        open.pop();
                        raw = None;
                        continue;
                    }
                }
            }

            if trimmed.is_empty() {
                out.push(String::new());
                continue;
            }

            let tags: Vec<_> = tag_pattern().captures_iter(trimmed).collect();

            // A line that opens with a closing tag sits at the parent's depth
            let mut depth = open.len();
            if trimmed.starts_with("</") {
                depth = depth.saturating_sub(1);
            }
            out.push(format!("{}{}", self.indent.repeat(depth), trimmed));

            for tag in tags {
                let name = tag[2].to_ascii_lowercase();
                let closing = !tag[1].is_empty();
                let self_closing = !tag[3].is_empty();

                if closing {
                    if open.pop().is_none() {
                        return Err(FormatError::UnmatchedClose { tag: name, line: number });
                    }
                } else if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    open.push(name);
                }
            }

            if let Some(last) = open.last() {
                if RAW_TEXT_ELEMENTS.contains(&last.as_str()) && !trimmed.ends_with(&format!("</{last}>")) {
                    raw = Some(last.clone());
                }
            }
        }

        let mut formatted = out.join("\n");
        if text.ends_with('\n') {
            formatted.push('\n');
        }
        Ok(formatted)
    }
}

impl Default for MarkupIndenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Formatter for MarkupIndenter {
    async fn format(&self, text: &str, language: Fragment) -> Result<String, FormatError> {
        match language {
            Fragment::Markup => self.indent_markup(text),
            Fragment::Styles | Fragment::Script => Ok(text.to_string()),
        }
    }
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9:-]*)[^>]*?(/?)>").expect("tag pattern is valid")
    })
}
