use anyhow::{Context, Result};
use clap::Args;
use codepad_common::Fragment;
use codepad_editor::{EditableBuffer, HighlightRange, HighlightRegistry, PaintOutcome, TokenPainter};
use codepad_lexer::{Lexer, TokenKind, Tokenize};
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct HighlightArgs {
    /// File to highlight
    pub file: PathBuf,

    /// Language (markup, styles, script, or html/css/js); guessed from the
    /// extension when omitted
    #[arg(short, long)]
    pub lang: Option<String>,
}

pub fn highlight(args: HighlightArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.file);
    let language = match &args.lang {
        Some(lang) => lang.parse::<Fragment>()?,
        None => language_from_extension(&path)?,
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let buffer = EditableBuffer::new(language, &text);
    let tokens = Lexer.tokenize(&buffer.text(), language);
    let mut registry = HighlightRegistry::new();

    if let PaintOutcome::Painted(stats) = TokenPainter::new(&mut registry).paint(&buffer, &tokens) {
        tracing::debug!(ranges = stats.ranges, tokens = tokens.len(), "Painted file");
    }

    for (kind, segment) in segments(&text, &registry.ranges_for(buffer.id())) {
        match kind {
            Some(kind) => print!("{}", colorize(kind, &segment)),
            None => print!("{segment}"),
        }
    }
    println!();

    Ok(())
}

fn language_from_extension(path: &Path) -> Result<Fragment> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .with_context(|| format!("Cannot guess the language of {}, pass --lang", path.display()))?;
    Ok(extension.parse()?)
}

/// Split `text` into runs, each either painted with one kind or unpainted.
/// `ranges` are char offsets ordered by start.
fn segments(text: &str, ranges: &[HighlightRange]) -> Vec<(Option<TokenKind>, String)> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut pos = 0;

    for range in ranges {
        if range.start > pos {
            out.push((None, chars[pos..range.start].iter().collect()));
        }
        out.push((Some(range.kind), chars[range.start..range.end].iter().collect()));
        pos = range.end;
    }
    if pos < chars.len() {
        out.push((None, chars[pos..].iter().collect()));
    }

    out
}

fn colorize(kind: TokenKind, text: &str) -> ColoredString {
    use TokenKind::*;

    match kind {
        Comment | Prolog | Doctype | Cdata => text.bright_black(),
        Punctuation => text.white(),
        Namespace => text.dimmed(),
        Property | Tag | Boolean | Number | Constant | Symbol | Deleted => text.magenta(),
        Selector | Attr | String | Char | Builtin | Inserted => text.green(),
        Operator | Entity | Url => text.yellow(),
        Atrule | Keyword => text.blue(),
        Function | Class | ClassName => text.bright_red(),
        Regex | Important | Variable => text.bright_yellow(),
        Bold => text.bold(),
        Italic => text.italic(),
        Parameter => text.cyan(),
    }
}
