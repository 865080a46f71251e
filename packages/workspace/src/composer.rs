//! Turns the three stored fragments into one preview document.
//!
//! Fragments are concatenated verbatim. Nothing is escaped or sanitised.

use crate::config::RenderMode;
use crate::store::AssetStore;
use codepad_common::{Fragment, FragmentSet, PREVIEW_FALLBACK_MARKUP};
use regex::Regex;
use std::sync::{Arc, OnceLock};

pub struct PreviewComposer {
    store: Arc<AssetStore>,
    mode: RenderMode,
}

impl PreviewComposer {
    pub fn new(store: Arc<AssetStore>, mode: RenderMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Compose the current store contents. Every fragment comes from the
    /// same snapshot.
    pub async fn render(&self) -> String {
        let fragments = self.store.resolve_all().await;
        compose(&fragments, self.mode)
    }
}

/// Build the preview document for `fragments`. Pure: equal inputs give
/// byte-identical output.
pub fn compose(fragments: &FragmentSet, mode: RenderMode) -> String {
    let markup = if fragments.markup.trim().is_empty() {
        PREVIEW_FALLBACK_MARKUP
    } else {
        fragments.markup.as_str()
    };

    if is_full_document(markup) {
        return match mode {
            RenderMode::ByReference => markup.to_string(),
            RenderMode::Inlined => {
                inline_into_document(markup, &fragments.styles, &fragments.script)
            }
        };
    }

    let (head, tail) = match mode {
        RenderMode::ByReference => (
            format!(
                r#"<link rel="stylesheet" href="{}">"#,
                Fragment::Styles.asset_path()
            ),
            format!(
                r#"<script src="{}" defer></script>"#,
                Fragment::Script.asset_path()
            ),
        ),
        RenderMode::Inlined => (
            style_block(&fragments.styles),
            script_block(&fragments.script),
        ),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>Preview</title>\n\
         {head}\n\
         </head>\n\
         <body>\n\
         {markup}\n\
         {tail}\n\
         </body>\n\
         </html>\n"
    )
}

/// Markup that already carries `<!doctype>` or `<html>`
pub fn is_full_document(markup: &str) -> bool {
    let start = markup.trim_start().as_bytes();
    [b"<!doctype".as_slice(), b"<html".as_slice()]
        .iter()
        .any(|prefix| start.len() >= prefix.len() && start[..prefix.len()].eq_ignore_ascii_case(prefix))
}

fn style_block(styles: &str) -> String {
    format!("<style>\n{styles}\n</style>")
}

fn script_block(script: &str) -> String {
    format!("<script>\n{script}\n</script>")
}

/// Tags in a full document that load the preview stylesheet or script
fn asset_references() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?i)[ \t]*(?:<link\b[^>]*\bhref\s*=\s*["']?/preview/styles\.css["']?[^>]*>|<script\b[^>]*\bsrc\s*=\s*["']?/preview/script\.js["']?[^>]*>\s*</script>)[ \t]*\r?\n?"#,
        )
        .expect("asset reference pattern is valid")
    })
}

fn inline_into_document(markup: &str, styles: &str, script: &str) -> String {
    let mut document = asset_references().replace_all(markup, "").into_owned();

    let style = style_block(styles);
    match find_ignore_case(&document, "</head>", false) {
        Some(at) => document.insert_str(at, &format!("{style}\n")),
        None => document.insert_str(0, &format!("{style}\n")),
    }

    let script = script_block(script);
    match find_ignore_case(&document, "</body>", true) {
        Some(at) => document.insert_str(at, &format!("{script}\n")),
        None => {
            document.push('\n');
            document.push_str(&script);
        }
    }

    document
}

fn find_ignore_case(haystack: &str, needle: &str, last: bool) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets intact
    let lowered = haystack.to_ascii_lowercase();
    if last {
        lowered.rfind(needle)
    } else {
        lowered.find(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepad_common::{DEFAULT_MARKUP, DEFAULT_SCRIPT, DEFAULT_STYLES};

    fn fragments() -> FragmentSet {
        FragmentSet::new("<p>hi</p>", "p{color:red}", "console.log(1)")
    }

    #[test]
    fn test_inlined_embeds_every_fragment_verbatim() {
        let html = compose(&fragments(), RenderMode::Inlined);

        assert!(html.contains("<p>hi</p>"));
        assert!(html.contains("<style>\np{color:red}\n</style>"));
        assert!(html.contains("<script>\nconsole.log(1)\n</script>"));
        assert!(!html.contains("/preview/styles.css"));
    }

    #[test]
    fn test_by_reference_links_assets() {
        let html = compose(&fragments(), RenderMode::ByReference);

        assert!(html.contains(r#"<link rel="stylesheet" href="/preview/styles.css">"#));
        assert!(html.contains(r#"<script src="/preview/script.js" defer></script>"#));
        assert!(html.contains("<p>hi</p>"));
        assert!(!html.contains("p{color:red}"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        for mode in [RenderMode::Inlined, RenderMode::ByReference] {
            assert_eq!(compose(&fragments(), mode), compose(&fragments(), mode));
        }
    }

    #[test]
    fn test_blank_markup_uses_fallback_fragment() {
        let set = FragmentSet::new("  \n\t", "", "");
        let html = compose(&set, RenderMode::Inlined);
        assert!(html.contains(PREVIEW_FALLBACK_MARKUP));
    }

    #[test]
    fn test_full_document_by_reference_is_returned_as_is() {
        let set = FragmentSet::defaults();
        assert_eq!(compose(&set, RenderMode::ByReference), DEFAULT_MARKUP);
    }

    #[test]
    fn test_full_document_inlined_replaces_references() {
        let html = compose(&FragmentSet::defaults(), RenderMode::Inlined);

        assert!(!html.contains("/preview/styles.css"));
        assert!(!html.contains("/preview/script.js"));
        assert!(html.contains(&format!("<style>\n{DEFAULT_STYLES}\n</style>\n</head>")));
        assert!(html.contains(&format!("<script>\n{DEFAULT_SCRIPT}\n</script>\n</body>")));
        assert_eq!(html.matches("<!DOCTYPE html>").count(), 1);
    }

    #[test]
    fn test_full_document_without_head_or_body() {
        let set = FragmentSet::new("<html><p>x</p></html>", "a{}", "b()");
        let html = compose(&set, RenderMode::Inlined);

        assert!(html.starts_with("<style>\na{}\n</style>\n<html>"));
        assert!(html.ends_with("</html>\n<script>\nb()\n</script>"));
    }

    #[test]
    fn test_is_full_document() {
        assert!(is_full_document("  <!doctype html><p>"));
        assert!(is_full_document("<HTML lang=\"en\">"));
        assert!(!is_full_document("<p>hi</p>"));
        assert!(!is_full_document("<!do"));
    }

    #[tokio::test]
    async fn test_render_reads_current_store() {
        let store = Arc::new(AssetStore::in_memory());
        let composer = PreviewComposer::new(Arc::clone(&store), RenderMode::Inlined);

        store.commit(fragments()).await.unwrap();

        assert_eq!(
            composer.render().await,
            compose(&fragments(), RenderMode::Inlined)
        );
    }
}
