//! Compiled-in default content, keyed by fragment.
//!
//! These are what a fresh session starts with and what the asset store
//! falls back to when nothing has been committed yet.

use crate::fragment::{Fragment, FragmentSet};

pub const DEFAULT_MARKUP: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>My Project</title>
  <link rel="stylesheet" href="/preview/styles.css">
</head>
<body>
  <h1>Welcome to your new project</h1>
  <p>Start editing to see your changes in the preview.</p>

  <script src="/preview/script.js" defer></script>
</body>
</html>"#;

pub const DEFAULT_STYLES: &str = r#"* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto,
    Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
  line-height: 1.6;
  padding: 2rem;
  max-width: 800px;
  margin: 0 auto;
  color: #333;
}

h1 {
  margin-bottom: 1rem;
  color: #0066cc;
}"#;

pub const DEFAULT_SCRIPT: &str = r#"// This script runs in the preview
console.log('Script loaded and ready!');

// Add your code here
document.addEventListener('DOMContentLoaded', () => {
  console.log('DOM fully loaded and parsed');
});"#;

/// Body fragment shown when the submitted markup is blank
pub const PREVIEW_FALLBACK_MARKUP: &str = r#"<h1>Welcome to your project</h1>
<p>Start editing in the main window to see your changes here.</p>"#;

/// Default content for a fragment. Total over all fragments.
pub fn default_content(fragment: Fragment) -> &'static str {
    match fragment {
        Fragment::Markup => DEFAULT_MARKUP,
        Fragment::Styles => DEFAULT_STYLES,
        Fragment::Script => DEFAULT_SCRIPT,
    }
}

impl FragmentSet {
    /// The compiled-in default set
    pub fn defaults() -> Self {
        Self::new(DEFAULT_MARKUP, DEFAULT_STYLES, DEFAULT_SCRIPT)
    }
}
