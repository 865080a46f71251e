//! The three named document parts a playground session edits and submits.

use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// URL prefix every stored fragment is served under
pub const PREVIEW_PATH: &str = "/preview";

/// One of the three document parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fragment {
    Markup,
    Styles,
    Script,
}

impl Fragment {
    /// All fragments in composition order
    pub const ALL: [Fragment; 3] = [Fragment::Markup, Fragment::Styles, Fragment::Script];

    /// Language identifier handed to the tokenizer and pretty-printer
    pub fn language_id(self) -> &'static str {
        match self {
            Fragment::Markup => "markup",
            Fragment::Styles => "styles",
            Fragment::Script => "script",
        }
    }

    /// File name of the stored asset
    pub fn file_name(self) -> &'static str {
        match self {
            Fragment::Markup => "markup.html",
            Fragment::Styles => "styles.css",
            Fragment::Script => "script.js",
        }
    }

    /// Logical asset path, e.g. `/preview/styles.css`
    pub fn asset_path(self) -> &'static str {
        match self {
            Fragment::Markup => "/preview/markup.html",
            Fragment::Styles => "/preview/styles.css",
            Fragment::Script => "/preview/script.js",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Fragment::Markup => "text/html",
            Fragment::Styles => "text/css",
            Fragment::Script => "application/javascript",
        }
    }

    /// Name of the form field carrying this fragment on submit
    pub fn form_field(self) -> &'static str {
        match self {
            Fragment::Markup => "html",
            Fragment::Styles => "css",
            Fragment::Script => "javascript",
        }
    }

    /// Resolve a logical asset path back to its fragment
    pub fn from_asset_path(path: &str) -> Option<Fragment> {
        Fragment::ALL.into_iter().find(|f| f.asset_path() == path)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_id())
    }
}

impl FromStr for Fragment {
    type Err = CommonError;

    /// Accepts language ids (`markup`), form fields (`html`) and common aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markup" | "html" | "htm" => Ok(Fragment::Markup),
            "styles" | "css" => Ok(Fragment::Styles),
            "script" | "javascript" | "js" | "mjs" => Ok(Fragment::Script),
            _ => Err(CommonError::UnknownFragment(s.to_string())),
        }
    }
}

/// A full set of fragments, submitted and committed as one unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FragmentSet {
    pub markup: String,
    pub styles: String,
    pub script: String,
}

impl FragmentSet {
    pub fn new(
        markup: impl Into<String>,
        styles: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: markup.into(),
            styles: styles.into(),
            script: script.into(),
        }
    }

    pub fn get(&self, fragment: Fragment) -> &str {
        match fragment {
            Fragment::Markup => &self.markup,
            Fragment::Styles => &self.styles,
            Fragment::Script => &self.script,
        }
    }

    pub fn set(&mut self, fragment: Fragment, content: impl Into<String>) {
        let slot = match fragment {
            Fragment::Markup => &mut self.markup,
            Fragment::Styles => &mut self.styles,
            Fragment::Script => &mut self.script,
        };
        *slot = content.into();
    }

    /// Iterate `(fragment, content)` pairs in composition order
    pub fn iter(&self) -> impl Iterator<Item = (Fragment, &str)> + '_ {
        Fragment::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path_round_trip() {
        for fragment in Fragment::ALL {
            assert_eq!(Fragment::from_asset_path(fragment.asset_path()), Some(fragment));
            assert!(fragment.asset_path().starts_with(PREVIEW_PATH));
            assert!(fragment.asset_path().ends_with(fragment.file_name()));
        }
        assert_eq!(Fragment::from_asset_path("/preview/other.txt"), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("html".parse::<Fragment>().unwrap(), Fragment::Markup);
        assert_eq!("CSS".parse::<Fragment>().unwrap(), Fragment::Styles);
        assert_eq!("js".parse::<Fragment>().unwrap(), Fragment::Script);
        assert!("rust".parse::<Fragment>().is_err());
    }

    #[test]
    fn test_fragment_set_access() {
        let mut set = FragmentSet::new("<p>hi</p>", "p{}", "1");
        set.set(Fragment::Script, "2");
        assert_eq!(set.get(Fragment::Script), "2");

        let fragments: Vec<_> = set.iter().map(|(f, _)| f).collect();
        assert_eq!(fragments, Fragment::ALL.to_vec());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Fragment::Styles).unwrap();
        assert_eq!(json, "\"styles\"");
    }
}
