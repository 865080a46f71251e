//! Submission: form fields in, one committed snapshot out.

use crate::formatter::Formatter;
use crate::store::{AssetStore, Snapshot, StoreError};
use codepad_common::{Fragment, FragmentSet};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

/// Form-encoded body of `PUT`/`POST /preview`. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub javascript: String,
}

impl From<SubmitForm> for FragmentSet {
    fn from(form: SubmitForm) -> Self {
        FragmentSet::new(form.html, form.css, form.javascript)
    }
}

impl From<FragmentSet> for SubmitForm {
    fn from(set: FragmentSet) -> Self {
        Self {
            html: set.markup,
            css: set.styles,
            javascript: set.script,
        }
    }
}

pub struct SubmitPipeline {
    store: Arc<AssetStore>,
    formatter: Option<Box<dyn Formatter>>,
}

impl SubmitPipeline {
    pub fn new(store: Arc<AssetStore>, formatter: Option<Box<dyn Formatter>>) -> Self {
        Self { store, formatter }
    }

    pub fn store(&self) -> &Arc<AssetStore> {
        &self.store
    }

    /// Format the markup and commit all three fragments.
    ///
    /// A formatting failure is logged and the markup is committed as sent.
    pub async fn submit(&self, fragments: FragmentSet) -> Result<Arc<Snapshot>, StoreError> {
        let fragments = self.prepare(fragments).await;
        self.store.commit(fragments).await
    }

    async fn prepare(&self, mut fragments: FragmentSet) -> FragmentSet {
        let Some(formatter) = &self.formatter else {
            return fragments;
        };

        match formatter.format(&fragments.markup, Fragment::Markup).await {
            Ok(markup) => fragments.markup = markup,
            Err(error) => warn!(%error, "Markup formatting failed, storing it unformatted"),
        }
        fragments
    }
}
