use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "codepad.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// How `GET /preview` assembles the three fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Styles and script embedded in `<style>` / `<script>` elements
    #[default]
    Inlined,
    /// Shell document linking `/preview/styles.css` and `/preview/script.js`
    ByReference,
}

/// What a submit answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitResponse {
    /// The composed preview document
    #[default]
    Document,
    /// `303 See Other` pointing at `GET /preview`
    Redirect,
}

/// Codepad configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub render_mode: RenderMode,

    #[serde(default)]
    pub submit_response: SubmitResponse,

    /// Re-indent markup on submit
    #[serde(default = "default_format_markup")]
    pub format_markup: bool,

    /// Directory for the persisted snapshot; in-memory only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_format_markup() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults when the file
    /// does not exist
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Socket address to bind, as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Absolute store directory, resolved against `cwd`
    pub fn store_path(&self, cwd: impl AsRef<Path>) -> Option<PathBuf> {
        self.store_dir.as_ref().map(|dir| cwd.as_ref().join(dir))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            render_mode: RenderMode::default(),
            submit_response: SubmitResponse::default(),
            format_markup: default_format_markup(),
            store_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "host": "0.0.0.0",
            "port": 8080,
            "renderMode": "byReference",
            "submitResponse": "redirect",
            "formatMarkup": false,
            "storeDir": ".codepad"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.render_mode, RenderMode::ByReference);
        assert_eq!(config.submit_response, SubmitResponse::Redirect);
        assert!(!config.format_markup);
        assert_eq!(
            config.store_path("/srv"),
            Some(PathBuf::from("/srv/.codepad"))
        );
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "127.0.0.1:3030");
        assert_eq!(config.render_mode, RenderMode::Inlined);
        assert!(config.format_markup);
        assert!(config.store_path("/srv").is_none());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ port: }").unwrap();

        let error = Config::load(dir.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_serialized_default_omits_store_dir() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"renderMode\":\"inlined\""));
        assert!(!json.contains("storeDir"));
    }
}
