use hearth_renderer::HtmlOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "hearth.config.json";

/// Hearth configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory of bundled page JSON files; built-in pages when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_dir: Option<String>,

    /// Directory holding locally saved pages
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_store_dir() -> String {
    ".hearth/pages".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: default_indent(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_pages_dir(&self, cwd: &str) -> Option<PathBuf> {
        self.pages_dir.as_ref().map(|dir| PathBuf::from(cwd).join(dir))
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn html_options(&self) -> HtmlOptions {
        HtmlOptions {
            pretty: self.render.pretty,
            indent: self.render.indent.clone(),
            ..HtmlOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: None,
            store_dir: default_store_dir(),
            log_level: default_log_level(),
            render: RenderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pagesDir": "pages",
            "storeDir": "local",
            "logLevel": "debug",
            "render": { "pretty": false }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pages_dir.as_deref(), Some("pages"));
        assert_eq!(config.store_dir, "local");
        assert_eq!(config.log_level, "debug");
        assert!(!config.render.pretty);
        assert_eq!(config.render.indent, "  ");
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store_dir, ".hearth/pages");
        assert!(config.get_pages_dir("/site").is_none());
        assert_eq!(config.get_store_dir("/site"), PathBuf::from("/site/.hearth/pages"));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }
}
