use clap::ValueEnum;
use pagecraft_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Standalone HTML page with a generated stylesheet
    Html,
    /// Nested markup with inline styles
    Markup,
    /// React function component
    React,
}

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing page files (`*.json` element trees)
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Directory exports are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Title of exported HTML documents
    #[serde(default = "default_title")]
    pub title: String,

    /// Formats `pagecraft export` emits when no target is given
    #[serde(default = "default_emit")]
    pub emit: Vec<Target>,

    /// Editor session settings
    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_title() -> String {
    "Exported site".to_string()
}

fn default_emit() -> Vec<Target> {
    vec![Target::Html]
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            out_dir: default_out_dir(),
            title: default_title(),
            emit: default_emit(),
            editor: EditorConfig::default(),
        }
    }
}
