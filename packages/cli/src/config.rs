use anyhow::Context;
use protoedit_editor::EditorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "protoedit.config.json";

/// Protoedit configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Indent unit for files that have no indented line yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_indent: Option<String>,
}

impl Config {
    /// Load config from an explicit path, or from `cwd` if a config file exists there
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", config_path.display()))?;
        Ok(config)
    }

    /// Editor options for editing `filename`
    pub fn editor_options(&self, filename: &str) -> EditorOptions {
        let options = EditorOptions::default().with_filename(filename);
        match &self.fallback_indent {
            Some(indent) => options.with_fallback_indent(indent.clone()),
            None => options,
        }
    }
}
