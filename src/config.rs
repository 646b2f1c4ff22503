use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Error;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub colors: ColorConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub margin: String,
    pub numbers: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margin: "2cm".to_string(),
            numbers: false,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub body: String,
    pub mono: String,
    pub size: String,
    pub code_size: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            body: "Libertinus Serif".to_string(),
            mono: "DejaVu Sans Mono".to_string(),
            size: "11pt".to_string(),
            code_size: "10pt".to_string(),
        }
    }
}

/// Colors as six-digit hex strings without the leading `#`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub inline_code_fill: String,
    pub code_text: String,
    pub json_text: String,
    pub json_key: String,
    pub json_value: String,
    pub code_fill: String,
    pub diagram_fill: String,
    pub code_border: String,
    pub code_accent: String,
    pub table_header_fill: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            inline_code_fill: "e8e8e8".to_string(),
            code_text: "2d2d2d".to_string(),
            json_text: "333333".to_string(),
            json_key: "0066cc".to_string(),
            json_value: "008800".to_string(),
            code_fill: "f6f8fa".to_string(),
            diagram_fill: "f5f7f9".to_string(),
            code_border: "cccccc".to_string(),
            code_accent: "4a90d9".to_string(),
            table_header_fill: "e0e0e0".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub title: String,
    pub output: String,
    pub files: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            title: "Distributed Systems Exercises".to_string(),
            output: "exercises.pdf".to_string(),
            files: (1..=10).map(|n| format!("question-{n}.md")).collect(),
        }
    }
}

impl Config {
    /// The configuration shipped with the crate (validated by the build script).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file.
    /// Returns `Ok(None)` if the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>, Error> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Load config from a TOML file, or return defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::compiled_default(),
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::compiled_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_struct_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str("[colors]\ncode_accent = \"ff0000\"\n").unwrap();
        assert_eq!(config.colors.code_accent, "ff0000");
        assert_eq!(config.colors.code_fill, "f6f8fa");
        assert_eq!(config.batch.files.len(), 10);
    }

    #[test]
    fn missing_file_is_none() {
        let path = Path::new("definitely/not/here/md2doc.toml");
        assert!(matches!(Config::try_load(path), Ok(None)));
        assert_eq!(Config::load(path), Config::default());
    }
}
