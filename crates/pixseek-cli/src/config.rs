//! Configuration file support for pixseek.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/pixseek/config.toml` (lowest priority)
//! - Project-local: `.pixseek.toml` (searched up directory tree)
//! - Environment and CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use pixseek_adapters::{ImageType, Orientation, PER_PAGE_RANGE};
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search API settings.
    pub api: ApiConfig,
    /// Scroll trigger settings.
    pub trigger: TriggerConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Search API configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Pixabay API key.
    pub key: Option<String>,
    /// Search endpoint URL.
    pub endpoint: Option<String>,
    /// Image type filter: all, photo, illustration, vector.
    pub image_type: Option<String>,
    /// Orientation filter: all, horizontal, vertical.
    pub orientation: Option<String>,
    /// Exclude content unsuitable for all ages.
    pub safesearch: Option<bool>,
    /// Results per page (3-200).
    pub per_page: Option<u32>,
}

/// Scroll trigger configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Rows before the end of results at which the next page loads.
    pub margin: Option<f64>,
    /// Rows scrolled per step in `browse`.
    pub viewport_rows: Option<u32>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "jsonl".
    pub format: Option<String>,
    /// Colorize terminal output.
    pub color: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/pixseek/config.toml`
    /// 2. Project-local: `.pixseek.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(n) = self.api.per_page {
            if !PER_PAGE_RANGE.contains(&n) {
                return Err(format!(
                    "api.per_page must be {}-{}, got {n}",
                    PER_PAGE_RANGE.start(),
                    PER_PAGE_RANGE.end()
                ));
            }
        }
        if let Some(ref t) = self.api.image_type {
            t.parse::<ImageType>()
                .map_err(|e| format!("api.image_type: {e}"))?;
        }
        if let Some(ref o) = self.api.orientation {
            o.parse::<Orientation>()
                .map_err(|e| format!("api.orientation: {e}"))?;
        }
        if let Some(ref key) = self.api.key {
            if key.trim().is_empty() {
                return Err("api.key must not be empty".to_string());
            }
        }

        if let Some(m) = self.trigger.margin {
            if !m.is_finite() || m < 0.0 {
                return Err(format!("trigger.margin must be >= 0, got {m}"));
            }
        }
        if self.trigger.viewport_rows == Some(0) {
            return Err("trigger.viewport_rows must be at least 1".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "text" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'text' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Api
        self.api.key = other.api.key.or_else(|| self.api.key.take());
        self.api.endpoint = other.api.endpoint.or_else(|| self.api.endpoint.take());
        self.api.image_type = other.api.image_type.or_else(|| self.api.image_type.take());
        self.api.orientation = other
            .api
            .orientation
            .or_else(|| self.api.orientation.take());
        self.api.safesearch = other.api.safesearch.or(self.api.safesearch);
        self.api.per_page = other.api.per_page.or(self.api.per_page);

        // Trigger
        self.trigger.margin = other.trigger.margin.or(self.trigger.margin);
        self.trigger.viewport_rows = other.trigger.viewport_rows.or(self.trigger.viewport_rows);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.color = other.output.color.or(self.output.color);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pixseek").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.pixseek.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".pixseek.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.api.key.is_none());
        assert!(config.trigger.margin.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[api]
key = 'abc123'
endpoint = 'http://localhost:8080/api/'
image_type = 'illustration'
orientation = 'vertical'
safesearch = false
per_page = 40

[trigger]
margin = 8.0
viewport_rows = 30

[output]
format = 'jsonl'
color = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.api.key.as_deref(), Some("abc123"));
        assert_eq!(config.api.image_type.as_deref(), Some("illustration"));
        assert_eq!(config.api.safesearch, Some(false));
        assert_eq!(config.api.per_page, Some(40));
        assert_eq!(config.trigger.margin, Some(8.0));
        assert_eq!(config.trigger.viewport_rows, Some(30));
        assert_eq!(config.output.format.as_deref(), Some("jsonl"));
        assert_eq!(config.output.color, Some(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_leaves_rest_unset() {
        let config: AppConfig = toml::from_str(
            r"
[api]
per_page = 20
",
        )
        .expect("parse partial api");

        assert_eq!(config.api.per_page, Some(20));
        assert!(config.api.key.is_none());
        assert!(config.api.safesearch.is_none());
        assert!(config.trigger.viewport_rows.is_none());
    }

    #[test]
    fn test_merge_override_wins_and_base_survives() {
        let mut base: AppConfig = toml::from_str(
            r"
[api]
key = 'user-key'
per_page = 20

[trigger]
margin = 3.0
",
        )
        .expect("parse base");

        let project: AppConfig = toml::from_str(
            r"
[api]
per_page = 60

[output]
format = 'jsonl'
",
        )
        .expect("parse override");

        base.merge(project);

        assert_eq!(base.api.per_page, Some(60));
        assert_eq!(base.api.key.as_deref(), Some("user-key"));
        assert_eq!(base.trigger.margin, Some(3.0));
        assert_eq!(base.output.format.as_deref(), Some("jsonl"));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[output]
color = false
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.output.color, Some(false));
    }

    #[test]
    fn test_invalid_field_type_is_error() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
[api]
per_page = "forty"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_per_page_out_of_range() {
        let mut config = AppConfig::default();
        config.api.per_page = Some(500);

        let err = config.validate().unwrap_err();
        assert!(err.contains("api.per_page"));
    }

    #[test]
    fn test_validate_unknown_filters() {
        let mut config = AppConfig::default();
        config.api.image_type = Some("gif".to_string());
        assert!(config.validate().unwrap_err().contains("api.image_type"));

        let mut config = AppConfig::default();
        config.api.orientation = Some("diagonal".to_string());
        assert!(config.validate().unwrap_err().contains("api.orientation"));
    }

    #[test]
    fn test_validate_trigger_geometry() {
        let mut config = AppConfig::default();
        config.trigger.margin = Some(-1.0);
        assert!(config.validate().unwrap_err().contains("trigger.margin"));

        let mut config = AppConfig::default();
        config.trigger.viewport_rows = Some(0);
        assert!(config.validate().unwrap_err().contains("trigger.viewport_rows"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("json".to_string());

        assert!(config.validate().unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".pixseek.toml"), "").unwrap();

        assert_eq!(
            find_config_in_parents(&nested),
            Some(root.path().join(".pixseek.toml"))
        );
    }
}
