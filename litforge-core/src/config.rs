//! Configuration management

use crate::error::{ErrorContext, LitforgeError, LitforgeResult};
use crate::types::{ExportConfig, LitforgeConfig, ReportConfig};

use std::path::{Path, PathBuf};

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            exceptional_threshold: 4.5,
            high_quality_threshold: 4.0,
            abstract_highlight_limit: 5,
            literature_review_limit: 10,
            review_author_limit: 3,
            reference_author_limit: 5,
            abstract_excerpt_chars: 400,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "markdown".to_string(),
            output_file: None,
        }
    }
}

impl LitforgeConfig {
    /// Default config location, `~/.litforge/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".litforge").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> LitforgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LitforgeError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: LitforgeConfig =
            toml::from_str(&content).map_err(|e| LitforgeError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating the parent directory
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> LitforgeResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| LitforgeError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| LitforgeError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> LitforgeResult<()> {
        self.report.validate()
    }
}

impl ReportConfig {
    pub fn validate(&self) -> LitforgeResult<()> {
        for (field, value) in [
            ("report.exceptional_threshold", self.exceptional_threshold),
            ("report.high_quality_threshold", self.high_quality_threshold),
        ] {
            if !(0.0..=5.0).contains(&value) {
                return Err(invalid(
                    field,
                    format!("{} must be between 0 and 5, got {}", field, value),
                ));
            }
        }

        if self.exceptional_threshold < self.high_quality_threshold {
            return Err(invalid(
                "report.exceptional_threshold",
                "exceptional_threshold must not be below high_quality_threshold".to_string(),
            ));
        }

        for (field, value) in [
            ("report.abstract_highlight_limit", self.abstract_highlight_limit),
            ("report.literature_review_limit", self.literature_review_limit),
            ("report.review_author_limit", self.review_author_limit),
            ("report.reference_author_limit", self.reference_author_limit),
            ("report.abstract_excerpt_chars", self.abstract_excerpt_chars),
        ] {
            if value == 0 {
                return Err(invalid(field, format!("{} must be greater than 0", field)));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> LitforgeError {
    crate::validation_error!(message, field, "config")
}
