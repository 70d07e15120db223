//! Configuration management for Franklin.
//!
//! Parses `franklin.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Page asset URLs support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `page.script`
//! - `page.stylesheet`
//! - `page.icon`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use franklin_renderer::{
    ConvertOptions, FRANKLIN_BACKEND, FallbackOptions, HTML5_BACKEND, PageShell,
};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override backend name.
    pub backend: Option<String>,
    /// Override standalone output.
    pub standalone: Option<bool>,
    /// Override document suffix stripped from links.
    pub document_suffix: Option<String>,
    /// Extra document attributes, applied over `[attributes]`.
    pub attributes: Vec<(String, String)>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "franklin.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    pub convert: ConvertConfig,
    /// Document attributes (e.g. `icons = "font"`).
    pub attributes: BTreeMap<String, ScalarValue>,
    /// Options passed through to the fallback renderer.
    pub fallback: BTreeMap<String, ScalarValue>,
    /// Page shell asset URLs.
    pub page: PageConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Backend name.
    pub backend: String,
    /// Render full documents instead of embedded content.
    pub standalone: bool,
    /// Enable GFM extensions for Markdown input.
    pub gfm: bool,
    /// Suffix stripped from link targets.
    pub document_suffix: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            backend: FRANKLIN_BACKEND.to_owned(),
            standalone: false,
            gfm: true,
            document_suffix: ".html".to_owned(),
        }
    }
}

/// Page shell configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Module script URL.
    pub script: String,
    /// Stylesheet URL.
    pub stylesheet: String,
    /// Icon URL.
    pub icon: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        let shell = PageShell::default();
        Self {
            script: shell.script,
            stylesheet: shell.stylesheet,
            icon: shell.icon,
        }
    }
}

/// Scalar TOML value accepted for attributes and fallback options.
///
/// Attributes are strings downstream; booleans and integers are accepted so
/// `sectids = false` reads naturally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    String(String),
    Bool(bool),
    Integer(i64),
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`page.script`").
        field: String,
        /// Error message (e.g., "${`CDN_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `franklin.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(backend) = &settings.backend {
            self.convert.backend.clone_from(backend);
        }
        if let Some(standalone) = settings.standalone {
            self.convert.standalone = standalone;
        }
        if let Some(suffix) = &settings.document_suffix {
            self.convert.document_suffix.clone_from(suffix);
        }
        for (key, value) in &settings.attributes {
            self.attributes
                .insert(key.clone(), ScalarValue::String(value.clone()));
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and expansion
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_convert()?;
        self.validate_page()?;
        Ok(())
    }

    fn validate_convert(&self) -> Result<(), ConfigError> {
        let backend = self.convert.backend.as_str();
        require_non_empty(backend, "convert.backend")?;
        if backend != FRANKLIN_BACKEND && backend != HTML5_BACKEND {
            return Err(ConfigError::Validation(format!(
                "convert.backend must be \"{FRANKLIN_BACKEND}\" or \"{HTML5_BACKEND}\", got \"{backend}\""
            )));
        }
        require_non_empty(&self.convert.document_suffix, "convert.document_suffix")?;
        Ok(())
    }

    fn validate_page(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.page.script, "page.script")?;
        require_non_empty(&self.page.stylesheet, "page.stylesheet")?;
        require_non_empty(&self.page.icon, "page.icon")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.page.script = expand::expand_env(&self.page.script, "page.script")?;
        self.page.stylesheet = expand::expand_env(&self.page.stylesheet, "page.stylesheet")?;
        self.page.icon = expand::expand_env(&self.page.icon, "page.icon")?;
        Ok(())
    }

    /// Conversion options for the renderer.
    #[must_use]
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            backend: self.convert.backend.clone(),
            standalone: self.convert.standalone,
            gfm: self.convert.gfm,
            document_suffix: self.convert.document_suffix.clone(),
            attributes: self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect(),
            fallback: self
                .fallback
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect::<FallbackOptions>(),
            page: PageShell {
                script: self.page.script.clone(),
                stylesheet: self.page.stylesheet.clone(),
                icon: self.page.icon.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.convert.backend, "franklin");
        assert!(!config.convert.standalone);
        assert!(config.convert.gfm);
        assert_eq!(config.convert.document_suffix, ".html");
        assert_eq!(config.page.script, "/scripts/scripts.js");
        assert_eq!(config.page.stylesheet, "/styles/styles.css");
        assert_eq!(config.page.icon, "data:,");
        assert!(config.attributes.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.convert.backend, "franklin");
        assert!(config.fallback.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[convert]
backend = "html5"
standalone = true
gfm = false
document_suffix = ".htm"

[attributes]
icons = "font"
toclevels = 2

[fallback]
sectids = false

[page]
script = "/js/app.js"
stylesheet = "/css/site.css"
icon = "/favicon.ico"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.convert.backend, "html5");
        assert!(config.convert.standalone);
        assert!(!config.convert.gfm);
        assert_eq!(config.convert.document_suffix, ".htm");
        assert_eq!(
            config.attributes.get("icons"),
            Some(&ScalarValue::String("font".to_owned()))
        );
        assert_eq!(
            config.attributes.get("toclevels"),
            Some(&ScalarValue::Integer(2))
        );
        assert_eq!(config.fallback.get("sectids"), Some(&ScalarValue::Bool(false)));
        assert_eq!(config.page.script, "/js/app.js");
        assert_eq!(config.page.icon, "/favicon.ico");
    }

    #[test]
    fn test_convert_options() {
        let toml = r#"
[convert]
document_suffix = ".adoc"

[attributes]
icons = "font"

[fallback]
sectids = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let options = config.convert_options();
        assert_eq!(options.backend, "franklin");
        assert_eq!(options.document_suffix, ".adoc");
        assert_eq!(options.attributes.get("icons").map(String::as_str), Some("font"));
        assert_eq!(options.fallback.get("sectids"), Some("false"));
        assert_eq!(options.page, PageShell::default());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            backend: Some("html5".to_owned()),
            standalone: Some(true),
            attributes: vec![("icons".to_owned(), "font".to_owned())],
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.convert.backend, "html5");
        assert!(config.convert.standalone);
        assert_eq!(config.convert.document_suffix, ".html"); // Unchanged
        assert_eq!(
            config.attributes.get("icons"),
            Some(&ScalarValue::String("font".to_owned()))
        );
    }

    #[test]
    fn test_cli_attribute_overrides_file_attribute() {
        let mut config: Config = toml::from_str("[attributes]\nicons = \"font\"\n").unwrap();
        config.apply_cli_settings(&CliSettings {
            attributes: vec![("icons".to_owned(), "false".to_owned())],
            ..Default::default()
        });
        assert_eq!(config.convert_options().attributes["icons"], "false");
    }

    #[test]
    fn test_expand_env_vars_page() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FRANKLIN_TEST_ASSETS", "https://assets.example.com");
        }

        let toml = r#"
[page]
script = "${FRANKLIN_TEST_ASSETS}/scripts.js"
stylesheet = "${FRANKLIN_TEST_MISSING_STYLES:-/styles/site.css}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.page.script, "https://assets.example.com/scripts.js");
        assert_eq!(config.page.stylesheet, "/styles/site.css");
        assert_eq!(config.page.icon, "data:,");
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        let toml = r#"
[page]
icon = "${FRANKLIN_TEST_MISSING_ICON}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FRANKLIN_TEST_MISSING_ICON"));
        assert!(err.to_string().contains("page.icon"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_empty_backend() {
        let mut config = Config::default();
        config.convert.backend = String::new();
        assert_validation_error(&config, &["convert.backend", "cannot be empty"]);
    }

    #[test]
    fn test_validate_unknown_backend() {
        let mut config = Config::default();
        config.convert.backend = "docbook5".to_owned();
        assert_validation_error(&config, &["convert.backend", "docbook5"]);
    }

    #[test]
    fn test_validate_empty_document_suffix() {
        let mut config = Config::default();
        config.convert.document_suffix = String::new();
        assert_validation_error(&config, &["convert.document_suffix"]);
    }

    #[test]
    fn test_validate_empty_page_url() {
        let mut config = Config::default();
        config.page.stylesheet = String::new();
        assert_validation_error(&config, &["page.stylesheet"]);
    }

    // Loading tests

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[convert]\nbackend = \"html5\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.convert.backend, "html5");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[convert]\nbackend = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[convert\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            backend: Some("pdf".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_config(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
