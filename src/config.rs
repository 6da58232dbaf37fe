//! Site configuration module.
//!
//! Handles loading and validating `smallpress.toml` from the site root.
//! Every setting has a stock default; a site with no config file at all
//! builds with the layout below. Present files are parsed strictly:
//! unknown keys are rejected rather than silently ignored.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! content = "content"      # Source pages, relative to the site root
//! templates = "templates"  # Layouts and page templates
//! static = "static"        # Assets copied verbatim into the output
//!
//! [front_matter]
//! delimiter = "+++"        # Marker enclosing the metadata header
//!
//! [serve]
//! port = 8080              # Preview server port
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config filename looked up in the site root.
pub const CONFIG_FILE: &str = "smallpress.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `smallpress.toml`.
///
/// All fields have defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory names under the site root.
    pub paths: PathsConfig,
    /// Metadata header settings.
    pub front_matter: FrontMatterConfig,
    /// Preview server settings.
    pub serve: ServeConfig,
}

/// Directory layout, all relative to the site root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Source pages.
    pub content: String,
    /// Layout fragments and page templates.
    pub templates: String,
    /// Assets copied verbatim into the output root.
    #[serde(rename = "static")]
    pub static_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            templates: "templates".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

/// Metadata header settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontMatterConfig {
    /// Marker that encloses the header; must appear exactly twice per file.
    pub delimiter: String,
}

impl Default for FrontMatterConfig {
    fn default() -> Self {
        Self {
            delimiter: "+++".to_string(),
        }
    }
}

/// Preview server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("paths.content", &self.paths.content),
            ("paths.templates", &self.paths.templates),
            ("paths.static", &self.paths.static_dir),
            ("front_matter.delimiter", &self.front_matter.delimiter),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn content_dir(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.paths.content)
    }

    pub fn templates_dir(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.paths.templates)
    }

    pub fn static_dir(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.paths.static_dir)
    }
}

/// Load config from `smallpress.toml` in the site root.
///
/// A missing file means stock defaults; a present file is parsed with
/// unknown keys rejected, then validated.
pub fn load_config(site_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = site_root.join(CONFIG_FILE);
    let config = if path.exists() {
        let raw = fs::read_to_string(&path)?;
        toml::from_str(&raw)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `smallpress.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command and written into scaffolded sites.
pub fn stock_config_toml() -> &'static str {
    r##"# smallpress configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys are an error.

# ---------------------------------------------------------------------------
# Directory layout (relative to the site root)
# ---------------------------------------------------------------------------
[paths]
# Source pages: markdown files with a front matter header.
content = "content"

# Layout fragments (_layouts/) and per-directory page templates.
templates = "templates"

# Copied verbatim into the output root. May be absent.
static = "static"

# ---------------------------------------------------------------------------
# Front matter
# ---------------------------------------------------------------------------
[front_matter]
# Marker enclosing the metadata header of every content file. The header
# between the two markers is a JSON object without its outer braces.
delimiter = "+++"

# ---------------------------------------------------------------------------
# Preview server
# ---------------------------------------------------------------------------
[serve]
# Port for `smallpress serve`.
port = 8080
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_stock_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.paths.content, "content");
        assert_eq!(config.paths.templates, "templates");
        assert_eq!(config.paths.static_dir, "static");
        assert_eq!(config.front_matter.delimiter, "+++");
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[front_matter]\ndelimiter = \"---\"\n",
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.front_matter.delimiter, "---");
        assert_eq!(config.paths.content, "content");
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn partial_table_keeps_sibling_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[paths]\ncontent = \"pages\"\n").unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.paths.content, "pages");
        assert_eq!(config.paths.templates, "templates");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "surprise = true\n").unwrap();
        assert!(matches!(
            load_config(temp.path()).unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn unknown_nested_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[serve]\nhost = \"::\"\n").unwrap();
        assert!(matches!(
            load_config(temp.path()).unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[paths\ncontent=").unwrap();
        assert!(matches!(
            load_config(temp.path()).unwrap_err(),
            ConfigError::Toml(_)
        ));
    }

    #[test]
    fn empty_delimiter_fails_validation() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "[front_matter]\ndelimiter = \"\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(temp.path()).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn empty_directory_name_fails_validation() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[paths]\ncontent = \"\"\n").unwrap();
        assert!(matches!(
            load_config(temp.path()).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn stock_config_parses_to_the_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        parsed.validate().unwrap();
        let stock = SiteConfig::default();
        assert_eq!(parsed.paths.content, stock.paths.content);
        assert_eq!(parsed.paths.templates, stock.paths.templates);
        assert_eq!(parsed.paths.static_dir, stock.paths.static_dir);
        assert_eq!(parsed.front_matter.delimiter, stock.front_matter.delimiter);
        assert_eq!(parsed.serve.port, stock.serve.port);
    }

    #[test]
    fn directory_accessors_join_the_site_root() {
        let config = SiteConfig::default();
        let root = Path::new("/srv/site");
        assert_eq!(config.content_dir(root), Path::new("/srv/site/content"));
        assert_eq!(config.templates_dir(root), Path::new("/srv/site/templates"));
        assert_eq!(config.static_dir(root), Path::new("/srv/site/static"));
    }
}
