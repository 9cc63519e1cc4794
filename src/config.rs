//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default bold font path.
pub const DEFAULT_BOLD_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
/// Default regular font path.
pub const DEFAULT_REGULAR_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Font file locations.
    #[serde(default)]
    pub fonts: FontsConfig,

    /// Replacement batch; the built-in sneaker list is used when empty.
    #[serde(default)]
    pub images: Vec<Placeholder>,
}

/// Font file locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Font used for titles.
    pub bold: PathBuf,
    /// Font used for subtitles and the caption.
    pub regular: PathBuf,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self { bold: PathBuf::from(DEFAULT_BOLD_FONT), regular: PathBuf::from(DEFAULT_REGULAR_FONT) }
    }
}

/// One image in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Placeholder {
    /// Output file name, resolved against the output directory.
    pub filename: String,
    /// Title text.
    pub title: String,
    /// Subtitle text.
    pub subtitle: String,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Font paths, preferring `KICKS_FONT_BOLD` / `KICKS_FONT_REGULAR`.
    #[must_use]
    pub fn resolved_fonts(&self) -> FontsConfig {
        FontsConfig {
            bold: std::env::var_os("KICKS_FONT_BOLD")
                .map_or_else(|| self.fonts.bold.clone(), PathBuf::from),
            regular: std::env::var_os("KICKS_FONT_REGULAR")
                .map_or_else(|| self.fonts.regular.clone(), PathBuf::from),
        }
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `KICKS_SETUP_CONFIG` environment variable
/// 3. `~/.config/kicks-setup/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("KICKS_SETUP_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/kicks-setup/config.toml")
    } else {
        PathBuf::from("kicks-setup.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.fonts.bold, PathBuf::from(DEFAULT_BOLD_FONT));
        assert_eq!(config.fonts.regular, PathBuf::from(DEFAULT_REGULAR_FONT));
        assert!(config.images.is_empty());
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.fonts.bold, PathBuf::from(DEFAULT_BOLD_FONT));
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("kicks_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[fonts]
bold = "/opt/fonts/Bold.ttf"

[[images]]
filename = "dunk.png"
title = "SNEAKER 9"
subtitle = "Nike Dunk Low - Panda"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fonts.bold, PathBuf::from("/opt/fonts/Bold.ttf"));
        assert_eq!(config.fonts.regular, PathBuf::from(DEFAULT_REGULAR_FONT));
        assert_eq!(
            config.images,
            vec![Placeholder {
                filename: "dunk.png".into(),
                title: "SNEAKER 9".into(),
                subtitle: "Nike Dunk Low - Panda".into(),
            }]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("kicks_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolved_fonts_without_env_uses_file() {
        let config = Config {
            fonts: FontsConfig { bold: "/a/b.ttf".into(), regular: "/a/r.ttf".into() },
            ..Config::default()
        };
        if std::env::var_os("KICKS_FONT_BOLD").is_none() {
            assert_eq!(config.resolved_fonts().bold, PathBuf::from("/a/b.ttf"));
        }
        if std::env::var_os("KICKS_FONT_REGULAR").is_none() {
            assert_eq!(config.resolved_fonts().regular, PathBuf::from("/a/r.ttf"));
        }
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
