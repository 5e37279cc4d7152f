use glimpse_engine::StyleDescriptor;
use glimpse_engine::render::EMPTY_USER_CONFIG;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler executable, looked up on `PATH` when not absolute.
    pub compiler: PathBuf,
    /// Where artifact directories are created; the system temp dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_root: Option<PathBuf>,
    /// Inserted verbatim before every fragment body.
    pub user_preamble: String,
    /// Style used when the host has no theme of its own.
    pub style: StyleDescriptor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("typst"),
            temp_root: None,
            user_preamble: EMPTY_USER_CONFIG.to_string(),
            style: StyleDescriptor::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.compiler = Self::expand_path(&config.compiler).unwrap_or(config.compiler);
        config.temp_root = config
            .temp_root
            .map(|root| Self::expand_path(&root).unwrap_or(root));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/glimpse");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_engine::Rgb;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/glimpse/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.compiler, PathBuf::from("typst"));
        assert_eq!(config.temp_root, None);
        assert_eq!(config.user_preamble, EMPTY_USER_CONFIG);
        assert_eq!(config.style, StyleDescriptor::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            compiler: PathBuf::from("/opt/typst/bin/typst"),
            temp_root: Some(PathBuf::from("/tmp/glimpse")),
            user_preamble: "#set text(font: \"Libertinus Serif\")".to_string(),
            style: StyleDescriptor {
                foreground: Rgb::new(200, 200, 190),
                font_weight: "medium".to_string(),
                font_size_pt: 13,
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r##"
compiler = "typst-nightly"

[style]
foreground = "#ddd"
"##,
        )
        .unwrap();

        assert_eq!(config.compiler, PathBuf::from("typst-nightly"));
        assert_eq!(config.user_preamble, EMPTY_USER_CONFIG);
        assert_eq!(config.style.foreground, Rgb::new(0xdd, 0xdd, 0xdd));
        assert_eq!(config.style.font_weight, "regular");
        assert_eq!(config.style.font_size_pt, 11);
    }

    #[test]
    fn test_invalid_color_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[style]\nforeground = \"teal\"\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
        let fallback = Config::load_or_default(&non_existent_config).unwrap();
        assert_eq!(fallback, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            temp_root: Some(PathBuf::from("/tmp/glimpse-artifacts")),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_temp_root_with_env_var_in_toml() {
        unsafe {
            env::set_var("GLIMPSE_TEST_ROOT", "/custom/scratch");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "temp_root = \"$GLIMPSE_TEST_ROOT/glimpse\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.temp_root, Some(PathBuf::from("/custom/scratch/glimpse")));

        unsafe {
            env::remove_var("GLIMPSE_TEST_ROOT");
        }
    }
}
