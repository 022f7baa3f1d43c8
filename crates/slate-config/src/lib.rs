use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in every search location
pub const CONFIG_FILE_NAME: &str = "slate.toml";

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

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config file already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine the home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    /// Named palette; empty means derive it from the resolved mode
    pub style: String,
    pub show_progress: bool,
    pub show_slide_number: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Auto,
            style: String::new(),
            show_progress: true,
            show_slide_number: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    pub word_wrap: usize,
    pub margin: usize,
    pub padding: usize,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            word_wrap: 80,
            margin: 2,
            padding: 1,
        }
    }
}

/// Key names per action, e.g. `"right"`, `"space"`, `"ctrl+c"`, `"G"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingConfig {
    pub next: Vec<String>,
    pub previous: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub back: Vec<String>,
    pub quit: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            next: keys(&["right", "space", "l"]),
            previous: keys(&["left", "h"]),
            first: keys(&["home", "g"]),
            last: keys(&["end", "G"]),
            back: keys(&["b"]),
            quit: keys(&["q", "esc", "ctrl+c"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub theme: ThemeConfig,
    pub presentation: PresentationConfig,
    pub keybindings: KeybindingConfig,
}

/// On-disk shape: every field optional so a file may override only part of
/// the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub theme: ThemeFile,
    pub presentation: PresentationFile,
    pub keybindings: KeybindingFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeFile {
    pub mode: Option<ThemeMode>,
    pub style: Option<String>,
    pub show_progress: Option<bool>,
    pub show_slide_number: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresentationFile {
    pub word_wrap: Option<usize>,
    pub margin: Option<usize>,
    pub padding: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeybindingFile {
    pub next: Option<Vec<String>>,
    pub previous: Option<Vec<String>>,
    pub first: Option<Vec<String>>,
    pub last: Option<Vec<String>>,
    pub back: Option<Vec<String>>,
    pub quit: Option<Vec<String>>,
}

fn merge_keys(target: &mut Vec<String>, other: Option<Vec<String>>) {
    if let Some(keys) = other
        && !keys.is_empty()
    {
        *target = keys;
    }
}

impl Config {
    /// Overlay the values present in `other`. Empty strings, empty key lists
    /// and a zero `word_wrap` leave the current value in place.
    pub fn merge(&mut self, other: ConfigFile) {
        let ConfigFile {
            theme,
            presentation,
            keybindings,
        } = other;

        if let Some(mode) = theme.mode {
            self.theme.mode = mode;
        }
        if let Some(style) = theme.style
            && !style.is_empty()
        {
            self.theme.style = style;
        }
        if let Some(show) = theme.show_progress {
            self.theme.show_progress = show;
        }
        if let Some(show) = theme.show_slide_number {
            self.theme.show_slide_number = show;
        }

        if let Some(word_wrap) = presentation.word_wrap
            && word_wrap > 0
        {
            self.presentation.word_wrap = word_wrap;
        }
        if let Some(margin) = presentation.margin {
            self.presentation.margin = margin;
        }
        if let Some(padding) = presentation.padding {
            self.presentation.padding = padding;
        }

        merge_keys(&mut self.keybindings.next, keybindings.next);
        merge_keys(&mut self.keybindings.previous, keybindings.previous);
        merge_keys(&mut self.keybindings.first, keybindings.first);
        merge_keys(&mut self.keybindings.last, keybindings.last);
        merge_keys(&mut self.keybindings.back, keybindings.back);
        merge_keys(&mut self.keybindings.quit, keybindings.quit);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presentation.word_wrap == 0 {
            return Err(ConfigError::Invalid(
                "word_wrap must be greater than zero".to_string(),
            ));
        }

        let required = [
            ("next", &self.keybindings.next),
            ("previous", &self.keybindings.previous),
            ("quit", &self.keybindings.quit),
        ];
        for (action, keys) in required {
            if keys.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{action} keybinding must have at least one key"
                )));
            }
        }

        Ok(())
    }

    /// Load a config file layered over the defaults. A missing file is `None`.
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

        let file: ConfigFile =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let mut config = Config::default();
        config.merge(file);
        config.validate()?;

        log::debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
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

    /// `~/.config/slate/slate.toml`, where `config init` writes
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = shellexpand::tilde("~/.config/slate");
        if config_dir.starts_with('~') {
            return Err(ConfigError::NoHomeDirectory);
        }
        Ok(PathBuf::from(config_dir.as_ref()).join(CONFIG_FILE_NAME))
    }
}

/// Expand `~` and environment variables, keeping the path as given on failure
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    match shellexpand::full(&path_str) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// Defaults rendered as TOML, for `config example`
pub fn example_config() -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(&Config::default())?)
}

/// Write the defaults to the standard location and return its path
pub fn create_default_config() -> Result<PathBuf, ConfigError> {
    let config_path = Config::config_path()?;
    create_default_config_at(&config_path)?;
    Ok(config_path)
}

/// Write the defaults to `config_path`, refusing to replace an existing file
pub fn create_default_config_at(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Err(ConfigError::AlreadyExists(config_path.to_path_buf()));
    }

    let write_error = |source| ConfigError::ConfigWriteError {
        config_path: config_path.to_path_buf(),
        source,
    };
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(config_path, example_config()?).map_err(write_error)?;
    Ok(())
}

/// Looks for a config file in the usual places, first match wins.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
        }
    }

    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE_NAME));
            paths.push(cwd.join(format!(".{CONFIG_FILE_NAME}")));
        }

        let home = shellexpand::tilde("~");
        if !home.starts_with('~') {
            let home = PathBuf::from(home.as_ref());
            paths.push(home.join(".config").join("slate").join(CONFIG_FILE_NAME));
            paths.push(home.join(format!(".{CONFIG_FILE_NAME}")));
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
            && !xdg.is_empty()
        {
            paths.push(PathBuf::from(xdg).join("slate").join(CONFIG_FILE_NAME));
        }

        paths
    }

    pub fn find(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|path| path.is_file()).cloned()
    }

    /// Load the first config found, or the defaults when there is none
    pub fn load(&self) -> Result<(Config, Option<PathBuf>), ConfigError> {
        let Some(path) = self.find() else {
            log::debug!("No config file found, using defaults");
            return Ok((Config::default(), None));
        };

        let config = Config::load_from_path(&path)?.unwrap_or_default();
        Ok((config, Some(path)))
    }
}
