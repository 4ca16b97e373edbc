use std::path::{Path, PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use platen::{LayoutConfig, LineJoin, NormalizeConfig, Px, ViewportConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod stats;
pub mod theme;

/// Prefix of environment variables that override settings, e.g. `TYPELINE_TAB_WIDTH=8`
/// or `TYPELINE_STATS__ENABLED=false`
const ENV_PREFIX: &str = "TYPELINE_";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Distance between tab stops, in cells
    pub tab_width: Px,
    /// Widest a line may get, in cells. Narrower terminals use their own width.
    pub max_width: u16,
    /// Lines of text visible at once
    pub display_rows: u32,
    /// Row of the window the caret's line is kept on
    pub cursor_target_row: u32,
    /// How single line breaks in the practice text are treated
    pub line_join: LineJoin,
    /// Overwrite the practice file with the untyped rest on quit
    pub save_remainder: bool,
    /// Log filter used when `RUST_LOG` isn't set
    pub log_filter: String,
    pub stats: stats::StatisticsConfig,
    pub theme: theme::Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            max_width: 80,
            display_rows: 3,
            cursor_target_row: 1,
            line_join: LineJoin::Soft,
            save_remainder: false,
            log_filter: "info".to_string(),
            stats: stats::StatisticsConfig::default(),
            theme: theme::Theme::default(),
        }
    }
}

impl Settings {
    /// Layout for a text area `width` cells wide
    pub fn layout(&self, width: u16) -> Result<LayoutConfig, platen::ConfigError> {
        LayoutConfig::new(Px::from(width.min(self.max_width)), self.tab_width)
    }

    pub const fn viewport(&self) -> Result<ViewportConfig, platen::ConfigError> {
        ViewportConfig::new(self.display_rows, self.cursor_target_row)
    }

    pub const fn normalize(&self) -> NormalizeConfig {
        NormalizeConfig {
            line_join: self.line_join,
        }
    }

    /// Check the settings the engine validates, before any session is created
    fn validated(self) -> Result<Self, platen::ConfigError> {
        self.layout(self.max_width)?;
        self.viewport()?;
        Ok(self)
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Invalid settings: {0}")]
    Invalid(platen::ConfigError),

    #[error("Failed to print config: {0}")]
    Serialize(toml::ser::Error),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    /// Where `settings.toml` is read from
    pub config_dir: PathBuf,
    /// Where logs and statistics are written to
    pub data_dir: PathBuf,
}

impl Config {
    /// Load the settings: defaults, then `settings.toml`, then environment variables
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let (config_dir, data_dir) = match override_path {
            Some(path) => (path.clone(), path),
            None => ProjectDirs::from("com", "Typeline", "Typeline")
                .map(|dirs| (dirs.config_dir().to_path_buf(), dirs.data_dir().to_path_buf()))
                .ok_or(ConfigError::NoDirectory)?,
        };

        // Ensure paths exist
        for dir in [&config_dir, &data_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let settings = Self::load_settings(&config_dir)?;

        Ok(Self {
            settings,
            config_dir,
            data_dir,
        })
    }

    fn load_settings(config_dir: &Path) -> Result<Settings, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            figment = figment.merge(Toml::file(settings_toml));
        }

        let settings: Settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        Ok(settings.validated()?)
    }

    /// Statistics file, falling back to `stats.jsonl` in the data directory
    pub fn stats_file(&self) -> PathBuf {
        self.settings
            .stats
            .file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("stats.jsonl"))
    }

    /// The effective settings as TOML
    pub fn dump(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.settings)?)
    }
}
