//! TOML configuration: general settings under `[base]` and any number of
//! `[[formation]]` tables. A `confdir` names a directory whose `*.toml` files
//! contribute further formations.


use crate::{info, warn};
use itertools::Itertools;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use strum_macros::Display;

const DEFAULT_MENU_SHORTCUT: &str = "Shift+J";
const DEFAULT_THROTTLE_PERCENT: u32 = 60;

#[derive(Debug, Display)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self { Self::Io(value) }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self { Self::Parse(value) }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BaseSettings {
    /// Key combination that toggles the current menu.
    menu_shortcut: String,
    /// Throttle applied by "Forward", percent.
    throttle: u32,
    /// Drop-in directory, relative to the main file.
    confdir: Option<PathBuf>,
}

impl Default for BaseSettings {
    fn default() -> Self {
        Self {
            menu_shortcut: DEFAULT_MENU_SHORTCUT.to_string(),
            throttle: DEFAULT_THROTTLE_PERCENT,
            confdir: None,
        }
    }
}

impl BaseSettings {
    pub fn menu_shortcut(&self) -> &str {
        if self.menu_shortcut.trim().is_empty() { DEFAULT_MENU_SHORTCUT } else { &self.menu_shortcut }
    }

    pub fn throttle_percent(&self) -> u32 { self.throttle.min(100) }

    pub fn with_throttle(mut self, percent: u32) -> Self {
        self.throttle = percent;
        self
    }

    pub fn with_menu_shortcut(mut self, key: impl Into<String>) -> Self {
        self.menu_shortcut = key.into();
        self
    }
}

/// A formation as written in the file. Unit lines are `type, x, y` with
/// offsets in meters, `x` to starboard and `y` ahead.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct FormationDef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub units: Vec<String>,
}

impl FormationDef {
    pub fn new(title: impl Into<String>, units: &[&str]) -> Self {
        Self { title: title.into(), units: units.iter().map(ToString::to_string).collect() }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FleetConfig {
    #[serde(default)]
    base: BaseSettings,
    #[serde(default, rename = "formation")]
    formations: Vec<FormationDef>,
}

/// Drop-in files only carry formations.
#[derive(Debug, Default, Deserialize)]
struct DropIn {
    #[serde(default, rename = "formation")]
    formations: Vec<FormationDef>,
}

impl FleetConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> { Ok(toml::from_str(content)?) }

    /// Reads the main file and its drop-in directory.
    ///
    /// A missing main file gives the defaults. Unreadable or malformed drop-in
    /// files are skipped with a warning.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No configuration at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(dir) = config.base.confdir.clone() {
            let dir = path.parent().map_or_else(|| dir.clone(), |p| p.join(&dir));
            config.load_drop_ins(&dir);
        }
        info!("Loaded {} formation definitions from {}", config.formations.len(), path.display());
        Ok(config)
    }

    fn load_drop_ins(&mut self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read drop-in directory {}: {e}", dir.display());
                return;
            }
        };
        let files = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "toml"))
            .sorted();
        for file in files {
            match Self::read_drop_in(&file) {
                Ok(drop_in) => self.formations.extend(drop_in.formations),
                Err(e) => warn!("Skipping drop-in {}: {e:?}", file.display()),
            }
        }
    }

    fn read_drop_in(file: &Path) -> Result<DropIn, ConfigError> {
        let content = std::fs::read_to_string(file)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn base(&self) -> &BaseSettings { &self.base }

    pub fn formations(&self) -> &[FormationDef] { &self.formations }
}
