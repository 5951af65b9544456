//! INI-style configuration file and the settings resolved from it.
//!
//! Every key is optional; an empty [`Config`] resolves to the defaults the
//! collector ships with.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Default dataset directory, relative to the working directory.
pub const DEFAULT_DATASET_DIR: &str = "hand_gesture_data";
/// Default main window title.
pub const DEFAULT_WINDOW_TITLE: &str = "Data Collection";
/// Default title of the bounding-box selection window.
pub const DEFAULT_ROI_WINDOW_TITLE: &str = "Draw Bounding Box";
/// Default key poll timeout in milliseconds.
pub const DEFAULT_KEY_WAIT_MS: i32 = 1;
/// Default log file prefix.
pub const DEFAULT_LOG_FILENAME: &str = "gesture_collector";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value {value:?} for [{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file cannot be read.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parses configuration text. Unrecognized lines are ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Self { globals, sections }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(String::as_str)
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get_non_empty_or_default<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: &'a str,
    ) -> &'a str {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
            .unwrap_or(default)
    }

    /// Parses a non-empty value with `FromStr`, or returns `default` when absent.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when the value does not parse.
    pub fn get_parsed_or<T>(&self, section: &str, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_non_empty(section, key) {
            None => Ok(default),
            Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                section: section.to_owned(),
                key: key.to_owned(),
                value: raw.to_owned(),
                reason: e.to_string(),
            }),
        }
    }
}

/// `[Logging]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Log directory; `None` means `logs/` next to the executable.
    pub dir: Option<PathBuf>,
    pub file_name: String,
    /// Echo Info and above to stderr.
    pub echo: bool,
}

/// Everything the collector binary needs, resolved from a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorSettings {
    pub dataset_dir: PathBuf,
    pub device_id: usize,
    pub window_title: String,
    pub roi_window_title: String,
    pub key_wait_ms: i32,
    pub log: LogSettings,
}

impl CollectorSettings {
    /// Resolves settings, falling back to defaults for absent keys.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for numbers or booleans that do
    /// not parse, and for a `key_wait_ms` below 1 (0 would block on every frame).
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let dataset_dir =
            expand_path(config.get_non_empty_or_default("Dataset", "dir", DEFAULT_DATASET_DIR));
        let device_id = config.get_parsed_or("Camera", "device_id", 0usize)?;
        let window_title = config
            .get_non_empty_or_default("Display", "window_title", DEFAULT_WINDOW_TITLE)
            .to_owned();
        let roi_window_title = config
            .get_non_empty_or_default("Display", "roi_window_title", DEFAULT_ROI_WINDOW_TITLE)
            .to_owned();
        let key_wait_ms = config.get_parsed_or("Display", "key_wait_ms", DEFAULT_KEY_WAIT_MS)?;
        if key_wait_ms < 1 {
            return Err(ConfigError::InvalidValue {
                section: "Display".into(),
                key: "key_wait_ms".into(),
                value: key_wait_ms.to_string(),
                reason: "must be at least 1".into(),
            });
        }

        let log = LogSettings {
            dir: config.get_non_empty("Logging", "log_path").map(expand_path),
            file_name: config
                .get_non_empty_or_default("Logging", "log_filename", DEFAULT_LOG_FILENAME)
                .to_owned(),
            echo: config.get_parsed_or("Logging", "echo", true)?,
        };

        Ok(Self {
            dataset_dir,
            device_id,
            window_title,
            roi_window_title,
            key_wait_ms,
            log,
        })
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            device_id: 0,
            window_title: DEFAULT_WINDOW_TITLE.to_owned(),
            roi_window_title: DEFAULT_ROI_WINDOW_TITLE.to_owned(),
            key_wait_ms: DEFAULT_KEY_WAIT_MS,
            log: LogSettings {
                dir: None,
                file_name: DEFAULT_LOG_FILENAME.to_owned(),
                echo: true,
            },
        }
    }
}

/// Expands tilde (`~`) in file paths to the user's home directory.
#[must_use]
pub fn expand_path(path_str: &str) -> PathBuf {
    if path_str.starts_with('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if path_str == "~" {
                return home_path;
            }
            if path_str.starts_with("~/") || path_str.starts_with("~\\") {
                home_path.push(&path_str[2..]);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}
