//! Editor options and the optional `vimcore.toml` configuration file.
//!
//! [`EditorOptions`] is what the editor is constructed from. A host may build
//! it directly with the `with_*` methods, or overlay values from a TOML file
//! discovered on disk. Every file field is optional and unknown fields are
//! ignored so older binaries keep reading newer files.

pub mod logging;

use serde::Deserialize;
use std::time::Duration;
use std::{fs, io, path::PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "vimcore.toml";
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_YANK_HIGHLIGHT: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Construction options for the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub content: String,
    /// Only forwarded to the host's highlighter; the core ignores it.
    pub file_name: Option<String>,
    pub status_bar: bool,
    pub command_mode: bool,
    /// Zero disables blinking.
    pub blink_interval: Duration,
    pub relative_numbers: bool,
    pub scroll_margin: usize,
    pub yank_highlight: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            content: String::new(),
            file_name: None,
            status_bar: true,
            command_mode: true,
            blink_interval: DEFAULT_BLINK_INTERVAL,
            relative_numbers: false,
            scroll_margin: 0,
            yank_highlight: DEFAULT_YANK_HIGHLIGHT,
        }
    }
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_status_bar(mut self, enabled: bool) -> Self {
        self.status_bar = enabled;
        self
    }

    pub fn with_command_mode(mut self, enabled: bool) -> Self {
        self.command_mode = enabled;
        self
    }

    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    pub fn with_relative_numbers(mut self, enabled: bool) -> Self {
        self.relative_numbers = enabled;
        self
    }

    pub fn with_scroll_margin(mut self, margin: usize) -> Self {
        self.scroll_margin = margin;
        self
    }

    pub fn with_yank_highlight(mut self, duration: Duration) -> Self {
        self.yank_highlight = duration;
        self
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EditorSection {
    #[serde(default)]
    pub status_bar: Option<bool>,
    #[serde(default)]
    pub command_mode: Option<bool>,
    #[serde(default)]
    pub relative_numbers: Option<bool>,
    #[serde(default)]
    pub blink_interval_ms: Option<u64>,
    #[serde(default)]
    pub scroll_margin: Option<usize>,
    #[serde(default)]
    pub yank_highlight_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorSection,
}

impl ConfigFile {
    /// Overlay the values present in the file onto `options`.
    pub fn apply(&self, mut options: EditorOptions) -> EditorOptions {
        let e = &self.editor;
        if let Some(v) = e.status_bar {
            options.status_bar = v;
        }
        if let Some(v) = e.command_mode {
            options.command_mode = v;
        }
        if let Some(v) = e.relative_numbers {
            options.relative_numbers = v;
        }
        if let Some(ms) = e.blink_interval_ms {
            options.blink_interval = Duration::from_millis(ms);
        }
        if let Some(v) = e.scroll_margin {
            options.scroll_margin = v;
        }
        if let Some(ms) = e.yank_highlight_ms {
            options.yank_highlight = Duration::from_millis(ms);
        }
        options
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn apply(&self, options: EditorOptions) -> EditorOptions {
        self.file.apply(options)
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vimcore").join(CONFIG_FILE_NAME);
    }
    local
}

/// Load the config at `path` (or the discovered path). A missing file yields
/// defaults; unreadable or malformed files are errors.
pub fn load_from(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(target: "config", path = %path.display(), "config_missing_using_defaults");
            return Ok(Config::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let file = toml::from_str::<ConfigFile>(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    info!(target: "config", path = %path.display(), "config_loaded");
    Ok(Config {
        raw: Some(content),
        file,
        path: Some(path),
    })
}

/// Like [`load_from`] but never fails: errors are logged and defaults used.
pub fn load_or_default(path: Option<PathBuf>) -> Config {
    match load_from(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!(target: "config", error = %err, "config_load_failed");
            Config::default()
        }
    }
}
