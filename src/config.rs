use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{SessionParams, TestMode};

/// Countdown lengths offered in time mode.
pub const DURATIONS: [u64; 4] = [15, 30, 60, 120];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub mode: TestMode,
    pub duration_secs: u64,
    pub number_of_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: TestMode::Time,
            duration_secs: 30,
            number_of_words: 200,
        }
    }
}

impl Config {
    /// Clamp out-of-range values from a hand-edited file.
    pub fn sanitized(mut self) -> Self {
        if !DURATIONS.contains(&self.duration_secs) {
            self.duration_secs = Config::default().duration_secs;
        }
        if self.number_of_words == 0 {
            self.number_of_words = Config::default().number_of_words;
        }
        self
    }

    pub fn params(&self) -> SessionParams {
        SessionParams {
            mode: self.mode,
            duration_secs: self.duration_secs,
            number_of_words: self.number_of_words,
        }
    }
}

impl From<&SessionParams> for Config {
    fn from(params: &SessionParams) -> Self {
        Self {
            mode: params.mode,
            duration_secs: params.duration_secs,
            number_of_words: params.number_of_words,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "vype") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("vype_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg.sanitized();
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
