use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_data_file() -> String {
    Config::data_file_path().to_string_lossy().to_string()
}
fn default_logs_dir() -> String {
    Config::logs_dir_path().to_string_lossy().to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_tick_millis() -> u64 {
    100
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            logs_dir: default_logs_dir(),
            log_level: default_log_level(),
            tick_millis: default_tick_millis(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the application directory depending on the platform.
    /// `SHYFT_HOME` overrides it (used by tests and portable installs).
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var("SHYFT_HOME")
            && !custom.is_empty()
        {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("Shyft")
        } else if cfg!(target_os = "macos") {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/Shyft")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shyft")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shyft.conf")
    }

    /// Return the default path of the shift document
    pub fn data_file_path() -> PathBuf {
        Self::config_dir().join("data.json")
    }

    /// Return the default directory for autologger notes
    pub fn logs_dir_path() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Directory receiving the rolling diagnostic log files
    pub fn diagnostics_dir() -> PathBuf {
        Self::config_dir().join("diagnostics")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

        // an empty file is a valid "all defaults" config
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Override the data file; notes then live next to it.
    pub fn with_data_file(mut self, data_file: &str) -> Self {
        let data = PathBuf::from(data_file);
        let logs = data
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"));

        self.data_file = data.to_string_lossy().to_string();
        self.logs_dir = logs.to_string_lossy().to_string();
        self
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Initialize configuration file, data directory and notes directory.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;

        if !is_test {
            self.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        let data = PathBuf::from(&self.data_file);
        if let Some(parent) = data.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&self.logs_dir)?;

        println!("✅ Data file:   {:?}", data);
        println!("✅ Notes dir:   {:?}", self.logs_dir);

        Ok(())
    }
}
