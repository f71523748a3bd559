//! User configuration
//!
//! Looked up in order:
//! 1. the file passed with `--config`
//! 2. `<config dir>/radviz/config.yaml` (e.g. `~/.config/radviz/config.yaml`)
//! 3. built-in defaults
//!
//! ```yaml
//! data_dir: data
//! temp_dir: tmp
//! figure:
//!   width: 1024
//!   height: 768
//!   font_size: 18
//! palette: ["#1f77b4", "#ff7f0e", "#2ca02c"]
//! smoothing_sigma: 1.0
//! colormap:
//!   low: "#30123b"
//!   high: "#f9e721"
//! ```

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadConfig {
    /// Root of the solver's save directories
    pub data_dir: PathBuf,
    /// Where figures, tables and pages are written
    pub temp_dir: PathBuf,
    pub figure: FigureConfig,
    /// Hex colors cycled across the series of a figure
    pub palette: Vec<String>,
    /// Standard deviation of the smoothing applied to section curves
    pub smoothing_sigma: f64,
    pub colormap: ColormapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
}

/// Surface colors at the lowest and highest values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColormapConfig {
    pub low: String,
    pub high: String,
}

impl Default for RadConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            temp_dir: PathBuf::from("tmp"),
            figure: FigureConfig::default(),
            palette: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
            ]
            .map(String::from)
            .to_vec(),
            smoothing_sigma: 1.0,
            colormap: ColormapConfig::default(),
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            font_size: 18,
        }
    }
}

impl Default for ColormapConfig {
    fn default() -> Self {
        Self {
            low: "#30123b".to_string(),
            high: "#f9e721".to_string(),
        }
    }
}

impl RadConfig {
    /// `<config dir>/radviz/config.yaml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("radviz").join(CONFIG_FILE))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist and parse. The per-user file is optional
    /// and falls back to defaults when it cannot be read.
    pub fn load(explicit: Option<&Path>) -> color_eyre::Result<Self> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read config '{}'", path.display()))?;
            let config = Self::from_yaml(&content)
                .wrap_err_with(|| format!("Failed to parse config '{}'", path.display()))?;
            tracing::debug!(path = %path.display(), "Loaded config");
            return Ok(config);
        }

        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path).map(|content| Self::from_yaml(&content)) {
            Ok(Ok(config)) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Ok(Err(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, temp_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = temp_dir {
            self.temp_dir = dir;
        }
        self
    }

    /// Save directories are named relative to the data directory.
    pub fn resolve_save_dir(&self, save_dir: &Path) -> PathBuf {
        if save_dir.is_absolute() {
            save_dir.to_path_buf()
        } else {
            self.data_dir.join(save_dir)
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.temp_dir.join(file_name)
    }

    /// Create the output directory if needed.
    pub fn ensure_temp_dir(&self) -> color_eyre::Result<()> {
        std::fs::create_dir_all(&self.temp_dir).wrap_err_with(|| {
            format!(
                "Failed to create output directory '{}'",
                self.temp_dir.display()
            )
        })
    }
}
