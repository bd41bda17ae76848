use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_BUFFER_SIZE: usize = 4 * 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub copy: CopyConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtractConfig {
    pub extension: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CopyConfig {
    pub buffer_size: usize,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }
}

/// Fully resolved extraction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTarget {
    pub extension: String,
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["extcopy.toml", ".extcopy.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref extension) = cli_args.extension {
            self.extract.extension = Some(extension.clone());
        }

        if let Some(ref source) = cli_args.source_dir {
            self.extract.source_dir = Some(source.clone());
        }

        if let Some(ref destination) = cli_args.destination_dir {
            self.extract.destination_dir = Some(destination.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExtractError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExtractError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    /// Checks that every parameter is present. Directory and extension
    /// semantics are enforced by `FileExtractor::new`.
    pub fn validate(&self) -> Result<ExtractionTarget> {
        if self.copy.buffer_size < MIN_BUFFER_SIZE {
            return Err(ExtractError::Config {
                message: format!(
                    "Copy buffer size must be at least {} bytes",
                    MIN_BUFFER_SIZE
                ),
            });
        }

        let missing = |name: &str| ExtractError::Config {
            message: format!("No {} given on the command line or in the config file", name),
        };

        let extension = self.extract.extension.clone().ok_or_else(|| missing("extension"))?;
        let source_dir = self
            .extract
            .source_dir
            .clone()
            .ok_or_else(|| missing("source directory"))?;
        let destination_dir = self
            .extract
            .destination_dir
            .clone()
            .ok_or_else(|| missing("destination directory"))?;

        Ok(ExtractionTarget {
            extension,
            source_dir,
            destination_dir,
        })
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self {
            extract: ExtractConfig {
                extension: Some(".class".to_string()),
                source_dir: Some(PathBuf::from("lib")),
                destination_dir: Some(PathBuf::from("lib2")),
            },
            copy: CopyConfig::default(),
        };
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extension: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub destination_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_source_dir(mut self, source: Option<PathBuf>) -> Self {
        self.source_dir = source;
        self
    }

    pub fn with_destination_dir(mut self, destination: Option<PathBuf>) -> Self {
        self.destination_dir = destination;
        self
    }
}
