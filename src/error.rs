use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid extension '{extension}': it must start with '.'")]
    InvalidExtension { extension: String },

    #[error("Invalid {role} directory: {}", path.display())]
    InvalidDirectory { role: DirectoryRole, path: PathBuf },

    #[error("IO operation failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Unsupported entry (symbolic link or special file): {}", path.display())]
    UnsupportedEntry { path: PathBuf },

    #[error("Extraction has already been run")]
    AlreadyRun,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    Source,
    Destination,
}

impl std::fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryRole::Source => write!(f, "source"),
            DirectoryRole::Destination => write!(f, "destination"),
        }
    }
}

impl ExtractError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors raised while validating construction arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ExtractError::InvalidExtension { .. } | ExtractError::InvalidDirectory { .. }
        )
    }

    /// Errors that abort a traversal that already started.
    pub fn is_fatal_abort(&self) -> bool {
        matches!(
            self,
            ExtractError::Io { .. } | ExtractError::Walk(_) | ExtractError::UnsupportedEntry { .. }
        )
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractError {
    fn user_message(&self) -> String {
        match self {
            ExtractError::InvalidExtension { extension } => {
                format!("Invalid extension: '{}'", extension)
            }
            ExtractError::InvalidDirectory { role, path } => {
                format!("The {} path is not an existing directory: {}", role, path.display())
            }
            ExtractError::Io { path, source } => {
                format!("Copy aborted at {}: {}", path.display(), source)
            }
            ExtractError::Walk(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "unknown path".to_string());
                format!("Could not read {} while scanning: {}", path, err)
            }
            ExtractError::UnsupportedEntry { path } => {
                format!("Refusing to process {}", path.display())
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractError::InvalidExtension { extension } => Some(format!(
                "Prefix the extension with a dot, e.g. '.{}'.",
                extension
            )),
            ExtractError::InvalidDirectory { .. } => Some(
                "Both source and destination must exist and be directories; create the destination first.".to_string()
            ),
            ExtractError::Io { .. } => Some(
                "Check free space and read/write permissions. Files copied before the failure remain in the destination.".to_string()
            ),
            ExtractError::Walk(_) => Some(
                "Ensure every directory under the source is readable.".to_string()
            ),
            ExtractError::UnsupportedEntry { .. } => Some(
                "Symbolic links and special files are not supported; remove them from the source tree or pick another source.".to_string()
            ),
            ExtractError::Config { .. } => Some(
                "Check your configuration file syntax or pass EXTENSION SOURCE DESTINATION on the command line.".to_string()
            ),
            ExtractError::AlreadyRun => None,
        }
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(error: toml::de::Error) -> Self {
        ExtractError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
