use crate::error::{ExtractError, Result};
use std::path::Path;

/// Matches file names against a configured extension using the suffix that
/// starts at the *first* dot of the name.
///
/// `archive.tar.gz` has the suffix `.tar.gz`, so it matches `.tar.gz` but
/// never `.gz`. Names without a dot never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extension: String,
}

impl ExtensionFilter {
    pub fn new<S: Into<String>>(extension: S) -> Result<Self> {
        let extension = extension.into();
        validate_extension(&extension)?;
        Ok(Self { extension })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn matches_name(&self, file_name: &str) -> bool {
        first_dot_suffix(file_name).is_some_and(|suffix| suffix == self.extension)
    }

    /// Compares raw name bytes, so names that are not valid UTF-8 still
    /// match on their suffix.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            let bytes = name.as_encoded_bytes();
            bytes
                .iter()
                .position(|&b| b == b'.')
                .is_some_and(|index| &bytes[index..] == self.extension.as_bytes())
        })
    }
}

/// Substring of `file_name` from its first `.` to the end.
pub fn first_dot_suffix(file_name: &str) -> Option<&str> {
    file_name.find('.').map(|index| &file_name[index..])
}

pub fn validate_extension(extension: &str) -> Result<()> {
    if extension.starts_with('.') {
        Ok(())
    } else {
        Err(ExtractError::InvalidExtension {
            extension: extension.to_string(),
        })
    }
}
