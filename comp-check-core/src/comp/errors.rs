//! Error types for `.comp` checking
//!
//! Two unrelated families live here. [`CompIssue`] describes a problem found
//! *in* a document; issues are accumulated into a report and never returned
//! as `Err`. [`LoadError`] describes a failure to obtain the document text at
//! all, which callers must surface separately from validation issues.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single problem detected while parsing or validating a document.
///
/// The `Display` output is the user-facing message carried in the
/// `errors` array of a failure response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompIssue {
    /// Input had no non-blank content
    #[error("file is empty")]
    EmptyFile,

    /// No line starts the properties block
    #[error("properties section not found")]
    MissingPropertiesSection,

    /// A line inside the properties block is not `key: value`
    #[error("malformed property: '{line}'")]
    MalformedProperty { line: String },

    /// A header field is absent or blank
    #[error("missing required field: '{field}'")]
    MissingField { field: &'static str },

    /// The properties block holds no properties
    #[error("properties section is empty")]
    EmptyProperties,

    /// A required property key is absent
    #[error("missing required property: '{property}'")]
    MissingProperty { property: &'static str },

    /// The `type` property is not a known component type
    #[error("invalid component type: '{value}'")]
    InvalidComponentType { value: String },

    #[error("invalid processor or unknown brand in model: '{model}'")]
    UnknownProcessorBrand { model: String },

    #[error("invalid graphics or unknown brand in model: '{model}'")]
    UnknownGraphicsBrand { model: String },

    #[error("unknown storage type in model: '{model}'")]
    UnknownStorageType { model: String },
}

impl CompIssue {
    /// Category this issue belongs to
    pub fn category(&self) -> IssueCategory {
        match self {
            Self::EmptyFile | Self::MissingPropertiesSection => IssueCategory::Structural,
            Self::MalformedProperty { .. } => IssueCategory::Syntactic,
            Self::MissingField { .. } | Self::EmptyProperties | Self::MissingProperty { .. } => {
                IssueCategory::Completeness
            }
            Self::InvalidComponentType { .. }
            | Self::UnknownProcessorBrand { .. }
            | Self::UnknownGraphicsBrand { .. }
            | Self::UnknownStorageType { .. } => IssueCategory::Semantic,
        }
    }
}

impl Serialize for CompIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Broad classification of [`CompIssue`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Structural,
    Syntactic,
    Completeness,
    Semantic,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "structural"),
            Self::Syntactic => write!(f, "syntactic"),
            Self::Completeness => write!(f, "completeness"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

/// Failure to obtain the text of a `.comp` file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// Path that failed to load
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages() {
        assert_eq!(CompIssue::EmptyFile.to_string(), "file is empty");
        assert_eq!(
            CompIssue::MissingField { field: "author" }.to_string(),
            "missing required field: 'author'"
        );
        assert_eq!(
            CompIssue::MalformedProperty { line: "badline".to_string() }.to_string(),
            "malformed property: 'badline'"
        );
        assert_eq!(
            CompIssue::UnknownStorageType { model: "Generic".to_string() }.to_string(),
            "unknown storage type in model: 'Generic'"
        );
    }

    #[test]
    fn test_issue_categories() {
        assert_eq!(CompIssue::MissingPropertiesSection.category(), IssueCategory::Structural);
        assert_eq!(
            CompIssue::MalformedProperty { line: String::new() }.category(),
            IssueCategory::Syntactic
        );
        assert_eq!(CompIssue::EmptyProperties.category(), IssueCategory::Completeness);
        assert_eq!(
            CompIssue::InvalidComponentType { value: "gpu".to_string() }.category(),
            IssueCategory::Semantic
        );
    }

    #[test]
    fn test_issue_serializes_as_message() {
        let json = serde_json::to_string(&CompIssue::MissingProperty { property: "id" }).unwrap();
        assert_eq!(json, "\"missing required property: 'id'\"");
    }

    #[test]
    fn test_load_error_from_io() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LoadError::from_io(PathBuf::from("a.comp"), missing);
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "file does not exist: a.comp");

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoadError::from_io(PathBuf::from("b.comp"), denied);
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.path(), std::path::Path::new("b.comp"));
    }
}
