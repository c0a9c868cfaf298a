//! Check results and the response envelope built from them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::comp::errors::{CompIssue, LoadError};
use crate::comp::model::ParsedDocument;

/// Message carried by a successful response
pub const VALID_MESSAGE: &str = "Valid .comp model";

/// Mutable accumulator used while a document is parsed and validated
#[derive(Debug, Default)]
pub struct ReportBuilder {
    document: ParsedDocument,
    issues: Vec<CompIssue>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: CompIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = CompIssue>) {
        self.issues.extend(issues);
    }

    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut ParsedDocument {
        &mut self.document
    }

    /// Freeze into an immutable report
    pub fn finish(self) -> CheckReport {
        CheckReport { document: self.document, issues: self.issues }
    }
}

/// Outcome of checking one document: the parsed data plus every issue found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    #[serde(rename = "data")]
    document: ParsedDocument,
    #[serde(rename = "errors")]
    issues: Vec<CompIssue>,
}

impl CheckReport {
    /// True when no issue was recorded
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues in detection order
    pub fn errors(&self) -> &[CompIssue] {
        &self.issues
    }

    /// Issue messages in detection order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Parsed document, populated as far as parsing got even when invalid
    pub fn parsed_data(&self) -> &ParsedDocument {
        &self.document
    }

    pub fn status(&self) -> ResponseStatus {
        if self.is_valid() { ResponseStatus::Ok } else { ResponseStatus::BadRequest }
    }

    /// Success or failure envelope for this report
    pub fn to_response(&self) -> CheckResponse {
        if self.is_valid() {
            CheckResponse::Valid { message: VALID_MESSAGE.to_string(), data: self.document.clone() }
        } else {
            CheckResponse::Invalid { errors: self.messages() }
        }
    }
}

/// JSON envelope returned to callers of the checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckResponse {
    Valid { message: String, data: ParsedDocument },
    Invalid { errors: Vec<String> },
}

impl CheckResponse {
    /// Failure envelope carrying a single message
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Invalid { errors: vec![message.into()] }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// HTTP-style status paired with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    Ok,
    BadRequest,
    NotFound,
    InternalError,
}

impl ResponseStatus {
    pub fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of checking one file on disk
#[derive(Debug)]
pub struct CheckOutcome {
    pub path: PathBuf,
    pub result: Result<CheckReport, LoadError>,
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(&self.result, Ok(report) if report.is_valid())
    }

    /// True when the file could not be loaded at all
    pub fn is_load_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn status(&self) -> ResponseStatus {
        match &self.result {
            Ok(report) => report.status(),
            Err(LoadError::NotFound { .. }) => ResponseStatus::NotFound,
            Err(LoadError::Read { .. }) => ResponseStatus::InternalError,
        }
    }

    pub fn response(&self) -> CheckResponse {
        match &self.result {
            Ok(report) => report.to_response(),
            Err(err) => CheckResponse::failure(err.to_string()),
        }
    }
}
