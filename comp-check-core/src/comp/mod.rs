//! `.comp` component descriptor checking
//!
//! A `.comp` file describes one PC hardware component: a few header fields
//! followed by a `properties:` block of `key: value` lines. [`CompChecker`]
//! parses the text and validates the result, accumulating every problem it
//! finds into a [`CheckReport`] instead of stopping at the first one.

pub mod errors;
pub mod model;
pub mod parser;
pub mod report;
pub mod validator;


use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use errors::{CompIssue, IssueCategory, LoadError};
pub use model::{ComponentType, ParsedDocument, Properties};
pub use parser::{CompParser, ParseStatus};
pub use report::{CheckOutcome, CheckReport, CheckResponse, ReportBuilder, ResponseStatus};
pub use validator::CompValidator;

use crate::ScanConfig;

/// Parser and validator wired together
#[derive(Debug, Clone, Copy, Default)]
pub struct CompChecker {
    parser: CompParser,
    validator: CompValidator,
}

impl CompChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate the full text of a `.comp` file
    pub fn check(&self, text: &str) -> CheckReport {
        let mut report = ReportBuilder::new();
        let status = self.parser.parse(text, &mut report);
        if status != ParseStatus::Empty {
            self.validator.validate(&mut report);
        }

        let report = report.finish();
        debug!(
            ?status,
            properties = report.parsed_data().properties.len(),
            issues = report.errors().len(),
            "checked comp document"
        );
        report
    }

    /// Load and check a single file
    pub async fn check_file(&self, path: &Path) -> CheckOutcome {
        info!("Checking comp file: {:?}", path);

        let result = load_comp_file(path).await.map(|text| self.check(&text));
        match &result {
            Ok(report) if !report.is_valid() => {
                warn!("File {:?} is invalid: {:?}", path, report.messages());
            }
            Err(err) => warn!("Failed to load {:?}: {}", path, err),
            _ => {}
        }

        CheckOutcome { path: path.to_path_buf(), result }
    }

    /// Check every matching file under `dir`, sorted by path
    pub async fn check_directory(&self, dir: &Path, scan: &ScanConfig) -> Result<Vec<CheckOutcome>> {
        let (root, walk) = (dir.to_path_buf(), scan.clone());
        let files = tokio::task::spawn_blocking(move || collect_comp_files(&root, &walk))
            .await
            .context("Directory scan task failed")?
            .with_context(|| format!("Failed to scan directory: {:?}", dir))?;
        debug!("Found {} .{} files in {:?}", files.len(), scan.extension, dir);

        let mut tasks = JoinSet::new();
        for path in files {
            let checker = *self;
            tasks.spawn(async move { checker.check_file(&path).await });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.context("Comp check task failed")?);
        }
        outcomes.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(outcomes)
    }
}

/// Read the text of a `.comp` file
pub async fn load_comp_file(path: &Path) -> std::result::Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::from_io(path.to_path_buf(), source))
}

/// Matching regular files under `dir`, one level deep unless the scan is recursive
fn collect_comp_files(dir: &Path, scan: &ScanConfig) -> walkdir::Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(dir).follow_links(false);
    if !scan.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && scan.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
