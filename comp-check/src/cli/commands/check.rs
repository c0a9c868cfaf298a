//! Check command: validate .comp files and report the results

use anyhow::Result;
use comp_check_core::{CheckOutcome, CheckResponse, CompChecker, Config, OutputFormat, ScanConfig};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::app::CheckArgs;

/// Every file is valid
pub const EXIT_VALID: u8 = 0;
/// At least one file has validation errors
pub const EXIT_INVALID: u8 = 1;
/// At least one file could not be loaded
pub const EXIT_LOAD_FAILURE: u8 = 2;

/// Execute the check command, returning the process exit code
pub async fn execute(args: CheckArgs, config: &Config) -> Result<u8> {
    let format = match &args.format {
        Some(format) => format.parse::<OutputFormat>()?,
        None => config.output.format,
    };
    let pretty = args.pretty || config.output.pretty;
    let scan = ScanConfig { recursive: args.recursive || config.scan.recursive, ..config.scan.clone() };

    let outcomes = collect_outcomes(&args.paths, &scan).await?;
    info!("Checked {} file(s)", outcomes.len());

    let rendered = match format {
        OutputFormat::Text => render_text(&outcomes),
        OutputFormat::Json => render_json(&outcomes, pretty)?,
    };
    println!("{}", rendered);

    let code = exit_code(&outcomes);
    debug!("Check finished with exit code {}", code);
    Ok(code)
}

/// Check each path, expanding directories; anything else is loaded as a file
pub async fn collect_outcomes(paths: &[PathBuf], scan: &ScanConfig) -> Result<Vec<CheckOutcome>> {
    let checker = CompChecker::new();
    let mut outcomes = Vec::new();
    for path in paths {
        let is_dir = tokio::fs::metadata(path).await.is_ok_and(|meta| meta.is_dir());
        if is_dir {
            outcomes.extend(checker.check_directory(path, scan).await?);
        } else {
            outcomes.push(checker.check_file(path).await);
        }
    }
    Ok(outcomes)
}

/// Exit code summarising a batch of outcomes
pub fn exit_code(outcomes: &[CheckOutcome]) -> u8 {
    if outcomes.iter().any(CheckOutcome::is_load_failure) {
        EXIT_LOAD_FAILURE
    } else if outcomes.iter().all(CheckOutcome::is_valid) {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

/// Human-readable report
pub fn render_text(outcomes: &[CheckOutcome]) -> String {
    let mut out = String::new();
    let (mut valid, mut invalid, mut failed) = (0, 0, 0);

    for outcome in outcomes {
        let path = outcome.path.display();
        match &outcome.result {
            Ok(report) if report.is_valid() => {
                valid += 1;
                let doc = report.parsed_data();
                let _ = writeln!(
                    out,
                    "{}: OK ({} '{}')",
                    path,
                    doc.properties.get("type").unwrap_or_default(),
                    doc.name.as_deref().unwrap_or_default()
                );
            }
            Ok(report) => {
                invalid += 1;
                let _ = writeln!(out, "{}: INVALID ({} error(s))", path, report.errors().len());
                for (idx, issue) in report.errors().iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", idx + 1, issue);
                }
            }
            Err(err) => {
                failed += 1;
                let _ = writeln!(out, "{}: ERROR {}", path, err);
            }
        }
    }

    let _ = write!(
        out,
        "\nChecked {} file(s): {} valid, {} invalid, {} failed to load",
        outcomes.len(),
        valid,
        invalid,
        failed
    );
    out
}

#[derive(Serialize)]
struct FileResponse<'a> {
    path: &'a Path,
    status: u16,
    body: CheckResponse,
}

/// JSON report: the bare envelope for one file, an array for several
pub fn render_json(outcomes: &[CheckOutcome], pretty: bool) -> Result<String> {
    let value = match outcomes {
        [single] => serde_json::to_value(single.response())?,
        _ => {
            let files: Vec<_> = outcomes
                .iter()
                .map(|outcome| FileResponse {
                    path: &outcome.path,
                    status: outcome.status().code(),
                    body: outcome.response(),
                })
                .collect();
            serde_json::to_value(files)?
        }
    };

    let rendered =
        if pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    Ok(rendered)
}
