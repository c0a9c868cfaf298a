//! Parse command: print the parsed document of a .comp file

use anyhow::Result;
use comp_check_core::{CheckReport, CompChecker};
use tracing::info;

use crate::cli::app::ParseArgs;

/// Execute the parse command
pub async fn execute(args: ParseArgs) -> Result<()> {
    let outcome = CompChecker::new().check_file(&args.path).await;
    let report = outcome.result?;

    println!("{}", render(&report)?);
    eprintln!("{} error(s) in {}", report.errors().len(), args.path.display());
    for issue in report.errors() {
        eprintln!("  - {}", issue);
    }

    info!("Parsed {} properties from {:?}", report.parsed_data().properties.len(), args.path);
    Ok(())
}

/// Pretty JSON of the parsed document, valid or not
pub fn render(report: &CheckReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report.parsed_data())?)
}
