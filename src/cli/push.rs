//! Push command - deliver a .env file to a repository as sealed secrets.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::config::Config;
use crate::core::batch::{self, EntryStatus, RunReport};
use crate::core::github::{Destination, GithubClient};
use crate::core::{source, validation};
use crate::error::{BatchError, Result};

/// Deliver every entry in the source file to the repository.
///
/// Exits cleanly only if every entry was delivered; any per-entry failure
/// is reported and turned into a non-zero exit so calling automation sees
/// it.
pub async fn execute(
    api_url: &str,
    owner: &str,
    repo: &str,
    path: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let dest = Destination::new(owner, repo);
    info!(destination = %dest, path = %path.display(), dry_run, "running push");

    if dry_run {
        return preview(&dest, path, json);
    }

    let config = Config::resolve(api_url)?;
    let client = GithubClient::new(config.token, &config.api_url)?;

    let report = batch::run(&client, &dest, path).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report_json(&dest, &report))?
        );
    } else {
        print_report(&dest, &report);
    }

    if report.has_failures() {
        return Err(BatchError::EntriesFailed {
            failed: report.failed(),
            total: report.total(),
        }
        .into());
    }

    Ok(())
}

fn print_report(dest: &Destination, report: &RunReport) {
    if report.outcomes.is_empty() {
        output::dimmed("no entries to deliver");
        return;
    }

    for outcome in &report.outcomes {
        match outcome.status {
            EntryStatus::Succeeded => output::success(&output::key(&outcome.name)),
            EntryStatus::Failed => output::error(&format!(
                "{}: {}",
                outcome.name,
                outcome.error.as_deref().unwrap_or("unknown error")
            )),
        }
    }

    if report.has_failures() {
        output::warn(&format!(
            "delivered {} of {} secrets to {}",
            report.succeeded(),
            report.total(),
            dest
        ));
    } else {
        output::success(&format!(
            "delivered {} secrets to {}",
            report.succeeded(),
            dest
        ));
    }
}

fn report_json(dest: &Destination, report: &RunReport) -> serde_json::Value {
    serde_json::json!({
        "destination": dest.to_string(),
        "succeeded": report.succeeded(),
        "failed": report.failed(),
        "outcomes": &report.outcomes,
    })
}

/// Parse and validate the source without any network traffic, then show
/// what a real run would deliver.
fn preview(dest: &Destination, path: &Path, json: bool) -> Result<()> {
    let entries = source::load(path)?;

    if json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| match validation::validate_name(&entry.name) {
                Ok(()) => serde_json::json!({
                    "name": entry.name,
                    "deliverable": true,
                }),
                Err(err) => serde_json::json!({
                    "name": entry.name,
                    "deliverable": false,
                    "error": err.to_string(),
                }),
            })
            .collect();

        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "destination": dest.to_string(),
                "dry_run": true,
                "entries": rows,
            }))?
        );
        return Ok(());
    }

    if entries.is_empty() {
        output::dimmed("no entries to deliver");
        return Ok(());
    }

    let mut deliverable = 0;
    for entry in &entries {
        match validation::validate_name(&entry.name) {
            Ok(()) => {
                output::list_item(&entry.name);
                deliverable += 1;
            }
            Err(err) => output::warn(&format!("{}: {}", entry.name, err)),
        }
    }

    output::warn(&format!(
        "would deliver {} of {} secrets to {} (dry run)",
        deliverable,
        entries.len(),
        dest
    ));

    Ok(())
}
