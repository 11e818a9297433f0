//! List command - show which secrets a repository has.

use console::style;
use tracing::info;

use crate::cli::output;
use crate::config::Config;
use crate::core::github::{Destination, GithubClient};
use crate::error::Result;

/// List secret names stored for a repository. Values are never available
/// through the API, only names and timestamps.
pub async fn execute(api_url: &str, owner: &str, repo: &str, json: bool) -> Result<()> {
    let dest = Destination::new(owner, repo);
    info!(destination = %dest, "running list");

    let config = Config::resolve(api_url)?;
    let client = GithubClient::new(config.token, &config.api_url)?;

    let secrets = client.list_secrets(&dest).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&secrets)?);
        return Ok(());
    }

    if secrets.is_empty() {
        output::dimmed("no secrets stored");
        return Ok(());
    }

    output::section(&format!("Secrets in {}", dest));
    for secret in &secrets {
        println!(
            "  • {}  {}",
            secret.name,
            style(format!("updated {}", secret.updated_at)).dim()
        );
    }

    Ok(())
}
