//! Rm command - delete a repository secret.

use tracing::info;

use crate::cli::output;
use crate::config::Config;
use crate::core::github::{Destination, GithubClient};
use crate::error::Result;

/// Delete a secret after confirmation.
pub async fn execute(api_url: &str, owner: &str, repo: &str, name: &str, yes: bool) -> Result<()> {
    let dest = Destination::new(owner, repo);
    info!(destination = %dest, name, "running rm");

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete {} from {}?", output::key(name), dest))
            .default(false)
            .interact()?;

        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    let config = Config::resolve(api_url)?;
    let client = GithubClient::new(config.token, &config.api_url)?;

    client.delete_secret(&dest, name).await?;

    output::success(&format!("deleted {} from {}", output::key(name), dest));
    Ok(())
}
