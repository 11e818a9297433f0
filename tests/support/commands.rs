//! Command helper methods for Test.

use std::process::Output;

use assert_cmd::Command;

use super::fixtures::TEST_TOKEN;
use super::Test;

impl Test {
    /// Create a pigeon command with a scrubbed environment.
    ///
    /// Returns a Command configured with:
    /// - Token and API URL variables removed, so whatever the host shell
    ///   exports cannot leak into a test
    /// - Current directory set to the test directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("pigeon").expect("failed to find pigeon binary");
        cmd.env_remove("GITHUB_FINE_GRAINED_PAT");
        cmd.env_remove("GITHUB_PAT");
        cmd.env_remove("GITHUB_API_URL");
        cmd.env_remove("PIGEON_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// A command carrying the test token and pointed at a store URL.
    pub fn cmd_authed(&self, api_url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("GITHUB_PAT", TEST_TOKEN);
        cmd.args(["--api-url", api_url]);
        cmd
    }

    /// Shortcut for `pigeon push --dry-run` (needs no token, no store).
    pub fn push_dry_run(&self, owner: &str, repo: &str, path: &str) -> Output {
        self.cmd()
            .args(["push", owner, repo, path, "--dry-run"])
            .output()
            .expect("failed to run pigeon push --dry-run")
    }

    /// Shortcut for `pigeon push --dry-run --json`.
    pub fn push_dry_run_json(&self, owner: &str, repo: &str, path: &str) -> Output {
        self.cmd()
            .args(["push", owner, repo, path, "--dry-run", "--json"])
            .output()
            .expect("failed to run pigeon push --dry-run --json")
    }

    /// Shortcut for `pigeon completions` for a shell.
    pub fn completions(&self, shell: &str) -> Output {
        self.cmd()
            .args(["completions", shell])
            .output()
            .expect("failed to run pigeon completions")
    }
}

/// Run a configured command on the blocking pool, so an in-process fake
/// store keeps serving while the binary blocks on its round trips.
pub async fn run_async(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("failed to run pigeon"))
        .await
        .expect("command task panicked")
}
