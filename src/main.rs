//! Pigeon - deliver .env secrets to GitHub Actions, sealed end-to-end.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pigeon::cli::output;
use pigeon::cli::{execute, Cli};
use pigeon::error::{ApiError, BatchError, ConfigError, Error};

/// `PIGEON_LOG` wins over `--verbose`. Log lines go to stderr so `--json`
/// output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PIGEON_LOG").unwrap_or_else(|_| {
        let directive = if verbose { "pigeon=debug" } else { "pigeon=warn" };
        EnvFilter::new(directive)
    });

    let format = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(format).init();
}

/// A next step worth printing under the error, when there is an obvious one.
fn suggestion(error: &Error) -> Option<&'static str> {
    match error {
        Error::Config(ConfigError::MissingToken) => {
            Some("export GITHUB_PAT=<token> (or GITHUB_FINE_GRAINED_PAT)")
        }
        Error::Api(ApiError::Unauthorized)
        | Error::Batch(BatchError::KeyFetch {
            source: ApiError::Unauthorized,
            ..
        }) => Some("the token needs the repository's secrets read/write permission"),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = execute(cli.command, &cli.api_url).await {
        output::error(&error.to_string());
        if let Some(hint) = suggestion(&error) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
