//! # Queue Migrator CLI
//!
//! Command-line interface for moving messages between SQS queues.
//!
//! By default the tool only reports which messages it would move. Pass
//! `--execute` together with `--dest` to send them to the destination and
//! delete them from the source.
//!
//! Credentials and region come from the standard AWS environment variables.
//! `--endpoint-url` (or `AWS_ENDPOINT_URL`) points the tool at an
//! SQS-compatible service such as LocalStack.

use chrono::Duration;
use clap::Parser;
use queue_migrator_core::{MigrateError, MigrationConfig, Migrator, RunContext};
use queue_migrator_runtime::{AwsSqsConfig, AwsSqsProvider};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

// ============================================================================
// CLI Structure
// ============================================================================

/// Queue Migrator - move messages between SQS queues
#[derive(Parser, Debug)]
#[command(name = "queue-migrator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Move messages between SQS queues, filtered by age and content")]
#[command(
    long_about = "Receives messages from a source queue in batches of up to ten, forwards the ones younger than --max-age whose body contains --filter to the destination queue, and deletes them from the source once the destination has accepted them. Runs as a dry run unless --execute is given."
)]
pub struct Cli {
    /// Queue to take messages from
    #[arg(long)]
    pub source: Option<String>,

    /// Queue to move messages to (required with --execute)
    #[arg(long)]
    pub dest: Option<String>,

    /// Send and delete messages; without this flag nothing is changed
    #[arg(long)]
    pub execute: bool,

    /// Skip messages at least this old (e.g. 12h, 90m, 1h30m, 45s)
    #[arg(long, default_value = "12h")]
    pub max_age: String,

    /// Maximum number of messages to attempt
    #[arg(long, default_value_t = MigrationConfig::DEFAULT_LIMIT)]
    pub limit: u32,

    /// Only move messages whose body contains this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Log the body of every eligible message
    #[arg(long)]
    pub verbose: bool,

    /// Seconds received messages stay hidden on the source
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=43_200))]
    pub visibility_timeout: u32,

    /// Seconds to long-poll on each receive (0 performs a short poll)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=20))]
    pub wait_time: u32,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Endpoint of an SQS-compatible service
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// AWS access key id
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// AWS session token for temporary credentials
    #[arg(long, env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Logging level, overridden by RUST_LOG
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Build the migration settings from the parsed flags
    pub fn migration_config(&self) -> Result<MigrationConfig, CliError> {
        let max_age = parse_duration(&self.max_age).map_err(|message| {
            CliError::InvalidArgument {
                argument: "--max-age".to_string(),
                message,
            }
        })?;

        let mut config = MigrationConfig::new(self.source.clone().unwrap_or_default())
            .with_execute(self.execute)
            .with_max_age(max_age)
            .with_limit(self.limit)
            .with_filter(self.filter.clone())
            .with_verbose(self.verbose)
            .with_visibility_timeout(Duration::seconds(i64::from(self.visibility_timeout)))
            .with_wait_time(Duration::seconds(i64::from(self.wait_time)));
        config.dest = self.dest.clone();

        Ok(config)
    }

    /// Build the SQS client settings from flags and environment
    pub fn aws_config(&self) -> Result<AwsSqsConfig, CliError> {
        let config = AwsSqsConfig {
            region: self.region.clone(),
            access_key_id: non_empty(&self.access_key_id),
            secret_access_key: non_empty(&self.secret_access_key),
            session_token: non_empty(&self.session_token),
            endpoint_url: non_empty(&self.endpoint_url),
        };

        if !config.has_credentials() {
            return Err(CliError::Configuration(
                "AWS credentials not found: set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"
                    .to_string(),
            ));
        }

        Ok(config)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

// ============================================================================
// Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {argument} - {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Migration failed: {0}")]
    Migration(#[from] MigrateError),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Configuration and argument problems exit with 1, failed queue calls
    /// with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::InvalidArgument { .. } => 1,
            Self::Migration(e) if e.is_configuration() => 1,
            Self::Migration(_) => 2,
        }
    }
}

// ============================================================================
// Duration Parsing
// ============================================================================

/// Parse a duration written as a sequence of number and unit pairs.
///
/// Accepts `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`, with optional
/// fractions: `12h`, `90m`, `1h30m`, `1.5h`, `500ms`. A bare `0` is zero.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("duration cannot be empty".to_string());
    }
    if text == "0" {
        return Ok(Duration::zero());
    }

    let mut total_nanos = 0f64;
    let mut rest = text;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration '{}': expected a number", input));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| format!("invalid duration '{}'", input))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3_600e9,
            "" => return Err(format!("missing unit in duration '{}'", input)),
            unit => return Err(format!("unknown unit '{}' in duration '{}'", unit, input)),
        };
        rest = &rest[unit_len..];

        total_nanos += value * nanos_per_unit;
    }

    if total_nanos > i64::MAX as f64 {
        return Err(format!("duration '{}' is too large", input));
    }
    Ok(Duration::nanoseconds(total_nanos.round() as i64))
}

// ============================================================================
// Command Execution
// ============================================================================

/// Main CLI entry point
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    run(cli).await
}

/// Validate the flags, connect to SQS and run one migration
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.migration_config()?;
    config
        .validate()
        .map_err(|e| CliError::Migration(e.into()))?;

    let provider = AwsSqsProvider::new(cli.aws_config()?)
        .map_err(|e| CliError::Configuration(e.to_string()))?;

    let context = RunContext::new();
    info!(
        run_id = %context.run_id(),
        region = %cli.region,
        endpoint = ?cli.endpoint_url,
        "Starting queue migration"
    );

    let summary = Migrator::new(&provider).run(&config, &context).await?;

    if !config.execute && summary.processed > 0 {
        info!("Dry run complete. Re-run with --execute and --dest to move these messages");
    }

    Ok(())
}

/// Install the tracing subscriber writing to stdout
fn initialize_logging(cli: &Cli) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level));
    let (filter, invalid_level) = match filter {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("info"), true),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    result.map_err(|e| CliError::Configuration(format!("Failed to initialize logging: {}", e)))?;

    if invalid_level {
        warn!(log_level = %cli.log_level, "Invalid log level, using 'info'");
    }

    Ok(())
}
