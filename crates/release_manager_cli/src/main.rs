mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "relman")]
#[command(version, about = "Release Manager contract CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and summarize an environments file
    Check {
        /// Path to the environments file (YAML, TOML or JSON)
        environments: String,
    },

    /// Validate a contract document against its invariants
    Validate {
        /// Path to a `{kind, data}` document (YAML, TOML or JSON)
        document: String,

        /// Enable strict validation mode (fail on warnings)
        #[arg(short, long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compare two configuration snapshots
    Diff {
        /// Configuration snapshot of the first environment
        config1: String,

        /// Configuration snapshot of the second environment
        config2: String,

        /// Component reference (e.g. "component:default/hybris")
        #[arg(short, long)]
        component: String,

        /// Name of the first environment
        #[arg(long)]
        env1: String,

        /// Name of the second environment
        #[arg(long)]
        env2: String,

        /// Keys expected to differ between environments (repeatable)
        #[arg(short, long = "expected")]
        expected: Vec<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Build the release matrix from a release log
    Matrix {
        /// Path to the environments file
        environments: String,

        /// Path to a list of releases (YAML or JSON)
        releases: String,

        /// Path to a list of drift events to overlay
        #[arg(short, long)]
        drift: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the catalog annotation keys
    Annotations,

    /// Print a configuration snapshot with secrets masked
    Mask {
        /// Path to the configuration snapshot
        configuration: String,

        /// Output format: json, yaml
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr so json output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Check { environments } => commands::check::execute(&environments),

        Commands::Validate {
            document,
            strict,
            format,
        } => commands::validate::execute(&document, strict, &format),

        Commands::Diff {
            config1,
            config2,
            component,
            env1,
            env2,
            expected,
            format,
        } => commands::diff::execute(
            &config1, &config2, &component, &env1, &env2, &expected, &format,
        ),

        Commands::Matrix {
            environments,
            releases,
            drift,
            format,
        } => commands::matrix::execute(&environments, &releases, drift.as_deref(), &format),

        Commands::Annotations => commands::annotations::execute(),

        Commands::Mask {
            configuration,
            format,
        } => commands::mask::execute(&configuration, &format),
    }
}
