#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics from bad configuration.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use libraryfrontend::Frontend;
use libraryfrontend::setup::{Outcome, SetEnvVars, publish_env_template, wizard::default_paths};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Front-end companion tool for the LaSalle Software admin backend.
#[derive(Debug, Parser)]
#[command(name = "libraryfrontend", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one signed JWT for the admin backend.
    IssueToken,
    /// Set the LaSalle Software specific environment variables in the .env file.
    Setenvvars {
        /// Directory holding `.env` and `.env.example`.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// `.env` file to edit; defaults to `.env` inside `--dir`.
        #[arg(long)]
        env_file: Option<PathBuf>,
        /// Template copied when the `.env` file is missing; defaults to
        /// `.env.example` inside `--dir`.
        #[arg(long)]
        example_file: Option<PathBuf>,
        /// Installed LaSalle app; only `basicfrontendapp` is set up.
        #[arg(long, env = "LASALLE_APP_NAME")]
        app_name: Option<String>,
        /// Environment name shown in the intro.
        #[arg(long, env = "APP_ENV", default_value = "production")]
        environment: String,
    },
    /// Write the `.env.example` template.
    PublishEnv {
        /// Directory to write `.env.example` into.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing `.env.example`.
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libraryfrontend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load .env if present so clap's env fallbacks and from_env see it.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {e}");
    }

    let cli = Cli::parse();
    match cli.command {
        Command::IssueToken => issue_token(),
        Command::Setenvvars {
            dir,
            env_file,
            example_file,
            app_name,
            environment,
        } => {
            let (default_env, default_example) = default_paths(&dir);
            setenvvars(
                env_file.unwrap_or(default_env),
                example_file.unwrap_or(default_example),
                app_name,
                environment,
            );
        }
        Command::PublishEnv { dir, force } => {
            if let Err(e) = publish_env_template(&dir, force) {
                tracing::error!("Failed to publish env template: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn issue_token() {
    let frontend = match Frontend::bootstrap() {
        Ok(frontend) => frontend,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let token = frontend
        .token_factory()
        .and_then(|factory| factory.issue_token())
        .unwrap_or_else(|e| {
            tracing::error!("Failed to issue token: {e}");
            std::process::exit(1);
        });

    println!("{token}");
}

fn setenvvars(
    env_path: PathBuf,
    example_path: PathBuf,
    app_name: Option<String>,
    environment: String,
) {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut command = SetEnvVars::new(
        stdin.lock(),
        stdout.lock(),
        env_path,
        example_path,
        app_name,
        environment,
    );

    match command.run() {
        Ok(Outcome::Completed(summary)) => {
            tracing::info!("environment set up for {}", summary.app_domain_name);
        }
        Ok(Outcome::Aborted | Outcome::WrongApp) => {}
        Err(e) => {
            tracing::error!("setenvvars failed: {e}");
            std::process::exit(1);
        }
    }
}
