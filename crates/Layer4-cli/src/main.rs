//! ScopedEmitter CLI - Main entry point

use clap::{Parser, Subcommand};
use emitter_cli::{Scenario, ScenarioRunner};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 입력(시나리오/설정) 문제로 실패한 경우의 종료 코드
const EXIT_INVALID_INPUT: u8 = 2;

const EXIT_FAILURE: u8 = 1;

/// ScopedEmitter - replay scope-aware event scenarios
#[derive(Parser, Debug)]
#[command(name = "emitter")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run a scenario file and print every delivered event
    Replay {
        /// Scenario file (TOML)
        path: PathBuf,

        /// Print deliveries as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Parse and validate a scenario file without running it
    Check {
        /// Scenario file (TOML)
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Replay { path, json } => {
            let scenario = Scenario::load(&path)?;
            let deliveries = ScenarioRunner::run(&scenario).await?;

            for delivery in &deliveries {
                if json {
                    println!("{}", serde_json::to_string(delivery)?);
                } else {
                    println!("{}", delivery);
                }
            }
        }
        Command::Check { path } => {
            let scenario = Scenario::load(&path)?;
            println!(
                "{}: {} steps, starting at {}",
                path.display(),
                scenario.steps.len(),
                scenario.initial_location
            );
        }
    }

    Ok(())
}

/// 사용자 입력 에러는 2, 그 외는 1
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<emitter_foundation::Error>() {
        Some(err) if err.is_user_facing() => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}
