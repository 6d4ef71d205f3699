mod response;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use code_grader_core::domain::Submission;
use code_grader_evaluator::{CancellationToken, Evaluator, EvaluatorConfig, EventStream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Grade one submission against its template and print the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "grade", version)]
struct Cli {
    /// Evaluator configuration (TOML). Defaults apply when the file is absent.
    #[arg(long, default_value = "grader.toml")]
    config: PathBuf,

    /// Reference solution the submission is compared against.
    #[arg(long)]
    template: PathBuf,

    /// Student code to grade.
    #[arg(long)]
    submission: PathBuf,

    /// Algorithm the submission is supposed to implement.
    #[arg(long)]
    algorithm: String,

    /// Task value; when set, the points to award are included in the output.
    #[arg(long)]
    points: Option<u32>,

    /// Use the offline fakes instead of the remote services.
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    config.mock |= cli.mock;
    if !config.mock && !config.similarity.has_usable_token() {
        warn!(
            token_env = %config.similarity.token_env,
            "similarity token is missing or looks like a placeholder; originality will likely not be assessed"
        );
    }

    let submission = Submission::new(
        read_source(&cli.template)?,
        read_source(&cli.submission)?,
        cli.algorithm.clone(),
    );

    let evaluator = Evaluator::from_config(&config).context("failed to initialize evaluator")?;
    tokio::spawn(log_events(evaluator.subscribe_events()));

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, abandoning remote calls");
            interrupt.cancel();
        }
    });

    let evaluation = evaluator
        .evaluate_with_cancellation(&submission, &cancel)
        .await;

    let response = response::to_response(&evaluation, cli.points);
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("failed to render evaluation")?
    );
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<EvaluatorConfig> {
    if cli.config.exists() {
        info!(path = %cli.config.display(), "loading evaluator config");
        EvaluatorConfig::from_file(&cli.config)
    } else {
        info!(path = %cli.config.display(), "config file not found, using defaults");
        Ok(EvaluatorConfig::default())
    }
}

/// Logs evaluation events until the evaluator is dropped; returns how many were logged.
async fn log_events(mut events: EventStream) -> usize {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(event) => {
                debug!(?event, "evaluation event");
                logged += 1;
            }
            Err(err) => match err.downcast_ref::<RecvError>() {
                Some(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "evaluation event logger lagged behind");
                }
                Some(RecvError::Closed) => break,
                None => {
                    warn!(error = %err, "failed to receive evaluation event");
                    break;
                }
            },
        }
    }
    logged
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file: {}", path.display()))
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
