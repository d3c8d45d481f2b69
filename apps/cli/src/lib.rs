//! # Campo CLI Library
//!
//! The `campo` binary is a thin shell around [`run`]; everything else lives
//! here so it can be tested without spawning a process.
//!
//! ## Module Organization
//! ```text
//! campo_cli/
//! ├── lib.rs          ◄─── You are here (logging, run loop)
//! ├── cli.rs          ◄─── clap definitions and input parsing
//! ├── state/
//! │   ├── config.rs   ◄─── campo.toml + env, currency formatting
//! │   ├── db.rs       ◄─── Local ledger wrapper
//! │   └── view.rs     ◄─── Stale-result guard
//! ├── commands/       ◄─── One module per command group
//! ├── output.rs       ◄─── Text tables / JSON
//! └── error.rs        ◄─── ApiError for every command
//! ```
//!
//! ## Cancellation
//! The command runs on its own task and hands its result to a
//! [`ViewState`]. If the operator presses Ctrl-C first, the view is closed
//! and whatever the task produces afterwards is dropped.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

#[cfg(test)]
mod testing;

use std::future::Future;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{ApiError, ApiResult, ErrorCode};
use state::{ConfigState, ViewState};

/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_CANCELLED: u8 = 130;

/// Runs one CLI invocation and returns the process exit code.
///
/// ## Sequence
/// ```text
/// 1. Initialize logging (stderr)
/// 2. Load campo.toml + CAMPO_* overrides
/// 3. Open a view, spawn the command
/// 4. Wait for the command or Ctrl-C, whichever comes first
/// 5. Print the report (stdout) or the error (stderr)
/// ```
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing();

    let json = cli.json;
    let config = match ConfigState::load(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => return report_error(&err, json),
    };
    info!(
        command = cli.command.name(),
        backend = cli.command.uses_backend(),
        store = %config.store_name(),
        "Starting campo"
    );

    let view = ViewState::new();
    let outcome = guarded(&view, commands::execute(cli, config), tokio::signal::ctrl_c()).await;

    match outcome {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) if err.code == ErrorCode::Cancelled => {
            eprintln!("{}", err.message);
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => report_error(&err, json),
    }
}

/// Runs `task` under `view`, abandoning it when `cancel` completes first.
pub async fn guarded<F, C, O>(view: &ViewState<ApiResult<String>>, task: F, cancel: C) -> ApiResult<String>
where
    F: Future<Output = ApiResult<String>> + Send + 'static,
    C: Future<Output = O>,
{
    let ticket = view.open();
    let task_view = view.clone();
    let handle = tokio::spawn(async move {
        let result = task.await;
        task_view.apply(ticket, result);
    });

    tokio::select! {
        joined = handle => {
            if let Err(e) = joined {
                tracing::error!("Command task failed: {}", e);
                return Err(ApiError::internal("Command stopped unexpectedly"));
            }
            view.take()
                .unwrap_or_else(|| Err(ApiError::internal("Command produced no result")))
        }
        _ = cancel => {
            debug!("Cancellation requested, dismissing view");
            view.close();
            Err(ApiError::cancelled())
        }
    }
}

fn report_error(err: &ApiError, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(err) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("error: {}", err.message);
    }
    ExitCode::FAILURE
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=campo=trace` - Show trace for campo crates only
/// - Default: `info,campo=debug,sqlx=warn`
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,campo=debug,sqlx=warn"));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
