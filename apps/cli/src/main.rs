//! `campo` - back-office CLI for AGRO INSUMOS EL CAMPO.

use clap::Parser;
use std::process::ExitCode;

use campo_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    campo_cli::run(Cli::parse()).await
}
