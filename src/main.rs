use std::process::ExitCode;

use clap::Parser;
use ijhttp_tools::cli::{execute, Cli};
use ijhttp_tools::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
