use anyhow::Result;
use flinsurance::{
    config::Config,
    pipeline::{self, RunOutcome},
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) load, aggregate, write ───────────────────────────────────
    let result = pipeline::run(&Config::default());
    match &result {
        Ok(outcome) => {
            info!(
                records = outcome.records,
                written = outcome.report.written.len(),
                failed = outcome.report.failed.len(),
                "all done"
            );
        }
        Err(e) => {
            // the context already reads "Can't read <archive>"
            eprintln!("{:#}", e);
            error!("aborting: {:#}", e);
        }
    }
    exit_code(&result)
}

/// Only a failed read is fatal; write failures were already reported per file.
fn exit_code(result: &Result<RunOutcome>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
