// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, build the bot client and hand both
//   to the upload pipeline.
// - Every failure exits with status 1. A missing flag prints the error
//   and the usage to stdout, everything else goes to stderr.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use indicatif::ProgressDrawTarget;
use tracing_subscriber::EnvFilter;

use tg_sendfile::{upload, Args, BotClient, Error, Mode};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<Error>() {
            Some(e) if e.wants_usage() => {
                println!("Error: {e}");
                println!("{}", Args::command().render_help());
                ExitCode::from(e.exit_code())
            }
            Some(e) => {
                eprintln!("Error: {err:#}");
                ExitCode::from(e.exit_code())
            }
            None => {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    init_tracing()?;

    let mode = if args.no_progress {
        Mode::Plain
    } else {
        Mode::Progress(ProgressDrawTarget::stdout())
    };

    let request = args.validate()?;

    upload::run(&request, mode, BotClient::from_env, io::stdout())?;
    Ok(())
}

/// Log to stderr so the status lines on stdout stay clean. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")
}
