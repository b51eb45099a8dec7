use std::{
    io,
    process::{self, ExitCode},
};

use clap::Parser;
use dsm::{
    cli::{AnsiStyles, DsmArgs},
    config::DsmConfig,
    console::Console,
    DsmResult,
};
use tracing_subscriber::{fmt, EnvFilter};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const CANCELLED: &str = "Operation cancelled by user";

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

fn main() -> ExitCode {
    let args = DsmArgs::parse();

    // Logs go to stderr so they never interleave with the menus on stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_env_filter(filter)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:?}");
            eprintln!("{}", format!("Unexpected error: {e}").error());
            ExitCode::FAILURE
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions: *
//--------------------------------------------------------------------------------------------------

fn run(args: DsmArgs) -> DsmResult<()> {
    let config = DsmConfig::load(args.config.as_deref())?;
    let mode = args.mode();
    tracing::trace!("starting console: mode={mode}, config={config:?}");

    dsmutils::watch_interrupts(|signal| {
        tracing::debug!("interrupted by signal {signal}");
        println!("\n{}", CANCELLED.invalid());
        process::exit(1);
    })?;

    let stdin = io::stdin().lock();
    let mut console = Console::from_config(&config, mode, stdin, io::stdout());
    console.run()
}
