use std::path::PathBuf;

use clap::Parser;

use crate::ManagerMode;

use super::styles;

//-------------------------------------------------------------------------------------------------
// Types
//-------------------------------------------------------------------------------------------------

/// dsm - An interactive console for the Docker service, socket, containers and images
#[derive(Debug, Parser)]
#[command(name = "dsm", author, about, version, styles = styles::styles())]
pub struct DsmArgs {
    /// Use built-in fixture data instead of talking to Docker and systemd
    #[arg(short, long)]
    pub demo: bool,

    /// Run the interactive menu (the default and only mode)
    #[arg(short, long)]
    pub interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a config file, instead of $DSM_HOME/config.toml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

//-------------------------------------------------------------------------------------------------
// Methods
//-------------------------------------------------------------------------------------------------

impl DsmArgs {
    /// The manager mode selected by `--demo`.
    pub fn mode(&self) -> ManagerMode {
        if self.demo {
            ManagerMode::Simulated
        } else {
            ManagerMode::Live
        }
    }

    /// The default tracing directive for these flags. `RUST_LOG` still takes precedence.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "dsm=debug,dsmutils=debug"
        } else {
            "warn"
        }
    }
}

//-------------------------------------------------------------------------------------------------
// Tests
//-------------------------------------------------------------------------------------------------
