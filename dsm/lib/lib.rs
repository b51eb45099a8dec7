//! `dsm` is an interactive console for inspecting and controlling a Docker installation.
//!
//! # Overview
//!
//! The console manages four kinds of resources:
//! - the Docker systemd service and its activation socket
//! - containers
//! - images
//!
//! and composes their state into a health report.
//!
//! Every manager is constructed in a fixed [`ManagerMode`]. In [`ManagerMode::Live`] it talks
//! to the external collaborators in [`runtime`] (the `docker` CLI and `systemctl`); in
//! [`ManagerMode::Simulated`] it returns deterministic fixture data and never touches them.
//! Both paths produce the same shapes: an [`OperationResult`] for verbs that change or
//! inspect state, and a list of records for listing verbs.
//!
//! # Architecture
//!
//! - [`management`]: the resource managers and their demo fixtures
//! - [`health`]: the failure-tolerant health report aggregator
//! - [`console`]: the menu state machine and the render/read/dispatch driver
//! - [`runtime`]: collaborator traits and their CLI-backed implementations
//! - [`config`]: configuration file and defaults
//! - [`cli`]: command line arguments and terminal styles
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use dsm::{config::DsmConfig, console::Console, ManagerMode};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = DsmConfig::default();
//!     let stdin = std::io::stdin().lock();
//!     let stdout = std::io::stdout();
//!     let mut console = Console::from_config(&config, ManagerMode::Simulated, stdin, stdout);
//!     console.run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod models;
mod operation;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod cli;
pub mod config;
pub mod console;
pub mod health;
pub mod management;
pub mod runtime;

pub use error::*;
pub use models::*;
pub use operation::*;
