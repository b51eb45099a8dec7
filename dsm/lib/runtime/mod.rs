//! Collaborator interfaces: the container runtime and the host service controller.
//!
//! The managers in [`crate::management`] only depend on the traits defined here. The
//! provided implementations shell out to the `docker` CLI and to `systemctl`.

mod docker;
mod systemd;

use std::fmt::{self, Display};

use crate::{ContainerUsage, DsmResult, EngineInfo, UnitStatus};

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use docker::*;
pub use systemd::*;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A container exactly as the runtime describes it, before any display formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContainer {
    /// Full identifier.
    pub id: String,

    /// Name, possibly with the engine's leading `/`.
    pub name: String,

    /// Lifecycle state such as `running`, `exited` or `created`.
    pub state: String,

    /// Image reference from the container configuration.
    pub image: String,

    /// RFC 3339 creation timestamp.
    pub created: String,
}

/// An image exactly as the runtime describes it, before any display formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeImage {
    /// Full identifier, usually `sha256:<hex>`.
    pub id: String,

    /// `repository:tag` references. Empty for dangling images.
    pub repo_tags: Vec<String>,

    /// Size in bytes.
    pub size: u64,

    /// RFC 3339 creation timestamp.
    pub created: String,
}

/// Lifecycle verbs understood by the service controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitVerb {
    /// Start the unit now.
    Start,

    /// Stop the unit now.
    Stop,

    /// Stop and start the unit.
    Restart,

    /// Start the unit at boot.
    Enable,

    /// Do not start the unit at boot.
    Disable,
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// The container and image operations the console consumes.
///
/// Every method blocks until the runtime answers. Errors carry the runtime's own message.
pub trait ContainerRuntime {
    /// Lists containers, including stopped ones when `include_stopped` is set.
    fn list_containers(&self, include_stopped: bool) -> DsmResult<Vec<RuntimeContainer>>;

    /// Removes a container by id or name.
    fn remove_container(&self, id: &str, force: bool) -> DsmResult<()>;

    /// Removes all stopped containers and returns the runtime's summary line.
    fn prune_containers(&self) -> DsmResult<String>;

    /// Lists images.
    fn list_images(&self) -> DsmResult<Vec<RuntimeImage>>;

    /// Removes an image by id or `name:tag`.
    fn remove_image(&self, id: &str, force: bool) -> DsmResult<()>;

    /// Removes all dangling images and returns the runtime's summary line.
    fn prune_images(&self) -> DsmResult<String>;

    /// Returns the last `tail_lines` lines of a container's output.
    fn container_logs(&self, id: &str, tail_lines: usize) -> DsmResult<String>;

    /// Samples resource usage of running containers once.
    fn container_stats(&self) -> DsmResult<Vec<ContainerUsage>>;

    /// Returns client and server version information.
    fn engine_info(&self) -> DsmResult<EngineInfo>;
}

/// The host service controller, used for both the service and the socket unit.
pub trait ServiceController {
    /// Returns the state of `unit`.
    fn status(&self, unit: &str) -> DsmResult<UnitStatus>;

    /// Applies `verb` to `unit`.
    fn control(&self, unit: &str, verb: UnitVerb) -> DsmResult<()>;
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl UnitVerb {
    /// The `systemctl` subcommand for this verb.
    pub fn as_command(&self) -> &'static str {
        match self {
            UnitVerb::Start => "start",
            UnitVerb::Stop => "stop",
            UnitVerb::Restart => "restart",
            UnitVerb::Enable => "enable",
            UnitVerb::Disable => "disable",
        }
    }

    /// Past participle used in result messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            UnitVerb::Start => "started",
            UnitVerb::Stop => "stopped",
            UnitVerb::Restart => "restarted",
            UnitVerb::Enable => "enabled",
            UnitVerb::Disable => "disabled",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for UnitVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_command())
    }
}
