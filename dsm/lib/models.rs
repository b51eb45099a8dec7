//! Display models shared by the managers, the health report and the console.

use std::fmt::{self, Display};

use getset::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Whether a manager talks to the live collaborators or returns fixtures.
///
/// Fixed when the manager is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerMode {
    /// Calls go to the container runtime and the service controller.
    Live,

    /// Calls return deterministic fixtures and have no side effects.
    Simulated,
}

/// A row of a listing, exposed as display cells in a fixed column order.
pub trait ResourceRecord {
    /// Column headers, in display order.
    const HEADERS: &'static [&'static str];

    /// The record's cells, in the order of [`Self::HEADERS`].
    fn cells(&self) -> Vec<&str>;
}

/// A container as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct ContainerRecord {
    /// Short identifier.
    #[builder(setter(into))]
    id: String,

    /// Container name without the leading slash.
    #[builder(setter(into))]
    name: String,

    /// Lifecycle status such as `running` or `exited`.
    #[builder(setter(into))]
    status: String,

    /// Image reference the container was created from.
    #[builder(setter(into))]
    image: String,

    /// Creation time.
    #[builder(setter(into))]
    created: String,
}

/// An image as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct ImageRecord {
    /// Short identifier.
    #[builder(setter(into))]
    id: String,

    /// Repository, or `<none>` for untagged images.
    #[builder(setter(into))]
    repository: String,

    /// Tag, or `<none>` for untagged images.
    #[builder(setter(into))]
    tag: String,

    /// Size in decimal megabytes with one fractional digit.
    #[builder(setter(into))]
    size: String,

    /// Creation time.
    #[builder(setter(into))]
    created: String,
}

/// The state of a systemd unit.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct UnitStatus {
    /// Unit name such as `docker.service`.
    #[builder(setter(into))]
    unit: String,

    /// `loaded`, `not-found`, ...
    #[builder(setter(into))]
    load_state: String,

    /// `active`, `inactive`, `failed`, ...
    #[builder(setter(into))]
    active_state: String,

    /// `running`, `listening`, `dead`, ...
    #[builder(setter(into))]
    sub_state: String,

    /// `enabled`, `disabled`, `static`, ...
    #[builder(setter(into))]
    unit_file_state: String,
}

/// Point-in-time resource usage of one container.
#[derive(Debug, Clone, PartialEq, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct ContainerUsage {
    /// Container name.
    #[builder(setter(into))]
    name: String,

    /// CPU usage in percent of one core.
    cpu_percent: f64,

    /// Memory usage in percent of the container limit.
    memory_percent: f64,

    /// Memory usage as reported by the engine, e.g. `64.0MiB / 1.9GiB`.
    #[builder(setter(into))]
    memory_usage: String,
}

/// Version information reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct EngineInfo {
    /// Client version.
    #[builder(setter(into))]
    client_version: String,

    /// Server version.
    #[builder(setter(into))]
    server_version: String,

    /// Server API version.
    #[builder(setter(into))]
    api_version: String,

    /// Server operating system.
    #[builder(setter(into))]
    os: String,

    /// Server architecture.
    #[builder(setter(into))]
    arch: String,
}

/// Whether the current user can control the engine.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct PrivilegeStatus {
    /// Login name of the effective user.
    #[builder(setter(into))]
    user: String,

    /// Effective uid is 0.
    is_root: bool,

    /// The user belongs to the `docker` group.
    in_docker_group: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl UnitStatus {
    /// Returns whether the unit is active.
    pub fn is_active(&self) -> bool {
        self.active_state == "active"
    }
}

impl PrivilegeStatus {
    /// Returns whether the user can manage the engine without `sudo`.
    pub fn granted(&self) -> bool {
        self.is_root || self.in_docker_group
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for ManagerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerMode::Live => write!(f, "live"),
            ManagerMode::Simulated => write!(f, "demo"),
        }
    }
}

impl ResourceRecord for ContainerRecord {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Status", "Image", "Created"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.name.as_str(),
            self.status.as_str(),
            self.image.as_str(),
            self.created.as_str(),
        ]
    }
}

impl ResourceRecord for ImageRecord {
    const HEADERS: &'static [&'static str] = &["ID", "Repository", "Tag", "Size", "Created"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.repository.as_str(),
            self.tag.as_str(),
            self.size.as_str(),
            self.created.as_str(),
        ]
    }
}

impl Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}), {}, {}",
            self.unit, self.active_state, self.sub_state, self.unit_file_state, self.load_state
        )
    }
}

impl Display for EngineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "server {} (api {}, {}/{}), client {}",
            self.server_version, self.api_version, self.os, self.arch, self.client_version
        )
    }
}
