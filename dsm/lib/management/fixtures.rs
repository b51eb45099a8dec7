//! Fixture data returned by managers in [`ManagerMode::Simulated`](crate::ManagerMode).
//!
//! The values are fixed so that demo sessions and tests are reproducible.

use crate::{
    ContainerRecord, ContainerUsage, EngineInfo, ImageRecord, PrivilegeStatus, UnitStatus,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Appended to every simulated result message.
pub const DEMO_SUFFIX: &str = "(demo)";

/// User reported by the simulated privilege check.
pub const DEMO_USER: &str = "demo";

/// Engine version reported by the simulated engine.
pub const DEMO_ENGINE_VERSION: &str = "24.0.0";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// The two demo containers, in listing order.
pub fn containers() -> Vec<ContainerRecord> {
    vec![
        ContainerRecord::builder()
            .id("abc123")
            .name("web-server")
            .status("running")
            .image("nginx:latest")
            .created("2 hours ago")
            .build(),
        ContainerRecord::builder()
            .id("def456")
            .name("db-server")
            .status("stopped")
            .image("postgres:13")
            .created("1 day ago")
            .build(),
    ]
}

/// The two demo images, in listing order.
pub fn images() -> Vec<ImageRecord> {
    vec![
        ImageRecord::builder()
            .id("abc123")
            .repository("nginx")
            .tag("latest")
            .size("133.0MB")
            .created("2 days ago")
            .build(),
        ImageRecord::builder()
            .id("def456")
            .repository("postgres")
            .tag("13")
            .size("376.0MB")
            .created("1 week ago")
            .build(),
    ]
}

/// A healthy, enabled unit named `unit`.
pub fn unit_status(unit: &str) -> UnitStatus {
    UnitStatus::builder()
        .unit(unit)
        .load_state("loaded")
        .active_state("active")
        .sub_state("running")
        .unit_file_state("enabled")
        .build()
}

/// A few log lines mentioning the requested container.
pub fn logs(container: &str) -> String {
    [
        format!("[demo] {container}: starting"),
        format!("[demo] {container}: listening"),
        format!("[demo] {container}: ready"),
    ]
    .join("\n")
}

/// Resource usage of the demo containers.
pub fn usage() -> Vec<ContainerUsage> {
    vec![
        ContainerUsage::builder()
            .name("web-server")
            .cpu_percent(12.5)
            .memory_percent(3.2)
            .memory_usage("64.0MiB / 1.9GiB")
            .build(),
        ContainerUsage::builder()
            .name("db-server")
            .cpu_percent(0.0)
            .memory_percent(0.0)
            .memory_usage("0B / 0B")
            .build(),
    ]
}

/// Engine information of the demo engine.
pub fn engine_info() -> EngineInfo {
    EngineInfo::builder()
        .client_version(DEMO_ENGINE_VERSION)
        .server_version(DEMO_ENGINE_VERSION)
        .api_version("1.43")
        .os("linux")
        .arch("amd64")
        .build()
}

/// A user allowed to manage the engine.
pub fn privileges() -> PrivilegeStatus {
    PrivilegeStatus::builder()
        .user(DEMO_USER)
        .is_root(false)
        .in_docker_group(true)
        .build()
}

/// Formats a simulated result message.
pub fn demo_message(message: impl AsRef<str>) -> String {
    format!("{} {DEMO_SUFFIX}", message.as_ref())
}
