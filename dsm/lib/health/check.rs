use getset::Getters;
use serde::Serialize;

use crate::{
    management::{ContainerManager, ImageManager, SystemManager, UnitManager},
    Detail, OperationResult,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A single named check contributing to a [`HealthReport`](super::HealthReport).
pub trait HealthCheck {
    /// Short label shown in the report table.
    fn name(&self) -> &str;

    /// Runs the check. Implementations must not panic on collaborator failures.
    fn run(&self) -> CheckResult;
}

/// Outcome of one [`HealthCheck`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct CheckResult {
    /// The check's label.
    name: String,

    /// Whether the check passed.
    passed: bool,

    /// What was observed, or why the check failed.
    message: String,
}

/// Passes when the unit exists and is active.
pub struct UnitCheck<'a> {
    name: String,
    manager: &'a UnitManager,
}

/// Passes when containers can be listed; reports how many are running.
pub struct ContainerSummaryCheck<'a> {
    manager: &'a ContainerManager,
}

/// Passes when images can be listed; reports how many exist.
pub struct ImageSummaryCheck<'a> {
    manager: &'a ImageManager,
}

/// Passes when the engine answers a version query.
pub struct EngineCheck<'a> {
    manager: &'a SystemManager,
}

/// Passes when the current user may talk to the engine.
pub struct PrivilegeCheck<'a> {
    manager: &'a SystemManager,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CheckResult {
    /// A passing result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
        }
    }

    /// A failing result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
        }
    }

    /// Converts an operation outcome: success passes, failure fails with its message.
    pub fn from_operation(name: impl Into<String>, result: &OperationResult) -> Self {
        if result.succeeded() {
            Self::pass(name, result.message())
        } else {
            Self::fail(name, result.message())
        }
    }
}

impl<'a> UnitCheck<'a> {
    /// Creates a check named after the unit kind, e.g. `Docker service`.
    pub fn new(manager: &'a UnitManager) -> Self {
        Self {
            name: format!("Docker {}", manager.kind()),
            manager,
        }
    }
}

impl<'a> ContainerSummaryCheck<'a> {
    /// Creates the check.
    pub fn new(manager: &'a ContainerManager) -> Self {
        Self { manager }
    }
}

impl<'a> ImageSummaryCheck<'a> {
    /// Creates the check.
    pub fn new(manager: &'a ImageManager) -> Self {
        Self { manager }
    }
}

impl<'a> EngineCheck<'a> {
    /// Creates the check.
    pub fn new(manager: &'a SystemManager) -> Self {
        Self { manager }
    }
}

impl<'a> PrivilegeCheck<'a> {
    /// Creates the check.
    pub fn new(manager: &'a SystemManager) -> Self {
        Self { manager }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl HealthCheck for UnitCheck<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> CheckResult {
        let result = self.manager.status();
        match result.detail() {
            Some(Detail::Unit(status)) if status.is_active() => {
                CheckResult::pass(self.name(), status.to_string())
            }
            Some(Detail::Unit(status)) => CheckResult::fail(
                self.name(),
                format!(
                    "{} is {} ({})",
                    status.get_unit(),
                    status.get_active_state(),
                    status.get_sub_state()
                ),
            ),
            _ => CheckResult::from_operation(self.name(), &result),
        }
    }
}

impl HealthCheck for ContainerSummaryCheck<'_> {
    fn name(&self) -> &str {
        "Containers"
    }

    fn run(&self) -> CheckResult {
        let result = self.manager.list(true);
        match result.containers() {
            Some(records) => {
                let running = records
                    .iter()
                    .filter(|r| r.get_status() == "running")
                    .count();
                CheckResult::pass(
                    self.name(),
                    format!("{} total, {running} running", records.len()),
                )
            }
            None => CheckResult::from_operation(self.name(), &result),
        }
    }
}

impl HealthCheck for ImageSummaryCheck<'_> {
    fn name(&self) -> &str {
        "Images"
    }

    fn run(&self) -> CheckResult {
        let result = self.manager.list();
        match result.images() {
            Some(records) => CheckResult::pass(self.name(), format!("{} total", records.len())),
            None => CheckResult::from_operation(self.name(), &result),
        }
    }
}

impl HealthCheck for EngineCheck<'_> {
    fn name(&self) -> &str {
        "Docker engine"
    }

    fn run(&self) -> CheckResult {
        CheckResult::from_operation(self.name(), &self.manager.engine_info())
    }
}

impl HealthCheck for PrivilegeCheck<'_> {
    fn name(&self) -> &str {
        "Privileges"
    }

    fn run(&self) -> CheckResult {
        CheckResult::from_operation(self.name(), &self.manager.privileges())
    }
}
