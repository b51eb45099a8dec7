use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use getset::Getters;
use serde::Serialize;

use crate::management::{ContainerManager, ImageManager, SystemManager, UnitManager};

use super::{
    CheckResult, ContainerSummaryCheck, EngineCheck, HealthCheck, ImageSummaryCheck,
    PrivilegeCheck, UnitCheck,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Which set of checks a report runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Service, socket, containers, images, engine and privileges.
    Full,

    /// Service and socket status only.
    Quick,
}

/// The aggregated outcome of a sequence of checks.
#[derive(Debug, Clone, Getters, Serialize)]
#[getset(get = "pub with_prefix")]
pub struct HealthReport {
    /// The kind of report that produced these results.
    kind: ReportKind,

    /// When the checks finished.
    generated_at: DateTime<Utc>,

    /// One entry per check, in the order they ran.
    checks: Vec<CheckResult>,

    /// True only when every check passed.
    healthy: bool,
}

/// Borrows the session's managers and builds the standard check sequences.
pub struct HealthReporter<'a> {
    service: &'a UnitManager,
    socket: &'a UnitManager,
    containers: &'a ContainerManager,
    images: &'a ImageManager,
    system: &'a SystemManager,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl HealthReport {
    /// Runs every check in order. A failing check never stops the ones after it.
    pub fn collect(kind: ReportKind, checks: &[&dyn HealthCheck]) -> Self {
        let checks: Vec<CheckResult> = checks
            .iter()
            .map(|check| {
                let result = check.run();
                if !result.get_passed() {
                    tracing::warn!("health check {} failed: {}", check.name(), result.get_message());
                }
                result
            })
            .collect();

        let healthy = checks.iter().all(|c| *c.get_passed());
        Self {
            kind,
            generated_at: Utc::now(),
            checks,
            healthy,
        }
    }

    /// Checks that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.get_passed())
    }
}

impl<'a> HealthReporter<'a> {
    /// Creates a reporter over the given managers.
    pub fn new(
        service: &'a UnitManager,
        socket: &'a UnitManager,
        containers: &'a ContainerManager,
        images: &'a ImageManager,
        system: &'a SystemManager,
    ) -> Self {
        Self {
            service,
            socket,
            containers,
            images,
            system,
        }
    }

    /// Runs the checks belonging to `kind`.
    pub fn report(&self, kind: ReportKind) -> HealthReport {
        let service = UnitCheck::new(self.service);
        let socket = UnitCheck::new(self.socket);
        match kind {
            ReportKind::Quick => HealthReport::collect(kind, &[&service, &socket]),
            ReportKind::Full => {
                let containers = ContainerSummaryCheck::new(self.containers);
                let images = ImageSummaryCheck::new(self.images);
                let engine = EngineCheck::new(self.system);
                let privileges = PrivilegeCheck::new(self.system);
                HealthReport::collect(
                    kind,
                    &[
                        &service,
                        &socket,
                        &containers,
                        &images,
                        &engine,
                        &privileges,
                    ],
                )
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Full => write!(f, "full"),
            ReportKind::Quick => write!(f, "quick"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
