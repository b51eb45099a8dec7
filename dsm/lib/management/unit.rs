use std::{
    fmt::{self, Display},
    sync::Arc,
};

use crate::{
    runtime::{ServiceController, UnitVerb},
    Detail, DsmResult, ManagerMode, OperationResult,
};

use super::fixtures;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The two service-like resources the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// The engine service, `docker.service` by default.
    Service,

    /// The activation socket, `docker.socket` by default.
    Socket,
}

/// Lifecycle manager for one systemd unit.
///
/// Both the service and the socket use this type; they differ only in [`UnitKind`] and unit
/// name.
pub struct UnitManager {
    kind: UnitKind,
    unit: String,
    mode: ManagerMode,
    controller: Arc<dyn ServiceController>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl UnitManager {
    /// Creates a manager for `unit`. The mode cannot be changed afterwards.
    pub fn new(
        kind: UnitKind,
        unit: impl Into<String>,
        mode: ManagerMode,
        controller: Arc<dyn ServiceController>,
    ) -> Self {
        Self {
            kind,
            unit: unit.into(),
            mode,
            controller,
        }
    }

    /// The kind of unit this manager controls.
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// The unit name.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The mode fixed at construction.
    pub fn mode(&self) -> ManagerMode {
        self.mode
    }

    /// Reports the unit state. A unit that is not installed is a failure.
    pub fn status(&self) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                let status = fixtures::unit_status(&self.unit);
                OperationResult::success_with(
                    fixtures::demo_message(status.to_string()),
                    Detail::Unit(status),
                )
            }
            ManagerMode::Live => self.live_status().into(),
        }
    }

    /// Starts the unit.
    pub fn start(&self) -> OperationResult {
        self.apply(UnitVerb::Start)
    }

    /// Stops the unit.
    pub fn stop(&self) -> OperationResult {
        self.apply(UnitVerb::Stop)
    }

    /// Restarts the unit.
    pub fn restart(&self) -> OperationResult {
        self.apply(UnitVerb::Restart)
    }

    /// Enables the unit at boot.
    pub fn enable(&self) -> OperationResult {
        self.apply(UnitVerb::Enable)
    }

    /// Disables the unit at boot.
    pub fn disable(&self) -> OperationResult {
        self.apply(UnitVerb::Disable)
    }

    /// Applies a lifecycle verb.
    pub fn apply(&self, verb: UnitVerb) -> OperationResult {
        let message = format!("{} {}", self.unit, verb.past_tense());
        match self.mode {
            ManagerMode::Simulated => OperationResult::success(fixtures::demo_message(message)),
            ManagerMode::Live => {
                tracing::debug!("{} {}: {}", self.kind, verb, self.unit);
                match self.controller.control(&self.unit, verb) {
                    Ok(()) => OperationResult::success(message),
                    Err(e) => {
                        tracing::warn!("failed to {verb} {}: {e}", self.unit);
                        OperationResult::failure(e.to_string())
                    }
                }
            }
        }
    }

    fn live_status(&self) -> DsmResult<OperationResult> {
        let status = self.controller.status(&self.unit)?;
        if status.get_load_state() == "not-found" {
            return Ok(OperationResult::failure(format!(
                "{} is not installed",
                self.unit
            )));
        }

        Ok(OperationResult::success_with(
            status.to_string(),
            Detail::Unit(status),
        ))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Service => write!(f, "service"),
            UnitKind::Socket => write!(f, "socket"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
