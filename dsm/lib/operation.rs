//! The uniform outcome envelope returned by every manager verb.

use serde::Serialize;

use crate::{
    ContainerRecord, ContainerUsage, EngineInfo, ImageRecord, PrivilegeStatus, UnitStatus,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Message used when a failure is constructed without any text.
const UNSPECIFIED_FAILURE: &str = "operation failed without an error message";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The outcome of a single manager operation.
///
/// A success may carry a structured [`Detail`]; a failure always carries a non-empty,
/// human-readable message. Values are immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OperationResult {
    /// The operation completed.
    Succeeded {
        /// What happened.
        message: String,

        /// Optional payload for verbs that inspect state.
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<Detail>,
    },

    /// The operation failed. The session continues.
    Failed {
        /// Why it failed, usually the collaborator's own error text.
        message: String,
    },
}

/// Structured payload attached to a successful [`OperationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Detail {
    /// Containers returned by a listing verb, possibly empty.
    Containers(Vec<ContainerRecord>),

    /// Images returned by a listing verb, possibly empty.
    Images(Vec<ImageRecord>),

    /// State of a systemd unit.
    Unit(UnitStatus),

    /// Log text of a container.
    Logs(String),

    /// Point-in-time resource usage of running containers.
    Usage(Vec<ContainerUsage>),

    /// Engine version information.
    Engine(EngineInfo),

    /// Whether the current user may talk to the engine.
    Privileges(PrivilegeStatus),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl OperationResult {
    /// Creates a successful result without a payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self::Succeeded {
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a successful result carrying `detail`.
    pub fn success_with(message: impl Into<String>, detail: Detail) -> Self {
        Self::Succeeded {
            message: message.into(),
            detail: Some(detail),
        }
    }

    /// Creates a failed result. Blank messages are replaced so a failure is never silent.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNSPECIFIED_FAILURE.to_string()
        } else {
            message
        };

        Self::Failed { message }
    }

    /// Returns whether the operation succeeded.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns the message of either variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Succeeded { message, .. } | Self::Failed { message } => message,
        }
    }

    /// Returns the containers of a successful container listing.
    pub fn containers(&self) -> Option<&[ContainerRecord]> {
        match self.detail() {
            Some(Detail::Containers(records)) => Some(records),
            _ => None,
        }
    }

    /// Returns the images of a successful image listing.
    pub fn images(&self) -> Option<&[ImageRecord]> {
        match self.detail() {
            Some(Detail::Images(records)) => Some(records),
            _ => None,
        }
    }

    /// Returns the payload of a successful result.
    pub fn detail(&self) -> Option<&Detail> {
        match self {
            Self::Succeeded { detail, .. } => detail.as_ref(),
            Self::Failed { .. } => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<E> From<Result<OperationResult, E>> for OperationResult
where
    E: std::fmt::Display,
{
    fn from(result: Result<OperationResult, E>) -> Self {
        result.unwrap_or_else(|e| Self::failure(e.to_string()))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
