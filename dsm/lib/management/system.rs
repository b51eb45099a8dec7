use std::sync::Arc;

use nix::unistd::{getgroups, Group, Uid, User};

use crate::{
    runtime::ContainerRuntime, Detail, DsmError, DsmResult, ManagerMode, OperationResult,
    PrivilegeStatus,
};

use super::fixtures;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Members of this group may use the engine socket without root.
pub const DOCKER_GROUP: &str = "docker";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Host-level information: engine versions and the caller's privileges.
pub struct SystemManager {
    mode: ManagerMode,
    runtime: Arc<dyn ContainerRuntime>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl SystemManager {
    /// Creates a manager. The mode cannot be changed afterwards.
    pub fn new(mode: ManagerMode, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { mode, runtime }
    }

    /// The mode fixed at construction.
    pub fn mode(&self) -> ManagerMode {
        self.mode
    }

    /// Reports client and server versions as [`Detail::Engine`].
    pub fn engine_info(&self) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                let info = fixtures::engine_info();
                OperationResult::success_with(
                    fixtures::demo_message(info.to_string()),
                    Detail::Engine(info),
                )
            }
            ManagerMode::Live => self
                .runtime
                .engine_info()
                .map(|info| OperationResult::success_with(info.to_string(), Detail::Engine(info)))
                .into(),
        }
    }

    /// Checks that the effective user is root or belongs to the [`DOCKER_GROUP`].
    pub fn privileges(&self) -> OperationResult {
        let status = match self.mode {
            ManagerMode::Simulated => fixtures::privileges(),
            ManagerMode::Live => match current_privileges() {
                Ok(status) => status,
                Err(e) => return OperationResult::failure(e.to_string()),
            },
        };

        if !status.granted() {
            return OperationResult::failure(format!(
                "user {} is neither root nor a member of the {DOCKER_GROUP} group",
                status.get_user()
            ));
        }

        let message = if *status.get_is_root() {
            format!("user {} is root", status.get_user())
        } else {
            format!("user {} is in the {DOCKER_GROUP} group", status.get_user())
        };

        let message = match self.mode {
            ManagerMode::Simulated => fixtures::demo_message(message),
            ManagerMode::Live => message,
        };

        OperationResult::success_with(message, Detail::Privileges(status))
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn current_privileges() -> DsmResult<PrivilegeStatus> {
    let uid = Uid::effective();
    let user = User::from_uid(uid).map_err(DsmError::custom)?;
    let name = user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_else(|| uid.to_string());

    let in_docker_group = match Group::from_name(DOCKER_GROUP).map_err(DsmError::custom)? {
        Some(group) => {
            let primary = user.as_ref().is_some_and(|u| u.gid == group.gid);
            primary || getgroups().map_err(DsmError::custom)?.contains(&group.gid)
        }
        None => false,
    };

    Ok(PrivilegeStatus::builder()
        .user(name)
        .is_root(uid.is_root())
        .in_docker_group(in_docker_group)
        .build())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
