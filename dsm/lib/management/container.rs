use std::sync::Arc;

use crate::{runtime::ContainerRuntime, Detail, DsmResult, ManagerMode, OperationResult};

use super::{fixtures, format};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Container operations: listing, removal, pruning, logs and resource usage.
pub struct ContainerManager {
    mode: ManagerMode,
    runtime: Arc<dyn ContainerRuntime>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ContainerManager {
    /// Creates a manager. The mode cannot be changed afterwards.
    pub fn new(mode: ManagerMode, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { mode, runtime }
    }

    /// The mode fixed at construction.
    pub fn mode(&self) -> ManagerMode {
        self.mode
    }

    /// Lists containers. The result carries [`Detail::Containers`], possibly empty.
    pub fn list(&self, include_stopped: bool) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                let records = fixtures::containers();
                OperationResult::success_with(
                    fixtures::demo_message(format!("{} containers", records.len())),
                    Detail::Containers(records),
                )
            }
            ManagerMode::Live => self.live_list(include_stopped).into(),
        }
    }

    /// Removes a container by id or name.
    pub fn remove(&self, id: &str, force: bool) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                OperationResult::success(fixtures::demo_message(format!("removed container {id}")))
            }
            ManagerMode::Live => {
                tracing::debug!("removing container {id} (force={force})");
                self.runtime
                    .remove_container(id, force)
                    .map(|()| OperationResult::success(format!("removed container {id}")))
                    .into()
            }
        }
    }

    /// Removes all stopped containers.
    pub fn prune(&self) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => {
                OperationResult::success(fixtures::demo_message("pruned stopped containers"))
            }
            ManagerMode::Live => self
                .runtime
                .prune_containers()
                .map(OperationResult::success)
                .into(),
        }
    }

    /// Fetches the last `tail_lines` lines of a container's logs as [`Detail::Logs`].
    pub fn logs(&self, id: &str, tail_lines: usize) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => OperationResult::success_with(
                fixtures::demo_message(format!("logs of {id}")),
                Detail::Logs(fixtures::logs(id)),
            ),
            ManagerMode::Live => self
                .runtime
                .container_logs(id, tail_lines)
                .map(|text| {
                    OperationResult::success_with(format!("logs of {id}"), Detail::Logs(text))
                })
                .into(),
        }
    }

    /// Samples CPU and memory usage of running containers as [`Detail::Usage`].
    pub fn usage(&self) -> OperationResult {
        match self.mode {
            ManagerMode::Simulated => OperationResult::success_with(
                fixtures::demo_message("container usage"),
                Detail::Usage(fixtures::usage()),
            ),
            ManagerMode::Live => self
                .runtime
                .container_stats()
                .map(|usage| OperationResult::success_with("container usage", Detail::Usage(usage)))
                .into(),
        }
    }

    fn live_list(&self, include_stopped: bool) -> DsmResult<OperationResult> {
        let records: Vec<_> = self
            .runtime
            .list_containers(include_stopped)?
            .iter()
            .map(format::container_record)
            .collect();

        Ok(OperationResult::success_with(
            format!("{} containers", records.len()),
            Detail::Containers(records),
        ))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
