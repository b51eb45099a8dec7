//! A recording [`ContainerRuntime`] for the manager unit tests.

use std::cell::RefCell;

use crate::{
    runtime::{ContainerRuntime, RuntimeContainer, RuntimeImage},
    ContainerUsage, DsmError, DsmResult, EngineInfo,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct RecordingRuntime {
    pub(crate) calls: RefCell<Vec<String>>,
    pub(crate) fail: bool,
    pub(crate) containers: Vec<RuntimeContainer>,
    pub(crate) images: Vec<RuntimeImage>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RecordingRuntime {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn record(&self, call: String) -> DsmResult<()> {
        self.calls.borrow_mut().push(call);
        if self.fail {
            return Err(DsmError::UnexpectedOutput("daemon not running".to_string()));
        }
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl ContainerRuntime for RecordingRuntime {
    fn list_containers(&self, include_stopped: bool) -> DsmResult<Vec<RuntimeContainer>> {
        self.record(format!("list_containers {include_stopped}"))?;
        Ok(self.containers.clone())
    }

    fn remove_container(&self, id: &str, force: bool) -> DsmResult<()> {
        self.record(format!("remove_container {id} {force}"))
    }

    fn prune_containers(&self) -> DsmResult<String> {
        self.record("prune_containers".to_string())?;
        Ok("Total reclaimed space: 2MB".to_string())
    }

    fn list_images(&self) -> DsmResult<Vec<RuntimeImage>> {
        self.record("list_images".to_string())?;
        Ok(self.images.clone())
    }

    fn remove_image(&self, id: &str, force: bool) -> DsmResult<()> {
        self.record(format!("remove_image {id} {force}"))
    }

    fn prune_images(&self) -> DsmResult<String> {
        self.record("prune_images".to_string())?;
        Ok("Total reclaimed space: 0B".to_string())
    }

    fn container_logs(&self, id: &str, tail_lines: usize) -> DsmResult<String> {
        self.record(format!("container_logs {id} {tail_lines}"))?;
        Ok(format!("hello from {id}\n"))
    }

    fn container_stats(&self) -> DsmResult<Vec<ContainerUsage>> {
        self.record("container_stats".to_string())?;
        Ok(Vec::new())
    }

    fn engine_info(&self) -> DsmResult<EngineInfo> {
        self.record("engine_info".to_string())?;
        Ok(crate::management::fixtures::engine_info())
    }
}
