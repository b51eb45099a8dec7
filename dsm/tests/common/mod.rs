#![allow(dead_code)]

use std::{cell::RefCell, io::Cursor, sync::Arc};

use dsm::{
    config::DsmConfig,
    console::{Console, SessionState},
    management::Managers,
    runtime::{ContainerRuntime, RuntimeContainer, RuntimeImage, ServiceController, UnitVerb},
    ContainerUsage, DsmError, DsmResult, EngineInfo, ManagerMode, UnitStatus,
};
use dsmutils::DsmutilsError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A container runtime that records every call and answers from canned data.
#[derive(Default)]
pub struct StubRuntime {
    pub calls: RefCell<Vec<String>>,
    pub error: Option<String>,
    pub containers: Vec<RuntimeContainer>,
    pub images: Vec<RuntimeImage>,
}

/// A service controller that records every call.
#[derive(Default)]
pub struct StubController {
    pub calls: RefCell<Vec<String>>,
    pub error: Option<String>,
    pub active_state: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl StubRuntime {
    pub fn failing(stderr: &str) -> Self {
        Self {
            error: Some(stderr.to_string()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: String) -> DsmResult<()> {
        self.calls.borrow_mut().push(call);
        fail_with(&self.error, "docker")
    }
}

impl StubController {
    pub fn active() -> Self {
        Self {
            active_state: "active".to_string(),
            ..Default::default()
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            error: Some(stderr.to_string()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn fail_with(error: &Option<String>, program: &str) -> DsmResult<()> {
    match error {
        Some(stderr) => Err(DsmError::Utils(DsmutilsError::CommandFailed {
            program: program.to_string(),
            code: Some(1),
            stderr: stderr.clone(),
        })),
        None => Ok(()),
    }
}

/// A config that never pauses or clears the screen.
pub fn quiet_config() -> DsmConfig {
    DsmConfig::builder()
        .pause_after_output(false)
        .clear_screen(false)
        .build()
}

pub fn managers(
    mode: ManagerMode,
    runtime: &Arc<StubRuntime>,
    controller: &Arc<StubController>,
) -> Managers {
    Managers::new(&quiet_config(), mode, runtime.clone(), controller.clone())
}

/// Runs a console session over `input` and returns the final state and everything printed.
pub fn run_session(managers: Managers, input: impl AsRef<[u8]>) -> (SessionState, String) {
    let mut console = Console::new(
        &quiet_config(),
        managers,
        Cursor::new(input.as_ref().to_vec()),
        Vec::new(),
    );
    console.run().expect("session should end cleanly");
    let state = console.state();
    let output = String::from_utf8(console.into_output()).expect("utf-8 output");
    (state, output)
}

pub fn runtime_container(id: &str, name: &str, state: &str) -> RuntimeContainer {
    RuntimeContainer {
        id: id.to_string(),
        name: format!("/{name}"),
        state: state.to_string(),
        image: "nginx:latest".to_string(),
        created: "2024-01-15T10:30:00.123456789Z".to_string(),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl ContainerRuntime for StubRuntime {
    fn list_containers(&self, include_stopped: bool) -> DsmResult<Vec<RuntimeContainer>> {
        self.record(format!("list_containers {include_stopped}"))?;
        Ok(self
            .containers
            .iter()
            .filter(|c| include_stopped || c.state == "running")
            .cloned()
            .collect())
    }

    fn remove_container(&self, id: &str, force: bool) -> DsmResult<()> {
        self.record(format!("remove_container {id} {force}"))
    }

    fn prune_containers(&self) -> DsmResult<String> {
        self.record("prune_containers".to_string())?;
        Ok("Total reclaimed space: 0B".to_string())
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
        Ok(format!("log line from {id}\n"))
    }

    fn container_stats(&self) -> DsmResult<Vec<ContainerUsage>> {
        self.record("container_stats".to_string())?;
        Ok(Vec::new())
    }

    fn engine_info(&self) -> DsmResult<EngineInfo> {
        self.record("engine_info".to_string())?;
        Ok(EngineInfo::builder()
            .client_version("25.0.3")
            .server_version("25.0.3")
            .api_version("1.44")
            .os("linux")
            .arch("arm64")
            .build())
    }
}

impl ServiceController for StubController {
    fn status(&self, unit: &str) -> DsmResult<UnitStatus> {
        self.calls.borrow_mut().push(format!("status {unit}"));
        fail_with(&self.error, "systemctl")?;
        Ok(UnitStatus::builder()
            .unit(unit)
            .load_state("loaded")
            .active_state(self.active_state.as_str())
            .sub_state("dead")
            .unit_file_state("enabled")
            .build())
    }

    fn control(&self, unit: &str, verb: UnitVerb) -> DsmResult<()> {
        self.calls.borrow_mut().push(format!("{verb} {unit}"));
        fail_with(&self.error, "systemctl")
    }
}
