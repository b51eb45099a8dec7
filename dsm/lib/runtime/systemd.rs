use std::{collections::HashMap, path::PathBuf};

use dsmutils::{resolve_binary, run_command};

use crate::{DsmError, DsmResult, UnitStatus};

use super::{ServiceController, UnitVerb};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Properties requested from `systemctl show`.
const STATUS_PROPERTIES: &str = "LoadState,ActiveState,SubState,UnitFileState";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [`ServiceController`] backed by `systemctl`.
#[derive(Debug, Clone)]
pub struct Systemctl {
    binary: PathBuf,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Systemctl {
    /// Creates a controller that runs `binary`, either a name looked up on `PATH` or a path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn systemctl(&self, args: &[&str]) -> DsmResult<String> {
        let binary = resolve_binary(&self.binary)?;
        Ok(run_command(binary, args)?.stdout)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for Systemctl {
    fn default() -> Self {
        Self::new("systemctl")
    }
}

impl ServiceController for Systemctl {
    fn status(&self, unit: &str) -> DsmResult<UnitStatus> {
        let property = format!("--property={STATUS_PROPERTIES}");
        let output = self.systemctl(&["show", unit, &property])?;
        parse_show_output(unit, &output)
    }

    fn control(&self, unit: &str, verb: UnitVerb) -> DsmResult<()> {
        self.systemctl(&[verb.as_command(), unit])?;
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parses the `Key=Value` lines printed by `systemctl show`.
fn parse_show_output(unit: &str, output: &str) -> DsmResult<UnitStatus> {
    let properties: HashMap<&str, &str> = output
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect();

    let get = |key: &str| -> DsmResult<String> {
        properties
            .get(key)
            .map(|v| v.to_string())
            .ok_or_else(|| DsmError::UnexpectedOutput(format!("systemctl show lacks {key}")))
    };

    Ok(UnitStatus::builder()
        .unit(unit)
        .load_state(get("LoadState")?)
        .active_state(get("ActiveState")?)
        .sub_state(get("SubState")?)
        // Transient and generated units have no unit file state.
        .unit_file_state(get("UnitFileState").unwrap_or_default())
        .build())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
