use std::path::PathBuf;

use dsmutils::{resolve_binary, run_command, DsmutilsError};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{ContainerUsage, DsmError, DsmResult, EngineInfo};

use super::{ContainerRuntime, RuntimeContainer, RuntimeImage};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Prefix of the error the client prints for an id that no longer exists.
const NO_SUCH_OBJECT: &str = "No such";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [`ContainerRuntime`] backed by the `docker` command line client.
///
/// Construction does not touch the system; the binary is resolved on every call so a missing
/// client shows up as an ordinary, recoverable failure.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerInspect {
    id: String,
    name: String,
    created: String,
    state: ContainerInspectState,
    config: ContainerInspectConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerInspectState {
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerInspectConfig {
    image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImageInspect {
    id: String,
    #[serde(default)]
    repo_tags: Option<Vec<String>>,
    size: u64,
    created: String,
}

#[derive(Debug, Deserialize)]
struct StatsLine {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CPUPerc")]
    cpu_perc: String,
    #[serde(rename = "MemPerc")]
    mem_perc: String,
    #[serde(rename = "MemUsage")]
    mem_usage: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VersionOutput {
    client: VersionClient,
    server: Option<VersionServer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VersionClient {
    version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VersionServer {
    version: String,
    api_version: String,
    os: String,
    arch: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DockerCli {
    /// Creates a client that runs `binary`, either a name looked up on `PATH` or a path.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn docker(&self, args: &[&str]) -> DsmResult<String> {
        let binary = resolve_binary(&self.binary)?;
        let output = run_command(binary, args)?;
        Ok(output.stdout)
    }

    /// Inspects `ids` in one call. If an object vanished since it was listed, the call fails
    /// as a whole, so each id is inspected again on its own and the missing ones are skipped.
    fn inspect<T: DeserializeOwned>(&self, object: &str, ids: &[String]) -> DsmResult<Vec<T>> {
        let mut args = vec![object, "inspect"];
        args.extend(ids.iter().map(String::as_str));

        match self.docker(&args) {
            Ok(output) => Ok(serde_json::from_str(&output)?),
            Err(e) if is_no_such_object(&e) => {
                tracing::debug!("{object} vanished during inspect, retrying one by one: {e}");
                let mut found = Vec::with_capacity(ids.len());
                for id in ids {
                    match self.docker(&[object, "inspect", id]) {
                        Ok(output) => found.extend(serde_json::from_str::<Vec<T>>(&output)?),
                        Err(e) if is_no_such_object(&e) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(found)
            }
            Err(e) => Err(e),
        }
    }

    fn docker_with_stderr(&self, args: &[&str]) -> DsmResult<String> {
        let binary = resolve_binary(&self.binary)?;
        let output = run_command(binary, args)?;
        Ok(format!("{}{}", output.stdout, output.stderr))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl ContainerRuntime for DockerCli {
    fn list_containers(&self, include_stopped: bool) -> DsmResult<Vec<RuntimeContainer>> {
        let mut args = vec!["container", "ls", "-q", "--no-trunc"];
        if include_stopped {
            args.push("-a");
        }

        let ids = collect_ids(&self.docker(&args)?);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let inspected = self.inspect("container", &ids)?;
        Ok(inspected.into_iter().map(container_from_inspect).collect())
    }

    fn remove_container(&self, id: &str, force: bool) -> DsmResult<()> {
        let mut args = vec!["container", "rm"];
        if force {
            args.push("-f");
        }
        args.push(id);

        self.docker(&args)?;
        Ok(())
    }

    fn prune_containers(&self) -> DsmResult<String> {
        let output = self.docker(&["container", "prune", "-f"])?;
        Ok(summary_line(&output))
    }

    fn list_images(&self) -> DsmResult<Vec<RuntimeImage>> {
        let ids = collect_ids(&self.docker(&["image", "ls", "-q", "--no-trunc"])?);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let inspected = self.inspect("image", &ids)?;
        Ok(inspected.into_iter().map(image_from_inspect).collect())
    }

    fn remove_image(&self, id: &str, force: bool) -> DsmResult<()> {
        let mut args = vec!["image", "rm"];
        if force {
            args.push("-f");
        }
        args.push(id);

        self.docker(&args)?;
        Ok(())
    }

    fn prune_images(&self) -> DsmResult<String> {
        let output = self.docker(&["image", "prune", "-f"])?;
        Ok(summary_line(&output))
    }

    fn container_logs(&self, id: &str, tail_lines: usize) -> DsmResult<String> {
        let tail = tail_lines.to_string();
        // Containers write to both streams; the client forwards them unchanged.
        self.docker_with_stderr(&["container", "logs", "--tail", &tail, id])
    }

    fn container_stats(&self) -> DsmResult<Vec<ContainerUsage>> {
        let output = self.docker(&[
            "container",
            "stats",
            "--no-stream",
            "--format",
            "{{json .}}",
        ])?;
        parse_stats_lines(&output)
    }

    fn engine_info(&self) -> DsmResult<EngineInfo> {
        let output = self.docker(&["version", "--format", "{{json .}}"])?;
        parse_version(&output)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Collects one id per line, dropping blanks and repeats while keeping the first occurrence.
fn collect_ids(output: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

fn summary_line(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or("nothing to remove")
        .to_string()
}

fn is_no_such_object(error: &DsmError) -> bool {
    matches!(
        error,
        DsmError::Utils(DsmutilsError::CommandFailed { stderr, .. }) if stderr.contains(NO_SUCH_OBJECT)
    )
}

fn container_from_inspect(c: ContainerInspect) -> RuntimeContainer {
    RuntimeContainer {
        id: c.id,
        name: c.name,
        state: c.state.status,
        image: c.config.image,
        created: c.created,
    }
}

fn image_from_inspect(i: ImageInspect) -> RuntimeImage {
    RuntimeImage {
        id: i.id,
        repo_tags: i.repo_tags.unwrap_or_default(),
        size: i.size,
        created: i.created,
    }
}

fn parse_percent(value: &str) -> DsmResult<f64> {
    let trimmed = value.trim().trim_end_matches('%');
    if trimmed == "--" {
        return Ok(0.0);
    }

    trimmed
        .parse()
        .map_err(|_| DsmError::UnexpectedOutput(format!("not a percentage: {value}")))
}

fn parse_stats_lines(output: &str) -> DsmResult<Vec<ContainerUsage>> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| -> DsmResult<ContainerUsage> {
            let stats: StatsLine = serde_json::from_str(line)?;
            Ok(ContainerUsage::builder()
                .name(stats.name)
                .cpu_percent(parse_percent(&stats.cpu_perc)?)
                .memory_percent(parse_percent(&stats.mem_perc)?)
                .memory_usage(stats.mem_usage)
                .build())
        })
        .collect()
}

fn parse_version(output: &str) -> DsmResult<EngineInfo> {
    let version: VersionOutput = serde_json::from_str(output.trim())?;
    let server = version.server.ok_or_else(|| {
        DsmError::UnexpectedOutput("docker version reported no server".to_string())
    })?;

    Ok(EngineInfo::builder()
        .client_version(version.client.version)
        .server_version(server.version)
        .api_version(server.api_version)
        .os(server.os)
        .arch(server.arch)
        .build())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
