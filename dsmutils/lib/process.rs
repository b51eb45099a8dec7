//! `dsmutils::process` runs external programs and captures their output.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{DsmutilsError, DsmutilsResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The captured result of a successful command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output, decoded lossily as UTF-8
    pub stdout: String,

    /// Standard error, decoded lossily as UTF-8
    pub stderr: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolves a program name against `PATH`. Paths containing a separator are returned as-is
/// if they exist.
pub fn resolve_binary(program: impl AsRef<OsStr>) -> DsmutilsResult<PathBuf> {
    let program = program.as_ref();
    which::which(program).map_err(|e| {
        DsmutilsError::BinaryNotFound(program.to_string_lossy().into_owned(), e.to_string())
    })
}

/// Runs `program` with `args` to completion, blocking the calling thread.
///
/// A non-zero exit status becomes [`DsmutilsError::CommandFailed`] carrying the trimmed
/// standard error so the caller can show it verbatim.
pub fn run_command<I, S>(program: impl AsRef<Path>, args: I) -> DsmutilsResult<CommandOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    tracing::debug!("running command: {} {:?}", program.display(), args);

    let output = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let program = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());

        return Err(DsmutilsError::CommandFailed {
            program,
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_captures_stdout() -> anyhow::Result<()> {
        let output = run_command("sh", ["-c", "printf 'hello\\n'"])?;
        assert_eq!(output.stdout, "hello\n");
        assert!(output.stderr.is_empty());
        Ok(())
    }

    #[test]
    fn test_run_command_reports_failure_with_stderr() {
        let err = run_command("sh", ["-c", "echo 'unit not found' >&2; exit 4"]).unwrap_err();
        match err {
            DsmutilsError::CommandFailed {
                program,
                code,
                stderr,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(4));
                assert_eq!(stderr, "unit not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_command_missing_program_is_io_error() {
        let err = run_command("/nonexistent/dsm-test-binary", Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, DsmutilsError::IoError(_)));
    }

    #[test]
    fn test_resolve_binary() {
        assert!(resolve_binary("sh").is_ok());
        assert!(matches!(
            resolve_binary("dsm-definitely-not-installed"),
            Err(DsmutilsError::BinaryNotFound(_, _))
        ));
    }
}
