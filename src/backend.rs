//! Child process hosting the analytical backend.
//!
//! The desk spawns the backend next to the window and tears it down when the
//! window closes. The UI never talks to it over stdio; stdout and stderr are
//! only forwarded to the log.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;

use thiserror::Error;

use crate::config::BackendSettings;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to start backend `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Failed to stop backend: {source}")]
    Terminate { source: std::io::Error },
    #[error("Failed to reap backend process: {source}")]
    Wait { source: std::io::Error },
}

/// Running backend process; killed on [`BackendProcess::shutdown`] or drop.
pub struct BackendProcess {
    child: Option<Child>,
    label: String,
}

impl BackendProcess {
    /// Spawn the configured program with the script as its first argument.
    pub fn launch(settings: &BackendSettings) -> Result<Self, BackendError> {
        // The child may run from another directory, so pass the script absolute.
        let script = std::path::absolute(&settings.script).unwrap_or(settings.script.clone());
        let mut command = Command::new(&settings.program);
        command.arg(&script).args(&settings.args);
        if let Some(dir) = working_dir(settings) {
            command.current_dir(dir);
        }
        let label = format!("{} {}", settings.program, settings.script.display());
        Self::spawn(command, label)
    }

    /// Spawn an arbitrary command with piped output forwarded to the log.
    pub fn spawn(mut command: Command, label: String) -> Result<Self, BackendError> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = command.spawn().map_err(|source| BackendError::Spawn {
            program: label.clone(),
            source,
        })?;
        // Forwarders end on their own once every holder of the pipes exits.
        if let Some(stdout) = child.stdout.take() {
            forward_lines(stdout, false);
        }
        if let Some(stderr) = child.stderr.take() {
            forward_lines(stderr, true);
        }
        tracing::info!("Started backend `{label}` (pid {})", child.id());
        Ok(Self {
            child: Some(child),
            label,
        })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True while the child has not exited.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) | None => false,
        }
    }

    /// Stop the backend and wait for it. Subsequent calls return `Ok(None)`.
    pub fn shutdown(&mut self) -> Result<Option<ExitStatus>, BackendError> {
        let Some(mut child) = self.child.take() else {
            return Ok(None);
        };
        if child
            .try_wait()
            .map_err(|source| BackendError::Wait { source })?
            .is_none()
        {
            child
                .kill()
                .map_err(|source| BackendError::Terminate { source })?;
        }
        let status = child.wait().map_err(|source| BackendError::Wait { source })?;
        tracing::info!("Backend `{}` exited with {status}", self.label);
        Ok(Some(status))
    }
}

impl Drop for BackendProcess {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::error!("{err}");
        }
    }
}

fn working_dir(settings: &BackendSettings) -> Option<PathBuf> {
    settings.working_dir.clone().or_else(|| {
        settings
            .script
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
    })
}

fn forward_lines<R: Read + Send + 'static>(stream: R, is_stderr: bool) {
    thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else {
                break;
            };
            if is_stderr {
                tracing::warn!(target: "riskdesk::backend", "{line}");
            } else {
                tracing::debug!(target: "riskdesk::backend", "{line}");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_dir_defaults_to_script_parent() {
        let settings = BackendSettings {
            script: PathBuf::from("engine/Interface.py"),
            ..BackendSettings::default()
        };
        assert_eq!(working_dir(&settings), Some(PathBuf::from("engine")));

        let bare = BackendSettings::default();
        assert_eq!(working_dir(&bare), None);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let settings = BackendSettings {
            program: "riskdesk-no-such-program".into(),
            ..BackendSettings::default()
        };
        let err = BackendProcess::launch(&settings).err().unwrap();
        assert!(matches!(err, BackendError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn shutdown_kills_long_running_child_once() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("echo starting >&2; exec sleep 30");
        let mut process = BackendProcess::spawn(command, "sleeper".into()).unwrap();
        assert!(process.is_running());

        let status = process.shutdown().unwrap().unwrap();
        assert!(!status.success());
        assert!(!process.is_running());
        assert!(process.shutdown().unwrap().is_none());
    }
}
