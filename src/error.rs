use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("identify executable could not be started: {}", executable.display())]
    IdentifyUnavailable {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}. stderr={stderr}", path.display())]
    FileNotFound { path: PathBuf, stderr: String },

    #[error("identify error: {message}. status={status:?}")]
    Process {
        message: String,
        stderr: String,
        status: Option<i32>,
    },

    #[error("identify timed out after {timeout:?}. file={}", path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    #[error("Output channel for identify disconnected.")]
    OutputDisconnected,
}
