use crate::config::IdentifyConfig;
use crate::error::IdentifyError;
use crate::source::{self, TagSource};
use crate::structs::exif_info::ExifInfo;
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// `-format` string passed to `identify`: every EXIF tag, every date property,
/// then the pixel size and resolution, one `name=value` per line.
///
/// The `\n` sequences are escapes for `identify` itself, not Rust newlines.
pub const IDENTIFY_FORMAT: &str =
    r"%[exif:*]\n%[date:*]\nwidth=%w\nheight=%h\nxResolution=%x\nyResolution=%y\n";

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Extra time to collect output once the process exited.
const OUTPUT_GRACE: Duration = Duration::from_millis(500);

/// Reads EXIF metadata by running ImageMagick's `identify` once per file.
///
/// Holds only configuration, so one instance can be shared between threads.
/// Each call spawns its own process, no shell is involved.
///
/// ```no_run
/// use magick_exif::{Identify, IdentifyConfig, IdentifyError};
/// use std::path::Path;
/// use std::time::Duration;
///
/// fn main() -> Result<(), IdentifyError> {
///     let identify = Identify::with_config(
///         IdentifyConfig::new().with_timeout(Duration::from_secs(5)),
///     );
///     let exif = identify.extract_exif(Path::new("photos/IMG_0001.jpg"))?;
///     println!("{:?} {:?} taken {:?}", exif.make, exif.model, exif.date_time);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Identify {
    config: IdentifyConfig,
}

/// What a finished `identify` process left behind.
struct ProcessOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: String,
}

impl Identify {
    /// Uses `identify` from `PATH` with the default 20 second timeout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IdentifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IdentifyConfig {
        &self.config
    }

    /// Runs `identify` on `file_path` and normalizes its output.
    pub fn extract_exif(&self, file_path: &Path) -> Result<ExifInfo, IdentifyError> {
        source::extract_exif(self, file_path)
    }

    fn run(&self, file_path: &Path) -> Result<ProcessOutput, IdentifyError> {
        let mut command = Command::new(&self.config.executable);
        command
            .arg("-format")
            .arg(IDENTIFY_FORMAT)
            .arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!("Executing command {:?}", command);

        let mut child = command
            .spawn()
            .map_err(|source| IdentifyError::IdentifyUnavailable {
                executable: self.config.executable.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("Failed to capture stderr"))?;

        // Drain both pipes on their own threads so a large EXIF dump can't
        // fill a pipe buffer and stall the process.
        let stdout_receiver = spawn_reader(stdout);
        let stderr_receiver = spawn_reader(stderr);

        let started = Instant::now();
        let status = self.wait_with_timeout(&mut child, file_path, started)?;

        let deadline = self
            .config
            .timeout()
            .saturating_sub(started.elapsed())
            .max(OUTPUT_GRACE);
        let stdout = self.receive(&stdout_receiver, deadline, file_path)?;
        let stderr = self.receive(&stderr_receiver, OUTPUT_GRACE, file_path)?;

        Ok(ProcessOutput {
            status,
            stdout,
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }

    fn wait_with_timeout(
        &self,
        child: &mut Child,
        file_path: &Path,
        started: Instant,
    ) -> Result<ExitStatus, IdentifyError> {
        let timeout = self.config.timeout();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= timeout {
                // Ignore errors, the process may have exited in the meantime.
                let _ = child.kill();
                let _ = child.wait();
                return Err(IdentifyError::Timeout {
                    path: file_path.to_path_buf(),
                    timeout,
                });
            }
            thread::sleep(EXIT_POLL_INTERVAL);
        }
    }

    fn receive(
        &self,
        receiver: &Receiver<std::io::Result<Vec<u8>>>,
        wait: Duration,
        file_path: &Path,
    ) -> Result<Vec<u8>, IdentifyError> {
        match receiver.recv_timeout(wait) {
            Ok(bytes) => Ok(bytes?),
            // Something the process started still holds the pipe open
            Err(RecvTimeoutError::Timeout) => Err(IdentifyError::Timeout {
                path: file_path.to_path_buf(),
                timeout: self.config.timeout(),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(IdentifyError::OutputDisconnected),
        }
    }
}

impl TagSource for Identify {
    type Error = IdentifyError;

    /// Returns the raw `name=value` lines for `path`.
    ///
    /// Warnings `identify` prints on a successful run (unknown maker notes,
    /// corrupt thumbnails) are logged and otherwise ignored.
    fn read_tags(&self, path: &Path) -> Result<String, IdentifyError> {
        let output = self.run(path)?;

        if !output.status.success() {
            return Err(classify_failure(path, output.status, output.stderr));
        }

        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            warn!("identify warning for {}: {}", path.display(), line);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// One-off extraction with [`IdentifyConfig::from_env`].
pub fn extract_exif_with_defaults(file_path: &Path) -> Result<ExifInfo, IdentifyError> {
    Identify::with_config(IdentifyConfig::from_env()).extract_exif(file_path)
}

fn spawn_reader<R>(mut reader: R) -> Receiver<std::io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = reader.read_to_end(&mut buffer).map(|_| buffer);
        // Receiver is gone when the caller already gave up on this run
        let _ = sender.send(result);
    });
    receiver
}

fn classify_failure(path: &Path, status: ExitStatus, stderr: String) -> IdentifyError {
    if stderr.contains("No such file or directory") || stderr.contains("unable to open image") {
        return IdentifyError::FileNotFound {
            path: PathBuf::from(path),
            stderr,
        };
    }

    let message = stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("identify exited with {}", status));

    IdentifyError::Process {
        message,
        stderr,
        status: status.code(),
    }
}
