use std::path::Path;
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::{
    error::{Result, SessionError},
    media::{header_args, tool_command},
};

static OUT_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"out_time_ms=(\d+)").unwrap());

/// Receives download progress in whole seconds.
pub trait ProgressSink {
    fn start(&mut self, total_secs: u64);
    fn advance(&mut self, delta_secs: u64);
    fn finish(&mut self) {}
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _total_secs: u64) {}
    fn advance(&mut self, _delta_secs: u64) {}
}

/// Turns ffmpeg `-progress` lines into forward-only deltas of whole seconds.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    elapsed_secs: u64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of seconds gained since the last report, if any.
    pub fn observe(&mut self, line: &str) -> Option<u64> {
        let caps = OUT_TIME_REGEX.captures(line)?;
        // despite the name, ffmpeg reports microseconds here
        let micros: u64 = caps[1].parse().ok()?;
        let secs = micros / 1_000_000;
        if secs > self.elapsed_secs {
            let delta = secs - self.elapsed_secs;
            self.elapsed_secs = secs;
            Some(delta)
        } else {
            None
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }
}

/// Exit status of the download tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Process exit code; -1 when the process was terminated by a signal.
    pub exit_code: i32,
}

impl DownloadOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn into_result(self) -> Result<()> {
        if self.success() {
            Ok(())
        } else {
            Err(SessionError::ToolExecution {
                code: self.exit_code,
            })
        }
    }
}

/// Remuxes `manifest_url` into `output` with ffmpeg (`-codec copy`).
///
/// Progress lines are read from ffmpeg's stdout while it runs. The exit code
/// is returned as-is; a nonzero code is not turned into an error here.
pub async fn download(
    ffmpeg_path: &str,
    manifest_url: &str,
    headers: &[(&str, &str)],
    expected_duration_secs: f64,
    output: &Path,
    progress: &mut dyn ProgressSink,
) -> Result<DownloadOutcome> {
    let mut cmd = tool_command(ffmpeg_path);
    cmd.args(["-loglevel", "error", "-progress", "pipe:1"])
        .args(header_args(headers))
        .args(["-i", manifest_url, "-codec", "copy"])
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    debug!("ffmpeg command: {:?}", cmd.as_std());

    let mut child = cmd.spawn()?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("ffmpeg stdout was not captured"))?;

    progress.start(expected_duration_secs.max(0.0) as u64);
    let mut tracker = ProgressTracker::new();
    let mut lines = BufReader::new(stdout).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(delta) = tracker.observe(&line) {
            progress.advance(delta);
        }
    }
    progress.finish();

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or(-1);
    info!(
        "ffmpeg exited with code {} after {}s of media",
        exit_code,
        tracker.elapsed_secs()
    );
    Ok(DownloadOutcome { exit_code })
}
