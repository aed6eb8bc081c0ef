mod download;
mod manifest;
mod probe;

pub use download::{DownloadOutcome, NoProgress, ProgressSink, ProgressTracker, download};
pub use manifest::build_manifest_url;
pub use probe::probe_duration;

use std::ffi::OsStr;

/// Request headers sent by ffprobe/ffmpeg to the CDN.
///
/// Order matters: the CDN answers 404 when these arrive in any other order.
pub const CDN_HEADERS: [(&str, &str); 5] = [
    ("Accept", "*/*"),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("Origin", "https://www.nvidia.com"),
    ("Connection", "keep-alive"),
    ("Referer", "https://www.nvidia.com/"),
];

/// One `-headers "<Name>: <Value>"` pair per header, in the given order.
pub fn header_args(headers: &[(&str, &str)]) -> Vec<String> {
    let mut args = Vec::with_capacity(headers.len() * 2);
    for (name, value) in headers {
        args.push("-headers".to_string());
        args.push(format!("{name}: {value}"));
    }
    args
}

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// A `tokio::process::Command` that does not pop up a console window on Windows.
pub(crate) fn tool_command(program: impl AsRef<OsStr>) -> tokio::process::Command {
    #[allow(unused_mut)]
    let mut cmd = tokio::process::Command::new(program);
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.as_std_mut().creation_flags(CREATE_NO_WINDOW);
    }
    cmd
}
