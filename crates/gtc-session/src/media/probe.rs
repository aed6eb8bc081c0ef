use std::process::Stdio;

use tracing::debug;

use crate::{
    error::{Result, SessionError},
    media::{header_args, tool_command},
};

/// Asks ffprobe for the container duration of `manifest_url`, in seconds.
pub async fn probe_duration(
    ffprobe_path: &str,
    manifest_url: &str,
    headers: &[(&str, &str)],
) -> Result<f64> {
    let mut cmd = tool_command(ffprobe_path);
    cmd.args([
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ])
    .args(header_args(headers))
    .arg(manifest_url)
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());
    debug!("ffprobe command: {:?}", cmd.as_std());

    let output = cmd
        .output()
        .await
        .map_err(|e| SessionError::Probe(format!("failed to run {ffprobe_path}: {e}")))?;

    // stderr is part of the answer: any diagnostic makes it unparseable
    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);
    let combined = String::from_utf8_lossy(&combined);
    parse_duration(&combined).ok_or_else(|| {
        SessionError::Probe(format!("unparseable duration: {}", combined.trim()))
    })
}

fn parse_duration(output: &str) -> Option<f64> {
    output
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("2417.233000\n"), Some(2417.233));
        assert_eq!(parse_duration("N/A\n"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[cfg(unix)]
    fn fake_tool(dir: &tempfile::TempDir, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-ffprobe");
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_reads_tool_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(&dir, "echo 1234.5");
        let duration = probe_duration(&tool, "https://example.com/a.m3u8", &[])
            .await
            .unwrap();
        assert_eq!(duration, 1234.5);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_passes_headers_in_order() {
        let dir = tempfile::tempdir().unwrap();
        // prints the arguments that follow each -headers flag
        let tool = fake_tool(
            &dir,
            r#"seen=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-headers" ]; then seen="$seen|$2"; shift; fi
  shift
done
[ "$seen" = "|Accept: */*|Origin: x" ] && echo 1 || echo bad"#,
        );
        let duration = probe_duration(
            &tool,
            "https://example.com/a.m3u8",
            &[("Accept", "*/*"), ("Origin", "x")],
        )
        .await
        .unwrap();
        assert_eq!(duration, 1.0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_stderr_noise_is_unparseable() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(&dir, "echo 'warning: something' >&2\necho 3.0");
        let err = probe_duration(&tool, "https://example.com/a.m3u8", &[])
            .await
            .unwrap_err();
        match err {
            SessionError::Probe(msg) => assert!(msg.contains("warning: something")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_unparseable_output() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_tool(&dir, "echo 'Server returned 404 Not Found' >&2");
        let err = probe_duration(&tool, "https://example.com/a.m3u8", &[])
            .await
            .unwrap_err();
        match err {
            SessionError::Probe(msg) => assert!(msg.contains("404")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
