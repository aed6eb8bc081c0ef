use std::fmt::Display;

#[cfg(feature = "colored-output")]
use colored::*;
use gtc_session::media::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints the `label: value` lines a run reports on stdout.
pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn field(&self, label: &str, value: impl Display) {
        println!("{}: {}", self.label(label), value);
    }

    pub fn status(&self, label: &str, ok: bool, text: &str) {
        println!("{}: {}", self.label(label), self.state(ok, text));
    }

    #[cfg(feature = "colored-output")]
    fn label(&self, label: &str) -> String {
        if self.colored {
            label.green().to_string()
        } else {
            label.to_string()
        }
    }

    #[cfg(not(feature = "colored-output"))]
    fn label(&self, label: &str) -> String {
        let _ = self.colored;
        label.to_string()
    }

    #[cfg(feature = "colored-output")]
    fn state(&self, ok: bool, text: &str) -> String {
        match (self.colored, ok) {
            (false, _) => text.to_string(),
            (true, true) => text.cyan().to_string(),
            (true, false) => text.red().bold().to_string(),
        }
    }

    #[cfg(not(feature = "colored-output"))]
    fn state(&self, _ok: bool, text: &str) -> String {
        text.to_string()
    }
}

/// Renders ffmpeg progress as a seconds-based bar.
pub struct DownloadBar {
    bar: ProgressBar,
    hidden: bool,
}

impl DownloadBar {
    pub fn new(hidden: bool) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            hidden,
        }
    }
}

impl ProgressSink for DownloadBar {
    fn start(&mut self, total_secs: u64) {
        if self.hidden {
            return;
        }
        let style = ProgressStyle::with_template(
            "{msg}: {percent:>3}%|{wide_bar}| {pos}/{len}s [{elapsed_precise}<{eta_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        self.bar = ProgressBar::new(total_secs)
            .with_style(style)
            .with_message("download");
    }

    fn advance(&mut self, delta_secs: u64) {
        self.bar.inc(delta_secs);
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
