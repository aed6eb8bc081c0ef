use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Download a video from the NVIDIA GTC event
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["id", "conf_session_id", "ondemand_session_url"]),
))]
pub struct Args {
    /// The Rainfocus auth token (required for conference sessions)
    #[arg(short = 'a', long = "rainforest-auth", env = "GTCDL_RAINFOCUS_AUTH")]
    pub rainforest_auth: Option<String>,

    /// The directory to save the video to
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Write metadata to a JSON file next to the video
    #[arg(short, long)]
    pub meta: bool,

    /// The ID of the conference session to download
    pub id: Option<String>,

    /// The ID of a conference catalog session
    #[arg(short = 'c', long = "conf-session-id")]
    pub conf_session_id: Option<String>,

    /// The URL of an on-demand session page
    #[arg(short = 'o', long = "ondemand-session-url")]
    pub ondemand_session_url: Option<String>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Which catalog a run reads the session from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Conference(String),
    OnDemand(String),
}

impl Args {
    pub fn source(&self) -> Option<Source> {
        if let Some(url) = &self.ondemand_session_url {
            return Some(Source::OnDemand(url.clone()));
        }
        self.conf_session_id
            .as_ref()
            .or(self.id.as_ref())
            .map(|id| Source::Conference(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_legacy_positional_id() {
        let args = Args::try_parse_from(["gtcdl", "-a", "tok", "-m", "S51234"]).unwrap();
        assert!(args.meta);
        assert_eq!(args.rainforest_auth.as_deref(), Some("tok"));
        assert_eq!(args.source(), Some(Source::Conference("S51234".into())));
        assert_eq!(args.directory, PathBuf::from("."));
    }

    #[test]
    fn test_conference_flag() {
        let args = Args::try_parse_from(["gtcdl", "-c", "S1", "-d", "/tmp/out"]).unwrap();
        assert_eq!(args.source(), Some(Source::Conference("S1".into())));
        assert_eq!(args.directory, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_ondemand_flag() {
        let args =
            Args::try_parse_from(["gtcdl", "-o", "https://www.nvidia.com/on-demand/session/x/"])
                .unwrap();
        assert_eq!(
            args.source(),
            Some(Source::OnDemand(
                "https://www.nvidia.com/on-demand/session/x/".into()
            ))
        );
    }

    #[test]
    fn test_sources_are_exclusive_and_required() {
        assert!(Args::try_parse_from(["gtcdl", "-c", "S1", "-o", "https://x"]).is_err());
        assert!(Args::try_parse_from(["gtcdl", "S1", "-c", "S2"]).is_err());
        assert!(Args::try_parse_from(["gtcdl", "-m"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["gtcdl", "S1", "-v", "-q"]).is_err());
    }
}
