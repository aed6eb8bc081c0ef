use serde::Deserialize;

/// Remote endpoints and fixed API constants.
///
/// Defaults point at the production services; every field can be overridden
/// (for example from a config file, or a local mock server in tests).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub conference_session_url: String,
    pub webinar_url: String,
    pub ondemand_session_url: String,
    pub multirequest_url: String,
    /// Scheme and host used when building playManifest URLs.
    pub manifest_host: String,
    /// Prefix of the human-facing catalog link; the session id is appended.
    pub catalog_page_url: String,
    pub widget_id: String,
    pub api_profile_id: String,
    pub origin: String,
    pub referer: String,
    pub client_tag: String,
    pub api_version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            conference_session_url: "https://events.rainfocus.com/api/session".to_string(),
            webinar_url: "https://events.rainfocus.com/api/rainfocus/v2/webinar".to_string(),
            ondemand_session_url: "https://api-prod.nvidia.com/services/nod/api/v1/session"
                .to_string(),
            multirequest_url: "https://cdnapisec.kaltura.com/api_v3/service/multirequest"
                .to_string(),
            manifest_host: "https://cdnapisec.kaltura.com".to_string(),
            catalog_page_url: "https://www.nvidia.com/gtc/session-catalog/?#/session/"
                .to_string(),
            widget_id: "C5aHR3OlA60pUDILVE33Jbn8hagS4Fsw".to_string(),
            api_profile_id: "hUVpYtzXsLcOoh4rkNjxpSodRKdtJlUs".to_string(),
            origin: "https://www.nvidia.com".to_string(),
            referer: "https://www.nvidia.com/".to_string(),
            client_tag: "html5:v3.17.10".to_string(),
            api_version: "3.3.0".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every HTTP endpoint at `base`, keeping the default paths.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            conference_session_url: format!("{base}/api/session"),
            webinar_url: format!("{base}/api/rainfocus/v2/webinar"),
            ondemand_session_url: format!("{base}/services/nod/api/v1/session"),
            multirequest_url: format!("{base}/api_v3/service/multirequest"),
            manifest_host: base.to_string(),
            ..Self::default()
        }
    }
}

static DEFAULT_FFMPEG_PATH: &str = "ffmpeg";
static DEFAULT_FFPROBE_PATH: &str = "ffprobe";

/// Locations of the external media tools.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: DEFAULT_FFMPEG_PATH.to_string(),
            ffprobe: DEFAULT_FFPROBE_PATH.to_string(),
        }
    }
}

impl ToolPaths {
    /// Resolves tool paths: explicit override, then `FFMPEG_PATH` / `FFPROBE_PATH`, then `PATH` lookup.
    pub fn resolve(ffmpeg: Option<String>, ffprobe: Option<String>) -> Self {
        Self {
            ffmpeg: ffmpeg
                .or_else(|| std::env::var("FFMPEG_PATH").ok())
                .unwrap_or_else(|| DEFAULT_FFMPEG_PATH.to_string()),
            ffprobe: ffprobe
                .or_else(|| std::env::var("FFPROBE_PATH").ok())
                .unwrap_or_else(|| DEFAULT_FFPROBE_PATH.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_rewrites_hosts_only() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.multirequest_url,
            "http://127.0.0.1:9000/api_v3/service/multirequest"
        );
        assert_eq!(endpoints.manifest_host, "http://127.0.0.1:9000");
        assert_eq!(endpoints.widget_id, Endpoints::default().widget_id);
    }

    #[test]
    fn test_explicit_tool_path_wins() {
        let paths = ToolPaths::resolve(Some("/opt/ffmpeg".into()), Some("/opt/ffprobe".into()));
        assert_eq!(paths.ffmpeg, "/opt/ffmpeg");
        assert_eq!(paths.ffprobe, "/opt/ffprobe");
    }

    #[test]
    fn test_partial_endpoint_override_keeps_defaults() {
        let endpoints: Endpoints =
            serde_json::from_str(r#"{"client_tag": "html5:v9"}"#).unwrap();
        assert_eq!(endpoints.client_tag, "html5:v9");
        assert_eq!(endpoints.api_version, "3.3.0");
    }
}
