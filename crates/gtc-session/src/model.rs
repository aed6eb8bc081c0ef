use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub bio: Option<String>,
}

/// Where a session came from, and the identifier needed to reach its media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    /// Conference API session; resolved to CDN credentials through the webinar endpoint.
    Conference { session_time_id: String },
    /// On-demand session; carries the CDN entry id directly.
    OnDemand { entry_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub title: String,
    // scheduled start, as reported by the source API
    pub time: String,
    // seconds
    pub length: f64,
    pub abstract_text: String,
    pub participants: Vec<Participant>,
    pub attributes: IndexMap<String, String>,
    pub source: SessionSource,
}

impl Session {
    /// Presenter names joined with `", "`, in listing order.
    pub fn display_names(&self) -> String {
        self.participants
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// CDN credential bundle for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webinar {
    pub partner_id: String,
    pub entry_id: String,
    pub user_id: String,
    pub ks: Option<String>,
}

impl Webinar {
    /// Credentials for an on-demand session: no user and no token, the catalog
    /// request opens an anonymous widget session instead.
    pub fn anonymous(partner_id: impl Into<String>, entry_id: impl Into<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            entry_id: entry_id.into(),
            user_id: String::new(),
            ks: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorProfile {
    pub width: u32,
    pub height: u32,
    pub bitrate: f64,
    #[serde(rename = "frameRate")]
    pub frame_rate: f64,
    pub id: String,
}

impl FlavorProfile {
    pub fn score(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height) * self.bitrate * self.frame_rate
    }
}

impl fmt::Display for FlavorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ {} fps, {} kbps (id: {})",
            self.width, self.height, self.frame_rate, self.bitrate, self.id
        )
    }
}

/// The canonical entry (after redirects) and its encoded flavors.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamCatalog {
    pub entry_id: String,
    pub profiles: Vec<FlavorProfile>,
}
