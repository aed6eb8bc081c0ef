use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::{
    error::Result,
    model::{FlavorProfile, Participant, Session},
};

/// Flattened sidecar record: session fields plus the chosen flavor.
#[derive(Debug, Clone, Serialize)]
pub struct OutputMetadata {
    pub url: String,
    pub session_id: String,
    pub title: String,
    pub time: String,
    pub length: f64,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub participants: Vec<Participant>,
    pub attributes: IndexMap<String, String>,
    pub width: u32,
    pub height: u32,
    pub bitrate: f64,
    pub frame_rate: f64,
}

impl OutputMetadata {
    pub fn build(catalog_page_url: &str, session: &Session, profile: &FlavorProfile) -> Self {
        Self {
            url: format!("{catalog_page_url}{}", session.session_id),
            session_id: session.session_id.clone(),
            title: session.title.clone(),
            time: session.time.clone(),
            length: session.length,
            abstract_text: session.abstract_text.clone(),
            participants: session.participants.clone(),
            attributes: session.attributes.clone(),
            width: profile.width,
            height: profile.height,
            bitrate: profile.bitrate,
            frame_rate: profile.frame_rate,
        }
    }

    /// Serializes with 4-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Writes the sidecar for `session` and `profile`, replacing any file at `path`.
pub async fn write_metadata(
    path: &Path,
    catalog_page_url: &str,
    session: &Session,
    profile: &FlavorProfile,
) -> Result<OutputMetadata> {
    let metadata = OutputMetadata::build(catalog_page_url, session, profile);
    let json = metadata.to_json()?;
    tokio::fs::write(path, json).await?;
    debug!("metadata written to {}", path.display());
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionSource;
    use serde_json::Value;

    fn session() -> Session {
        let mut attributes = IndexMap::new();
        attributes.insert("Topic".to_string(), "Robotics".to_string());
        Session {
            session_id: "S51234".into(),
            title: "Sim-to-Real für Roboter".into(),
            time: "2024/03/18 16:00:00".into(),
            length: 2400.0,
            abstract_text: "Transfer learning.".into(),
            participants: vec![Participant {
                name: "Ada Lovelace".into(),
                bio: None,
            }],
            attributes,
            source: SessionSource::Conference {
                session_time_id: "T1".into(),
            },
        }
    }

    fn profile() -> FlavorProfile {
        FlavorProfile {
            width: 1920,
            height: 1080,
            bitrate: 4850.0,
            frame_rate: 30.0,
            id: "1_f2".into(),
        }
    }

    #[test]
    fn test_build_record() {
        let metadata = OutputMetadata::build(
            "https://www.nvidia.com/gtc/session-catalog/?#/session/",
            &session(),
            &profile(),
        );
        assert_eq!(
            metadata.url,
            "https://www.nvidia.com/gtc/session-catalog/?#/session/S51234"
        );
        assert_eq!(metadata.width, 1920);
        assert_eq!(metadata.frame_rate, 30.0);
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let json = OutputMetadata::build("u/", &session(), &profile())
            .to_json()
            .unwrap();
        assert!(json.starts_with("{\n    \"url\": \"u/S51234\",\n    \"session_id\""));
        assert!(json.contains("\n        {\n            \"name\": \"Ada Lovelace\",\n            \"bio\": null\n        }"));
        assert!(json.contains("für"));
    }

    #[tokio::test]
    async fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.json");
        std::fs::write(&path, "stale contents that are longer than nothing").unwrap();

        write_metadata(&path, "u/", &session(), &profile())
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(value["abstract"], "Transfer learning.");
        assert_eq!(value["attributes"]["Topic"], "Robotics");
        assert_eq!(value["bitrate"], 4850.0);
        assert_eq!(keys.len(), 12);
    }
}
