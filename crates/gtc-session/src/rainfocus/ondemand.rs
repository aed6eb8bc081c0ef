use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{
    client::decode,
    config::Endpoints,
    error::{Result, SessionError},
    model::{Participant, Session, SessionSource},
    rainfocus::models::OnDemandResponse,
};

/// Client for the public on-demand catalog. No authentication.
pub struct OnDemandClient {
    client: Client,
    endpoints: Endpoints,
}

impl OnDemandClient {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    fn session_url(&self, session_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoints.ondemand_session_url).map_err(|e| {
            SessionError::shape(format!(
                "invalid on-demand endpoint {}: {e}",
                self.endpoints.ondemand_session_url
            ))
        })?;
        url.path_segments_mut()
            .map_err(|_| SessionError::shape("on-demand endpoint cannot be a base url"))?
            .pop_if_empty()
            .push(session_id);
        Ok(url)
    }

    pub async fn fetch_session(&self, session_id: &str) -> Result<Session> {
        let url = self.session_url(session_id)?;
        let body = self.client.get(url.clone()).send().await?.text().await?;
        debug!("response from {}: {}", url, body);
        parse_session(&body)
    }
}

/// The entry id is the part after the last `:` of a composite asset url
/// such as `kaltura:1_abc123`.
pub fn entry_id_from_asset_url(asset_url: &str) -> Result<&str> {
    asset_url
        .rsplit_once(':')
        .map(|(_, id)| id)
        .ok_or_else(|| SessionError::shape(format!("asset url without entry id: {asset_url}")))
}

pub(crate) fn parse_session(body: &str) -> Result<Session> {
    let response: OnDemandResponse = decode(body, "on-demand lookup")?;

    let asset = response
        .assets
        .first()
        .ok_or_else(|| SessionError::shape("on-demand session has no assets"))?;
    let entry_id = entry_id_from_asset_url(&asset.asset_url)?.to_string();

    Ok(Session {
        session_id: response.session_id,
        title: response.title.trim().to_string(),
        time: response.start_time,
        length: response.duration,
        abstract_text: response.description,
        participants: response
            .speakers
            .into_iter()
            .map(|s| Participant {
                // kept verbatim, a missing half leaves a stray space
                name: format!("{} {}", s.first_name, s.last_name),
                bio: s.bio,
            })
            .collect(),
        attributes: response.attributes,
        source: SessionSource::OnDemand { entry_id },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ONDEMAND_FIXTURE: &str = r#"{
        "sessionId": "S62457",
        "title": "Accelerating Genomics ",
        "startTime": "2024-03-19T17:00:00Z",
        "duration": 1500.5,
        "description": "GPU-accelerated pipelines.",
        "speakers": [
            {"firstName": "Rosalind", "lastName": "Franklin", "bio": "Chemist."},
            {"firstName": "Cher", "lastName": ""}
        ],
        "attributes": {"Industry": "Healthcare"},
        "assets": [{"assetUrl": "entry:abc123"}, {"assetUrl": "entry:other"}]
    }"#;

    #[test]
    fn test_entry_id_after_last_colon() {
        assert_eq!(entry_id_from_asset_url("entry:abc123").unwrap(), "abc123");
        assert_eq!(
            entry_id_from_asset_url("kaltura:2935771:1_x9y8").unwrap(),
            "1_x9y8"
        );
        assert!(matches!(
            entry_id_from_asset_url("abc123"),
            Err(SessionError::DataShape(_))
        ));
    }

    #[test]
    fn test_parse_ondemand_fixture() {
        let session = parse_session(ONDEMAND_FIXTURE).unwrap();
        assert_eq!(session.session_id, "S62457");
        assert_eq!(session.title, "Accelerating Genomics");
        assert_eq!(session.length, 1500.5);
        assert_eq!(
            session.source,
            SessionSource::OnDemand {
                entry_id: "abc123".into()
            }
        );
        assert_eq!(session.participants[0].name, "Rosalind Franklin");
        assert_eq!(session.participants[0].bio.as_deref(), Some("Chemist."));
        assert_eq!(session.participants[1].name, "Cher ");
        assert_eq!(session.attributes["Industry"], "Healthcare");
    }

    #[test]
    fn test_parse_ondemand_without_assets() {
        let body = r#"{"sessionId": "S1", "title": "t", "duration": 1, "assets": []}"#;
        assert!(matches!(
            parse_session(body),
            Err(SessionError::DataShape(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_session_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/nod/api/v1/session/S62457"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ONDEMAND_FIXTURE))
            .expect(1)
            .mount(&server)
            .await;

        let client = OnDemandClient::new(Client::new(), Endpoints::with_base(&server.uri()));
        let session = client.fetch_session("S62457").await.unwrap();
        assert_eq!(session.participants.len(), 2);
    }
}
