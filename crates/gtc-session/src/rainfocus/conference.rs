use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::{
    client::decode,
    config::Endpoints,
    error::{Result, SessionError},
    model::{Participant, Session, SessionSource, Webinar},
    rainfocus::models::{SessionResponse, WebinarResponse},
};

const RF_WIDGET_ID: HeaderName = HeaderName::from_static("rfwidgetid");
const RF_API_PROFILE_ID: HeaderName = HeaderName::from_static("rfapiprofileid");
const RF_AUTH_TOKEN: HeaderName = HeaderName::from_static("rfauthtoken");

/// Authenticated client for the live conference catalog.
pub struct ConferenceClient {
    client: Client,
    endpoints: Endpoints,
    headers: HeaderMap,
}

impl ConferenceClient {
    /// Fails with [`SessionError::Authentication`] when the token is missing or blank.
    pub fn new(client: Client, endpoints: Endpoints, auth_token: Option<&str>) -> Result<Self> {
        let token = auth_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::Authentication)?;
        let headers = Self::build_headers(&endpoints, token)?;
        Ok(Self {
            client,
            endpoints,
            headers,
        })
    }

    fn build_headers(endpoints: &Endpoints, token: &str) -> Result<HeaderMap> {
        let value = |v: &str| {
            HeaderValue::from_str(v)
                .map_err(|e| SessionError::DataShape(format!("invalid header value: {e}")))
        };

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::REFERER, value(&endpoints.referer)?);
        headers.insert(header::ORIGIN, value(&endpoints.origin)?);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        headers.insert(RF_WIDGET_ID, value(&endpoints.widget_id)?);
        headers.insert(RF_API_PROFILE_ID, value(&endpoints.api_profile_id)?);
        headers.insert(
            RF_AUTH_TOKEN,
            HeaderValue::from_str(token).map_err(|_| SessionError::Authentication)?,
        );
        Ok(headers)
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let body = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .form(form)
            .send()
            .await?
            .text()
            .await?;
        debug!("response from {}: {}", url, body);
        Ok(body)
    }

    pub async fn fetch_session(&self, session_id: &str) -> Result<Session> {
        let body = self
            .post_form(&self.endpoints.conference_session_url, &[("id", session_id)])
            .await?;
        parse_session(&body)
    }

    /// Exchanges a conference session's time id for CDN credentials.
    pub async fn fetch_webinar(&self, session: &Session) -> Result<Webinar> {
        let SessionSource::Conference { session_time_id } = &session.source else {
            return Err(SessionError::shape(format!(
                "session {} has no time id to resolve",
                session.session_id
            )));
        };

        let body = self
            .post_form(
                &self.endpoints.webinar_url,
                &[("sessionTimeId", session_time_id.as_str())],
            )
            .await?;
        parse_webinar(&body)
    }
}

pub(crate) fn parse_session(body: &str) -> Result<Session> {
    let response: SessionResponse = decode(body, "session lookup")?;

    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| SessionError::shape("session lookup returned no items"))?;
    let time = item
        .times
        .into_iter()
        .next()
        .ok_or_else(|| SessionError::shape("session has no scheduled times"))?;

    Ok(Session {
        session_id: item.session_id,
        title: item.title.trim().to_string(),
        time: time.utc_start_time,
        length: item.length,
        abstract_text: item.abstract_text,
        participants: item
            .participants
            .into_iter()
            .map(|p| Participant {
                name: p.full_name,
                bio: p.global_bio,
            })
            .collect(),
        attributes: item
            .attribute_values
            .into_iter()
            .map(|a| (a.attribute, a.value))
            .collect(),
        source: SessionSource::Conference {
            session_time_id: time.session_time_id,
        },
    })
}

pub(crate) fn parse_webinar(body: &str) -> Result<Webinar> {
    let response: WebinarResponse = decode(body, "webinar lookup")?;
    let data = response.data;
    Ok(Webinar {
        partner_id: data.partner_id,
        entry_id: data.entry_id,
        user_id: data.user_id,
        ks: Some(data.ks),
    })
}
