use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    client::decode,
    config::Endpoints,
    error::{Result, SessionError},
    kaltura::multirequest::{
        MultiRequest, list_redirected, playback_context, start_widget_session, step_ref,
    },
    model::{FlavorProfile, StreamCatalog, Webinar},
};

#[derive(Debug, Deserialize)]
struct EntryList {
    objects: Vec<EntryId>,
}

#[derive(Debug, Deserialize)]
struct EntryId {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaybackContext {
    flavor_assets: Vec<FlavorProfile>,
}

/// A built batch plus the response positions of the steps we read back.
#[derive(Debug)]
pub struct CatalogRequest {
    pub body: Value,
    list_index: usize,
    context_index: usize,
}

impl CatalogRequest {
    /// With a token: list redirects, then playback context.
    /// Without: open a widget session first and thread its token through the later steps.
    pub fn build(
        endpoints: &Endpoints,
        partner_id: &str,
        entry_id: &str,
        ks: Option<&str>,
    ) -> Self {
        let mut request = MultiRequest::new(endpoints, partner_id);

        let ks = match ks {
            Some(ks) => {
                request = request.with_ks(ks);
                ks.to_string()
            }
            None => {
                let session_step = request.push(start_widget_session(partner_id));
                step_ref(session_step, "ks")
            }
        };

        let list_step = request.push(list_redirected(entry_id, &ks));
        let context_step =
            request.push(playback_context(&step_ref(list_step, "objects:0:id"), &ks));

        Self {
            body: request.into_body(),
            list_index: list_step - 1,
            context_index: context_step - 1,
        }
    }

    pub fn parse_response(&self, body: &str) -> Result<StreamCatalog> {
        let results: Vec<Value> = decode(body, "multirequest")?;

        let list: EntryList = step_result(&results, self.list_index, "baseEntry.list")?;
        let entry_id = list
            .objects
            .into_iter()
            .next()
            .map(|e| e.id)
            .ok_or_else(|| SessionError::shape("no entry found for the requested id"))?;

        let context: PlaybackContext =
            step_result(&results, self.context_index, "baseEntry.getPlaybackContext")?;
        if context.flavor_assets.is_empty() {
            return Err(SessionError::shape(format!(
                "entry {entry_id} has no flavor assets"
            )));
        }

        Ok(StreamCatalog {
            entry_id,
            profiles: context.flavor_assets,
        })
    }
}

fn step_result<T: for<'de> Deserialize<'de>>(
    results: &[Value],
    index: usize,
    what: &str,
) -> Result<T> {
    let value = results
        .get(index)
        .ok_or_else(|| SessionError::shape(format!("{what}: missing step result")))?;

    if value.get("objectType").and_then(Value::as_str) == Some("KalturaAPIException") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(SessionError::shape(format!("{what}: {message}")));
    }

    T::deserialize(value).map_err(|e| SessionError::shape(format!("{what}: {e}")))
}

/// Client for the CDN's batched API.
pub struct CatalogClient {
    client: Client,
    endpoints: Endpoints,
}

impl CatalogClient {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        for (name, value) in [
            (header::REFERER, &self.endpoints.referer),
            (header::ORIGIN, &self.endpoints.origin),
        ] {
            let value = HeaderValue::from_str(value)
                .map_err(|e| SessionError::DataShape(format!("invalid {name} header: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    pub async fn fetch_catalog(
        &self,
        partner_id: &str,
        entry_id: &str,
        ks: Option<&str>,
    ) -> Result<StreamCatalog> {
        let headers = self.headers()?;
        let request = CatalogRequest::build(&self.endpoints, partner_id, entry_id, ks);
        debug!("multirequest body: {}", request.body);

        let body = self
            .client
            .post(&self.endpoints.multirequest_url)
            .headers(headers)
            .json(&request.body)
            .send()
            .await?
            .text()
            .await?;
        debug!("multirequest response: {}", body);

        let catalog = request.parse_response(&body)?;
        info!(
            "entry {} resolved to {} with {} flavors",
            entry_id,
            catalog.entry_id,
            catalog.profiles.len()
        );
        Ok(catalog)
    }

    pub async fn fetch_for(&self, webinar: &Webinar) -> Result<StreamCatalog> {
        self.fetch_catalog(
            &webinar.partner_id,
            &webinar.entry_id,
            webinar.ks.as_deref(),
        )
        .await
    }
}
