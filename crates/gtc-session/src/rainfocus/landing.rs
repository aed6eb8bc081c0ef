//! Scrapes the on-demand landing page for the two values the on-demand API
//! does not return: the CDN partner id and the catalog session id.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{Result, SessionError};

static META_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([a-zA-Z_:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    pub partner_id: String,
    pub session_id: String,
}

impl LandingPage {
    pub async fn fetch(client: &Client, page_url: &str) -> Result<Self> {
        let html = client.get(page_url).send().await?.text().await?;
        debug!("landing page {} ({} bytes)", page_url, html.len());
        Self::scrape(&html)
    }

    pub fn scrape(html: &str) -> Result<Self> {
        let image = meta_content(html, "og:image")
            .ok_or_else(|| SessionError::shape("landing page has no og:image meta tag"))?;
        let session_id = meta_content(html, "event_sessionId")
            .ok_or_else(|| SessionError::shape("landing page has no event_sessionId meta tag"))?;

        Ok(Self {
            partner_id: partner_id_from_thumbnail(&image)?,
            session_id,
        })
    }
}

/// `content` of the first meta tag whose `property` or `name` equals `key`.
fn meta_content(html: &str, key: &str) -> Option<String> {
    META_TAG_REGEX.find_iter(html).find_map(|tag| {
        let mut matched = false;
        let mut content = None;
        for caps in ATTRIBUTE_REGEX.captures_iter(tag.as_str()) {
            let name = &caps[1];
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());
            if name.eq_ignore_ascii_case("property") || name.eq_ignore_ascii_case("name") {
                matched |= value == key;
            } else if name.eq_ignore_ascii_case("content") {
                content = Some(value.to_string());
            }
        }
        content.filter(|_| matched)
    })
}

/// Thumbnails are served as `https://<cdn>/p/<partnerId>/...`.
fn partner_id_from_thumbnail(image_url: &str) -> Result<String> {
    let url = Url::parse(&image_url.replace("&amp;", "&"))
        .map_err(|e| SessionError::shape(format!("invalid og:image url {image_url}: {e}")))?;
    let mut segments = url
        .path_segments()
        .ok_or_else(|| SessionError::shape(format!("og:image url has no path: {image_url}")))?;

    match (segments.next(), segments.next()) {
        (Some("p"), Some(id)) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(SessionError::shape(format!(
            "og:image url has no partner segment: {image_url}"
        ))),
    }
}
