#![allow(dead_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub items: Vec<SessionItem>,
}

#[derive(Debug, Deserialize)]
pub struct SessionItem {
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub title: String,
    pub length: f64,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub times: Vec<SessionTime>,
    pub participants: Vec<ConferenceParticipant>,
    #[serde(rename = "attributevalues")]
    pub attribute_values: Vec<AttributeValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTime {
    pub utc_start_time: String,
    #[serde(rename = "sessionTimeID")]
    pub session_time_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceParticipant {
    pub full_name: String,
    #[serde(default)]
    pub global_bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttributeValue {
    pub attribute: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct WebinarResponse {
    pub data: WebinarData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebinarData {
    #[serde(deserialize_with = "string_or_number")]
    pub partner_id: String,
    pub entry_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub ks: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandResponse {
    pub session_id: String,
    pub title: String,
    #[serde(default)]
    pub start_time: String,
    pub duration: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_url: String,
}

/// Ids arrive as JSON numbers on some deployments and strings on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}
