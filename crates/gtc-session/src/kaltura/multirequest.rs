//! Body builder for the CDN `multirequest` batch endpoint.
//!
//! Steps are numbered from 1 in insertion order and serialized under their
//! number as object keys. A later step reads an earlier step's result through
//! a placeholder string that the server expands, e.g. `{1:result:ks}`.

use serde_json::{Map, Value, json};

use crate::config::Endpoints;

/// Placeholder for a field of an earlier step's result.
pub fn step_ref(step: usize, path: &str) -> String {
    format!("{{{step}:result:{path}}}")
}

#[derive(Debug, Clone)]
pub struct MultiRequest {
    steps: Vec<Value>,
    envelope: Map<String, Value>,
}

impl MultiRequest {
    pub fn new(endpoints: &Endpoints, partner_id: &str) -> Self {
        let mut envelope = Map::new();
        envelope.insert("apiVersion".into(), json!(endpoints.api_version));
        envelope.insert("format".into(), json!(1));
        envelope.insert("clientTag".into(), json!(endpoints.client_tag));
        envelope.insert("partnerId".into(), json!(partner_id));
        Self {
            steps: Vec::new(),
            envelope,
        }
    }

    /// Session token applied to the whole batch.
    pub fn with_ks(mut self, ks: &str) -> Self {
        self.envelope.insert("ks".into(), json!(ks));
        self
    }

    /// Appends a step and returns its number.
    pub fn push(&mut self, step: Value) -> usize {
        self.steps.push(step);
        self.steps.len()
    }

    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        for (i, step) in self.steps.into_iter().enumerate() {
            body.insert((i + 1).to_string(), step);
        }
        body.extend(self.envelope);
        Value::Object(body)
    }
}

pub fn start_widget_session(partner_id: &str) -> Value {
    json!({
        "service": "session",
        "action": "startWidgetSession",
        "widgetId": format!("_{partner_id}"),
    })
}

/// Lists the entries redirected from `entry_id`, returning only their ids.
pub fn list_redirected(entry_id: &str, ks: &str) -> Value {
    json!({
        "service": "baseEntry",
        "action": "list",
        "ks": ks,
        "filter": { "redirectFromEntryId": entry_id },
        "responseProfile": { "type": 1, "fields": "id" },
    })
}

pub fn playback_context(entry_id: &str, ks: &str) -> Value {
    json!({
        "service": "baseEntry",
        "action": "getPlaybackContext",
        "entryId": entry_id,
        "ks": ks,
        "contextDataParams": {
            "objectType": "KalturaContextDataParams",
            "flavorTags": "all",
        },
    })
}
