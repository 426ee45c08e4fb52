//! Shared helpers for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Mutex;
use wiremock::{Request, Respond, ResponseTemplate};

/// Clock skew tolerated between the test host and the server
const TOLERANCE_SECS: i64 = 5;

/// `time` is before `reference`, allowing for clock skew
pub fn fuzzy_before(time: DateTime<Utc>, reference: DateTime<Utc>) -> bool {
    time <= reference + Duration::seconds(TOLERANCE_SECS)
}

/// `time` is after `reference`, allowing for clock skew
pub fn fuzzy_after(time: DateTime<Utc>, reference: DateTime<Utc>) -> bool {
    time >= reference - Duration::seconds(TOLERANCE_SECS)
}

/// In-memory Assistant workspace served through wiremock
///
/// Handles the entity routes under `/v1/workspaces/{id}/entities`. Entities
/// are kept sorted by name; the list cursor is the index of the next entity.
#[derive(Default)]
pub struct FakeWorkspace {
    entities: Mutex<BTreeMap<String, Map<String, Value>>>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> Value {
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn error(status: u16, message: &str) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_json(json!({ "error": message, "code": status }))
    }

    fn stamp_values(values: &Value) -> Value {
        let stamped: Vec<Value> = values
            .as_array()
            .into_iter()
            .flatten()
            .map(|value| {
                let mut value = value.clone();
                value["created"] = Self::now();
                value["updated"] = Self::now();
                value
            })
            .collect();
        Value::Array(stamped)
    }

    fn query(request: &Request, key: &str) -> Option<String> {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn create(&self, body: Map<String, Value>) -> ResponseTemplate {
        let Some(name) = body.get("entity").and_then(Value::as_str).map(String::from) else {
            return Self::error(400, "Missing entity");
        };
        let mut entities = self.entities.lock().unwrap();
        if entities.contains_key(&name) {
            return Self::error(409, "Entity already exists");
        }

        let mut entity = body;
        if let Some(values) = entity.get("values").cloned() {
            entity.insert("values".into(), Self::stamp_values(&values));
        }
        entity.insert("created".into(), Self::now());
        entity.insert("updated".into(), Self::now());
        entities.insert(name, entity.clone());

        ResponseTemplate::new(201).set_body_json(Value::Object(entity))
    }

    fn update(&self, name: &str, body: Map<String, Value>, append: bool) -> ResponseTemplate {
        let mut entities = self.entities.lock().unwrap();
        let Some(mut entity) = entities.remove(name) else {
            return Self::error(404, "Entity not found");
        };

        for (key, value) in body {
            if key == "values" {
                let mut values = if append {
                    entity.get("values").and_then(Value::as_array).cloned().unwrap_or_default()
                } else {
                    Vec::new()
                };
                if let Value::Array(stamped) = Self::stamp_values(&value) {
                    values.extend(stamped);
                }
                entity.insert(key, Value::Array(values));
            } else {
                entity.insert(key, value);
            }
        }
        entity.insert("updated".into(), Self::now());

        let new_name = entity["entity"].as_str().unwrap_or(name).to_string();
        entities.insert(new_name, entity.clone());
        ResponseTemplate::new(200).set_body_json(Value::Object(entity))
    }

    fn list(&self, request: &Request) -> ResponseTemplate {
        let entities = self.entities.lock().unwrap();
        let limit: usize = Self::query(request, "page_limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);
        let start: usize = Self::query(request, "cursor")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let page: Vec<Value> = entities
            .values()
            .skip(start)
            .take(limit)
            .cloned()
            .map(Value::Object)
            .collect();

        let mut pagination = json!({
            "refresh_url": request.url.path(),
            "total": page.len(),
        });
        if start + limit < entities.len() {
            let next = (start + limit).to_string();
            pagination["next_cursor"] = json!(next);
            pagination["next_url"] = json!(format!("{}?cursor={next}", request.url.path()));
        }

        ResponseTemplate::new(200).set_body_json(json!({
            "entities": page,
            "pagination": pagination,
        }))
    }
}

impl Respond for FakeWorkspace {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();
        let name = segments.get(4).copied();
        let body = || -> Map<String, Value> {
            serde_json::from_slice::<Value>(&request.body)
                .ok()
                .and_then(|v| v.as_object().cloned())
                .unwrap_or_default()
        };

        match (request.method.as_str(), name) {
            ("POST", None) => self.create(body()),
            ("GET", None) => self.list(request),
            ("GET", Some(name)) => match self.entities.lock().unwrap().get(name) {
                Some(entity) => ResponseTemplate::new(200).set_body_json(Value::Object(entity.clone())),
                None => Self::error(404, "Entity not found"),
            },
            ("POST", Some(name)) => {
                let append = Self::query(request, "append").as_deref() == Some("true");
                self.update(name, body(), append)
            }
            ("DELETE", Some(name)) => match self.entities.lock().unwrap().remove(name) {
                Some(_) => ResponseTemplate::new(200).set_body_json(json!({})),
                None => Self::error(404, "Entity not found"),
            },
            _ => Self::error(405, "Method not allowed"),
        }
    }
}
