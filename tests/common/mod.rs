//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use viewkit::dom::Document;
use viewkit::resource::{Resource, ResourceError, Verb};

/// Build a document whose body holds `markup`.
pub fn document_with(markup: &str) -> Document {
    let mut document = Document::new();
    let body = document.body();
    document
        .append_markup(body, markup)
        .expect("Fixture markup must parse");
    document
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Valid fixture date")
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// In-memory resource answering by exact path. Unknown paths answer `[]`.
#[derive(Default)]
pub struct ScriptedResource {
    responses: Mutex<HashMap<String, Result<Value, u16>>>,
    calls: Mutex<Vec<(Verb, String, Option<Value>)>>,
}

impl ScriptedResource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, value: Value) {
        self.responses.lock().insert(path.to_string(), Ok(value));
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.responses.lock().insert(path.to_string(), Err(status));
    }

    pub fn calls(&self) -> Vec<(Verb, String, Option<Value>)> {
        self.calls.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, path, _)| path).collect()
    }
}

#[async_trait]
impl Resource for ScriptedResource {
    async fn call(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, ResourceError> {
        self.calls.lock().push((verb, path.to_string(), body));
        let response = self.responses.lock().get(path).cloned();
        match response {
            Some(Ok(value)) => Ok(value),
            Some(Err(status)) => Err(ResourceError::Status {
                verb,
                path: path.to_string(),
                status,
            }),
            None => Ok(json!([])),
        }
    }
}
