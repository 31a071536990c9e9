//! Shared fixtures for the race simulation tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use race_sim::simulation::{ConfigError, ConfigParameters, ConfigSource};
use serde_json::{json, Value};

/// Tuning used by the worked example: accel 500, decel 300, top speed 200
pub fn scenario_document() -> Value {
    json!({
        "gameplay": {
            "acceleration": 500,
            "deceleration": 300,
            "maxSpeed": 200
        },
        "audio": {
            "engine": {
                "minPitch": 0.8,
                "maxPitch": 2.0,
                "minVolume": 0.2,
                "maxVolume": 0.8
            },
            "music": {
                "volume": 0.5,
                "speedControl": true
            }
        }
    })
}

pub fn scenario_config() -> ConfigParameters {
    ConfigParameters::from_document(&scenario_document()).expect("scenario config should load")
}

fn pointer(field: &str) -> String {
    format!("/{}", field.replace('.', "/"))
}

/// Copy of `doc` with the dotted `field` replaced by `value`
pub fn with_field(doc: &Value, field: &str, value: Value) -> Value {
    let mut doc = doc.clone();
    *doc.pointer_mut(&pointer(field)).expect("field should exist") = value;
    doc
}

/// Copy of `doc` with the dotted `field` removed
pub fn without_field(doc: &Value, field: &str) -> Value {
    let mut doc = doc.clone();
    let (parent, key) = field.rsplit_once('.').expect("field should be nested");
    doc.pointer_mut(&pointer(parent))
        .and_then(Value::as_object_mut)
        .expect("parent should be an object")
        .remove(key);
    doc
}

/// A source whose document can be changed between fetches
#[derive(Clone)]
pub struct SharedSource(Arc<Mutex<Value>>);

impl SharedSource {
    pub fn new(document: Value) -> Self {
        Self(Arc::new(Mutex::new(document)))
    }

    pub fn set(&self, document: Value) {
        *self.0.lock().expect("source lock poisoned") = document;
    }
}

impl ConfigSource for SharedSource {
    fn fetch(&self) -> Result<Value, ConfigError> {
        Ok(self.0.lock().expect("source lock poisoned").clone())
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
