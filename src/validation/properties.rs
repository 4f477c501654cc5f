//! Expected and measured audio property maps.
//!
//! Both sides of a validation are small string-keyed maps of JSON values so
//! callers can check any subset of properties the decoder reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Properties the caller expects the output file to have.
///
/// Must contain a numeric `duration` (seconds) and `sample_rate` (Hz); any
/// other key (`channels`, `encoding`, `bitrate`, `num_samples`, ...) is
/// compared against the measured value for the same key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedAudioProperties(BTreeMap<String, Value>);

impl ExpectedAudioProperties {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn duration(&self) -> Option<f64> {
        self.0.get("duration").and_then(Value::as_f64)
    }

    pub fn sample_rate(&self) -> Option<f64> {
        self.0.get("sample_rate").and_then(Value::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ExpectedAudioProperties {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Properties measured by decoding the file.
///
/// Produced by an [`AudioReader`](crate::decode::AudioReader); keys mirror
/// the expected-property map. Sample counts are frames per channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasuredAudioInfo(BTreeMap<String, Value>);

impl MeasuredAudioInfo {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn num_samples(&self) -> Option<u64> {
        self.0.get("num_samples").and_then(Value::as_u64)
    }
}
