/// Preference values kept in browser.storage.sync

use crate::descriptor::{TargetDescriptor, default_value};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to read synced storage: {0}")]
    Load(String),
    #[error("failed to write synced storage: {0}")]
    Save(String),
    #[error("unreadable preferences: {0}")]
    Parse(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

/// Stored preferences, exactly as found in storage.
///
/// An explicit `false` is kept, so "turned off" and "never configured"
/// stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Preferences {
    values: BTreeMap<String, bool>,
}

impl Preferences {
    pub fn new() -> Self {
        Preferences {
            values: BTreeMap::new(),
        }
    }

    /// Parse the object returned by a bulk storage read
    pub fn from_value(value: &Value) -> Result<Self, PreferenceError> {
        let mut preferences = Preferences::new();
        match value {
            Value::Null => {}
            Value::Object(entries) => {
                for (key, entry) in entries {
                    match entry {
                        Value::Bool(flag) => {
                            preferences.values.insert(key.clone(), *flag);
                        }
                        Value::Null => {}
                        other => log::warn!("Ignoring non-boolean value for {}: {}", key, other),
                    }
                }
            }
            other => {
                return Err(PreferenceError::Parse(format!("expected an object, got {}", other)));
            }
        }
        Ok(preferences)
    }

    /// Stored value for `key`, `None` when never set
    pub fn get(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    /// Stored value, or the built-in default when unset
    pub fn value_or_default(&self, key: &str) -> bool {
        self.get(key).unwrap_or_else(|| default_value(key))
    }

    pub fn set(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Plain JSON object, the shape storage.sync.set expects
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), Value::Bool(*value)))
                .collect(),
        )
    }
}

/// Mark each descriptor from its stored preference; unset keys use the default
pub fn apply_preferences(descriptors: &mut [TargetDescriptor], preferences: &Preferences) {
    for descriptor in descriptors.iter_mut() {
        descriptor.desired_hidden = preferences.value_or_default(descriptor.option_name);
    }
}
