use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One street name offered to the user.
///
/// Providers may attach extra fields (locality, postcode, ids); they are kept
/// verbatim and never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suggestion {
    pub street_name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Suggestion {
    pub fn new(street_name: impl Into<String>) -> Self {
        Self {
            street_name: street_name.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Provider-ordered suggestion list. Uses Arc so cache hits clone cheaply.
pub type Suggestions = Arc<[Suggestion]>;
