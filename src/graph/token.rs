//! Tokens and their lightweight word echoes

use super::label::{LabelLayer, LabelRegistry, Labelled};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single word-level unit of the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Global position, unique across one parse run
    pub index: usize,
    /// Text as it appears in the `word` field
    pub surface_form: String,
    /// Annotation layers registered on this token
    pub labels: LabelRegistry,
}

impl Token {
    pub fn new(surface_form: impl Into<String>, index: usize) -> Self {
        Self {
            index,
            surface_form: surface_form.into(),
            labels: LabelRegistry::new(),
        }
    }

    /// Register a label on this token, replacing any earlier value for the layer
    pub fn register_label(
        &mut self,
        layer: impl Into<LabelLayer>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.labels.register(layer, value)
    }

    pub fn label(&self, layer: &LabelLayer) -> Option<&str> {
        self.labels.get(layer)
    }
}

impl Labelled for Token {
    fn identity(&self) -> String {
        format!("token-{}", self.index)
    }

    fn labels(&self) -> &LabelRegistry {
        &self.labels
    }
}

/// Raw field values for one token, keyed by their source field name
///
/// Unlike [`Token`], a word does not translate field names into label
/// layers and never receives labels from mention resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub index: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Word {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            index,
            text: text.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(field.into(), value.into());
        self
    }

    pub fn tag(&self, field: &str) -> Option<&str> {
        self.tags.get(field).map(String::as_str)
    }
}
