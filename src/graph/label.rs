//! Label layers and the per-entity label registry

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named annotation dimension on a token or cluster
///
/// Serializes as its plain layer name (e.g. `"POS"`, `"lemma"`), so
/// registries render as ordinary JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LabelLayer {
    /// Original surface text before normalization
    Raw,
    /// Part-of-speech tag
    Pos,
    Lemma,
    /// Named-entity type
    Entity,
    /// Normalized form
    Norm,
    /// Phrase chunk tag
    Chunk,
    /// The label shown when no specific layer is selected
    Default,
    /// Capture/trigger type of a synthetic token group
    Group,
    /// Any layer outside the fixed set
    Custom(String),
}

impl LabelLayer {
    /// The layer name as it appears in serialized registries
    pub fn as_str(&self) -> &str {
        match self {
            Self::Raw => "raw",
            Self::Pos => "POS",
            Self::Lemma => "lemma",
            Self::Entity => "entity",
            Self::Norm => "norm",
            Self::Chunk => "chunk",
            Self::Default => "default",
            Self::Group => "group",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for LabelLayer {
    fn from(s: &str) -> Self {
        match s {
            "raw" => Self::Raw,
            "POS" => Self::Pos,
            "lemma" => Self::Lemma,
            "entity" => Self::Entity,
            "norm" => Self::Norm,
            "chunk" => Self::Chunk,
            "default" => Self::Default,
            "group" => Self::Group,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for LabelLayer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<LabelLayer> for String {
    fn from(layer: LabelLayer) -> Self {
        match layer {
            LabelLayer::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for LabelLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mapping from label layer to value
///
/// Holds at most one value per layer; registering a layer again replaces
/// the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelRegistry(BTreeMap<LabelLayer, String>);

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value for a layer, returning the value it replaced
    pub fn register(
        &mut self,
        layer: impl Into<LabelLayer>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(layer.into(), value.into())
    }

    /// Get the value registered for a layer
    pub fn get(&self, layer: &LabelLayer) -> Option<&str> {
        self.0.get(layer).map(String::as_str)
    }

    pub fn contains(&self, layer: &LabelLayer) -> bool {
        self.0.contains_key(layer)
    }

    /// Iterate over `(layer, value)` pairs in layer order
    pub fn iter(&self) -> impl Iterator<Item = (&LabelLayer, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Anything that carries a label registry and can be linked to
pub trait Labelled {
    /// Identity of the entity as the presentation layer sees it
    fn identity(&self) -> String;

    fn labels(&self) -> &LabelRegistry;

    /// Shortcut for the `default` layer
    fn default_label(&self) -> Option<&str> {
        self.labels().get(&LabelLayer::Default)
    }
}
