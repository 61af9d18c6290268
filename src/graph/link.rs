//! Links: typed, directed associations between anchors

use super::cluster::ClusterId;
use serde::{Deserialize, Serialize};

/// Subtype of the basic dependency view
pub const UNIVERSAL_BASIC: &str = "universal-basic";
/// Subtype of the enhanced dependency view
pub const UNIVERSAL_ENHANCED: &str = "universal-enhanced";

/// Unique identifier for a link
///
/// Serializes as a plain string. Dependency links use
/// `{document}-{sentence}-{kind}-{edge}`, mention links use the mention id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LinkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Stable identifier of a mention: `{relation}-{start}-{end}`
///
/// `start` and `end` are global token indices of the trigger span, so
/// for the first sentence of a document they equal the span offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionId(String);

impl MentionId {
    pub fn new(relation_type: &str, start: usize, end: usize) -> Self {
        Self(format!("{}-{}-{}", relation_type, start, end))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MentionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MentionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MentionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<MentionId> for LinkId {
    fn from(id: MentionId) -> Self {
        Self(id.0)
    }
}

/// Endpoint of a link: a single token or a token cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Global token index
    Token(usize),
    Cluster(ClusterId),
}

impl Anchor {
    pub fn token_index(&self) -> Option<usize> {
        match self {
            Self::Token(index) => Some(*index),
            Self::Cluster(_) => None,
        }
    }

    pub fn cluster_id(&self) -> Option<&ClusterId> {
        match self {
            Self::Token(_) => None,
            Self::Cluster(id) => Some(id),
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(index) => write!(f, "token-{}", index),
            Self::Cluster(id) => write!(f, "{}", id),
        }
    }
}

/// A typed argument of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkArgument {
    pub anchor: Anchor,
    /// Role of the argument (dependency relation or capture type)
    #[serde(rename = "type")]
    pub arg_type: String,
}

impl LinkArgument {
    pub fn new(anchor: Anchor, arg_type: impl Into<String>) -> Self {
        Self {
            anchor,
            arg_type: arg_type.into(),
        }
    }
}

/// A directed link from one anchor to its typed arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    /// Governor of a dependency, or trigger of a mention
    pub anchor: Anchor,
    pub arguments: Vec<LinkArgument>,
    pub relation_type: String,
    /// Dependency view (`universal-basic`/`universal-enhanced`); `None` for mentions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl Link {
    pub fn new(id: impl Into<LinkId>, anchor: Anchor, relation_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            anchor,
            arguments: Vec::new(),
            relation_type: relation_type.into(),
            subtype: None,
        }
    }

    pub fn with_argument(mut self, anchor: Anchor, arg_type: impl Into<String>) -> Self {
        self.arguments.push(LinkArgument::new(anchor, arg_type));
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// True for links produced from dependency edges
    pub fn is_dependency(&self) -> bool {
        matches!(
            self.subtype.as_deref(),
            Some(UNIVERSAL_BASIC) | Some(UNIVERSAL_ENHANCED)
        )
    }

    /// Every anchor this link touches: its own anchor first, then arguments
    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        std::iter::once(&self.anchor).chain(self.arguments.iter().map(|a| &a.anchor))
    }

    pub fn touches(&self, anchor: &Anchor) -> bool {
        self.anchors().any(|a| a == anchor)
    }
}
