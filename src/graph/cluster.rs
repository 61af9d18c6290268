//! WordCluster: a synthetic node standing in for a multi-token span

use super::label::{LabelLayer, LabelRegistry, Labelled};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a cluster
///
/// Serializes as a plain string (`"cluster-3"`). Ids are minted from a
/// per-run counter, so the same input always yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    /// Id for the `n`th cluster of a run
    pub fn from_ordinal(n: usize) -> Self {
        Self(format!("cluster-{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClusterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A group of two or more tokens treated as one link anchor
///
/// Members are token indices into the owning graph; the cluster never owns
/// or mutates its tokens. Its label registry is separate from theirs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCluster {
    pub id: ClusterId,
    /// Global indices of member tokens, in span order
    pub members: Vec<usize>,
    pub labels: LabelRegistry,
}

impl WordCluster {
    /// Create a cluster whose `group` and `default` labels are `group_label`
    pub fn new(id: ClusterId, members: Vec<usize>, group_label: impl Into<String>) -> Self {
        let group_label = group_label.into();
        let mut labels = LabelRegistry::new();
        labels.register(LabelLayer::Group, group_label.clone());
        labels.register(LabelLayer::Default, group_label);
        Self { id, members, labels }
    }

    /// The capture or trigger type this cluster was minted for
    pub fn group_label(&self) -> Option<&str> {
        self.labels.get(&LabelLayer::Group)
    }

    pub fn register_label(
        &mut self,
        layer: impl Into<LabelLayer>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.labels.register(layer, value)
    }

    pub fn contains(&self, token_index: usize) -> bool {
        self.members.contains(&token_index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Labelled for WordCluster {
    fn identity(&self) -> String {
        self.id.to_string()
    }

    fn labels(&self) -> &LabelRegistry {
        &self.labels
    }
}

/// Deduplicating registry of long labels
///
/// Maps a `(group label, member set)` pair to the cluster already minted
/// for it, so repeated spans of the same type collapse onto one node.
#[derive(Debug, Clone, Default)]
pub struct LongLabelRegistry {
    by_key: HashMap<(String, Vec<usize>), ClusterId>,
}

impl LongLabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cluster registered for this type over these tokens
    pub fn lookup(&self, group_label: &str, members: &[usize]) -> Option<&ClusterId> {
        self.by_key.get(&(group_label.to_string(), Self::normalize(members)))
    }

    /// Record a cluster for `(group_label, members)`
    ///
    /// Returns the id already registered for that key, if any, in which
    /// case the registry is left unchanged.
    pub fn register(
        &mut self,
        group_label: &str,
        members: &[usize],
        id: ClusterId,
    ) -> Option<ClusterId> {
        let key = (group_label.to_string(), Self::normalize(members));
        if let Some(existing) = self.by_key.get(&key) {
            return Some(existing.clone());
        }
        self.by_key.insert(key, id);
        None
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_key.clear();
    }

    // Members are a set: order must not split one span into two keys.
    fn normalize(members: &[usize]) -> Vec<usize> {
        let mut key = members.to_vec();
        key.sort_unstable();
        key.dedup();
        key
    }
}
