//! AnnotationGraph: the finished token-link graph of one parse

use super::cluster::{ClusterId, WordCluster};
use super::label::{LabelRegistry, Labelled};
use super::link::{Anchor, Link, LinkId, MentionId};
use super::token::{Token, Word};
use serde::{Deserialize, Serialize};

/// A resolved link endpoint
#[derive(Debug, Clone, Copy)]
pub enum AnchorRef<'a> {
    Token(&'a Token),
    Cluster(&'a WordCluster),
}

impl AnchorRef<'_> {
    /// Global token indices covered by this endpoint
    pub fn token_indices(&self) -> Vec<usize> {
        match self {
            Self::Token(token) => vec![token.index],
            Self::Cluster(cluster) => cluster.members.clone(),
        }
    }
}

impl Labelled for AnchorRef<'_> {
    fn identity(&self) -> String {
        match self {
            Self::Token(token) => token.identity(),
            Self::Cluster(cluster) => cluster.identity(),
        }
    }

    fn labels(&self) -> &LabelRegistry {
        match self {
            Self::Token(token) => &token.labels,
            Self::Cluster(cluster) => &cluster.labels,
        }
    }
}

/// Tokens, links and clusters produced by one parse
///
/// Consumers get the graph by value and read it; nothing here mutates it
/// after the builder hands it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationGraph {
    /// Tokens sorted by global index
    pub tokens: Vec<Token>,
    /// Dependency links in edge order, then mention links in mention order
    pub links: Vec<Link>,
    pub clusters: Vec<WordCluster>,
    pub words: Vec<Word>,
    /// Every mention id seen during the parse, hidden ones included
    #[serde(default)]
    pub available_mentions: Vec<MentionId>,
}

impl AnnotationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a token by global index
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.position_of(index).map(|pos| &self.tokens[pos])
    }

    pub(crate) fn token_mut(&mut self, index: usize) -> Option<&mut Token> {
        match self.position_of(index) {
            Some(pos) => Some(&mut self.tokens[pos]),
            None => None,
        }
    }

    // Indices can skip when a sentence declares more tokens than it has words.
    fn position_of(&self, index: usize) -> Option<usize> {
        self.tokens.binary_search_by_key(&index, |t| t.index).ok()
    }

    pub fn cluster(&self, id: &ClusterId) -> Option<&WordCluster> {
        self.clusters.iter().find(|c| &c.id == id)
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|l| &l.id == id)
    }

    /// Resolve an anchor to the token or cluster it names
    pub fn resolve(&self, anchor: &Anchor) -> Option<AnchorRef<'_>> {
        match anchor {
            Anchor::Token(index) => self.token(*index).map(AnchorRef::Token),
            Anchor::Cluster(id) => self.cluster(id).map(AnchorRef::Cluster),
        }
    }

    /// Links whose anchor or arguments include `anchor`
    pub fn links_touching<'a>(&'a self, anchor: &'a Anchor) -> impl Iterator<Item = &'a Link> {
        self.links.iter().filter(move |l| l.touches(anchor))
    }

    pub fn dependency_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.is_dependency())
    }

    /// Links produced from mentions
    pub fn mention_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| !l.is_dependency())
    }

    /// Dependency links of one view (`universal-basic` or `universal-enhanced`)
    pub fn links_with_subtype<'a>(&'a self, subtype: &'a str) -> impl Iterator<Item = &'a Link> {
        self.links
            .iter()
            .filter(move |l| l.subtype.as_deref() == Some(subtype))
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.links.is_empty()
    }
}
