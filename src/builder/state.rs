//! ParseState: everything one parse run accumulates

use super::config::BuilderConfig;
use super::error::{BuildError, BuildResult};
use crate::graph::{AnnotationGraph, Link, LinkId, LongLabelRegistry, MentionId};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// Session state for one parse run
///
/// Owns the graph under construction, the running token offset and the
/// dedup caches. Nothing here outlives the run: [`ParseState::reset`]
/// returns it to the empty state, and [`ParseState::into_graph`] consumes
/// it. Drive it with [`ParseState::parse_sentence`] and
/// [`ParseState::resolve_mention`].
#[derive(Debug, Clone)]
pub struct ParseState {
    pub(super) config: BuilderConfig,
    pub(super) document_id: String,
    /// Global index of the next sentence's first token
    pub(super) token_offset: usize,
    pub(super) graph: AnnotationGraph,
    /// Global token range of each parsed sentence, by ordinal
    pub(super) sentences: Vec<Range<usize>>,
    pub(super) link_ids: HashSet<LinkId>,
    /// Mention id → position of its link in `graph.links`
    pub(super) parsed_mentions: HashMap<MentionId, usize>,
    pub(super) available_mentions: HashSet<MentionId>,
    pub(super) hidden_mentions: HashSet<MentionId>,
    pub(super) long_labels: LongLabelRegistry,
}

impl ParseState {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            document_id: config.default_document_id.clone(),
            config,
            token_offset: 0,
            graph: AnnotationGraph::new(),
            sentences: Vec::new(),
            link_ids: HashSet::new(),
            parsed_mentions: HashMap::new(),
            available_mentions: HashSet::new(),
            hidden_mentions: HashSet::new(),
            long_labels: LongLabelRegistry::new(),
        }
    }

    /// Zero the offset, the graph and every cache
    pub fn reset(&mut self) {
        self.document_id = self.config.default_document_id.clone();
        self.token_offset = 0;
        self.graph = AnnotationGraph::new();
        self.sentences.clear();
        self.link_ids.clear();
        self.parsed_mentions.clear();
        self.available_mentions.clear();
        self.hidden_mentions.clear();
        self.long_labels.clear();
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Set the id used as prefix of dependency link ids
    pub fn set_document_id(&mut self, id: impl Into<String>) {
        self.document_id = id.into();
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Suppress these mentions: they are tracked as available but get no link
    pub fn hide_mentions(&mut self, ids: impl IntoIterator<Item = MentionId>) {
        self.hidden_mentions.extend(ids);
    }

    pub fn token_offset(&self) -> usize {
        self.token_offset
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Global token range of a parsed sentence
    pub fn sentence_range(&self, ordinal: usize) -> BuildResult<Range<usize>> {
        self.sentences
            .get(ordinal)
            .cloned()
            .ok_or_else(|| BuildError::out_of_range("mention sentence", ordinal, self.sentences.len()))
    }

    /// The graph built so far
    pub fn graph(&self) -> &AnnotationGraph {
        &self.graph
    }

    pub fn into_graph(self) -> AnnotationGraph {
        self.graph
    }

    /// Fail if any of `ids` is already taken or repeats within `ids`
    pub(super) fn check_link_ids<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a LinkId>,
    ) -> BuildResult<()> {
        let mut fresh = HashSet::new();
        for id in ids {
            if self.link_ids.contains(id) || !fresh.insert(id) {
                return Err(BuildError::DuplicateLinkId(id.clone()));
            }
        }
        Ok(())
    }

    /// Append a link, returning its position in the graph
    pub(super) fn push_link(&mut self, link: Link) -> BuildResult<usize> {
        if !self.link_ids.insert(link.id.clone()) {
            return Err(BuildError::DuplicateLinkId(link.id));
        }
        self.graph.links.push(link);
        Ok(self.graph.links.len() - 1)
    }
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}
