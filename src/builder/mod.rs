//! GraphBuilder: turns one annotated document into an AnnotationGraph

mod config;
mod error;
mod mention;
mod sentence;
mod state;

#[cfg(test)]
mod tests;

pub use config::{BuilderConfig, ConfigError};
pub use error::{BuildError, BuildResult};
pub use state::ParseState;

use crate::document::{Document, ParseInput};
use crate::graph::{AnnotationGraph, MentionId};
use tracing::debug;

/// The annotation graph builder
///
/// Each [`parse`](GraphBuilder::parse) call resets the session state
/// first, so token indices always start at 0 and no cache carries over
/// between documents. `parse` takes `&mut self`; to process documents in
/// parallel, give each worker its own builder.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: BuilderConfig,
    state: ParseState,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            state: ParseState::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Drop all session state: token offset, partial graph, mention caches
    pub fn reset(&mut self) {
        self.state = ParseState::new(self.config.clone());
    }

    /// Parse a document into a graph
    ///
    /// Accepts a single document or a batch, of which only the first
    /// document is parsed. Mentions whose ids are in `hidden` are recorded
    /// in `available_mentions` but produce no link.
    ///
    /// On error the whole call fails and no partial graph is returned.
    pub fn parse(
        &mut self,
        input: impl Into<ParseInput>,
        hidden: &[MentionId],
    ) -> BuildResult<AnnotationGraph> {
        self.reset();

        let document = match input.into().into_document() {
            Some(document) => document,
            None => {
                debug!("empty batch, nothing to parse");
                return Ok(AnnotationGraph::new());
            }
        };

        let result = self.run(&document, hidden);
        let state = std::mem::replace(&mut self.state, ParseState::new(self.config.clone()));
        result.map(|()| state.into_graph())
    }

    /// Parse a document (or batch) given as JSON text
    pub fn parse_json(&mut self, json: &str, hidden: &[MentionId]) -> BuildResult<AnnotationGraph> {
        let input: ParseInput = serde_json::from_str(json)?;
        self.parse(input, hidden)
    }

    fn run(&mut self, document: &Document, hidden: &[MentionId]) -> BuildResult<()> {
        let state = &mut self.state;
        if let Some(id) = &document.id {
            state.set_document_id(id.as_str());
        }
        state.hide_mentions(hidden.iter().cloned());

        debug!(
            document = %state.document_id(),
            sentences = document.sentences.len(),
            mentions = document.mentions.len(),
            "parsing document"
        );

        for sentence in &document.sentences {
            state.parse_sentence(sentence)?;
        }

        for mention in &document.mentions {
            let relation_type = mention
                .label
                .as_deref()
                .or(document.label.as_deref())
                .unwrap_or(&self.config.default_relation);
            state.resolve_mention(mention, relation_type)?;
        }

        Ok(())
    }
}
