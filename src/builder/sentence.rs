//! Sentence parsing: field arrays to tokens and dependency links

use super::error::{BuildError, BuildResult};
use super::state::ParseState;
use crate::document::{DependencyEdge, Field, Sentence, DEPENDENCIES_FIELD, WORD_FIELD};
use crate::graph::{Anchor, LabelLayer, Link, LinkId, Token, Word, UNIVERSAL_BASIC, UNIVERSAL_ENHANCED};
use std::collections::HashMap;
use std::ops::Range;
use tracing::{debug, warn};

/// Token fields that become labels, with the layer each one fills
const LABEL_FIELDS: &[(&str, &str)] = &[
    ("raw", "raw"),
    ("tag", "POS"),
    ("lemma", "lemma"),
    ("entity", "entity"),
    ("norms", "norm"),
    ("chunk", "chunk"),
];

/// Both dependency views get a link for every edge
const DEPENDENCY_VIEWS: [&str; 2] = [UNIVERSAL_BASIC, UNIVERSAL_ENHANCED];

impl ParseState {
    /// Parse one sentence into tokens and dependency links
    ///
    /// Tokens get global indices starting at the current offset; the offset
    /// then advances by the sentence's declared token count. Every edge of
    /// the `dependencies` field yields a basic and an enhanced link.
    /// Validation runs before anything is added, so a failing sentence
    /// leaves the state untouched.
    ///
    /// Returns the global token range of the sentence.
    pub fn parse_sentence(&mut self, sentence: &Sentence) -> BuildResult<Range<usize>> {
        let ordinal = self.sentences.len();

        let mut layers: HashMap<&str, &[String]> = HashMap::new();
        let mut edges: &[DependencyEdge] = &[];
        for field in &sentence.fields {
            match field {
                Field::Tokens { name, tokens } => {
                    layers.insert(name.as_str(), tokens.as_slice());
                }
                Field::Graph { name, edges: graph_edges, .. } if name == DEPENDENCIES_FIELD => {
                    edges = graph_edges.as_slice();
                }
                Field::Graph { name, .. } => {
                    debug!(sentence = ordinal, field = %name, "ignoring graph field");
                }
            }
        }

        let words = layers
            .get(WORD_FIELD)
            .copied()
            .ok_or_else(|| BuildError::MissingRequiredField {
                field: WORD_FIELD.to_string(),
                sentence: ordinal,
            })?;
        let word_count = words.len();

        let declared = sentence.num_tokens.unwrap_or(word_count);
        if declared < word_count {
            return Err(BuildError::out_of_range(
                format!("word field of sentence {}", ordinal),
                word_count - 1,
                declared,
            ));
        }

        self.check_layers(ordinal, &layers, word_count)?;

        for (position, edge) in edges.iter().enumerate() {
            for index in [edge.governor, edge.dependent] {
                if index >= word_count {
                    return Err(BuildError::out_of_range(
                        format!("dependency edge {} of sentence {}", position, ordinal),
                        index,
                        word_count,
                    ));
                }
            }
        }

        let start = self.token_offset;
        let links = self.dependency_links(ordinal, start, edges);
        self.check_link_ids(links.iter().map(|l| &l.id))?;

        for (i, surface) in words.iter().enumerate() {
            let (token, word) = self.build_token(surface, start + i, i, &layers);
            self.graph.tokens.push(token);
            self.graph.words.push(word);
        }
        self.token_offset += declared;

        for link in links {
            self.push_link(link)?;
        }

        debug!(
            sentence = ordinal,
            tokens = word_count,
            edges = edges.len(),
            offset = self.token_offset,
            "parsed sentence"
        );

        let range = start..start + word_count;
        self.sentences.push(range.clone());
        Ok(range)
    }

    fn check_layers(
        &self,
        ordinal: usize,
        layers: &HashMap<&str, &[String]>,
        word_count: usize,
    ) -> BuildResult<()> {
        for (name, values) in layers {
            if values.len() >= word_count {
                continue;
            }
            if self.config.strict_layers {
                return Err(BuildError::out_of_range(
                    format!("layer '{}' of sentence {}", name, ordinal),
                    word_count - 1,
                    values.len(),
                ));
            }
            warn!(
                sentence = ordinal,
                layer = %name,
                values = values.len(),
                words = word_count,
                "layer shorter than word field, missing positions skipped"
            );
        }
        Ok(())
    }

    /// Build the token and word at sentence position `i`
    fn build_token(
        &self,
        surface: &str,
        index: usize,
        i: usize,
        layers: &HashMap<&str, &[String]>,
    ) -> (Token, Word) {
        let mut token = Token::new(surface, index);
        for (field, layer) in LABEL_FIELDS {
            if let Some(value) = layers.get(field).and_then(|values| values.get(i)) {
                token.register_label(*layer, value.as_str());
            }
        }
        if self.config.entity_as_default {
            if let Some(entity) = token.label(&LabelLayer::Entity).map(str::to_string) {
                token.register_label(LabelLayer::Default, entity);
            }
        }

        let mut word = Word::new(surface, index);
        for (name, values) in layers {
            if *name == WORD_FIELD {
                continue;
            }
            if let Some(value) = values.get(i) {
                word.tags.insert(name.to_string(), value.clone());
            }
        }

        (token, word)
    }

    /// Two links per edge, ids `{document}-sentence-{ordinal}-{view}-{edge}`
    fn dependency_links(&self, ordinal: usize, start: usize, edges: &[DependencyEdge]) -> Vec<Link> {
        let sentence_id = format!("sentence-{}", ordinal);
        let mut links = Vec::with_capacity(edges.len() * DEPENDENCY_VIEWS.len());
        for (position, edge) in edges.iter().enumerate() {
            for view in DEPENDENCY_VIEWS {
                let id = LinkId::from(format!(
                    "{}-{}-{}-{}",
                    self.document_id, sentence_id, view, position
                ));
                links.push(
                    Link::new(id, Anchor::Token(start + edge.governor), edge.relation.as_str())
                        .with_argument(Anchor::Token(start + edge.dependent), edge.relation.as_str())
                        .with_subtype(view),
                );
            }
        }
        links
    }
}
