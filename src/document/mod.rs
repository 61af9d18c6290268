//! Input model: Odinson-style annotated documents
//!
//! A document arrives either as a bare sentence (`fields` + `numTokens` at
//! the top level) or with a `sentences` array. Mentions live under `match`
//! or `matches`, and `label` names the relation type shared by them.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the mandatory surface-form field
pub const WORD_FIELD: &str = "word";
/// Name of the graph field holding dependency edges
pub const DEPENDENCIES_FIELD: &str = "dependencies";

/// A governor → dependent edge of the dependency graph
///
/// Deserializes from the `[governor, dependent, relation]` triple used in
/// graph fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize, String)", into = "(usize, usize, String)")]
pub struct DependencyEdge {
    pub governor: usize,
    pub dependent: usize,
    pub relation: String,
}

impl DependencyEdge {
    pub fn new(governor: usize, dependent: usize, relation: impl Into<String>) -> Self {
        Self {
            governor,
            dependent,
            relation: relation.into(),
        }
    }
}

impl From<(usize, usize, String)> for DependencyEdge {
    fn from((governor, dependent, relation): (usize, usize, String)) -> Self {
        Self {
            governor,
            dependent,
            relation,
        }
    }
}

impl From<DependencyEdge> for (usize, usize, String) {
    fn from(edge: DependencyEdge) -> Self {
        (edge.governor, edge.dependent, edge.relation)
    }
}

/// One annotation layer of a sentence
///
/// The Odinson `$type` tag is accepted but not required; without it the
/// variant is recognized by its payload (`tokens` or `edges`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Tokens {
        name: String,
        tokens: Vec<String>,
    },
    Graph {
        name: String,
        edges: Vec<DependencyEdge>,
        #[serde(default)]
        roots: Vec<usize>,
    },
}

/// Wire shape of a field before its variant is picked
#[derive(Deserialize)]
struct RawField {
    #[serde(rename = "$type", default)]
    kind: Option<String>,
    name: String,
    #[serde(default)]
    tokens: Option<Vec<String>>,
    #[serde(default)]
    edges: Option<Vec<DependencyEdge>>,
    #[serde(default)]
    roots: Option<Vec<usize>>,
}

impl TryFrom<RawField> for Field {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = raw.kind.as_deref().unwrap_or_default();
        let wants_graph = kind.ends_with("GraphField");
        let wants_tokens = kind.ends_with("TokensField");

        match (raw.tokens, raw.edges) {
            (Some(tokens), _) if !wants_graph => Ok(Self::Tokens {
                name: raw.name,
                tokens,
            }),
            (_, Some(edges)) if !wants_tokens => Ok(Self::Graph {
                name: raw.name,
                edges,
                roots: raw.roots.unwrap_or_default(),
            }),
            _ if wants_graph => Err(format!("graph field `{}` has no `edges`", raw.name)),
            _ if wants_tokens => Err(format!("tokens field `{}` has no `tokens`", raw.name)),
            _ => Err(format!("field `{}` has neither `tokens` nor `edges`", raw.name)),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawField::deserialize(deserializer)?
            .try_into()
            .map_err(de::Error::custom)
    }
}

impl Field {
    pub fn tokens(name: impl Into<String>, tokens: Vec<String>) -> Self {
        Self::Tokens {
            name: name.into(),
            tokens,
        }
    }

    pub fn graph(name: impl Into<String>, edges: Vec<DependencyEdge>) -> Self {
        Self::Graph {
            name: name.into(),
            edges,
            roots: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Tokens { name, .. } | Self::Graph { name, .. } => name,
        }
    }
}

/// A single sentence with its fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "numTokens", default, skip_serializing_if = "Option::is_none")]
    pub num_tokens: Option<usize>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Sentence {
    /// Create a sentence from its `word` field
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        Self {
            num_tokens: Some(words.len()),
            fields: vec![Field::tokens(WORD_FIELD, words)],
        }
    }

    /// Add a token layer (`tag`, `lemma`, ...)
    pub fn with_layer<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.fields.push(Field::tokens(name, values));
        self
    }

    pub fn with_dependencies(mut self, edges: Vec<DependencyEdge>) -> Self {
        self.fields.push(Field::graph(DEPENDENCIES_FIELD, edges));
        self
    }

    pub fn with_num_tokens(mut self, num_tokens: usize) -> Self {
        self.num_tokens = Some(num_tokens);
        self
    }

    /// Get the values of a token field by name
    pub fn tokens_field(&self, field_name: &str) -> Option<&[String]> {
        self.fields.iter().find_map(|field| match field {
            Field::Tokens { name, tokens } if name == field_name => Some(tokens.as_slice()),
            _ => None,
        })
    }

    /// Get the dependency edges, if the sentence has a `dependencies` graph
    pub fn dependencies(&self) -> Option<&[DependencyEdge]> {
        self.fields.iter().find_map(|field| match field {
            Field::Graph { name, edges, .. } if name == DEPENDENCIES_FIELD => Some(edges.as_slice()),
            _ => None,
        })
    }

    /// Number of entries in the `word` field
    pub fn word_count(&self) -> Option<usize> {
        self.tokens_field(WORD_FIELD).map(<[String]>::len)
    }
}

/// Half-open token range `[start, end)` relative to a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of tokens covered; zero for empty or inverted spans
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The span of one named capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub span: Span,
}

/// An event or relation occurrence: trigger span plus typed capture spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub span: Span,
    /// Each entry maps capture type names to their spans
    #[serde(default)]
    pub captures: Vec<BTreeMap<String, Capture>>,
    /// Relation type for this mention only, overriding the document label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Ordinal of the sentence the spans refer to
    #[serde(default)]
    pub sentence: usize,
}

impl Mention {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            captures: Vec::new(),
            label: None,
            sentence: 0,
        }
    }

    /// Add a single-type capture entry
    pub fn with_capture(mut self, capture_type: impl Into<String>, start: usize, end: usize) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert(
            capture_type.into(),
            Capture {
                span: Span::new(start, end),
            },
        );
        self.captures.push(entry);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn in_sentence(mut self, sentence: usize) -> Self {
        self.sentence = sentence;
        self
    }
}

/// Wire shape of a document before normalization
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    sentences: Vec<Sentence>,
    #[serde(default)]
    fields: Option<Vec<Field>>,
    #[serde(rename = "numTokens", default)]
    num_tokens: Option<usize>,
    #[serde(rename = "match", default)]
    match_: Option<Vec<Mention>>,
    #[serde(default)]
    matches: Option<Vec<Mention>>,
    #[serde(default)]
    label: Option<String>,
}

/// A normalized input document
///
/// Top-level `fields`/`numTokens` form a single bare sentence. They may not
/// be combined with a `sentences` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    pub id: Option<String>,
    pub sentences: Vec<Sentence>,
    pub mentions: Vec<Mention>,
    /// Relation type applied to mentions without their own label
    pub label: Option<String>,
}

impl TryFrom<RawDocument> for Document {
    type Error = String;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let bare = raw.fields.is_some() || raw.num_tokens.is_some();
        let sentences = match (raw.sentences.is_empty(), bare) {
            (false, true) => {
                return Err("document has both `sentences` and top-level `fields`/`numTokens`".into())
            }
            (false, false) => raw.sentences,
            (true, true) => vec![Sentence {
                num_tokens: raw.num_tokens,
                fields: raw.fields.unwrap_or_default(),
            }],
            (true, false) => Vec::new(),
        };

        Ok(Self {
            id: raw.id,
            sentences,
            mentions: raw.match_.or(raw.matches).unwrap_or_default(),
            label: raw.label,
        })
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document made of one sentence
    pub fn from_sentence(sentence: Sentence) -> Self {
        Self {
            sentences: vec![sentence],
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_sentence(mut self, sentence: Sentence) -> Self {
        self.sentences.push(sentence);
        self
    }

    pub fn with_mention(mut self, mention: Mention) -> Self {
        self.mentions.push(mention);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// What `parse` accepts: one document, or a batch whose first entry is used
///
/// An array is a batch and an object a single document, so a malformed
/// document reports its own error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseInput {
    Batch(Vec<Document>),
    Single(Document),
}

impl<'de> Deserialize<'de> for ParseInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InputVisitor;

        impl<'de> Visitor<'de> for InputVisitor {
            type Value = ParseInput;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a document object or an array of documents")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<ParseInput, A::Error> {
                Vec::deserialize(de::value::SeqAccessDeserializer::new(seq)).map(ParseInput::Batch)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ParseInput, A::Error> {
                Document::deserialize(de::value::MapAccessDeserializer::new(map)).map(ParseInput::Single)
            }
        }

        deserializer.deserialize_any(InputVisitor)
    }
}

impl ParseInput {
    /// The document to parse; `None` for an empty batch
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Single(document) => Some(document),
            Self::Batch(documents) => documents.into_iter().next(),
        }
    }
}

impl From<Document> for ParseInput {
    fn from(document: Document) -> Self {
        Self::Single(document)
    }
}

impl From<Vec<Document>> for ParseInput {
    fn from(documents: Vec<Document>) -> Self {
        Self::Batch(documents)
    }
}
