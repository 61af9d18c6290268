//! annolink: Token-Link Graphs from Annotated Documents
//!
//! Converts Odinson-style annotation documents (tokenized sentences with
//! tag layers, dependency edges and event/relation mentions) into a flat
//! token sequence plus typed, directed links between tokens and token
//! clusters.
//!
//! # Core Concepts
//!
//! - **Tokens**: words with a global index and a registry of label layers
//! - **Clusters**: synthetic nodes standing in for multi-token spans
//! - **Links**: a governor or trigger anchor with typed argument anchors
//!
//! # Example
//!
//! ```
//! use annolink::{DependencyEdge, Document, GraphBuilder, Mention, Sentence};
//!
//! let document = Document::from_sentence(
//!     Sentence::new(["Jack", "hit", "ball"])
//!         .with_layer("tag", ["NNP", "VBD", "NN"])
//!         .with_dependencies(vec![DependencyEdge::new(1, 0, "nsubj")]),
//! )
//! .with_mention(Mention::new(0, 3).with_capture("agent", 0, 1))
//! .with_label("hitting");
//!
//! let graph = GraphBuilder::new().parse(document, &[]).unwrap();
//! assert_eq!(graph.tokens.len(), 3);
//! assert_eq!(graph.links.len(), 3);
//! assert_eq!(graph.clusters.len(), 1);
//! ```

pub mod builder;
pub mod document;
mod graph;

pub use builder::{BuildError, BuildResult, BuilderConfig, ConfigError, GraphBuilder, ParseState};
pub use document::{Capture, DependencyEdge, Document, Field, Mention, ParseInput, Sentence, Span};
pub use graph::{
    Anchor, AnchorRef, AnnotationGraph, ClusterId, LabelLayer, LabelRegistry, Labelled, Link,
    LinkArgument, LinkId, LongLabelRegistry, MentionId, Token, Word, WordCluster, UNIVERSAL_BASIC,
    UNIVERSAL_ENHANCED,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
