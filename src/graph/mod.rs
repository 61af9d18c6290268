//! Core graph data structures

mod annotation_graph;
mod cluster;
mod label;
mod link;
mod token;


pub use annotation_graph::{AnchorRef, AnnotationGraph};
pub use cluster::{ClusterId, LongLabelRegistry, WordCluster};
pub use label::{LabelLayer, LabelRegistry, Labelled};
pub use link::{Anchor, Link, LinkArgument, LinkId, MentionId, UNIVERSAL_BASIC, UNIVERSAL_ENHANCED};
pub use token::{Token, Word};
