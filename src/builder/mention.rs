//! Mention resolution: trigger and capture spans to a link

use super::error::{BuildError, BuildResult};
use super::state::ParseState;
use crate::document::{Mention, Span};
use crate::graph::{Anchor, ClusterId, LabelLayer, Link, LinkId, MentionId, WordCluster};
use std::ops::Range;
use tracing::{debug, trace};

impl ParseState {
    /// Resolve one mention into a link
    ///
    /// The trigger span becomes the link anchor and each named capture an
    /// argument. Spans of one token anchor on that token; longer spans
    /// anchor on a cluster, reused when the same type already covers the
    /// same tokens. Returns `None` for hidden mentions, and the existing
    /// link id when the mention was already resolved in this run.
    pub fn resolve_mention(
        &mut self,
        mention: &Mention,
        relation_type: &str,
    ) -> BuildResult<Option<LinkId>> {
        let sentence = self.sentence_range(mention.sentence)?;
        let trigger = global_span(&sentence, mention.span)?;
        let id = MentionId::new(relation_type, trigger.start, trigger.end);

        if self.available_mentions.insert(id.clone()) {
            self.graph.available_mentions.push(id.clone());
        }

        if self.hidden_mentions.contains(&id) {
            trace!(mention = %id, "mention hidden");
            return Ok(None);
        }

        if let Some(&position) = self.parsed_mentions.get(&id) {
            trace!(mention = %id, "mention already resolved");
            return Ok(Some(self.graph.links[position].id.clone()));
        }

        let mut captures = Vec::new();
        for entry in &mention.captures {
            for (capture_type, capture) in entry {
                captures.push((capture_type.as_str(), global_span(&sentence, capture.span)?));
            }
        }

        let link_id = LinkId::from(id.clone());
        self.check_link_ids([&link_id])?;

        let anchor = self.anchor_for_span(trigger, relation_type);
        let mut link = Link::new(link_id.clone(), anchor, relation_type);
        for (capture_type, span) in captures {
            let anchor = self.anchor_for_span(span, capture_type);
            link = link.with_argument(anchor, capture_type);
        }

        debug!(
            mention = %id,
            arguments = link.arguments.len(),
            "resolved mention"
        );

        let position = self.push_link(link)?;
        self.parsed_mentions.insert(id, position);
        Ok(Some(link_id))
    }

    /// Anchor for a validated global span, labelled with `type_name`
    ///
    /// A single token gets `default = type_name` and anchors the span
    /// itself. A longer span anchors on a cluster; member tokens are left
    /// untouched.
    fn anchor_for_span(&mut self, span: Range<usize>, type_name: &str) -> Anchor {
        if span.len() == 1 {
            if let Some(token) = self.graph.token_mut(span.start) {
                token.register_label(LabelLayer::Default, type_name);
            }
            return Anchor::Token(span.start);
        }

        let members: Vec<usize> = span.collect();
        if let Some(existing) = self.long_labels.lookup(type_name, &members) {
            return Anchor::Cluster(existing.clone());
        }

        let id = ClusterId::from_ordinal(self.graph.clusters.len());
        self.long_labels.register(type_name, &members, id.clone());
        self.graph
            .clusters
            .push(WordCluster::new(id.clone(), members, type_name));
        Anchor::Cluster(id)
    }
}

/// Map a sentence-relative span onto global token indices
fn global_span(sentence: &Range<usize>, span: Span) -> BuildResult<Range<usize>> {
    if span.start >= span.end {
        return Err(BuildError::InvalidSpan {
            start: span.start,
            end: span.end,
        });
    }
    let limit = sentence.len();
    if span.end > limit {
        return Err(BuildError::out_of_range(
            format!("span [{}, {})", span.start, span.end),
            span.end - 1,
            limit,
        ));
    }
    Ok(sentence.start + span.start..sentence.start + span.end)
}
