//! Whole-document scenarios for GraphBuilder

use super::*;
use crate::document::{DependencyEdge, Document, Mention, Sentence};
use crate::graph::{Anchor, LabelLayer, Labelled, UNIVERSAL_BASIC, UNIVERSAL_ENHANCED};
use serde_json::json;

fn jack_hit_ball() -> Document {
    Document::from_sentence(
        Sentence::new(["Jack", "hit", "ball"])
            .with_layer("tag", ["NNP", "VBD", "NN"])
            .with_dependencies(vec![DependencyEdge::new(1, 0, "nsubj")]),
    )
    .with_mention(Mention::new(0, 3).with_capture("agent", 0, 1))
    .with_label("hitting")
}

#[test]
fn jack_hit_ball_example() {
    let graph = GraphBuilder::new().parse(jack_hit_ball(), &[]).unwrap();

    let indices: Vec<usize> = graph.tokens.iter().map(|t| t.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(graph.token(0).unwrap().label(&LabelLayer::Pos), Some("NNP"));

    let deps: Vec<_> = graph.dependency_links().collect();
    assert_eq!(deps.len(), 2);
    for link in &deps {
        assert_eq!(link.relation_type, "nsubj");
        assert_eq!(link.anchor, Anchor::Token(1));
        assert_eq!(link.arguments[0].anchor, Anchor::Token(0));
    }
    assert_eq!(deps[0].subtype.as_deref(), Some(UNIVERSAL_BASIC));
    assert_eq!(deps[1].subtype.as_deref(), Some(UNIVERSAL_ENHANCED));

    assert_eq!(graph.clusters.len(), 1);
    assert_eq!(graph.clusters[0].members, vec![0, 1, 2]);

    let mentions: Vec<_> = graph.mention_links().collect();
    assert_eq!(mentions.len(), 1);
    let link = mentions[0];
    assert_eq!(link.relation_type, "hitting");
    assert_eq!(link.anchor, Anchor::Cluster(graph.clusters[0].id.clone()));
    assert_eq!(link.arguments.len(), 1);
    assert_eq!(link.arguments[0].anchor, Anchor::Token(0));
    assert_eq!(link.arguments[0].arg_type, "agent");
    assert_eq!(graph.token(0).unwrap().default_label(), Some("agent"));
}

#[test]
fn token_indices_continue_across_sentences() {
    let document = Document::new()
        .with_sentence(Sentence::new(["a", "b", "c"]))
        .with_sentence(Sentence::new(["d", "e"]))
        .with_sentence(Sentence::new(["f"]));
    let graph = GraphBuilder::new().parse(document, &[]).unwrap();

    let forms: Vec<(usize, &str)> = graph
        .tokens
        .iter()
        .map(|t| (t.index, t.surface_form.as_str()))
        .collect();
    assert_eq!(
        forms,
        vec![(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e"), (5, "f")]
    );
}

#[test]
fn every_parse_starts_from_index_zero() {
    let mut builder = GraphBuilder::new();
    let first = builder.parse(jack_hit_ball(), &[]).unwrap();
    let second = builder
        .parse(Document::from_sentence(Sentence::new(["Hello", "world"])), &[])
        .unwrap();

    assert_eq!(first.tokens[0].index, 0);
    assert_eq!(second.tokens[0].index, 0);
    assert_eq!(second.tokens[1].index, 1);
    assert!(second.links.is_empty());
    assert!(second.clusters.is_empty());
    assert!(second.available_mentions.is_empty());
}

#[test]
fn repeated_parse_of_same_document_is_identical() {
    let mut builder = GraphBuilder::new();
    let first = builder.parse(jack_hit_ball(), &[]).unwrap();
    let second = builder.parse(jack_hit_ball(), &[]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn duplicate_mentions_in_one_document_yield_one_link() {
    let document = jack_hit_ball().with_mention(Mention::new(0, 3).with_capture("agent", 0, 1));
    let graph = GraphBuilder::new().parse(document, &[]).unwrap();

    assert_eq!(graph.mention_links().count(), 1);
    assert_eq!(graph.clusters.len(), 1);
    assert_eq!(graph.available_mentions.len(), 1);
}

#[test]
fn hidden_mentions_are_available_but_unlinked() {
    let document = jack_hit_ball().with_mention(Mention::new(1, 2).with_capture("theme", 2, 3));
    let hidden = [MentionId::new("hitting", 0, 3)];
    let graph = GraphBuilder::new().parse(document, &hidden).unwrap();

    let ids: Vec<&str> = graph.mention_links().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["hitting-1-2"]);
    assert_eq!(
        graph.available_mentions,
        vec![MentionId::new("hitting", 0, 3), MentionId::new("hitting", 1, 2)]
    );
}

#[test]
fn hidden_set_does_not_survive_the_call() {
    let mut builder = GraphBuilder::new();
    builder
        .parse(jack_hit_ball(), &[MentionId::new("hitting", 0, 3)])
        .unwrap();

    let graph = builder.parse(jack_hit_ball(), &[]).unwrap();
    assert_eq!(graph.mention_links().count(), 1);
}

#[test]
fn mention_label_overrides_document_label() {
    let document = jack_hit_ball().with_mention(Mention::new(1, 2).with_label("striking"));
    let graph = GraphBuilder::new().parse(document, &[]).unwrap();

    let relations: Vec<&str> = graph.mention_links().map(|l| l.relation_type.as_str()).collect();
    assert_eq!(relations, vec!["hitting", "striking"]);
}

#[test]
fn unlabelled_mentions_use_configured_relation() {
    let document = Document::from_sentence(Sentence::new(["x", "y"])).with_mention(Mention::new(0, 2));

    let graph = GraphBuilder::new().parse(document.clone(), &[]).unwrap();
    assert_eq!(graph.links[0].relation_type, "mention");

    let config = BuilderConfig::new().with_default_relation("event");
    let graph = GraphBuilder::with_config(config).parse(document, &[]).unwrap();
    assert_eq!(graph.links[0].id.as_str(), "event-0-2");
}

#[test]
fn batch_input_parses_first_document_only() {
    let batch = vec![
        jack_hit_ball(),
        Document::from_sentence(Sentence::new(["ignored"])),
    ];
    let graph = GraphBuilder::new().parse(batch, &[]).unwrap();
    assert_eq!(graph.tokens.len(), 3);

    let graph = GraphBuilder::new().parse(Vec::<Document>::new(), &[]).unwrap();
    assert!(graph.is_empty());
}

#[test]
fn document_id_names_dependency_links() {
    let graph = GraphBuilder::new()
        .parse(jack_hit_ball().with_id("news-4"), &[])
        .unwrap();
    assert_eq!(graph.links[0].id.as_str(), "news-4-sentence-0-universal-basic-0");

    let config = BuilderConfig::new().with_default_document_id("corpus");
    let graph = GraphBuilder::with_config(config).parse(jack_hit_ball(), &[]).unwrap();
    assert_eq!(graph.links[0].id.as_str(), "corpus-sentence-0-universal-basic-0");
}

#[test]
fn failed_parse_returns_error_and_leaves_builder_clean() {
    let mut builder = GraphBuilder::new();
    let broken = jack_hit_ball().with_mention(Mention::new(2, 9));
    let err = builder.parse(broken, &[]).unwrap_err();
    assert!(matches!(err, BuildError::OutOfRangeReference { .. }));

    let graph = builder.parse(jack_hit_ball(), &[]).unwrap();
    assert_eq!(graph.tokens.len(), 3);
    assert_eq!(graph.mention_links().count(), 1);
}

#[test]
fn missing_word_field_fails_parse() {
    let json = json!({
        "numTokens": 1,
        "fields": [{ "name": "tag", "tokens": ["NN"] }]
    })
    .to_string();
    let err = GraphBuilder::new().parse_json(&json, &[]).unwrap_err();
    assert!(matches!(err, BuildError::MissingRequiredField { .. }));
}

#[test]
fn bare_sentence_without_fields_fails_parse() {
    for json in [
        json!({ "numTokens": 2, "fields": [], "label": "x" }),
        json!({ "numTokens": 2 }),
    ] {
        let err = GraphBuilder::new()
            .parse_json(&json.to_string(), &[])
            .unwrap_err();
        assert!(
            matches!(err, BuildError::MissingRequiredField { ref field, sentence: 0 } if field == "word"),
            "{:?}",
            err
        );
    }
}

#[test]
fn missing_num_tokens_falls_back_to_word_count() {
    let json = json!({
        "sentences": [
            { "fields": [{ "name": "word", "tokens": ["Jack", "ran"] }] },
            { "numTokens": 2, "fields": [{ "name": "word", "tokens": ["Jill", "fell"] }] }
        ],
        "matches": [{ "span": { "start": 0, "end": 1 }, "sentence": 1 }],
        "label": "falling"
    })
    .to_string();

    let graph = GraphBuilder::new().parse_json(&json, &[]).unwrap();
    let forms: Vec<(usize, &str)> = graph
        .tokens
        .iter()
        .map(|t| (t.index, t.surface_form.as_str()))
        .collect();
    assert_eq!(forms, vec![(0, "Jack"), (1, "ran"), (2, "Jill"), (3, "fell")]);
    assert_eq!(graph.links[0].id.as_str(), "falling-2-3");
    assert_eq!(graph.token(2).unwrap().default_label(), Some("falling"));
}

#[test]
fn match_key_wins_over_matches() {
    let json = json!({
        "fields": [{ "name": "word", "tokens": ["a", "b", "c"] }],
        "match": [{ "span": { "start": 0, "end": 1 } }],
        "matches": [{ "span": { "start": 2, "end": 3 } }],
        "label": "r"
    })
    .to_string();

    let graph = GraphBuilder::new().parse_json(&json, &[]).unwrap();
    let ids: Vec<&str> = graph.mention_links().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["r-0-1"]);
    assert_eq!(graph.available_mentions, vec![MentionId::new("r", 0, 1)]);
}

#[test]
fn bad_token_value_error_names_the_cause() {
    let json = r#"{ "fields": [{ "name": "word", "tokens": ["a", 7] }] }"#;
    let err = GraphBuilder::new().parse_json(json, &[]).unwrap_err();
    assert!(matches!(err, BuildError::Json(_)));
    assert!(err.to_string().contains("expected a string"), "{}", err);
}

#[test]
fn parse_json_reads_odinson_document() {
    let json = json!({
        "numTokens": 3,
        "fields": [
            { "$type": "ai.lum.odinson.TokensField", "name": "word", "tokens": ["Jack", "hit", "ball"] },
            { "$type": "ai.lum.odinson.TokensField", "name": "entity", "tokens": ["PERSON", "O", "O"] },
            { "$type": "ai.lum.odinson.GraphField", "name": "dependencies",
              "edges": [[1, 0, "nsubj"], [1, 2, "dobj"]], "roots": [1] }
        ],
        "matches": [
            { "span": { "start": 1, "end": 2 },
              "captures": [
                  { "agent": { "span": { "start": 0, "end": 1 } } },
                  { "theme": { "span": { "start": 2, "end": 3 } } }
              ] }
        ],
        "label": "hitting"
    })
    .to_string();

    let graph = GraphBuilder::new().parse_json(&json, &[]).unwrap();
    assert_eq!(graph.tokens.len(), 3);
    assert_eq!(graph.dependency_links().count(), 4);

    let link = graph.mention_links().next().unwrap();
    assert_eq!(link.id.as_str(), "hitting-1-2");
    assert_eq!(link.anchor, Anchor::Token(1));
    let args: Vec<(&Anchor, &str)> = link
        .arguments
        .iter()
        .map(|a| (&a.anchor, a.arg_type.as_str()))
        .collect();
    assert_eq!(args, vec![(&Anchor::Token(0), "agent"), (&Anchor::Token(2), "theme")]);

    // Entity default is overwritten by the capture type
    let jack = graph.token(0).unwrap();
    assert_eq!(jack.label(&LabelLayer::Entity), Some("PERSON"));
    assert_eq!(jack.default_label(), Some("agent"));
}

#[test]
fn malformed_json_is_reported() {
    let err = GraphBuilder::new().parse_json("{ not json", &[]).unwrap_err();
    assert!(matches!(err, BuildError::Json(_)));
}
