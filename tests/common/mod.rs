//! Shared fixtures for annolink integration tests
//!
//! Documents are built as JSON so the tests exercise the same wire shape
//! the CLI reads.

use serde_json::{json, Value};

/// Two-sentence news document with entities, dependencies and matches
pub fn news_document() -> Value {
    json!({
        "id": "news-1",
        "sentences": [
            {
                "numTokens": 4,
                "fields": [
                    { "$type": "ai.lum.odinson.TokensField", "name": "raw",
                      "tokens": ["Acme", "Corp", "acquired", "Widgets"] },
                    { "$type": "ai.lum.odinson.TokensField", "name": "word",
                      "tokens": ["Acme", "Corp", "acquired", "Widgets"] },
                    { "$type": "ai.lum.odinson.TokensField", "name": "tag",
                      "tokens": ["NNP", "NNP", "VBD", "NNPS"] },
                    { "$type": "ai.lum.odinson.TokensField", "name": "lemma",
                      "tokens": ["Acme", "Corp", "acquire", "Widgets"] },
                    { "$type": "ai.lum.odinson.TokensField", "name": "entity",
                      "tokens": ["ORG", "ORG", "O", "ORG"] },
                    { "$type": "ai.lum.odinson.TokensField", "name": "chunk",
                      "tokens": ["B-NP", "I-NP", "B-VP", "B-NP"] },
                    { "$type": "ai.lum.odinson.GraphField", "name": "dependencies",
                      "edges": [[1, 0, "compound"], [2, 1, "nsubj"], [2, 3, "dobj"]],
                      "roots": [2] }
                ]
            },
            {
                "numTokens": 3,
                "fields": [
                    { "name": "word", "tokens": ["It", "paid", "cash"] },
                    { "name": "tag", "tokens": ["PRP", "VBD", "NN"] },
                    { "name": "dependencies", "edges": [[1, 0, "nsubj"], [1, 2, "dobj"]] }
                ]
            }
        ],
        "match": [
            { "span": { "start": 2, "end": 3 },
              "captures": [
                  { "acquirer": { "span": { "start": 0, "end": 2 } } },
                  { "acquiree": { "span": { "start": 3, "end": 4 } } }
              ] },
            { "span": { "start": 1, "end": 2 }, "sentence": 1, "label": "payment",
              "captures": [
                  { "payer": { "span": { "start": 0, "end": 1 } } },
                  { "amount": { "span": { "start": 2, "end": 3 } } }
              ] }
        ],
        "label": "acquisition"
    })
}

/// A bare single-sentence document whose sentence has `len` words,
/// each attached to the first word by a `dep` edge
pub fn chain_sentence(len: usize) -> Value {
    let words: Vec<String> = (0..len).map(|i| format!("w{}", i)).collect();
    let edges: Vec<Value> = (1..len).map(|i| json!([0, i, "dep"])).collect();
    json!({
        "numTokens": len,
        "fields": [
            { "name": "word", "tokens": words },
            { "name": "dependencies", "edges": edges }
        ]
    })
}

/// A document with one nested sentence per entry of `lengths`
pub fn multi_sentence_document(lengths: &[usize]) -> Value {
    let sentences: Vec<Value> = lengths.iter().map(|&len| chain_sentence(len)).collect();
    json!({ "id": "multi", "sentences": sentences })
}
