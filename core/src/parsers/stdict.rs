//! 표준국어대사전 exports: `channel.item[*].word_info`.

use super::{maps, read_json, strings, WordList};
use crate::error::LexiconError;
use crate::hangul::normalize_word;
use serde_json::{Map, Value};
use std::path::Path;

/// Headwords plus selected variants from one dump file.
pub fn extract_stdict_words(path: &Path) -> Result<Vec<String>, LexiconError> {
    Ok(words_from_value(&read_json(path)?))
}

fn words_from_value(payload: &Value) -> Vec<String> {
    let items = payload
        .get("channel")
        .and_then(Value::as_object)
        .and_then(|channel| channel.get("item"));

    let mut out = WordList::default();
    for item in maps(items) {
        let Some(info) = item.get("word_info").and_then(Value::as_object) else {
            continue;
        };
        if let Some(base) = info.get("word").and_then(Value::as_str) {
            out.push(normalize_word(base));
        }
        collect_variants(info, &mut out);
    }
    out.into_words()
}

/// Related headwords and comma-separated allomorphs.
fn collect_variants(info: &Map<String, Value>, out: &mut WordList) {
    for key in ["relation_info", "lexical_info"] {
        for entry in maps(info.get(key)) {
            if let Some(word) = entry.get("word").and_then(Value::as_str) {
                out.push(normalize_word(word));
            }
        }
    }
    for pronunciation in maps(info.get("pronunciation_info")) {
        for token in strings(pronunciation.get("allomorph")) {
            for part in token.split(',') {
                out.push(normalize_word(part));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_headword_and_variants() {
        let payload = json!({
            "channel": {
                "item": [
                    {
                        "word_info": {
                            "word": "결근01",
                            "relation_info": {"word": "결근하다"},
                            "pronunciation_info": [
                                {"allomorph": "결근, 결석"}
                            ]
                        }
                    },
                    {"word_info": {"word": "신상"}}
                ]
            }
        });
        let words = words_from_value(&payload);
        assert_eq!(words, vec!["결근", "결근하다", "결석", "신상"]);
    }

    #[test]
    fn single_item_object_is_accepted() {
        let payload = json!({
            "channel": {"item": {"word_info": {"word": "근육"}}}
        });
        assert_eq!(words_from_value(&payload), vec!["근육"]);
    }

    #[test]
    fn missing_or_mistyped_nodes_yield_nothing() {
        for payload in [
            json!({}),
            json!({"channel": []}),
            json!({"channel": {"item": 3}}),
            json!({"channel": {"item": [{"word_info": "oops"}]}}),
        ] {
            assert!(words_from_value(&payload).is_empty());
        }
    }
}
