//! 우리말샘 exports: `channel.item[*].wordinfo`.

use super::{maps, read_json, strings, WordList};
use crate::error::LexiconError;
use crate::hangul::normalize_word;
use serde_json::Value;
use std::path::Path;

/// Headwords plus pronunciation allomorphs from one dump file.
pub fn extract_urimal_words(path: &Path) -> Result<Vec<String>, LexiconError> {
    Ok(words_from_value(&read_json(path)?))
}

fn words_from_value(payload: &Value) -> Vec<String> {
    let items = payload
        .get("channel")
        .and_then(Value::as_object)
        .and_then(|channel| channel.get("item"));

    let mut out = WordList::default();
    for item in maps(items) {
        let Some(wordinfo) = item.get("wordinfo").and_then(Value::as_object) else {
            continue;
        };
        if let Some(base) = wordinfo.get("word").and_then(Value::as_str) {
            out.push(normalize_word(base));
        }
        for pronunciation in maps(wordinfo.get("pronunciation_info")) {
            for token in strings(pronunciation.get("allomorph")) {
                for part in token.split(',') {
                    out.push(normalize_word(part));
                }
            }
        }
    }
    out.into_words()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_headwords_and_allomorphs() {
        let payload = json!({
            "channel": {
                "item": [
                    {
                        "wordinfo": {
                            "word": "상피",
                            "pronunciation_info": {"allomorph": "상피01, 상피막"}
                        }
                    },
                    {"wordinfo": {"word": "상피"}}
                ]
            }
        });
        // Second 상피 deduplicates; the allomorph list splits on commas.
        assert_eq!(words_from_value(&payload), vec!["상피", "상피막"]);
    }

    #[test]
    fn tolerates_item_shapes() {
        let payload = json!({"channel": {"item": {"wordinfo": {"word": "신경"}}}});
        assert_eq!(words_from_value(&payload), vec!["신경"]);
        assert!(words_from_value(&json!({"channel": 7})).is_empty());
    }
}
