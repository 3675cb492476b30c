//! 한국어기초사전 exports (LMF shape):
//! `LexicalResource.Lexicon[*].LexicalEntry[*].Lemma`.

use super::{maps, read_json, WordList};
use crate::error::LexiconError;
use crate::hangul::normalize_word;
use serde_json::{Map, Value};
use std::path::Path;

/// Written forms from one dump file.
pub fn extract_basic_words(path: &Path) -> Result<Vec<String>, LexiconError> {
    Ok(words_from_value(&read_json(path)?))
}

fn words_from_value(payload: &Value) -> Vec<String> {
    let lexicons = payload
        .get("LexicalResource")
        .and_then(Value::as_object)
        .and_then(|resource| resource.get("Lexicon"));

    let mut out = WordList::default();
    for lexicon in maps(lexicons) {
        for entry in maps(lexicon.get("LexicalEntry")) {
            if let Some(word) = written_form(entry) {
                out.push(word);
            }
        }
    }
    out.into_words()
}

/// The lemma's `writtenForm` feat, falling back to `FormRepresentation`.
fn written_form(entry: &Map<String, Value>) -> Option<String> {
    let lemma = entry.get("Lemma")?.as_object()?;
    if let Some(value) = feat_value(lemma.get("feat")) {
        return Some(normalize_word(value));
    }
    for representation in maps(lemma.get("FormRepresentation")) {
        if let Some(value) = feat_value(representation.get("feat")) {
            return Some(normalize_word(value));
        }
    }
    None
}

fn feat_value(feat: Option<&Value>) -> Option<&str> {
    maps(feat)
        .find(|f| f.get("att").and_then(Value::as_str) == Some("writtenForm"))
        .and_then(|f| f.get("val").and_then(Value::as_str))
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn takes_written_form_feat() {
        let payload = json!({
            "LexicalResource": {
                "Lexicon": {
                    "LexicalEntry": [
                        {"Lemma": {"feat": {"att": "writtenForm", "val": "결합"}}},
                        {"Lemma": {"feat": [
                            {"att": "partOfSpeech", "val": "noun"},
                            {"att": "writtenForm", "val": "근육01"}
                        ]}}
                    ]
                }
            }
        });
        assert_eq!(words_from_value(&payload), vec!["결합", "근육"]);
    }

    #[test]
    fn falls_back_to_form_representation() {
        let payload = json!({
            "LexicalResource": {
                "Lexicon": [{
                    "LexicalEntry": {
                        "Lemma": {
                            "FormRepresentation": [
                                {"feat": {"att": "script", "val": "Hang"}},
                                {"feat": {"att": "writtenForm", "val": "신경"}}
                            ]
                        }
                    }
                }]
            }
        });
        assert_eq!(words_from_value(&payload), vec!["신경"]);
    }

    #[test]
    fn entries_without_lemma_are_skipped() {
        let payload = json!({
            "LexicalResource": {"Lexicon": {"LexicalEntry": [{"id": 1}, "junk"]}}
        });
        assert!(words_from_value(&payload).is_empty());
    }
}
