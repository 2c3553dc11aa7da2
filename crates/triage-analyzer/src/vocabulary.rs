//! Vocabulary tables: Plain Old Simple HTML element names and the class-name
//! tokens of the microformats and microformats2 vocabularies.
//!
//! Both tables are JSON objects whose keys are the vocabulary and whose values
//! are markers. A key counts only when its marker is truthy, so an entry can be
//! switched off with `false` without deleting it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::VocabularyError;

/// File name of the POSH element table.
pub const POSH_FILE: &str = "plain_old_simple_html_elements.json";
/// File name of the microformats class-name table.
pub const MICROFORMATS_FILE: &str = "microformats_generation_class_tokens.json";

const POSH_TABLE: &str = "POSH element table";
const MICROFORMATS_TABLE: &str = "microformats table";

/// Immutable lookup tables shared by every analysis in a run.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    posh: HashSet<String>,
    microformats: HashSet<String>,
    microformats2: HashSet<String>,
}

impl Vocabulary {
    /// The tables bundled with the crate.
    ///
    /// # Errors
    ///
    /// Only if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, VocabularyError> {
        Self::from_json(
            include_str!("../data/plain_old_simple_html_elements.json"),
            include_str!("../data/microformats_generation_class_tokens.json"),
        )
    }

    /// Load both tables from `dir`, using the bundled file names.
    ///
    /// # Errors
    ///
    /// If either file cannot be read or is malformed.
    pub fn load(dir: &Path) -> Result<Self, VocabularyError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| VocabularyError::Io { path, source })
        };
        let posh = read(POSH_FILE)?;
        let microformats = read(MICROFORMATS_FILE)?;
        log::debug!("loading vocabulary tables from {}", dir.display());
        Self::from_json(&posh, &microformats)
    }

    /// Parse both tables from JSON text.
    ///
    /// `posh` is a flat object of element names. `microformats` is an object
    /// with `microformats` and `microformats2` sub-objects of class tokens.
    ///
    /// # Errors
    ///
    /// If either document is not JSON or does not have that shape.
    pub fn from_json(posh: &str, microformats: &str) -> Result<Self, VocabularyError> {
        let posh_value: Value = serde_json::from_str(posh).map_err(|source| VocabularyError::Json {
            table: POSH_TABLE,
            source,
        })?;
        let microformats_value: Value =
            serde_json::from_str(microformats).map_err(|source| VocabularyError::Json {
                table: MICROFORMATS_TABLE,
                source,
            })?;

        let section = |name: &str| {
            microformats_value
                .get(name)
                .ok_or_else(|| VocabularyError::Shape {
                    table: MICROFORMATS_TABLE,
                    reason: format!("missing the \"{name}\" object"),
                })
        };

        let vocabulary = Self {
            posh: truthy_keys(POSH_TABLE, &posh_value)?,
            microformats: truthy_keys(MICROFORMATS_TABLE, section("microformats")?)?,
            microformats2: truthy_keys(MICROFORMATS_TABLE, section("microformats2")?)?,
        };
        log::debug!(
            "vocabulary: {} POSH elements, {} microformats tokens, {} microformats2 tokens",
            vocabulary.posh.len(),
            vocabulary.microformats.len(),
            vocabulary.microformats2.len()
        );
        Ok(vocabulary)
    }

    /// Whether `element` is a Plain Old Simple HTML element, ignoring case.
    #[must_use]
    pub fn is_posh(&self, element: &str) -> bool {
        self.posh.contains(&element.to_ascii_lowercase())
    }

    /// Whether the lower-cased `token` is a classic microformats class name.
    #[must_use]
    pub fn is_microformats(&self, token: &str) -> bool {
        self.microformats.contains(token)
    }

    /// Whether the lower-cased `token` is a well-known microformats2 class name.
    #[must_use]
    pub fn is_microformats2(&self, token: &str) -> bool {
        self.microformats2.contains(token)
    }
}

fn truthy_keys(table: &'static str, value: &Value) -> Result<HashSet<String>, VocabularyError> {
    let Value::Object(map) = value else {
        return Err(VocabularyError::Shape {
            table,
            reason: "expected a JSON object".to_string(),
        });
    };
    Ok(map
        .iter()
        .filter(|(_, marker)| is_truthy(marker))
        .map(|(key, _)| key.to_ascii_lowercase())
        .collect())
}

fn is_truthy(marker: &Value) -> bool {
    match marker {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_load() {
        let vocabulary = Vocabulary::bundled().unwrap();
        assert!(vocabulary.is_posh("div"));
        assert!(vocabulary.is_posh("SPAN"));
        assert!(!vocabulary.is_posh("foo-bar"));
        assert!(vocabulary.is_microformats("vcard"));
        assert!(vocabulary.is_microformats2("h-card"));
        assert!(!vocabulary.is_microformats2("h-nonsense"));
    }

    #[test]
    fn test_only_truthy_markers_count() {
        let vocabulary = Vocabulary::from_json(
            r#"{"a": true, "b": false, "c": 1, "d": 0, "e": "yes", "f": "", "g": null, "h": {}}"#,
            r#"{"microformats": {}, "microformats2": {}}"#,
        )
        .unwrap();
        let known: Vec<bool> = ["a", "b", "c", "d", "e", "f", "g", "h"]
            .iter()
            .map(|e| vocabulary.is_posh(e))
            .collect();
        assert_eq!(known, [true, false, true, false, true, false, false, true]);
    }

    #[test]
    fn test_keys_are_lower_cased() {
        let vocabulary = Vocabulary::from_json(
            r#"{"DIV": true}"#,
            r#"{"microformats": {"VCard": true}, "microformats2": {"H-Card": true}}"#,
        )
        .unwrap();
        assert!(vocabulary.is_posh("div"));
        assert!(vocabulary.is_microformats("vcard"));
        assert!(vocabulary.is_microformats2("h-card"));
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            Vocabulary::from_json("[]", r#"{"microformats": {}, "microformats2": {}}"#),
            Err(VocabularyError::Shape { .. })
        ));
        assert!(matches!(
            Vocabulary::from_json("{}", r#"{"microformats": {}}"#),
            Err(VocabularyError::Shape { .. })
        ));
        assert!(matches!(
            Vocabulary::from_json("{", "{}"),
            Err(VocabularyError::Json { .. })
        ));
    }
}
