//! Subject and template seed loading from templates.toml
//!
//! Templates are seeded out-of-band: the file lists each subject together with the cards
//! (and optional checklist sub-tasks) a new board for that subject receives. Positions are
//! taken from the order of entries in the file, starting at 1.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire templates.toml file
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    /// Country applied to subjects that don't name their own
    #[serde(default = "default_country")]
    pub country: String,
    /// Subjects to seed, each carrying its template
    #[serde(default)]
    pub subjects: Vec<SubjectSeed>,
}

/// One subject and the template boards for it are built from
#[derive(Debug, Deserialize, Clone)]
pub struct SubjectSeed {
    /// Stable subject slug
    pub id: String,
    /// Display name
    pub name: String,
    /// Grade the subject is taught in
    pub grade: i32,
    /// Exam the subject prepares for
    #[serde(default)]
    pub exam: String,
    /// Ordering within the grade's subject list
    #[serde(default)]
    pub display_order: i32,
    /// Overrides the file-level country
    #[serde(default)]
    pub country: Option<String>,
    /// Whether boards receive the checklist items listed below
    #[serde(default)]
    pub checklist_enabled: bool,
    /// Template cards, in display order
    #[serde(default)]
    pub cards: Vec<CardSeed>,
}

/// A template card and its checklist sub-tasks
#[derive(Debug, Deserialize, Clone)]
pub struct CardSeed {
    /// Topic title
    pub title: String,
    /// Checklist sub-tasks, in display order
    #[serde(default)]
    pub checklist: Vec<String>,
}

fn default_country() -> String {
    "LK".to_string()
}

/// Parses a seed file from TOML text.
pub fn parse_seed_file(contents: &str) -> Result<SeedFile> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse templates file: {e}"),
    })
}

/// Loads the seed file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or its TOML is invalid.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<SeedFile> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading templates from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read templates file {}: {e}", path_ref.display()),
    })?;
    parse_seed_file(&contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_seed_file() {
        let toml_str = r#"
            country = "LK"

            [[subjects]]
            id = "g10-maths"
            name = "Mathematics"
            grade = 10
            exam = "O/L"
            display_order = 1
            checklist_enabled = true

            [[subjects.cards]]
            title = "Number systems"
            checklist = ["Read notes", "Past papers"]

            [[subjects.cards]]
            title = "Algebra"

            [[subjects]]
            id = "g11-science"
            name = "Science"
            grade = 11
            country = "IN"
        "#;

        let seed = parse_seed_file(toml_str).unwrap();
        assert_eq!(seed.country, "LK");
        assert_eq!(seed.subjects.len(), 2);

        let maths = &seed.subjects[0];
        assert!(maths.checklist_enabled);
        assert_eq!(maths.cards.len(), 2);
        assert_eq!(maths.cards[0].checklist, vec!["Read notes", "Past papers"]);
        assert!(maths.cards[1].checklist.is_empty());

        let science = &seed.subjects[1];
        assert_eq!(science.country.as_deref(), Some("IN"));
        assert!(!science.checklist_enabled);
        assert!(science.cards.is_empty());
    }

    #[test]
    fn test_missing_country_defaults() {
        let seed = parse_seed_file("").unwrap();
        assert_eq!(seed.country, "LK");
        assert!(seed.subjects.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = parse_seed_file("[[subjects]]\nname = 3");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_seed_file("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
