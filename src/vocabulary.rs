use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{AppError, ConfigIssue, SessionError};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// On-disk shape of a word list, shared by the embedded lists and user files.
#[derive(Deserialize, Clone, Debug)]
struct VocabularyFile {
    name: String,
    #[serde(default)]
    size: Option<usize>,
    words: Vec<String>,
}

/// A validated, ordered set of distinct words that tests are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Vocabulary {
    name: String,
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary, refusing empty lists, blank or whitespace-bearing
    /// words and duplicates.
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(ConfigIssue::EmptyVocabulary.into());
        }

        let mut seen = HashSet::with_capacity(words.len());
        for word in &words {
            if word.is_empty() || word.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(ConfigIssue::InvalidWord(word.clone()).into());
            }
            if !seen.insert(word.as_str()) {
                return Err(ConfigIssue::DuplicateWord(word.clone()).into());
            }
        }

        Ok(Self {
            name: name.into(),
            words,
        })
    }

    /// Loads one of the word lists compiled into the binary, e.g. `"common"`.
    pub fn builtin(file_name: &str) -> Result<Self, AppError> {
        let file = LANG_DIR
            .get_file(format!("{file_name}.json"))
            .ok_or_else(|| AppError::MissingVocabulary(file_name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| AppError::MissingVocabulary(file_name.to_string()))?;

        Self::from_json_str(contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        if let Some(size) = file.size {
            if size != file.words.len() {
                return Err(SessionError::from(ConfigIssue::SizeMismatch {
                    declared: size,
                    actual: file.words.len(),
                })
                .into());
            }
        }
        Ok(Self::new(file.name, file.words)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
