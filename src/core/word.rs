// word track - turns corpus senses into a dictionary entry

use super::wordnet::{Corpus, Sense};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const NO_ENTRY: &str = "No entry found. Check spelling or try a simpler term.";

const MAX_EXAMPLES: usize = 2;
const MAX_SYNONYMS: usize = 3;
// senses after the primary one that may lend examples/synonyms
const BACKUP_SENSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub part_of_speech: String,
    pub pronunciation: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub synonyms: Vec<String>,
}

impl WordEntry {
    /// Placeholder returned when the corpus has nothing for `word`.
    pub fn not_found(word: &str) -> Self {
        Self {
            word: normalize(word),
            part_of_speech: "unknown".to_string(),
            pronunciation: "N/A".to_string(),
            definition: NO_ENTRY.to_string(),
            examples: vec![],
            synonyms: vec![],
        }
    }

    // keep whatever came back inside the entry's limits
    pub(crate) fn clamp(mut self) -> Self {
        let query = self.word.to_lowercase();
        self.examples.truncate(MAX_EXAMPLES);
        self.synonyms.retain(|s| !same_word(s, &query));
        self.synonyms.truncate(MAX_SYNONYMS);
        self
    }
}

pub struct WordLookup {
    corpus: Arc<dyn Corpus>,
}

impl WordLookup {
    pub fn new(corpus: Arc<dyn Corpus>) -> Self {
        Self { corpus }
    }

    pub fn define(&self, word: &str) -> Result<WordEntry, Error> {
        let word = normalize(word);
        if word.is_empty() {
            return Err(Error::NotFound(word));
        }

        let senses = self.corpus.senses(&word);
        let Some(primary) = senses.first() else {
            tracing::info!(word = %word, "no senses found");
            return Err(Error::NotFound(word));
        };
        let backups = senses.iter().skip(1).take(BACKUP_SENSES);

        let mut examples: Vec<String> = primary.examples.iter().take(MAX_EXAMPLES).cloned().collect();
        if examples.is_empty() {
            examples = backups
                .clone()
                .map(|s| s.examples.iter().take(MAX_EXAMPLES).cloned().collect::<Vec<_>>())
                .find(|e| !e.is_empty())
                .unwrap_or_default();
        }

        let mut synonyms = synonyms_of(primary, &word);
        if synonyms.len() < 2 {
            for sense in backups {
                for synonym in synonyms_of(sense, &word) {
                    if !synonyms.contains(&synonym) {
                        synonyms.push(synonym);
                    }
                }
            }
            synonyms.truncate(MAX_SYNONYMS);
        }

        Ok(WordEntry {
            word,
            part_of_speech: primary.pos.label().to_string(),
            pronunciation: "N/A".to_string(),
            definition: primary.definition.clone(),
            examples,
            synonyms,
        })
    }

    /// Like `define`, but unknown words come back as the placeholder entry.
    pub fn define_or_placeholder(&self, word: &str) -> WordEntry {
        self.define(word)
            .unwrap_or_else(|_| WordEntry::not_found(word))
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

fn same_word(candidate: &str, query: &str) -> bool {
    candidate.replace('_', " ").to_lowercase() == query.replace('_', " ")
}

// sorted, deduplicated lemma names of one sense, query word left out
fn synonyms_of(sense: &Sense, word: &str) -> Vec<String> {
    sense
        .lemmas
        .iter()
        .filter(|lemma| !same_word(lemma, word))
        .map(|lemma| lemma.replace('_', " "))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(MAX_SYNONYMS)
        .collect()
}
