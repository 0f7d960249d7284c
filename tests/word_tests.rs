// tests for wordnet loading and word definitions
// uses the small wordnet-format corpus under tests/fixtures/wordnet

use glossa::{Corpus, Error, NO_ENTRY, PartOfSpeech, WordEntry, WordLookup, WordNet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wordnet")
}

fn corpus() -> WordNet {
    WordNet::load(&fixture_dir()).unwrap()
}

fn lookup() -> WordLookup {
    WordLookup::new(Arc::new(corpus()))
}

#[test]
fn test_serendipity() {
    let entry = lookup().define("serendipity").unwrap();
    assert_eq!(entry.word, "serendipity");
    assert_eq!(entry.part_of_speech, "noun");
    assert_eq!(entry.pronunciation, "N/A");
    assert_eq!(
        entry.definition,
        "good luck in making unexpected and fortunate discoveries"
    );
    assert!(!entry.examples.is_empty());
    assert!(!entry.synonyms.iter().any(|s| s == "serendipity"));
}

#[test]
fn test_input_is_case_folded() {
    let entry = lookup().define("  SERENDIPITY ").unwrap();
    assert_eq!(entry.word, "serendipity");
}

#[test]
fn test_first_sense_wins() {
    let entry = lookup().define("cat").unwrap();
    assert_eq!(entry.part_of_speech, "noun");
    assert!(entry.definition.starts_with("feline mammal"));
}

#[test]
fn test_examples_borrowed_from_later_sense() {
    // the primary cat sense has no examples of its own
    let entry = lookup().define("cat").unwrap();
    assert_eq!(
        entry.examples,
        vec!["a nice guy", "the guy's only doing it for some doll"]
    );
}

#[test]
fn test_synonyms_topped_up_from_later_senses() {
    let entry = lookup().define("cat").unwrap();
    assert_eq!(entry.synonyms, vec!["true cat", "bozo", "guy"]);
}

#[test]
fn test_examples_capped_at_two() {
    let entry = lookup().define("happy").unwrap();
    assert_eq!(entry.part_of_speech, "adjective");
    assert_eq!(
        entry.examples,
        vec!["a happy smile", "spent many happy days on the beach"]
    );
    assert_eq!(entry.synonyms, vec!["felicitous"]);
}

#[test]
fn test_adjective_satellite_and_marker() {
    let entry = lookup().define("galore").unwrap();
    assert_eq!(entry.part_of_speech, "adjective satellite");
    assert!(entry.synonyms.is_empty());
}

#[test]
fn test_adverb() {
    let entry = lookup().define("happily").unwrap();
    assert_eq!(entry.part_of_speech, "adverb");
    assert_eq!(entry.synonyms, vec!["merrily"]);
}

#[test]
fn test_plural_reduced_by_rules() {
    let entry = lookup().define("cats").unwrap();
    assert_eq!(entry.word, "cats");
    assert!(entry.definition.starts_with("feline mammal"));
}

#[test]
fn test_irregular_plural_from_exception_list() {
    let entry = lookup().define("mice").unwrap();
    assert!(entry.definition.starts_with("any of numerous small rodents"));
    assert_eq!(entry.synonyms, vec!["mouse"]);
}

#[test]
fn test_multiword_lemma() {
    let entry = lookup().define("Ice Cream").unwrap();
    assert_eq!(entry.word, "ice cream");
    assert_eq!(entry.synonyms, vec!["icecream"]);
}

#[test]
fn test_unknown_word_is_not_found() {
    let err = lookup().define("qwzxv").unwrap_err();
    assert!(matches!(err, Error::NotFound(ref w) if w == "qwzxv"));
}

#[test]
fn test_empty_word_is_not_found() {
    assert!(matches!(lookup().define("   "), Err(Error::NotFound(_))));
}

#[test]
fn test_placeholder_for_unknown_word() {
    let entry = lookup().define_or_placeholder("Seréndipty");
    assert_eq!(entry, WordEntry::not_found("seréndipty"));
    assert_eq!(entry.part_of_speech, "unknown");
    assert_eq!(entry.pronunciation, "N/A");
    assert_eq!(entry.definition, NO_ENTRY);
    assert!(entry.examples.is_empty());
    assert!(entry.synonyms.is_empty());
}

#[test]
fn test_synonyms_never_contain_the_word() {
    let lookup = lookup();
    for word in [
        "cat",
        "cats",
        "ice_cream",
        "ice cream",
        "mouse",
        "serendipity",
        "galore",
        "happy",
        "happily",
    ] {
        let entry = lookup.define(word).unwrap();
        let query = word.replace('_', " ");
        assert!(
            entry.synonyms.iter().all(|s| s.to_lowercase() != query),
            "{word}: {:?}",
            entry.synonyms
        );
        assert!(entry.synonyms.len() <= 3);
        assert!(entry.examples.len() <= 2);
    }
}

#[test]
fn test_repeated_lookups_are_identical() {
    let lookup = lookup();
    let first = serde_json::to_string(&lookup.define("cat").unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&lookup.define("cat").unwrap()).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_senses_follow_pos_order() {
    let senses = corpus().senses("cat");
    let pos: Vec<PartOfSpeech> = senses.iter().map(|s| s.pos).collect();
    assert_eq!(
        pos,
        vec![PartOfSpeech::Noun, PartOfSpeech::Noun, PartOfSpeech::Verb]
    );
}

#[test]
fn test_morphy_filters_unindexed_forms() {
    let corpus = corpus();
    assert_eq!(corpus.morphy("cats", PartOfSpeech::Noun), vec!["cat"]);
    assert_eq!(corpus.morphy("mice", PartOfSpeech::Noun), vec!["mouse"]);
    assert!(corpus.morphy("dogs", PartOfSpeech::Noun).is_empty());
}

#[test]
fn test_missing_directory() {
    let err = WordNet::load(Path::new("/definitely/not/here")).err().unwrap();
    assert!(matches!(err, Error::Corpus(_)));
}

#[test]
fn test_directory_without_wordnet_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(WordNet::load(dir.path()), Err(Error::Corpus(_))));
}

#[test]
fn test_partial_directory_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    for file in ["index.adv", "data.adv"] {
        std::fs::copy(fixture_dir().join(file), dir.path().join(file)).unwrap();
    }
    let corpus = WordNet::load(dir.path()).unwrap();
    assert_eq!(corpus.senses("happily").len(), 1);
    assert!(corpus.senses("cat").is_empty());
}
