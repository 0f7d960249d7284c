// wordnet database reader
// loads the plain-text index/data files once and answers sense lookups from memory

use crate::Error;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Read-only lexical corpus: every sense-set a token belongs to, most frequent first.
pub trait Corpus: Send + Sync {
    fn senses(&self, word: &str) -> Vec<Sense>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl PartOfSpeech {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "a" => Some(Self::Adjective),
            "s" => Some(Self::AdjectiveSatellite),
            "r" => Some(Self::Adverb),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::AdjectiveSatellite => "adjective satellite",
            Self::Adverb => "adverb",
        }
    }
}

/// One sense-set (synset).
#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    pub pos: PartOfSpeech,
    pub definition: String,
    pub examples: Vec<String>,
    /// lemma names as stored, multiword lemmas joined by underscores
    pub lemmas: Vec<String>,
}

// index/data file suffix per searchable pos, in lookup order
const FILES: [(PartOfSpeech, &str); 4] = [
    (PartOfSpeech::Noun, "noun"),
    (PartOfSpeech::Verb, "verb"),
    (PartOfSpeech::Adjective, "adj"),
    (PartOfSpeech::Adverb, "adv"),
];

// suffix detachment rules, tried in order
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];
const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];
const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];
const ADV_RULES: &[(&str, &str)] = &[];

#[derive(Default)]
struct PosTables {
    // lemma -> synset offsets in sense order
    index: HashMap<String, Vec<u64>>,
    // offset -> raw data line
    data: HashMap<u64, String>,
    // inflected form -> base forms
    exceptions: HashMap<String, Vec<String>>,
}

pub struct WordNet {
    tables: HashMap<PartOfSpeech, PosTables>,
}

impl WordNet {
    /// Load a WordNet `dict` directory.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        if !dir.is_dir() {
            return Err(Error::Corpus(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let mut tables = HashMap::new();
        for (pos, suffix) in FILES {
            let index_path = dir.join(format!("index.{suffix}"));
            let data_path = dir.join(format!("data.{suffix}"));
            if !index_path.is_file() || !data_path.is_file() {
                tracing::warn!(pos = suffix, dir = %dir.display(), "wordnet files missing, skipping");
                continue;
            }

            let mut table = PosTables {
                index: parse_index(&std::fs::read_to_string(&index_path)?),
                data: parse_data(&std::fs::read_to_string(&data_path)?),
                exceptions: HashMap::new(),
            };

            let exc_path = dir.join(format!("{suffix}.exc"));
            if exc_path.is_file() {
                table.exceptions = parse_exceptions(&std::fs::read_to_string(&exc_path)?);
            }

            tracing::debug!(
                pos = suffix,
                lemmas = table.index.len(),
                synsets = table.data.len(),
                "loaded wordnet tables"
            );
            tables.insert(pos, table);
        }

        if tables.is_empty() {
            return Err(Error::Corpus(format!(
                "no index/data files found in {}",
                dir.display()
            )));
        }

        Ok(Self { tables })
    }

    /// Base forms of `form` that are indexed under `pos`.
    pub fn morphy(&self, form: &str, pos: PartOfSpeech) -> Vec<String> {
        let Some(table) = self.tables.get(&pos) else {
            return Vec::new();
        };

        let mut candidates = vec![form.to_string()];
        if let Some(bases) = table.exceptions.get(form) {
            candidates.extend(bases.iter().cloned());
        } else {
            let rules = match pos {
                PartOfSpeech::Noun => NOUN_RULES,
                PartOfSpeech::Verb => VERB_RULES,
                PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => ADJ_RULES,
                PartOfSpeech::Adverb => ADV_RULES,
            };
            for &(old, new) in rules {
                if let Some(stem) = form.strip_suffix(old) {
                    candidates.push(format!("{stem}{new}"));
                }
            }
        }

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| table.index.contains_key(c))
            .filter(|c| seen.insert(c.clone()))
            .collect()
    }
}

impl Corpus for WordNet {
    fn senses(&self, word: &str) -> Vec<Sense> {
        let form = word.trim().to_lowercase().replace(' ', "_");
        if form.is_empty() {
            return Vec::new();
        }

        let mut senses = Vec::new();
        for (pos, _) in FILES {
            let Some(table) = self.tables.get(&pos) else {
                continue;
            };
            let mut seen = HashSet::new();
            for base in self.morphy(&form, pos) {
                for offset in table.index.get(&base).into_iter().flatten() {
                    if !seen.insert(*offset) {
                        continue;
                    }
                    match table.data.get(offset).and_then(|line| parse_synset(line)) {
                        Some(sense) => senses.push(sense),
                        None => tracing::warn!(offset, "unreadable synset line"),
                    }
                }
            }
        }
        senses
    }
}

// license header lines are indented
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.starts_with(' ') && !l.trim().is_empty())
}

fn parse_index(text: &str) -> HashMap<String, Vec<u64>> {
    let mut index = HashMap::new();
    for line in content_lines(text) {
        if let Some((lemma, offsets)) = parse_index_line(line) {
            index.insert(lemma, offsets);
        }
    }
    index
}

// lemma pos synset_cnt p_cnt [ptr...] sense_cnt tagsense_cnt offset...
fn parse_index_line(line: &str) -> Option<(String, Vec<u64>)> {
    let mut fields = line.split_whitespace();
    let lemma = fields.next()?.to_string();
    let _pos = fields.next()?;
    let synset_cnt: usize = fields.next()?.parse().ok()?;
    let ptr_cnt: usize = fields.next()?.parse().ok()?;
    let mut fields = fields.skip(ptr_cnt + 2);
    let offsets = (0..synset_cnt)
        .map(|_| fields.next()?.parse().ok())
        .collect::<Option<Vec<u64>>>()?;
    Some((lemma, offsets))
}

fn parse_data(text: &str) -> HashMap<u64, String> {
    content_lines(text)
        .filter_map(|line| {
            let offset = line.split_whitespace().next()?.parse().ok()?;
            Some((offset, line.to_string()))
        })
        .collect()
}

fn parse_exceptions(text: &str) -> HashMap<String, Vec<String>> {
    content_lines(text)
        .filter_map(|line| {
            let mut words = line.split_whitespace().map(str::to_string);
            let inflected = words.next()?;
            Some((inflected, words.collect()))
        })
        .collect()
}

// offset lex_filenum ss_type w_cnt (word lex_id)... p_cnt ... | gloss
fn parse_synset(line: &str) -> Option<Sense> {
    let (columns, gloss) = line.split_once('|')?;
    let mut fields = columns.split_whitespace();
    let _offset = fields.next()?;
    let _lex_filenum = fields.next()?;
    let pos = PartOfSpeech::from_tag(fields.next()?)?;
    let word_cnt = usize::from_str_radix(fields.next()?, 16).ok()?;

    let mut lemmas = Vec::with_capacity(word_cnt);
    for _ in 0..word_cnt {
        lemmas.push(strip_marker(fields.next()?).to_string());
        let _lex_id = fields.next()?;
    }

    let (definition, examples) = split_gloss(gloss);
    Some(Sense {
        pos,
        definition,
        examples,
        lemmas,
    })
}

// adjective syntactic markers: (a), (p), (ip)
fn strip_marker(lemma: &str) -> &str {
    match lemma.find('(') {
        Some(at) if lemma.ends_with(')') => &lemma[..at],
        _ => lemma,
    }
}

// parts opening with a quote are examples, the rest is the definition
fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let mut definition = Vec::new();
    let mut examples = Vec::new();
    for part in gloss.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        if part.starts_with('"') {
            examples.push(part.trim_matches('"').to_string());
        } else {
            definition.push(part);
        }
    }
    (definition.join("; "), examples)
}
