// curated description/meaning text for classifier labels

use crate::Error;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "tabby",
        "A tabby cat with distinctive striped or spotted fur markings.",
        "A domestic cat pattern; one of the most common coat types in household cats.",
    ),
    (
        "tiger cat",
        "A tiger cat (mackerel tabby) with bold striped markings.",
        "A domestic cat breed known for tiger-like stripes on its coat.",
    ),
    (
        "Siamese cat",
        "A Siamese cat with a light body and dark points on the ears, face, and paws.",
        "A domestic cat breed known for its distinct coloration and vocal behavior.",
    ),
    (
        "Egyptian cat",
        "An Egyptian Mau cat with a spotted coat and elegant build.",
        "One of the oldest domesticated cat breeds, originating from Egypt.",
    ),
    (
        "Persian cat",
        "A Persian cat with long, luxurious fur and a flat face.",
        "A popular domestic breed known for its gentle temperament and long coat.",
    ),
    (
        "golden retriever",
        "A golden retriever with a friendly expression and golden coat.",
        "A popular dog breed valued for its intelligence and gentle nature.",
    ),
    (
        "Labrador retriever",
        "A Labrador retriever with a short, dense coat.",
        "One of the most popular dog breeds, often used as service and guide dogs.",
    ),
    (
        "German shepherd",
        "A German shepherd dog with an alert posture.",
        "A working dog breed known for its intelligence, loyalty, and versatility.",
    ),
    (
        "cup",
        "A cup, a small open container used for drinking.",
        "A common household item for holding beverages, typically with a handle.",
    ),
    (
        "coffee mug",
        "A coffee mug, a sturdy cup designed for hot beverages.",
        "A household drinkware item, larger than a teacup, often ceramic.",
    ),
    (
        "wooden spoon",
        "A wooden spoon used for cooking and stirring.",
        "A kitchen utensil carved from wood, commonly used when cooking.",
    ),
    (
        "chair",
        "A chair, a piece of furniture for sitting.",
        "A common furniture item with a seat, back, and often four legs.",
    ),
    (
        "folding chair",
        "A folding chair, a portable and collapsible seating option.",
        "A lightweight chair designed to fold flat for easy storage and transport.",
    ),
    (
        "rocking chair",
        "A rocking chair with curved legs that allows back-and-forth motion.",
        "A type of chair often associated with relaxation and front porches.",
    ),
    (
        "desk",
        "A desk, a flat-surfaced table used for reading, writing, or working.",
        "A furniture piece commonly found in offices and study areas.",
    ),
    (
        "laptop",
        "A laptop computer, a portable personal computer.",
        "An electronic device used for computing, communication, and entertainment.",
    ),
    (
        "cellular telephone",
        "A mobile phone, a wireless communication device.",
        "A widely-used electronic device for calls, messaging, and internet access.",
    ),
    (
        "monitor",
        "A computer monitor, an electronic display screen.",
        "An output device used to visually display information from a computer.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Enrichment {
    pub description: String,
    pub meaning: String,
}

/// Class name -> (description, meaning). Read-only once built.
#[derive(Debug, Clone)]
pub struct LabelEnrichment {
    entries: HashMap<String, Enrichment>,
}

impl Default for LabelEnrichment {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabelEnrichment {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(label, description, meaning)| {
                (
                    label.to_string(),
                    Enrichment {
                        description: description.to_string(),
                        meaning: meaning.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Built-in table plus entries from a `{"label": {"description", "meaning"}}` file.
    pub fn with_file(path: &Path) -> Result<Self, Error> {
        let extra: HashMap<String, Enrichment> =
            serde_json::from_str(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), entries = extra.len(), "loaded label enrichment");

        let mut table = Self::builtin();
        table.entries.extend(extra);
        Ok(table)
    }

    pub fn get(&self, label: &str) -> Option<&Enrichment> {
        self.entries.get(label)
    }

    /// Curated text for `label`, or the generic template when there is none.
    pub fn describe(&self, label: &str) -> Enrichment {
        match self.get(label) {
            Some(entry) => entry.clone(),
            None => Enrichment {
                description: format!("An image likely depicting: {label}."),
                meaning: format!(
                    "'{}' is a concept or object recognized by the image classifier. \
                     Consult a reference for more context.",
                    title_case(label)
                ),
            },
        }
    }
}

// capitalize the first letter of every alphabetic run, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
