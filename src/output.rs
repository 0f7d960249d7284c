// output formatting - labeled sections for humans or raw json

use crate::core::{Answer, ImageEntry, Reply, WordEntry};

pub struct Output;

impl Output {
    // [field] headers with the value indented underneath
    pub fn pretty(reply: &Reply) {
        println!("{}", render(&reply.answer));
        if let Some(note) = &reply.note {
            eprintln!("note: {note}");
        }
    }

    // raw json for scripts
    pub fn raw(reply: &Reply) {
        println!("{}", serde_json::to_string(&reply.answer).unwrap_or_default());
    }
}

pub fn render(answer: &Answer) -> String {
    match answer {
        Answer::Word(entry) => render_word(entry),
        Answer::Image(entry) => render_image(entry),
        Answer::Refusal { error } => error.clone(),
    }
}

fn render_word(entry: &WordEntry) -> String {
    let examples = if entry.examples.is_empty() {
        "  - (no example available)".to_string()
    } else {
        entry
            .examples
            .iter()
            .map(|e| format!("  - {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let synonyms = if entry.synonyms.is_empty() {
        "(none)".to_string()
    } else {
        entry.synonyms.join(", ")
    };

    format!(
        "[word]\n  {}\n[part_of_speech]\n  {}\n[pronunciation]\n  {}\n[definition]\n  {}\n[examples]\n{examples}\n[synonyms]\n  {synonyms}",
        entry.word, entry.part_of_speech, entry.pronunciation, entry.definition
    )
}

fn render_image(entry: &ImageEntry) -> String {
    let mut out = format!(
        "[label]\n  {}\n[description]\n  {}\n[meaning]\n  {}",
        entry.label, entry.description, entry.meaning
    );
    if let Some(confidence) = entry.confidence {
        out.push_str(&format!("\n[confidence]\n  {:.2}%", confidence * 100.0));
    }
    out
}
