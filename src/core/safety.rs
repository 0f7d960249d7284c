// keyword safety gate for incoming queries
// whole words only, so "therapist" or "skilled" get through

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const REFUSAL_MESSAGE: &str =
    "Sorry, I can't help with that request. Please enter a valid English word or image path.";

const BLOCKED_KEYWORDS: &[&str] = &[
    "weapon",
    "bomb",
    "explosive",
    "explicit",
    "porn",
    "pornography",
    "hate",
    "self-harm",
    "suicide",
    "kill",
    "murder",
    "rapist",
    "drug",
    "narcotic",
    "terrorism",
    "racist",
    "slur",
];

static BLOCKLIST: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = BLOCKED_KEYWORDS.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
        .expect("blocklist pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyVerdict {
    pub allowed: bool,
    pub reason: Option<String>,
}

pub struct Safety;

impl Safety {
    pub fn check(text: &str) -> SafetyVerdict {
        if text.trim().is_empty() {
            tracing::warn!("empty input received, treated as safe");
            return SafetyVerdict {
                allowed: true,
                reason: None,
            };
        }

        if let Some(hit) = BLOCKLIST.find(text) {
            tracing::info!(keyword = %hit.as_str().to_lowercase(), "blocked keyword in input");
            return SafetyVerdict {
                allowed: false,
                reason: Some(REFUSAL_MESSAGE.to_string()),
            };
        }

        SafetyVerdict {
            allowed: true,
            reason: None,
        }
    }
}
