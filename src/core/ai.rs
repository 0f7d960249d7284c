// hosted chat-completion client - the optional online track
// every failure comes back as OnlineFailure so the caller can fall back to offline lookup

use super::image::ImageEntry;
use super::word::WordEntry;
use crate::config::OnlineConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const API_VERSION: &str = "2024-02-01";
const WORD_TIMEOUT: Duration = Duration::from_secs(10);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(15);

const WORD_PROMPT: &str = r#"You are an English dictionary. Given a single English word, reply with ONE JSON object and nothing else:
{"word": "...", "part_of_speech": "...", "pronunciation": "...", "definition": "...", "examples": ["..."], "synonyms": ["..."]}

Rules:
- Use the most common sense of the word
- "pronunciation" is IPA, or "N/A" if unsure
- At most 2 examples and at most 3 synonyms; never list the word itself as a synonym
- If the request is unsafe, explicit or not a word, reply exactly {"error": "Sorry, I can't help with that request."}"#;

const IMAGE_PROMPT: &str = r#"You are a picture dictionary. Look at the image and reply with ONE JSON object and nothing else:
{"label": "...", "description": "...", "meaning": "..."}

Rules:
- "label" is a short name for the main subject
- "description" is one sentence about what is visible
- "meaning" is one sentence on what the subject is or is used for
- If the image is unsafe or explicit, reply exactly {"error": "Sorry, I can't help with that request."}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Word,
    Image,
}

/// What the hosted model answered.
#[derive(Debug, Clone, PartialEq)]
pub enum OnlineReply {
    Word(WordEntry),
    Image(ImageEntry),
    /// the model's own `{"error": ...}` refusal, verbatim
    Refused(String),
}

#[derive(Error, Debug)]
pub enum OnlineFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response is missing `{0}`")]
    MissingKey(&'static str),

    #[error("could not read image: {0}")]
    Image(#[from] std::io::Error),
}

pub struct OnlineClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    word_timeout: Duration,
    image_timeout: Duration,
}

// what we send to the deployment
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: Value,
}

// what comes back
#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OnlineClient {
    /// None unless online mode is switched on and credentials are present.
    pub fn from_config(config: &OnlineConfig) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }
        Some(Self::new(
            config.endpoint.as_deref()?,
            config.api_key.as_deref()?,
            &config.model,
        ))
    }

    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            word_timeout: WORD_TIMEOUT,
            image_timeout: IMAGE_TIMEOUT,
        }
    }

    /// Override the per-kind request timeouts (10 s word, 15 s image by default).
    pub fn with_timeouts(mut self, word: Duration, image: Duration) -> Self {
        self.word_timeout = word;
        self.image_timeout = image;
        self
    }

    pub async fn query(&self, kind: QueryKind, input: &str) -> Result<OnlineReply, OnlineFailure> {
        let (prompt, user, timeout) = match kind {
            QueryKind::Word => (WORD_PROMPT, Value::String(input.to_string()), self.word_timeout),
            QueryKind::Image => (IMAGE_PROMPT, image_message(Path::new(input))?, self.image_timeout),
        };

        let request = Request {
            model: &self.model,
            temperature: 0.2,
            max_tokens: 512,
            top_p: 1.0,
            messages: vec![
                Message {
                    role: "system",
                    content: Value::String(prompt.to_string()),
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.model
        );
        tracing::debug!(url = %url, ?kind, "sending online request");

        let response = self
            .client
            .post(&url)
            .query(&[("api-version", API_VERSION)])
            .header("api-key", &self.api_key)
            .header("content-type", "application/json")
            .timeout(timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OnlineFailure::Status { status, body });
        }

        let body = response.text().await?;
        let response: Response =
            serde_json::from_str(&body).map_err(|e| OnlineFailure::Malformed(e.to_string()))?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OnlineFailure::MissingKey("choices[0].message.content"))?;

        parse_reply(kind, &content, input)
    }
}

// image goes up inline as a data url
fn image_message(path: &Path) -> Result<Value, OnlineFailure> {
    let bytes = std::fs::read(path)?;
    let encoded = STANDARD.encode(bytes);
    Ok(serde_json::json!([
        {
            "type": "image_url",
            "image_url": { "url": format!("data:image/jpeg;base64,{encoded}") }
        },
        { "type": "text", "text": "Describe this image." }
    ]))
}

/// Turn the model's message content into a reply for `kind`.
pub fn parse_reply(kind: QueryKind, content: &str, input: &str) -> Result<OnlineReply, OnlineFailure> {
    // models sometimes wrap json in markdown code blocks
    let content = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let value: Value =
        serde_json::from_str(content).map_err(|e| OnlineFailure::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| OnlineFailure::Malformed("expected a JSON object".to_string()))?;

    if let Some(error) = object.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Ok(OnlineReply::Refused(message));
    }

    let keys: &[&'static str] = match kind {
        QueryKind::Word => &[
            "word",
            "part_of_speech",
            "pronunciation",
            "definition",
            "examples",
            "synonyms",
        ],
        QueryKind::Image => &["label", "description", "meaning"],
    };
    if let Some(missing) = keys.iter().find(|k| !object.contains_key(**k)) {
        return Err(OnlineFailure::MissingKey(*missing));
    }

    match kind {
        QueryKind::Word => {
            let mut entry: WordEntry = serde_json::from_value(value)
                .map_err(|e| OnlineFailure::Malformed(e.to_string()))?;
            if entry.word.trim().is_empty() {
                entry.word = input.trim().to_lowercase();
            }
            Ok(OnlineReply::Word(entry.clamp()))
        }
        QueryKind::Image => {
            let mut entry: ImageEntry = serde_json::from_value(value)
                .map_err(|e| OnlineFailure::Malformed(e.to_string()))?;
            entry.confidence = None;
            Ok(OnlineReply::Image(entry))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_code_fences() {
        let content = "```json\n{\"label\": \"cat\", \"description\": \"a cat\", \"meaning\": \"pet\"}\n```";
        let reply = parse_reply(QueryKind::Image, content, "cat.jpg").unwrap();
        assert!(matches!(reply, OnlineReply::Image(ref e) if e.label == "cat"));
    }

    #[test]
    fn refusal_passes_through() {
        let reply = parse_reply(QueryKind::Word, r#"{"error": "nope"}"#, "x").unwrap();
        assert_eq!(reply, OnlineReply::Refused("nope".to_string()));
    }

    #[test]
    fn missing_key_is_a_failure() {
        let err = parse_reply(QueryKind::Image, r#"{"label": "cat"}"#, "cat.jpg").unwrap_err();
        assert!(matches!(err, OnlineFailure::MissingKey("description")));
    }

    #[test]
    fn word_reply_is_clamped() {
        let content = r#"{"word": "happy", "part_of_speech": "adjective", "pronunciation": "/ˈhæpi/",
            "definition": "feeling joy", "examples": ["a", "b", "c"],
            "synonyms": ["Happy", "glad", "joyful", "content", "cheerful"]}"#;
        let OnlineReply::Word(entry) = parse_reply(QueryKind::Word, content, "happy").unwrap() else {
            panic!("expected a word entry");
        };
        assert_eq!(entry.examples.len(), 2);
        assert_eq!(entry.synonyms, vec!["glad", "joyful", "content"]);
    }
}
