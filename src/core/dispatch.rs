// request orchestration: safety gate, then online (if on), then offline

use super::ai::{OnlineClient, OnlineReply, QueryKind};
use super::image::{ImageEntry, ImageLookup};
use super::safety::Safety;
use super::word::{WordEntry, WordLookup};
use crate::Error;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Define(String),
    Describe(String),
}

/// Structured answer handed to the user. Serializes to the reply schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Word(WordEntry),
    Image(ImageEntry),
    Refusal { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub answer: Answer,
    /// diagnostic only, e.g. why the online track was skipped
    pub note: Option<String>,
}

impl Reply {
    fn new(answer: Answer) -> Self {
        Self { answer, note: None }
    }

    pub fn is_refusal(&self) -> bool {
        matches!(self.answer, Answer::Refusal { .. })
    }
}

impl From<OnlineReply> for Answer {
    fn from(reply: OnlineReply) -> Self {
        match reply {
            OnlineReply::Word(entry) => Answer::Word(entry),
            OnlineReply::Image(entry) => Answer::Image(entry),
            OnlineReply::Refused(error) => Answer::Refusal { error },
        }
    }
}

#[derive(Default)]
pub struct Dispatcher {
    words: Option<WordLookup>,
    images: Option<Arc<ImageLookup>>,
    online: Option<OnlineClient>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(mut self, words: WordLookup) -> Self {
        self.words = Some(words);
        self
    }

    pub fn with_images(mut self, images: ImageLookup) -> Self {
        self.images = Some(Arc::new(images));
        self
    }

    pub fn with_online(mut self, online: OnlineClient) -> Self {
        self.online = Some(online);
        self
    }

    pub fn is_online(&self) -> bool {
        self.online.is_some()
    }

    pub async fn handle(&self, request: Request) -> Reply {
        match request {
            Request::Define(word) => self.define(&word).await,
            Request::Describe(path) => self.describe(&path).await,
        }
    }

    pub async fn define(&self, word: &str) -> Reply {
        if let Some(refusal) = refuse(word) {
            return refusal;
        }
        tracing::info!(word = %word.trim(), "looking up word");

        let note = match self.try_online(QueryKind::Word, word.trim()).await {
            Ok(answer) => return Reply::new(answer),
            Err(note) => note,
        };

        let entry = match &self.words {
            Some(words) => match words.define(word) {
                Ok(entry) => entry,
                Err(Error::NotFound(_)) => WordEntry::not_found(word),
                Err(e) => {
                    tracing::error!(error = %e, "word lookup failed");
                    WordEntry {
                        definition: e.to_string(),
                        ..WordEntry::not_found(word)
                    }
                }
            },
            None => WordEntry {
                definition: "Word lookup is not configured. Set --wordnet or WORDNET_DIR."
                    .to_string(),
                ..WordEntry::not_found(word)
            },
        };

        Reply {
            answer: Answer::Word(entry),
            note,
        }
    }

    pub async fn describe(&self, path: &str) -> Reply {
        if let Some(refusal) = refuse(path) {
            return refusal;
        }
        let path = path.trim();
        tracing::info!(path = %path, "describing image");

        let note = match self.try_online(QueryKind::Image, path).await {
            Ok(answer) => return Reply::new(answer),
            Err(note) => note,
        };

        let entry = match &self.images {
            // decoding and inference are cpu-bound, keep them off the runtime workers
            Some(images) => {
                let images = Arc::clone(images);
                let path = PathBuf::from(path);
                match tokio::task::spawn_blocking(move || images.describe(&path)).await {
                    Ok(Ok(entry)) => entry,
                    Ok(Err(e)) => {
                        tracing::error!(error = %e, "image lookup failed");
                        ImageEntry::failed(e.to_string())
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "image lookup task failed");
                        ImageEntry::failed(format!("Classification error: {e}"))
                    }
                }
            }
            None => ImageEntry::failed(
                "Image classification is not configured. Set --model and --labels.",
            ),
        };

        Reply {
            answer: Answer::Image(entry),
            note,
        }
    }

    // Ok means the online answer is final; Err carries the fallback note, if any
    async fn try_online(&self, kind: QueryKind, input: &str) -> Result<Answer, Option<String>> {
        let Some(online) = &self.online else {
            return Err(None);
        };

        match online.query(kind, input).await {
            Ok(reply) => Ok(reply.into()),
            Err(failure) => {
                tracing::warn!(error = %failure, "online lookup failed, falling back to offline");
                Err(Some(format!(
                    "online lookup failed ({failure}), showing the offline result"
                )))
            }
        }
    }
}

fn refuse(input: &str) -> Option<Reply> {
    let verdict = Safety::check(input);
    if verdict.allowed {
        return None;
    }
    Some(Reply::new(Answer::Refusal {
        error: verdict.reason.unwrap_or_default(),
    }))
}
