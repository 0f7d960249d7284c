// glossa library - word definitions and picture descriptions

pub mod chat;
pub mod cli;
pub mod config;
mod core;
mod error;
pub mod output;
mod server;

pub use crate::core::{
    Answer, Classifier, Corpus, Dispatcher, EXTENSIONS, Enrichment, INPUT_SIZE, ImageEntry,
    ImageLookup, InputTensor, LabelEnrichment, MIN_CONFIDENCE, NO_ENTRY, OnlineClient,
    OnlineFailure, OnlineReply, OnnxClassifier, PartOfSpeech, QueryKind, REFUSAL_MESSAGE, Reply,
    Request, Safety, SafetyVerdict, Sense, UNKNOWN_OBJECT, WordEntry, WordLookup, WordNet,
    parse_reply, preprocess, softmax,
};
pub use config::{Config, OnlineConfig};
pub use error::Error;
pub use server::Server;
