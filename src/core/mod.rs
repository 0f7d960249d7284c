// core logic - lookups, classifier, online client and safety checks

mod ai;
mod classifier;
mod dispatch;
mod enrichment;
mod image;
mod safety;
mod word;
mod wordnet;

pub use self::ai::{OnlineClient, OnlineFailure, OnlineReply, QueryKind, parse_reply};
pub use self::classifier::{Classifier, INPUT_SIZE, InputTensor, OnnxClassifier};
pub use self::dispatch::{Answer, Dispatcher, Reply, Request};
pub use self::enrichment::{Enrichment, LabelEnrichment};
pub use self::image::{
    EXTENSIONS, ImageEntry, ImageLookup, MIN_CONFIDENCE, UNKNOWN_OBJECT, preprocess, softmax,
};
pub use self::safety::{REFUSAL_MESSAGE, Safety, SafetyVerdict};
pub use self::word::{NO_ENTRY, WordEntry, WordLookup};
pub use self::wordnet::{Corpus, PartOfSpeech, Sense, WordNet};
