// runtime configuration, filled from cli flags and the environment

use crate::core::{
    Dispatcher, ImageLookup, LabelEnrichment, OnlineClient, OnnxClassifier, WordLookup, WordNet,
};
use crate::Error;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// WordNet `dict` directory
    pub wordnet: Option<PathBuf>,
    /// ONNX classifier weights
    pub model: Option<PathBuf>,
    /// class names for the classifier, one per line
    pub labels: Option<PathBuf>,
    /// extra label descriptions (JSON)
    pub enrichment: Option<PathBuf>,
    pub online: OnlineConfig,
}

#[derive(Debug, Clone)]
pub struct OnlineConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: String,
}

impl Default for OnlineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            endpoint: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl OnlineConfig {
    // the flag alone is not enough, credentials must be there too
    pub fn is_enabled(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        self.enabled && present(&self.api_key) && present(&self.endpoint)
    }
}

impl Config {
    /// Load every configured resource once and wire up a dispatcher.
    pub fn dispatcher(&self) -> Result<Dispatcher, Error> {
        let mut dispatcher = Dispatcher::new();

        match &self.wordnet {
            Some(dir) => {
                let corpus = WordNet::load(dir)?;
                dispatcher = dispatcher.with_words(WordLookup::new(Arc::new(corpus)));
            }
            None => tracing::warn!("no wordnet directory configured, word lookup disabled"),
        }

        match (&self.model, &self.labels) {
            (Some(model), Some(labels)) => {
                let classifier = OnnxClassifier::load(model, labels)?;
                let enrichment = match &self.enrichment {
                    Some(path) => LabelEnrichment::with_file(path)?,
                    None => LabelEnrichment::builtin(),
                };
                dispatcher = dispatcher
                    .with_images(ImageLookup::new(Arc::new(classifier), Arc::new(enrichment)));
            }
            (Some(_), None) => {
                return Err(Error::Model(
                    "a label file is required with --model (--labels or GLOSSA_LABELS)"
                        .to_string(),
                ));
            }
            _ => tracing::warn!("no classifier configured, image lookup disabled"),
        }

        if self.online.enabled && !self.online.is_enabled() {
            tracing::warn!("online mode requested but api key or endpoint is missing, staying offline");
        }
        if let Some(client) = OnlineClient::from_config(&self.online) {
            tracing::info!(model = %self.online.model, "online mode enabled");
            dispatcher = dispatcher.with_online(client);
        }

        Ok(dispatcher)
    }
}
