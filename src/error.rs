use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No entry found for '{0}'")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Could not read image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Classification error: {0}")]
    Model(String),

    #[error("Corpus error: {0}")]
    #[diagnostic(help("point --wordnet (or WORDNET_DIR) at a WordNet 3.x `dict` directory"))]
    Corpus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}
