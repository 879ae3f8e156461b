use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid weights configuration: {0}")]
    InvalidWeights(String),

    #[error("Invalid tag name: {0}")]
    InvalidTag(String),

    #[error("No element with the given ID found: {0}")]
    ElementNotFound(String),

    #[error("No original element tag is known")]
    UnknownTag,

    #[error("No candidate <{0}> elements found in diff document")]
    NoCandidates(String),
}

pub type Result<T> = std::result::Result<T, LocateError>;
