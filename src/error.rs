//! Error types shared by the document, edit and session modules.

use crate::session::FileId;

pub type RetouchResult<T> = Result<T, RetouchError>;

#[derive(thiserror::Error, Debug)]
pub enum RetouchError {
    #[error("invalid JSON in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} is not an animation document: {reason}")]
    NotAnAnimation { name: String, reason: String },

    #[error("invalid color value: {0:?}")]
    InvalidColor(String),

    #[error("invalid speed multiplier: {0}")]
    InvalidSpeed(f64),

    #[error("layer index {index} out of range (document has {len} layers)")]
    LayerOutOfRange { index: usize, len: usize },

    #[error("no loaded file with id {0}")]
    UnknownFile(FileId),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RetouchError {
    pub fn parse(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            name: name.into(),
            source,
        }
    }

    pub fn not_an_animation(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotAnAnimation {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor(value.into())
    }
}
