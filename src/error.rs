use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("no pokemon with id {0}")]
    NotFound(u32),
    #[error("request failed: {0}")]
    Network(String),
    #[error("response parse error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamError {
    #[error("team is full")]
    Full,
    #[error("pokemon already in team")]
    Duplicate,
    #[error("team name is empty")]
    EmptyName,
}

impl TeamError {
    /// Full and duplicate rejections are reported to the user the same way.
    pub fn is_full_or_duplicate(self) -> bool {
        matches!(self, TeamError::Full | TeamError::Duplicate)
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage serialization error on {key}: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
