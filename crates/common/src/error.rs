use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrrError {
    #[error("entry value is empty")]
    EmptyValue,

    #[error("duplicate key in entry list: {0}")]
    DuplicateKey(String),

    #[error("key already exists: {0}")]
    KeyExists(String),

    #[error("selector has no entries")]
    EmptySelector,

    #[error("no entry matched drawn weight {0}")]
    NoMatch(u64),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type WrrResult<T> = Result<T, WrrError>;
