use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate case id: {0}")]
    DuplicateCaseId(String),

    #[error("Case {0} has an empty label")]
    EmptyLabel(String),

    #[error("Malformed vocabulary: {0}")]
    MalformedVocabulary(String),

    #[error("Invalid k: {0} (must be at least 1)")]
    InvalidK(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
