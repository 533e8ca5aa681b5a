use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider query failed: {0}")]
    Query(String),
}

#[derive(Error, Debug)]
pub enum RankError {
    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Job has no required skills: {0}")]
    InvalidJob(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate resume id: {0}")]
    DuplicateResume(String),

    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
