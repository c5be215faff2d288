use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Never carries the request URL, which may hold credentials.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Upstream contract violation: {0}")]
    ContractViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn contract(message: impl Into<String>) -> Self {
        Error::ContractViolation(message.into())
    }

    /// True when the upstream answered but not in the shape we asked for.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::ContractViolation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Http(error.without_url())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
