use std::fmt;

use thiserror::Error;

/// Every way a question fetch can fail.
///
/// All variants are surfaced to the user as a single "fetch failed" banner
/// carrying the `Display` text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("trivia service responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("trivia service rejected the request: {0}")]
    Api(ResponseCode),
    #[error("trivia service returned no questions")]
    EmptyResultSet,
    #[error("question {index} is missing its {field}")]
    MalformedQuestion { index: usize, field: &'static str },
}

/// Non-zero `response_code` values reported in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoResults,
    InvalidParameter,
    TokenNotFound,
    TokenEmpty,
    RateLimited,
    Unknown(u8),
}

impl ResponseCode {
    /// Map a body code to a failure; `0` means success.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::NoResults),
            2 => Some(Self::InvalidParameter),
            3 => Some(Self::TokenNotFound),
            4 => Some(Self::TokenEmpty),
            5 => Some(Self::RateLimited),
            other => Some(Self::Unknown(other)),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => write!(f, "not enough questions for this category and difficulty"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::TokenNotFound => write!(f, "session token not found"),
            Self::TokenEmpty => write!(f, "session token exhausted"),
            Self::RateLimited => write!(f, "too many requests, wait a few seconds"),
            Self::Unknown(code) => write!(f, "unknown response code {}", code),
        }
    }
}
