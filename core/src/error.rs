//! Error types for the news API client.
//!
//! # Design
//! Four failure families are kept apart so callers can react to each one
//! differently: `ValidationError` never leaves the process, `TransportError`
//! never reached the server (or the server never answered), `ApiError` is the
//! server's own verdict, and `DecodeError` means the body did not have the
//! shape the endpoint promises. `NewsApiError` is the union returned by every
//! public operation.

use std::fmt;

use thiserror::Error;

/// Every error a `NewsClient` operation can return.
#[derive(Debug, Error)]
pub enum NewsApiError {
    #[error("invalid options: {0}")]
    Validation(#[from] ValidationError),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("news api error: {0}")]
    Api(#[from] ApiError),

    #[error("malformed response: {0}")]
    Decode(#[from] DecodeError),

    /// The server returned a non-2xx status without an error envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

/// Pre-flight rejection of an options value. One variant per rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one of q, category, country or sources must be set")]
    TopHeadlinesScopeMissing,

    #[error("sources cannot be combined with category or country")]
    SourcesWithCategoryOrCountry,

    #[error("at least one of q, qInTitle, sources or domains must be set")]
    EverythingScopeMissing,

    #[error("unknown category {0:?}")]
    InvalidCategory(String),

    #[error("unknown country {0:?}")]
    InvalidCountry(String),

    #[error("unknown language {0:?}")]
    InvalidLanguage(String),

    #[error("unknown sort order {0:?}")]
    InvalidSortBy(String),

    #[error("{0} sources given, at most 20 are allowed")]
    TooManySources(usize),

    #[error("page size {0} exceeds the maximum of 100")]
    PageSizeTooLarge(u32),
}

/// Failure before or during the network round trip.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Caught locally; no request was sent.
    #[error("the API key cannot be empty")]
    MissingApiKey,

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The server rejected the request after receiving it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::from_code(code),
            message: message.into(),
        }
    }

    /// True when the key itself is the problem and retrying with the same
    /// key cannot succeed.
    pub fn is_key_problem(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::ApiKeyDisabled
                | ApiErrorKind::ApiKeyExhausted
                | ApiErrorKind::ApiKeyInvalid
                | ApiErrorKind::ApiKeyMissing
        )
    }

    pub fn is_rate_limited(&self) -> bool {
        self.kind == ApiErrorKind::RateLimited
    }
}

/// Semantic classification of the `code` field of an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    ApiKeyDisabled,
    ApiKeyExhausted,
    ApiKeyInvalid,
    ApiKeyMissing,
    ParameterInvalid,
    ParametersMissing,
    RateLimited,
    SourcesTooMany,
    SourceDoesNotExist,
    UnexpectedError,
    /// A code this client does not know; the raw code is kept.
    Unknown(String),
}

impl ApiErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "apiKeyDisabled" => Self::ApiKeyDisabled,
            "apiKeyExhausted" => Self::ApiKeyExhausted,
            "apiKeyInvalid" => Self::ApiKeyInvalid,
            "apiKeyMissing" => Self::ApiKeyMissing,
            "parameterInvalid" => Self::ParameterInvalid,
            "parametersMissing" => Self::ParametersMissing,
            "rateLimited" => Self::RateLimited,
            "sourcesTooMany" => Self::SourcesTooMany,
            "sourceDoesNotExist" => Self::SourceDoesNotExist,
            "unexpectedError" => Self::UnexpectedError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire code this kind was classified from.
    pub fn as_code(&self) -> &str {
        match self {
            Self::ApiKeyDisabled => "apiKeyDisabled",
            Self::ApiKeyExhausted => "apiKeyExhausted",
            Self::ApiKeyInvalid => "apiKeyInvalid",
            Self::ApiKeyMissing => "apiKeyMissing",
            Self::ParameterInvalid => "parameterInvalid",
            Self::ParametersMissing => "parametersMissing",
            Self::RateLimited => "rateLimited",
            Self::SourcesTooMany => "sourcesTooMany",
            Self::SourceDoesNotExist => "sourceDoesNotExist",
            Self::UnexpectedError => "unexpectedError",
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown error code {code:?}"),
            known => f.write_str(known.as_code()),
        }
    }
}

/// The body did not match the shape expected for the endpoint.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unexpected status tag {0:?}")]
    UnexpectedStatus(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 10] = [
        "apiKeyDisabled",
        "apiKeyExhausted",
        "apiKeyInvalid",
        "apiKeyMissing",
        "parameterInvalid",
        "parametersMissing",
        "rateLimited",
        "sourcesTooMany",
        "sourceDoesNotExist",
        "unexpectedError",
    ];

    #[test]
    fn every_known_code_maps_back_to_itself() {
        for code in KNOWN {
            let kind = ApiErrorKind::from_code(code);
            assert!(!matches!(kind, ApiErrorKind::Unknown(_)), "{code}");
            assert_eq!(kind.as_code(), code);
        }
    }

    #[test]
    fn unrecognized_code_is_kept_verbatim() {
        let kind = ApiErrorKind::from_code("somethingNew");
        assert_eq!(kind, ApiErrorKind::Unknown("somethingNew".to_string()));
        assert_eq!(kind.as_code(), "somethingNew");
    }

    #[test]
    fn code_matching_is_case_sensitive() {
        assert!(matches!(
            ApiErrorKind::from_code("ratelimited"),
            ApiErrorKind::Unknown(_)
        ));
    }

    #[test]
    fn key_and_rate_limit_helpers() {
        assert!(ApiError::new("apiKeyExhausted", "").is_key_problem());
        assert!(!ApiError::new("rateLimited", "").is_key_problem());
        assert!(ApiError::new("rateLimited", "").is_rate_limited());
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = ApiError::new("parameterInvalid", "bad country");
        assert_eq!(err.to_string(), "parameterInvalid: bad country");
        let err = NewsApiError::from(ValidationError::TooManySources(21));
        assert_eq!(
            err.to_string(),
            "invalid options: 21 sources given, at most 20 are allowed"
        );
    }
}
