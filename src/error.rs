//! Error types for the library layers.

use thiserror::Error;

/// Failures of a single comparison call. None of them is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("expected results from {expected} providers, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("provider '{provider}' has no location for '{place}'")]
    MissingLocation { provider: String, place: String },

    #[error("invalid distance units: {0} (expected \"km\", \"mi\" or both)")]
    InvalidUnits(String),
}

/// Failures of the cache/fetch adapter.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unknown geocoding provider: {0}")]
    UnknownProvider(String),

    #[error("{provider} requires an API key (environment variable {env_var})")]
    MissingApiKey { provider: String, env_var: String },

    #[error("invalid provider endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("request to {provider} failed: {source}")]
    Http {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("could not decode {provider} response: {source}")]
    Decode {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} response has an unusable value: {message}")]
    Malformed { provider: String, message: String },

    #[error("cache file not found and fetching is disabled: {0}")]
    NotFound(String),

    #[error("not a json file: {0}")]
    NotJson(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache file is not valid geodata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Place identity could not be established across providers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    #[error("place '{place}' is missing from the results of: {}", .providers.join(", "))]
    PlaceMissing {
        place: String,
        providers: Vec<String>,
    },
}

/// Failure to compare one place, raised where places are processed in bulk.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceError {
    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Compare(#[from] CompareError),
}
