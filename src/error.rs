// SPDX-License-Identifier: MPL-2.0
//! Error types shared across the client.
//!
//! Errors never reach the user verbatim. At the UI boundary they are mapped
//! to an i18n key via [`Error::i18n_key`] / [`ApiError::i18n_key`] and the
//! detail is written to the log instead.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("state file error: {0}")]
    State(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns the i18n key used when this error has to be surfaced.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "notification.ioError",
            Error::Config(_) => "notification.configLoadError",
            Error::State(_) => "notification.stateError",
            Error::Api(api) => api.i18n_key(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Failures talking to the analysis backend.
///
/// Every variant carries only a string so the error stays `Clone` and can
/// travel inside an iced `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status code.
    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    /// Connection refused, DNS failure, reset, etc.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Local file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ApiError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Io(_) => "notification.ioError",
            ApiError::Http { .. }
            | ApiError::Transport(_)
            | ApiError::Decode(_)
            | ApiError::InvalidBaseUrl(_) => "analysis.error",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
            }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_and_displays_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing file"));
    }

    #[test]
    fn upload_failures_share_the_generic_key() {
        for err in [
            ApiError::Http { status: 500 },
            ApiError::Transport("refused".into()),
            ApiError::Decode("bad json".into()),
        ] {
            assert_eq!(err.i18n_key(), "analysis.error");
        }
    }

    #[test]
    fn api_error_is_transparent_inside_error() {
        let err = Error::from(ApiError::Http { status: 404 });
        assert_eq!(err.to_string(), "server returned HTTP 404");
        assert_eq!(err.i18n_key(), "analysis.error");
    }

    #[test]
    fn toml_error_maps_to_config() {
        let parse = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
