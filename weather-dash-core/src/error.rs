use std::fmt;

pub use reqwest::StatusCode;
use thiserror::Error;

/// Why a provider lookup produced no record.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Provider answered with a non-success status (unknown city, bad key, ...).
    #[error("provider returned status {status}")]
    NotFound { status: StatusCode },

    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Body parsed, but a field the card needs is absent.
    #[error("weather provider response is missing `{0}`")]
    MissingField(&'static str),
}

/// User-facing message shown above the cards. A new one replaces the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CityNotFound,
    FetchFailed,
    AlreadyAdded,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CityNotFound => "City not found",
            Notice::FetchFailed => "Failed to fetch weather data",
            Notice::AlreadyAdded => "City already added",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&FetchError> for Notice {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::NotFound { .. } => Notice::CityNotFound,
            FetchError::Transport(_) | FetchError::Parse(_) | FetchError::MissingField(_) => {
                Notice::FetchFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(Notice::CityNotFound.to_string(), "City not found");
        assert_eq!(Notice::FetchFailed.to_string(), "Failed to fetch weather data");
        assert_eq!(Notice::AlreadyAdded.to_string(), "City already added");
    }

    #[test]
    fn non_success_status_is_city_not_found() {
        let err = FetchError::NotFound {
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(Notice::from(&err), Notice::CityNotFound);
    }

    #[test]
    fn parse_failure_is_generic() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FetchError::from(parse);
        assert_eq!(Notice::from(&err), Notice::FetchFailed);
    }

    #[test]
    fn incomplete_response_is_generic() {
        let err = FetchError::MissingField("weather[0]");
        assert_eq!(Notice::from(&err), Notice::FetchFailed);
    }
}
