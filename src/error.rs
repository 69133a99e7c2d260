use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // Source detail is left out of these messages; the CLI prints the
    // error chain, which would otherwise repeat it.
    #[error("Database error")]
    Db(#[from] rusqlite::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("File too large: {0} bytes exceeds the 10MB limit")]
    PayloadTooLarge(usize),

    #[error("{}", .errors.join("\n"))]
    UnprocessableContent { errors: Vec<String> },

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::UnprocessableContent {
            errors: vec![msg.into()],
        }
    }

    /// Status code a transport layer should answer with for this error.
    #[allow(dead_code)]
    pub fn status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::PayloadTooLarge(_) => 413,
            Self::UnsupportedMediaType(_) => 415,
            Self::UnprocessableContent { .. } | Self::InvalidDateFormat(_) => 422,
            Self::RateLimited { .. } => 429,
            Self::Db(_) | Self::Io(_) | Self::Csv(_) | Self::Settings(_) | Self::Internal(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Unauthorized.status(), 401);
        assert_eq!(ApiError::PayloadTooLarge(11_000_000).status(), 413);
        assert_eq!(ApiError::UnsupportedMediaType("text/plain".into()).status(), 415);
        assert_eq!(ApiError::unprocessable("bad").status(), 422);
        assert_eq!(ApiError::RateLimited { retry_after_secs: 30 }.status(), 429);
        assert_eq!(ApiError::Internal("boom".into()).status(), 500);
    }

    #[test]
    fn test_unprocessable_display_one_error_per_line() {
        let err = ApiError::UnprocessableContent {
            errors: vec!["Row 2: bad date".into(), "Row 5: missing amount".into()],
        };
        assert_eq!(err.to_string(), "Row 2: bad date\nRow 5: missing amount");
    }

    #[test]
    fn test_invalid_date_format_carries_input() {
        let err = ApiError::InvalidDateFormat("not-a-date".into());
        assert_eq!(err.to_string(), "Invalid date format: not-a-date");
    }
}
