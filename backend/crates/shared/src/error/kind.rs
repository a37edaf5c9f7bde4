//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum. Kinds follow HTTP reason phrases so the
//! same vocabulary covers local failures and the remote identity boundary.

/// Error classification
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert_eq!(kind.as_str(), "Unauthorized");
/// assert_eq!(kind.to_string(), "Unauthorized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No session or session rejected
    Unauthorized,
    /// Resource not found
    NotFound,
    /// Request conflicts with current state
    Conflict,
    /// Well-formed input that fails a policy
    UnprocessableEntity,
    /// Internal failure
    InternalServerError,
    /// Upstream answered with an error
    BadGateway,
    /// Upstream or backend unreachable
    ServiceUnavailable,
}

impl ErrorKind {
    /// Standard reason phrase
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
