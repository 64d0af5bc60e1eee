//! Foscam CGI result codes

use std::fmt;

/// Message for any code outside the documented table
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Result code carried in `<CGI_Result><result>..</result></CGI_Result>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    FormatError,
    AuthError,
    AccessDenied,
    ExecuteFailed,
    Timeout,

    /// Undocumented code. Treated as a failure.
    Unknown(i32),
}

impl From<i32> for ResultCode {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Success,
            -1 => Self::FormatError,
            -2 => Self::AuthError,
            -3 => Self::AccessDenied,
            -4 => Self::ExecuteFailed,
            -5 => Self::Timeout,
            other => Self::Unknown(other),
        }
    }
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Success => 0,
            ResultCode::FormatError => -1,
            ResultCode::AuthError => -2,
            ResultCode::AccessDenied => -3,
            ResultCode::ExecuteFailed => -4,
            ResultCode::Timeout => -5,
            ResultCode::Unknown(v) => v,
        }
    }
}

impl ResultCode {
    pub fn is_success(&self) -> bool {
        matches!(self, ResultCode::Success)
    }

    /// Table description, or `None` for undocumented codes
    pub fn describe(&self) -> Option<&'static str> {
        match self {
            Self::Success => Some("Success"),
            Self::FormatError => Some("CGI request string format error"),
            Self::AuthError => Some("Username or password error"),
            Self::AccessDenied => Some("Access deny"),
            Self::ExecuteFailed => Some("CGI execute fail"),
            Self::Timeout => Some("Timeout"),
            Self::Unknown(_) => None,
        }
    }

    /// Description with the `"unknown error"` fallback
    pub fn message(&self) -> &'static str {
        self.describe().unwrap_or(UNKNOWN_ERROR)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(v) => write!(f, "{} ({})", UNKNOWN_ERROR, v),
            other => f.write_str(other.message()),
        }
    }
}
