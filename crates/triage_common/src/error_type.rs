//! Error taxonomy - closed set of known failure modes
//!
//! Each error type carries a static fixability flag (whether a canned
//! remediation exists) and a static severity used for notifications.
//! Classification is substring containment in a fixed priority order,
//! so a message holding several known tokens resolves by priority, not
//! by position in the text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known error types, plus a catch-all for anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    NullPointerException,
    ConnectionTimeoutError,
    OutOfMemoryError,
    FileNotFoundException,
    AuthenticationError,
    PermissionDenied,
    UnknownError,
}

/// Notification urgency for an error that escalated to manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

/// Classification priority. First containment match wins.
const CLASSIFY_ORDER: [ErrorType; 6] = [
    ErrorType::NullPointerException,
    ErrorType::ConnectionTimeoutError,
    ErrorType::OutOfMemoryError,
    ErrorType::FileNotFoundException,
    ErrorType::AuthenticationError,
    ErrorType::PermissionDenied,
];

impl ErrorType {
    /// Canonical name as it appears in log messages and on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::NullPointerException => "NullPointerException",
            ErrorType::ConnectionTimeoutError => "ConnectionTimeoutError",
            ErrorType::OutOfMemoryError => "OutOfMemoryError",
            ErrorType::FileNotFoundException => "FileNotFoundException",
            ErrorType::AuthenticationError => "AuthenticationError",
            ErrorType::PermissionDenied => "PermissionDenied",
            ErrorType::UnknownError => "UnknownError",
        }
    }

    /// Whether a deterministic remediation exists for this type.
    pub fn is_fixable(&self) -> bool {
        matches!(
            self,
            ErrorType::NullPointerException
                | ErrorType::ConnectionTimeoutError
                | ErrorType::OutOfMemoryError
                | ErrorType::FileNotFoundException
        )
    }

    /// Static severity used when recording a notification.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorType::AuthenticationError => Severity::Critical,
            ErrorType::PermissionDenied => Severity::High,
            ErrorType::OutOfMemoryError => Severity::High,
            ErrorType::NullPointerException => Severity::Medium,
            ErrorType::ConnectionTimeoutError => Severity::Medium,
            ErrorType::FileNotFoundException => Severity::Low,
            ErrorType::UnknownError => Severity::Medium,
        }
    }

    /// Classify a raw error message.
    ///
    /// Pure and total: the same message always yields the same type,
    /// and unrecognized messages degrade to `UnknownError`.
    pub fn classify(message: &str) -> ErrorType {
        for candidate in CLASSIFY_ORDER {
            if message.contains(candidate.as_str()) {
                return candidate;
            }
        }
        ErrorType::UnknownError
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strict parse for caller-supplied names. Unknown names are rejected
/// rather than degraded to `UnknownError`.
impl FromStr for ErrorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NullPointerException" => Ok(ErrorType::NullPointerException),
            "ConnectionTimeoutError" => Ok(ErrorType::ConnectionTimeoutError),
            "OutOfMemoryError" => Ok(ErrorType::OutOfMemoryError),
            "FileNotFoundException" => Ok(ErrorType::FileNotFoundException),
            "AuthenticationError" => Ok(ErrorType::AuthenticationError),
            "PermissionDenied" => Ok(ErrorType::PermissionDenied),
            "UnknownError" => Ok(ErrorType::UnknownError),
            other => Err(format!("unknown error type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_types() {
        assert_eq!(
            ErrorType::classify("NullPointerException: x is null"),
            ErrorType::NullPointerException
        );
        assert_eq!(
            ErrorType::classify("ConnectionTimeoutError: timed out after 30s"),
            ErrorType::ConnectionTimeoutError
        );
        assert_eq!(
            ErrorType::classify("OutOfMemoryError: heap space exceeded"),
            ErrorType::OutOfMemoryError
        );
        assert_eq!(
            ErrorType::classify("FileNotFoundException: /etc/app/config.yaml"),
            ErrorType::FileNotFoundException
        );
        assert_eq!(
            ErrorType::classify("AuthenticationError: bad token"),
            ErrorType::AuthenticationError
        );
        assert_eq!(
            ErrorType::classify("PermissionDenied: access forbidden"),
            ErrorType::PermissionDenied
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(
            ErrorType::classify("something weird happened"),
            ErrorType::UnknownError
        );
        assert_eq!(ErrorType::classify(""), ErrorType::UnknownError);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let msg = "AuthenticationError: invalid credentials";
        let first = ErrorType::classify(msg);
        for _ in 0..10 {
            assert_eq!(ErrorType::classify(msg), first);
        }
    }

    #[test]
    fn test_classify_priority_order_beats_text_order() {
        // PermissionDenied appears first in the text but
        // NullPointerException has classification priority.
        let msg = "PermissionDenied while handling NullPointerException";
        assert_eq!(ErrorType::classify(msg), ErrorType::NullPointerException);
    }

    #[test]
    fn test_fixability_flags() {
        assert!(ErrorType::NullPointerException.is_fixable());
        assert!(ErrorType::ConnectionTimeoutError.is_fixable());
        assert!(ErrorType::OutOfMemoryError.is_fixable());
        assert!(ErrorType::FileNotFoundException.is_fixable());
        assert!(!ErrorType::AuthenticationError.is_fixable());
        assert!(!ErrorType::PermissionDenied.is_fixable());
        assert!(!ErrorType::UnknownError.is_fixable());
    }

    #[test]
    fn test_severity_table() {
        assert_eq!(ErrorType::AuthenticationError.severity(), Severity::Critical);
        assert_eq!(ErrorType::PermissionDenied.severity(), Severity::High);
        assert_eq!(ErrorType::OutOfMemoryError.severity(), Severity::High);
        assert_eq!(ErrorType::NullPointerException.severity(), Severity::Medium);
        assert_eq!(ErrorType::ConnectionTimeoutError.severity(), Severity::Medium);
        assert_eq!(ErrorType::FileNotFoundException.severity(), Severity::Low);
        assert_eq!(ErrorType::UnknownError.severity(), Severity::Medium);
    }

    #[test]
    fn test_from_str_rejects_unknown_names() {
        assert_eq!(
            "PermissionDenied".parse::<ErrorType>(),
            Ok(ErrorType::PermissionDenied)
        );
        assert!("TotallyMadeUpError".parse::<ErrorType>().is_err());
        assert!("".parse::<ErrorType>().is_err());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
        assert_eq!(Severity::Low.to_string(), "LOW");
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&ErrorType::FileNotFoundException).unwrap();
        assert_eq!(json, "\"FileNotFoundException\"");
        let sev = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(sev, "\"CRITICAL\"");
    }
}
