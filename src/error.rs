//! Error types for RAL client operations.
//!
//! Every fallible operation in this crate returns one of these errors to
//! its immediate caller. Nothing is retried, swallowed, or logged here;
//! retry policy and user messaging belong to the embedding application.

use thiserror::Error;

/// Coarse categories of client errors.
///
/// Categories separate who has to act on a failure: the caller (bad
/// input), the engine (nonzero status), or whoever maintains the
/// client/engine pairing (contract mismatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-supplied input rejected before any engine call was made
    Local,
    /// The engine call completed but reported a nonzero status
    Engine,
    /// The engine reported success but its payload has the wrong shape
    Contract,
    /// The engine front end could not be located or spawned
    Transport,
}

impl ErrorCategory {
    /// Whether the failure never left this process.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Local => "Invalid input",
            Self::Engine => "Engine reported failure",
            Self::Contract => "Unexpected engine payload",
            Self::Transport => "Engine not reachable",
        }
    }
}

/// Errors that can occur during RAL client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any engine call (empty type name, empty
    /// attribute set). Always recoverable by the caller, never retried.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// The engine call completed with a nonzero status. The code is
    /// surfaced verbatim; the engine documents no stable taxonomy, so
    /// "unknown type", "not found", "ambiguous name" and internal faults
    /// all arrive through this variant.
    #[error("engine call failed with status {code}")]
    Engine {
        /// Raw engine status code, opaque beyond "nonzero means failure"
        code: i32,
    },

    /// The engine reported success but the payload does not match the
    /// expected shape. Indicates a client/engine version mismatch and is
    /// always fatal to the current call.
    #[error("malformed engine payload: {message}")]
    MalformedPayload {
        /// What failed to decode
        message: String,
    },

    /// A resource listing contained two resources with the same name,
    /// violating the per-type uniqueness the engine is supposed to hold.
    #[error("more than one {resource_type} resource named '{name}'")]
    MultipleMatches {
        /// Resource type that was listed
        resource_type: String,
        /// The duplicated resource name
        name: String,
    },

    /// No ralsh executable was found on this host.
    #[error("ralsh not found. Install libral from https://github.com/puppetlabs/libral")]
    EngineNotFound,

    /// The engine process could not be spawned at all.
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output, if any was captured
        stderr: String,
    },
}

impl Error {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidArgument { .. } => ErrorCategory::Local,
            Error::Engine { .. } => ErrorCategory::Engine,
            Error::MalformedPayload { .. } | Error::MultipleMatches { .. } => {
                ErrorCategory::Contract
            }
            Error::EngineNotFound | Error::CommandFailed { .. } => ErrorCategory::Transport,
        }
    }

    /// Whether the failure never left this process.
    pub fn is_local(&self) -> bool {
        self.category().is_local()
    }

    /// The raw engine status code, if the engine reported one.
    pub fn engine_code(&self) -> Option<i32> {
        match self {
            Error::Engine { code } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedPayload {
            message: err.to_string(),
        }
    }
}

/// Result type for RAL client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = Error::InvalidArgument {
            message: "empty".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Local);
        assert!(err.is_local());

        let err = Error::Engine { code: 12 };
        assert_eq!(err.category(), ErrorCategory::Engine);
        assert!(!err.is_local());

        assert_eq!(Error::EngineNotFound.category(), ErrorCategory::Transport);
        assert_eq!(
            Error::MultipleMatches {
                resource_type: "host".into(),
                name: "localhost".into(),
            }
            .category(),
            ErrorCategory::Contract
        );
    }

    #[test]
    fn test_engine_code() {
        assert_eq!(Error::Engine { code: 12 }.engine_code(), Some(12));
        assert_eq!(Error::EngineNotFound.engine_code(), None);
    }

    #[test]
    fn test_json_errors_are_contract_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::MalformedPayload { .. }));
        assert_eq!(err.category(), ErrorCategory::Contract);
    }

    #[test]
    fn test_display_includes_code() {
        let err = Error::Engine { code: 7 };
        assert_eq!(err.to_string(), "engine call failed with status 7");
    }
}
