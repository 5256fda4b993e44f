/*!
Error handling for the QUIC session wrapper.

Precondition violations (wrong state, bad argument) are reported
synchronously at the call site and leave the session untouched.
Native-reported transport and application errors are surfaced only
through the `closed` cell rejection and stream teardown.
*/

use thiserror::Error;

/// Result type for the session wrapper
pub type Result<T> = std::result::Result<T, SessionError>;

/// Error type for the session wrapper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation attempted in the wrong lifecycle state
    #[error("Session not in correct state: expected {expected}, but was {actual}")]
    InvalidState {
        expected: String,
        actual: String,
    },

    /// Invalid argument type or shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The native layer could not allocate a new stream handle
    #[error("Unable to create a new stream")]
    StreamOpenFailed,

    /// Transport-level protocol error reported by the native layer
    #[error("Transport error {code}")]
    Transport {
        code: u64,
        reason: Option<String>,
    },

    /// Application-level protocol error reported by the native layer
    #[error("Application error {code}")]
    Application {
        code: u64,
        reason: Option<String>,
    },

    /// Acquiring the request body source failed
    #[error("Body source error: {0}")]
    BodySource(String),

    /// QUIC support is not available in this build
    #[error("QUIC is not supported in this configuration")]
    NotSupported,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Build the terminating error for a native close notification.
    /// No error code means a clean close and yields `None`.
    pub fn from_close(kind: crate::session::CloseKind) -> Option<Self> {
        use crate::session::CloseKind;
        match kind {
            CloseKind::Clean => None,
            CloseKind::Transport { code, reason } => {
                Some(SessionError::Transport { code, reason })
            }
            CloseKind::Application { code, reason } => {
                Some(SessionError::Application { code, reason })
            }
        }
    }
}

/// Create an invalid state error
#[macro_export]
macro_rules! invalid_state_err {
    ($expected:expr, $actual:expr) => {
        Err($crate::error::SessionError::InvalidState {
            expected: $expected.to_string(),
            actual: $actual.to_string(),
        })
    };
}

/// Create an invalid argument error
#[macro_export]
macro_rules! invalid_arg_err {
    ($msg:expr) => {
        Err($crate::error::SessionError::InvalidArgument($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::error::SessionError::InvalidArgument(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CloseKind;

    #[test]
    fn test_error_display() {
        let err = SessionError::StreamOpenFailed;
        assert_eq!(format!("{}", err), "Unable to create a new stream");

        let err = SessionError::Transport { code: 7, reason: None };
        assert_eq!(format!("{}", err), "Transport error 7");

        let err = SessionError::InvalidState {
            expected: "open".to_string(),
            actual: "destroyed".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Session not in correct state: expected open, but was destroyed"
        );
    }

    #[test]
    fn test_from_close_mapping() {
        assert_eq!(SessionError::from_close(CloseKind::Clean), None);

        let err = SessionError::from_close(CloseKind::Transport {
            code: 2,
            reason: Some("internal".to_string()),
        });
        assert!(matches!(err, Some(SessionError::Transport { code: 2, .. })));

        let err = SessionError::from_close(CloseKind::Application { code: 42, reason: None });
        assert!(matches!(err, Some(SessionError::Application { code: 42, .. })));
    }

    #[test]
    fn test_macros() {
        let res: crate::error::Result<()> = invalid_state_err!("open", "closing");
        assert!(matches!(res, Err(SessionError::InvalidState { .. })));

        let res: crate::error::Result<()> = invalid_arg_err!("bad payload: {}", 3);
        assert_eq!(
            res.unwrap_err(),
            SessionError::InvalidArgument("bad payload: 3".to_string())
        );
    }
}
