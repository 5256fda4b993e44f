/*!
Session configuration.

This module provides the options a session is constructed with,
validated up front so that a misconfigured session fails at creation
rather than mid-handshake.
*/

use crate::error::{Result, SessionError};

/// Endpoint role in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Client role (initiates connection)
    Client,
    /// Server role (accepts connection)
    Server,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "Client"),
            Role::Server => write!(f, "Server"),
        }
    }
}

/// Options for constructing a session.
///
/// `alpn` and `authority` may be pre-known at construction time
/// (resumption / 0-RTT); the negotiated values recorded at handshake
/// completion override them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    /// Endpoint role.
    pub role: Role,
    /// Pre-known ALPN identifier, if resuming.
    pub alpn: Option<String>,
    /// SNI servername.
    pub servername: Option<String>,
    /// Pre-known authority for request dispatch, if resuming.
    pub authority: Option<String>,
    /// Intercept the TLS ClientHello (server only).
    pub client_hello: bool,
    /// Participate in OCSP exchanges.
    pub ocsp: bool,
    /// Request the TLS key log stream from the native layer.
    pub keylog: bool,
    /// Request the qlog trace stream from the native layer.
    pub qlog: bool,
}

impl SessionOptions {
    /// Options for a client-side session.
    pub fn client() -> Self {
        Self {
            role: Role::Client,
            alpn: None,
            servername: None,
            authority: None,
            client_hello: false,
            ocsp: false,
            keylog: false,
            qlog: false,
        }
    }

    /// Options for a server-side session.
    pub fn server() -> Self {
        Self {
            role: Role::Server,
            ..Self::client()
        }
    }

    pub fn with_alpn(mut self, alpn: impl Into<String>) -> Self {
        self.alpn = Some(alpn.into());
        self
    }

    pub fn with_servername(mut self, servername: impl Into<String>) -> Self {
        self.servername = Some(servername.into());
        self
    }

    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(alpn) = &self.alpn {
            if alpn.is_empty() {
                return Err(SessionError::InvalidArgument(
                    "alpn must not be empty".to_string(),
                ));
            }
        }
        if self.client_hello && self.role != Role::Server {
            return Err(SessionError::InvalidArgument(
                "client_hello interception is server-only".to_string(),
            ));
        }
        if let Some(servername) = &self.servername {
            if servername.is_empty() {
                return Err(SessionError::InvalidArgument(
                    "servername must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SessionOptions::client().role, Role::Client);
        assert_eq!(SessionOptions::server().role, Role::Server);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(SessionOptions::client().validate().is_ok());
        assert!(SessionOptions::server().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_alpn() {
        let opts = SessionOptions::client().with_alpn("");
        assert!(matches!(
            opts.validate(),
            Err(SessionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_client_side_clienthello() {
        let mut opts = SessionOptions::client();
        opts.client_hello = true;
        assert!(opts.validate().is_err());

        let mut opts = SessionOptions::server();
        opts.client_hello = true;
        assert!(opts.validate().is_ok());
    }
}
