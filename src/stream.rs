/*!
Stream wrapper and open options.

A `Stream` is owned by exactly one session and lives in its registry
keyed by stream id. The session is the only mutator of the registry;
streams never remove themselves.
*/

use bytes::Bytes;

use crate::error::{Result, SessionError};
use crate::handle::StreamHandle;

/// Source of a request body for a locally opened stream.
///
/// Acquisition happens after `open` returns, on the dispatch turn; a
/// failing provider destroys the affected stream, not the session.
pub enum BodySource {
    /// A body that is already available.
    Ready(Bytes),
    /// A body produced on demand at dispatch time.
    Provider(Box<dyn FnOnce() -> Result<Bytes> + Send>),
}

impl BodySource {
    pub fn from_fn(provider: impl FnOnce() -> Result<Bytes> + Send + 'static) -> Self {
        BodySource::Provider(Box::new(provider))
    }

    pub(crate) fn acquire(self) -> Result<Bytes> {
        match self {
            BodySource::Ready(bytes) => Ok(bytes),
            BodySource::Provider(provider) => provider(),
        }
    }
}

impl From<Bytes> for BodySource {
    fn from(bytes: Bytes) -> Self {
        BodySource::Ready(bytes)
    }
}

impl From<Vec<u8>> for BodySource {
    fn from(bytes: Vec<u8>) -> Self {
        BodySource::Ready(Bytes::from(bytes))
    }
}

impl std::fmt::Debug for BodySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodySource::Ready(bytes) => f.debug_tuple("Ready").field(&bytes.len()).finish(),
            BodySource::Provider(_) => f.debug_tuple("Provider").finish(),
        }
    }
}

/// Canonical form of the options accepted by `Session::open`.
#[derive(Debug, Default)]
pub struct OpenOptions {
    /// Open a unidirectional stream instead of a bidirectional one.
    pub unidirectional: bool,
    /// Request headers dispatched through the application protocol
    /// handler once the stream is registered.
    pub headers: Vec<(String, String)>,
    /// Trailing headers, if any.
    pub trailers: Vec<(String, String)>,
    /// Request body. `None` marks the header block as terminal.
    pub body: Option<BodySource>,
}

impl OpenOptions {
    pub fn unidirectional() -> Self {
        Self {
            unidirectional: true,
            ..Self::default()
        }
    }

    pub fn bidirectional() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<BodySource>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.headers.iter().any(|(name, _)| name.is_empty())
            || self.trailers.iter().any(|(name, _)| name.is_empty())
        {
            return Err(SessionError::InvalidArgument(
                "header names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One stream of a session.
pub struct Stream {
    id: u64,
    handle: Option<Box<dyn StreamHandle>>,
    headers_pending: bool,
    error: Option<SessionError>,
}

impl Stream {
    pub(crate) fn new(handle: Box<dyn StreamHandle>) -> Self {
        Self {
            id: handle.id(),
            handle: Some(handle),
            headers_pending: false,
            error: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn destroyed(&self) -> bool {
        self.handle.is_none()
    }

    /// The error this stream was torn down with, if any.
    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Whether the stream's header block is still being parsed by the
    /// application protocol handler.
    pub fn headers_pending(&self) -> bool {
        self.headers_pending
    }

    pub(crate) fn set_headers_pending(&mut self, pending: bool) {
        self.headers_pending = pending;
    }

    pub(crate) fn handle_mut(&mut self) -> Option<&mut (dyn StreamHandle + 'static)> {
        self.handle.as_deref_mut()
    }

    /// Tear the stream down, signalling `error`'s code to the peer
    /// when it carries one. Idempotent.
    pub(crate) fn destroy(&mut self, error: Option<&SessionError>) {
        let Some(mut handle) = self.handle.take() else {
            return;
        };
        let code = match error {
            Some(SessionError::Application { code, .. }) => Some(*code),
            Some(SessionError::Transport { code, .. }) => Some(*code),
            _ => None,
        };
        handle.destroy(code);
        self.error = error.cloned();
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("id", &self.id)
            .field("destroyed", &self.destroyed())
            .field("headers_pending", &self.headers_pending)
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockStream;

    #[test]
    fn test_destroy_is_idempotent_and_records_error() {
        let mut stream = Stream::new(Box::new(MockStream::new(8)));
        assert_eq!(stream.id(), 8);
        assert!(!stream.destroyed());

        stream.destroy(Some(&SessionError::Application { code: 42, reason: None }));
        assert!(stream.destroyed());
        assert!(matches!(
            stream.error(),
            Some(SessionError::Application { code: 42, .. })
        ));

        // Second teardown is a no-op and must not overwrite the error.
        stream.destroy(None);
        assert!(stream.error().is_some());
    }

    #[test]
    fn test_body_source_acquisition() {
        let ready: BodySource = Bytes::from_static(b"payload").into();
        assert_eq!(ready.acquire().unwrap().as_ref(), b"payload");

        let failing = BodySource::from_fn(|| {
            Err(SessionError::BodySource("backing file vanished".to_string()))
        });
        assert!(matches!(
            failing.acquire(),
            Err(SessionError::BodySource(_))
        ));
    }

    #[test]
    fn test_open_options_validation() {
        let opts = OpenOptions::bidirectional()
            .with_headers(vec![("".to_string(), "x".to_string())]);
        assert!(opts.validate().is_err());

        let opts = OpenOptions::unidirectional()
            .with_headers(vec![(":path".to_string(), "/".to_string())]);
        assert!(opts.validate().is_ok());
        assert!(opts.unidirectional);
    }
}
