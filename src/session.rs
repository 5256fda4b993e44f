/*!
Session core.

A `Session` wraps one native QUIC connection from the moment the
handle exists until destruction. It owns the stream registry, settles
the `handshake`/`closed`/`clienthello`/`ocsp` result cells, queues
events for the embedder, and funnels every teardown trigger (cancel,
native close, native error) through a single destruction path with a
fixed cleanup order.

All methods run to completion on the single thread the runtime glue
marshals native callbacks onto; deferred work (stream event emission,
request header dispatch) is queued and drained at the top of
`poll_event`, never re-entrantly inside the triggering call.
*/

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, trace};
use tokio::sync::mpsc;

use crate::config::{Role, SessionOptions};
use crate::constants::{ALPN_H3, ALPN_H3_29};
use crate::deferred::{Deferred, DeferredHandle};
use crate::endpoint::Endpoint;
use crate::error::{Result, SessionError};
use crate::handle::{Direction, EphemeralKeyInfo, StreamHandle, TransportHandle};
use crate::{invalid_arg_err, invalid_state_err};
use crate::proto::{select_protocol, ApplicationProtocol};
use crate::state::{SessionState, SessionStats};
use crate::stream::{BodySource, OpenOptions, Stream};
use crate::tls::{
    Cipher, ClientHello, ClientHelloResponder, OcspExchange, OcspRequest, OcspResponder,
    OcspResponse,
};

/// How the native layer reported a close, matched exhaustively when
/// mapping to the terminating error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseKind {
    /// Clean close, no error code.
    Clean,
    /// Transport-level protocol error.
    Transport {
        code: u64,
        reason: Option<String>,
    },
    /// Application-level protocol error.
    Application {
        code: u64,
        reason: Option<String>,
    },
}

/// Close notification payload from the native layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseNotice {
    pub kind: CloseKind,
    /// The connection closed without sending CONNECTION_CLOSE.
    pub silent: bool,
    /// The connection was terminated by a stateless reset.
    pub stateless_reset: bool,
}

impl CloseNotice {
    pub fn clean() -> Self {
        Self {
            kind: CloseKind::Clean,
            silent: false,
            stateless_reset: false,
        }
    }
}

/// Handshake completion payload from the native layer.
#[derive(Debug, Clone)]
pub struct HandshakeInfo {
    pub servername: Option<String>,
    pub alpn: Option<String>,
    pub cipher_name: String,
    pub cipher_version: String,
    pub max_packet_length: u64,
    /// Certificate validation failure reason, when the native layer
    /// reported one. Absent and explicitly-empty are equivalent: no
    /// validation error.
    pub validation_error_reason: Option<String>,
    pub validation_error_code: Option<u64>,
    pub early_data: bool,
}

/// Certificate validation failure recorded at handshake completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub reason: String,
    pub code: u64,
}

/// TLS session ticket received from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTicket {
    pub ticket: Bytes,
    pub transport_params: Bytes,
}

/// Outcome of a native path validation probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathValidationResult {
    Success,
    Failure,
    Aborted,
}

/// Events the session queues for the embedder, drained with
/// `poll_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A stream became available, peer-initiated or header-complete.
    Stream { id: u64 },
    /// A datagram arrived. `early` marks 0-RTT delivery.
    Datagram { payload: Bytes, early: bool },
    /// A previously sent datagram was acknowledged or reported lost.
    DatagramStatus { id: u64, lost: bool },
    /// A TLS session ticket was stored on the session.
    SessionTicket,
    /// A path validation probe concluded.
    PathValidation {
        result: PathValidationResult,
        local: SocketAddr,
        remote: SocketAddr,
        preferred_address: bool,
    },
    /// The peer asked for a different QUIC version.
    VersionNegotiation {
        current: u32,
        requested: Vec<u32>,
        supported: Vec<u32>,
    },
}

/// Text encodings accepted for datagram payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// A datagram payload: text converted with its declared encoding, or
/// raw bytes.
#[derive(Debug, Clone)]
pub enum DatagramPayload {
    Text {
        data: String,
        encoding: TextEncoding,
    },
    Binary(Bytes),
}

impl DatagramPayload {
    fn into_bytes(self) -> Result<Bytes> {
        match self {
            DatagramPayload::Binary(bytes) => Ok(bytes),
            DatagramPayload::Text { data, encoding } => match encoding {
                TextEncoding::Utf8 => Ok(Bytes::from(data.into_bytes())),
                TextEncoding::Latin1 => {
                    let mut out = Vec::with_capacity(data.len());
                    for ch in data.chars() {
                        let cp = ch as u32;
                        if cp > 0xFF {
                            return invalid_arg_err!(
                                "character {:?} is not representable in latin1",
                                ch
                            );
                        }
                        out.push(cp as u8);
                    }
                    Ok(Bytes::from(out))
                }
            },
        }
    }
}

impl From<&str> for DatagramPayload {
    fn from(data: &str) -> Self {
        DatagramPayload::Text {
            data: data.to_string(),
            encoding: TextEncoding::Utf8,
        }
    }
}

impl From<String> for DatagramPayload {
    fn from(data: String) -> Self {
        DatagramPayload::Text {
            data,
            encoding: TextEncoding::Utf8,
        }
    }
}

impl From<Bytes> for DatagramPayload {
    fn from(bytes: Bytes) -> Self {
        DatagramPayload::Binary(bytes)
    }
}

impl From<Vec<u8>> for DatagramPayload {
    fn from(bytes: Vec<u8>) -> Self {
        DatagramPayload::Binary(Bytes::from(bytes))
    }
}

/// Work deferred past the current synchronous turn.
enum Job {
    EmitStreamEvent {
        id: u64,
    },
    DispatchRequestHeaders {
        id: u64,
        headers: Vec<(String, String)>,
        trailers: Vec<(String, String)>,
        body: Option<BodySource>,
        terminal: bool,
    },
}

/// One QUIC connection, client or server side.
pub struct Session {
    id: u64,
    role: Role,
    handle: Option<Box<dyn TransportHandle>>,
    state: Option<SessionState>,
    stats: SessionStats,
    endpoint: Option<Arc<Endpoint>>,

    streams: HashMap<u64, Stream>,

    alpn: Option<String>,
    servername: Option<String>,
    authority: Option<String>,
    cipher: Option<Cipher>,
    max_packet_length: Option<u64>,
    validation_error: Option<ValidationError>,
    early_data: bool,
    session_ticket: Option<SessionTicket>,
    silent_close: bool,
    stateless_reset: bool,

    proto: &'static dyn ApplicationProtocol,
    close_requested: bool,

    handshake: Deferred<()>,
    closed: Deferred<()>,
    clienthello: Deferred<ClientHello>,
    ocsp: Deferred<OcspExchange>,

    keylog: Option<mpsc::UnboundedReceiver<Bytes>>,
    qlog: Option<mpsc::UnboundedReceiver<Bytes>>,

    events: VecDeque<SessionEvent>,
    jobs: VecDeque<Job>,
}

impl Session {
    /// Wrap a native handle. The handle must be unclaimed; the
    /// session marks the claim through the state block's `wrapped`
    /// bit and registers itself with the owning endpoint.
    pub fn new(
        mut handle: Box<dyn TransportHandle>,
        endpoint: Arc<Endpoint>,
        options: SessionOptions,
    ) -> Result<Self> {
        options.validate()?;

        let state = SessionState::new(handle.state());
        if state.wrapped() {
            return invalid_state_err!("an unclaimed handle", "already wrapped");
        }
        state.set_wrapped();

        let stats = SessionStats::new(handle.stats());
        let id = handle.id();
        endpoint.register_session(id);

        let keylog = if options.keylog { handle.keylog() } else { None };
        let qlog = if options.qlog { handle.qlog() } else { None };

        let proto = select_protocol(options.alpn.as_deref());
        debug!(
            "session {}: created ({}, alpn {:?})",
            id, options.role, options.alpn
        );

        Ok(Self {
            id,
            role: options.role,
            handle: Some(handle),
            state: Some(state),
            stats,
            endpoint: Some(endpoint),
            streams: HashMap::new(),
            alpn: options.alpn,
            servername: options.servername,
            authority: options.authority,
            cipher: None,
            max_packet_length: None,
            validation_error: None,
            early_data: false,
            session_ticket: None,
            silent_close: false,
            stateless_reset: false,
            proto,
            close_requested: false,
            handshake: Deferred::new(),
            closed: Deferred::new(),
            clienthello: Deferred::new(),
            ocsp: Deferred::new(),
            keylog,
            qlog,
            events: VecDeque::new(),
            jobs: VecDeque::new(),
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Negotiated ALPN identifier. Before handshake completion this
    /// is the pre-known value from the options, if any.
    pub fn alpn(&self) -> Option<&str> {
        self.alpn.as_deref()
    }

    pub fn servername(&self) -> Option<&str> {
        self.servername.as_deref()
    }

    pub fn cipher(&self) -> Option<&Cipher> {
        self.cipher.as_ref()
    }

    pub fn max_packet_length(&self) -> Option<u64> {
        self.max_packet_length
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    pub fn early_data(&self) -> bool {
        self.early_data
    }

    pub fn session_ticket(&self) -> Option<&SessionTicket> {
        self.session_ticket.as_ref()
    }

    pub fn silent_close(&self) -> bool {
        self.silent_close
    }

    pub fn stateless_reset(&self) -> bool {
        self.stateless_reset
    }

    pub fn destroyed(&self) -> bool {
        self.handle.is_none()
    }

    /// Whether a graceful close is in progress, locally requested or
    /// reported by the native layer.
    pub fn closing(&self) -> bool {
        self.close_requested
            || self
                .state
                .as_ref()
                .is_some_and(|state| state.graceful_closing())
    }

    /// The shared state view, while the session is alive.
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The cached application protocol handler.
    pub fn application_protocol(&self) -> &'static dyn ApplicationProtocol {
        self.proto
    }

    pub fn remote_address(&self) -> Option<SocketAddr> {
        self.handle.as_ref().and_then(|handle| handle.remote_address())
    }

    /// Local certificate in DER form. Unavailable after destruction.
    pub fn certificate(&self) -> Option<Bytes> {
        self.handle.as_ref().and_then(|handle| handle.certificate())
    }

    /// Peer certificate in DER form. Unavailable after destruction.
    pub fn peer_certificate(&self) -> Option<Bytes> {
        self.handle.as_ref().and_then(|handle| handle.peer_certificate())
    }

    pub fn ephemeral_key_info(&self) -> Option<EphemeralKeyInfo> {
        self.handle.as_ref().and_then(|handle| handle.ephemeral_key_info())
    }

    /// TLS key log stream, when enabled. Yields at most once.
    pub fn take_keylog(&mut self) -> Option<mpsc::UnboundedReceiver<Bytes>> {
        self.keylog.take()
    }

    /// qlog trace stream, when enabled. Yields at most once.
    pub fn take_qlog(&mut self) -> Option<mpsc::UnboundedReceiver<Bytes>> {
        self.qlog.take()
    }

    /// Settles when the TLS handshake completes, or rejects when the
    /// session is torn down with an error first.
    pub fn handshake(&self) -> DeferredHandle<()> {
        self.handshake.handle()
    }

    /// Settles when the session is fully destroyed. Every call
    /// observes the same cell.
    pub fn closed(&self) -> DeferredHandle<()> {
        self.closed.handle()
    }

    /// Settles when the native layer raises a ClientHello
    /// interception on a server session that enabled it.
    pub fn clienthello(&self) -> DeferredHandle<ClientHello> {
        self.clienthello.handle()
    }

    /// Settles when an OCSP exchange arrives, as a request (server)
    /// or response (client).
    pub fn ocsp(&self) -> DeferredHandle<OcspExchange> {
        self.ocsp.handle()
    }

    pub fn stream(&self, id: u64) -> Option<&Stream> {
        self.streams.get(&id)
    }

    pub fn stream_mut(&mut self, id: u64) -> Option<&mut Stream> {
        self.streams.get_mut(&id)
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    fn uses_h3(&self) -> bool {
        matches!(self.alpn.as_deref(), Some(ALPN_H3) | Some(ALPN_H3_29))
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Open a local stream. Returns the registered stream's id
    /// synchronously; header dispatch through the application
    /// protocol handler runs on the next `poll_event` turn.
    pub fn open(&mut self, options: OpenOptions) -> Result<u64> {
        if self.destroyed() {
            return invalid_state_err!("an open session", "the session is destroyed");
        }
        if self.closing() {
            return invalid_state_err!("an open session", "the session is closing");
        }
        let stream_open_allowed = self
            .state
            .as_ref()
            .is_some_and(|state| state.stream_open_allowed());
        if !stream_open_allowed {
            return invalid_state_err!(
                "stream opening allowed",
                "the transport does not yet allow new streams"
            );
        }
        options.validate()?;

        let direction = if options.unidirectional {
            Direction::Unidirectional
        } else {
            Direction::Bidirectional
        };
        let stream_handle = match self.handle.as_mut() {
            Some(handle) => handle.open_stream(direction),
            None => return invalid_state_err!("an open session", "the session is destroyed"),
        };
        let stream_handle = stream_handle.ok_or(SessionError::StreamOpenFailed)?;

        let stream = Stream::new(stream_handle);
        let id = stream.id();
        self.streams.insert(id, stream);
        trace!("session {}: opened stream {} ({:?})", self.id, id, direction);

        self.jobs.push_back(Job::DispatchRequestHeaders {
            id,
            headers: options.headers,
            trailers: options.trailers,
            terminal: options.body.is_none(),
            body: options.body,
        });
        Ok(id)
    }

    /// Send a datagram. Zero-length payloads are silently dropped and
    /// never reach the native layer. Returns whether the datagram was
    /// queued.
    pub fn datagram(&mut self, payload: impl Into<DatagramPayload>) -> Result<bool> {
        if self.destroyed() {
            return invalid_state_err!("an open session", "the session is destroyed");
        }
        if self.closing() {
            return invalid_state_err!("an open session", "the session is closing");
        }
        let bytes = payload.into().into_bytes()?;
        if bytes.is_empty() {
            return Ok(false);
        }
        match self.handle.as_mut() {
            Some(handle) => Ok(handle.send_datagram(bytes)),
            None => invalid_state_err!("an open session", "the session is destroyed"),
        }
    }

    /// Initiate a TLS key update.
    pub fn update_key(&mut self) -> Result<()> {
        if self.destroyed() {
            return invalid_state_err!("an open session", "the session is destroyed");
        }
        if self.closing() {
            return invalid_state_err!("an open session", "the session is closing");
        }
        match self.handle.as_mut() {
            Some(handle) => {
                handle.update_key();
                Ok(())
            }
            None => invalid_state_err!("an open session", "the session is destroyed"),
        }
    }

    /// Request a graceful close. The native layer is asked exactly
    /// once no matter how often this is called; every call returns an
    /// observer of the same `closed` cell, which settles when native
    /// close-completion fires.
    pub fn close(&mut self) -> DeferredHandle<()> {
        if !self.close_requested {
            self.close_requested = true;
            if let Some(handle) = self.handle.as_mut() {
                debug!("session {}: graceful close requested", self.id);
                handle.graceful_close();
            }
        }
        self.closed.handle()
    }

    /// Tear the session down immediately with `reason`, skipping
    /// graceful negotiation. Supersedes a pending `close`. No-op on a
    /// destroyed session.
    pub fn cancel(&mut self, reason: SessionError) {
        if self.destroyed() {
            return;
        }
        debug!("session {}: canceled ({})", self.id, reason);
        self.finish_close(Some(reason));
    }

    // ------------------------------------------------------------------
    // Native callbacks
    // ------------------------------------------------------------------

    /// Handshake completion. The native contract guarantees exactly
    /// one call; the cell settle is idempotent regardless.
    pub fn on_handshake_complete(&mut self, info: HandshakeInfo) {
        if self.destroyed() {
            return;
        }
        self.servername = info.servername;
        self.alpn = info.alpn;
        self.proto = select_protocol(self.alpn.as_deref());
        self.cipher = Some(Cipher {
            name: info.cipher_name,
            version: info.cipher_version,
        });
        self.max_packet_length = Some(info.max_packet_length);
        self.validation_error = match (info.validation_error_reason, info.validation_error_code) {
            (Some(reason), Some(code)) => Some(ValidationError { reason, code }),
            _ => None,
        };
        self.early_data = info.early_data;
        if self.authority.is_none() {
            self.authority = self.servername.clone();
        }
        debug!(
            "session {}: handshake complete (alpn {:?}, proto {})",
            self.id,
            self.alpn,
            self.proto.name()
        );
        self.handshake.resolve(());
    }

    /// Peer-initiated stream. Under HTTP/3 the stream event waits for
    /// header parsing to finish (`on_stream_headers`); everything
    /// else fires on the next turn.
    pub fn on_stream_created(&mut self, handle: Box<dyn StreamHandle>) {
        if self.destroyed() {
            return;
        }
        let mut stream = Stream::new(handle);
        let id = stream.id();
        let defer_for_headers = self.uses_h3();
        if defer_for_headers {
            stream.set_headers_pending(true);
        }
        self.streams.insert(id, stream);
        trace!("session {}: peer stream {} registered", self.id, id);
        if !defer_for_headers {
            self.jobs.push_back(Job::EmitStreamEvent { id });
        }
    }

    /// Header parsing finished for a peer-initiated stream; emit the
    /// deferred stream event.
    pub fn on_stream_headers(&mut self, id: u64) {
        if self.destroyed() {
            return;
        }
        if let Some(stream) = self.streams.get_mut(&id) {
            if stream.headers_pending() {
                stream.set_headers_pending(false);
                self.jobs.push_back(Job::EmitStreamEvent { id });
            }
        }
    }

    /// Intercepted TLS ClientHello from the native layer.
    pub fn on_client_hello(
        &mut self,
        alpn: Option<String>,
        servername: Option<String>,
        ciphers: Vec<Cipher>,
        responder: ClientHelloResponder,
    ) {
        if self.destroyed() {
            return;
        }
        let hello = ClientHello::new(alpn, servername, ciphers, responder);
        self.clienthello.resolve(hello);
    }

    /// OCSP request raised during the handshake (server side).
    pub fn on_ocsp_request(&mut self, certificate: Bytes, issuer: Bytes, responder: OcspResponder) {
        if self.destroyed() {
            return;
        }
        let request = OcspRequest::new(certificate, issuer, responder);
        self.ocsp.resolve(OcspExchange::Request(request));
    }

    /// OCSP response received from the peer (client side).
    pub fn on_ocsp_response(&mut self, response: Bytes) {
        if self.destroyed() {
            return;
        }
        self.ocsp
            .resolve(OcspExchange::Response(OcspResponse::new(response)));
    }

    /// TLS session ticket from the peer.
    pub fn on_session_ticket(&mut self, ticket: Bytes, transport_params: Bytes) {
        if self.destroyed() {
            return;
        }
        self.session_ticket = Some(SessionTicket {
            ticket,
            transport_params,
        });
        self.events.push_back(SessionEvent::SessionTicket);
    }

    /// Datagram from the peer. `early` marks 0-RTT delivery.
    pub fn on_datagram(&mut self, payload: Bytes, early: bool) {
        if self.destroyed() {
            return;
        }
        self.events.push_back(SessionEvent::Datagram { payload, early });
    }

    /// A previously sent datagram was acknowledged or reported lost.
    pub fn on_datagram_status(&mut self, id: u64, lost: bool) {
        if self.destroyed() {
            return;
        }
        self.events.push_back(SessionEvent::DatagramStatus { id, lost });
    }

    /// Path validation outcome from the native layer.
    pub fn on_path_validation(
        &mut self,
        result: PathValidationResult,
        local: SocketAddr,
        remote: SocketAddr,
        preferred_address: bool,
    ) {
        if self.destroyed() {
            return;
        }
        self.events.push_back(SessionEvent::PathValidation {
            result,
            local,
            remote,
            preferred_address,
        });
    }

    /// Version negotiation notification from the native layer.
    pub fn on_version_negotiation(
        &mut self,
        current: u32,
        requested: Vec<u32>,
        supported: Vec<u32>,
    ) {
        if self.destroyed() {
            return;
        }
        self.events.push_back(SessionEvent::VersionNegotiation {
            current,
            requested,
            supported,
        });
    }

    /// Close or error notification from the native layer. Terminal:
    /// routes into the single destruction path.
    pub fn on_close(&mut self, notice: CloseNotice) {
        if self.destroyed() {
            return;
        }
        self.silent_close = notice.silent;
        self.stateless_reset = notice.stateless_reset;
        self.finish_close(SessionError::from_close(notice.kind));
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Drain one queued event, first running any work deferred past
    /// the turn that queued it.
    pub fn poll_event(&mut self) -> Option<SessionEvent> {
        self.run_jobs();
        self.events.pop_front()
    }

    fn run_jobs(&mut self) {
        while let Some(job) = self.jobs.pop_front() {
            match job {
                Job::EmitStreamEvent { id } => {
                    if self.streams.get(&id).is_some_and(|s| !s.destroyed()) {
                        self.events.push_back(SessionEvent::Stream { id });
                    }
                }
                Job::DispatchRequestHeaders {
                    id,
                    headers,
                    trailers,
                    body,
                    terminal,
                } => self.dispatch_request_headers(id, headers, trailers, body, terminal),
            }
        }
    }

    fn dispatch_request_headers(
        &mut self,
        id: u64,
        headers: Vec<(String, String)>,
        trailers: Vec<(String, String)>,
        body: Option<BodySource>,
        terminal: bool,
    ) {
        if self.destroyed() {
            return;
        }
        let body = match body.map(BodySource::acquire).transpose() {
            Ok(body) => body,
            Err(error) => {
                debug!("session {}: body acquisition failed for stream {}", self.id, id);
                if let Some(stream) = self.streams.get_mut(&id) {
                    stream.destroy(Some(&error));
                }
                return;
            }
        };

        let proto = self.proto;
        let authority = self.authority.clone();
        let Some(stream) = self.streams.get_mut(&id) else {
            return;
        };
        let Some(handle) = stream.handle_mut() else {
            return;
        };
        proto.handle_request_headers(handle, &headers, terminal, authority.as_deref());
        if let Some(body) = body {
            handle.write(body, trailers.is_empty());
        }
        if !trailers.is_empty() {
            proto.handle_trailing_headers(handle, &trailers);
        }
    }

    // ------------------------------------------------------------------
    // Destruction
    // ------------------------------------------------------------------

    /// The single teardown path. Idempotent. Cleanup order is fixed:
    /// streams, then handle, then stats, then endpoint, then cell
    /// settlement, so that anyone waking up on `closed` observes a
    /// fully detached session.
    fn finish_close(&mut self, error: Option<SessionError>) {
        let Some(mut handle) = self.handle.take() else {
            return;
        };
        debug!("session {}: destroying ({:?})", self.id, error);

        for (_, mut stream) in self.streams.drain() {
            stream.destroy(error.as_ref());
        }

        handle.destroy();
        drop(handle);
        self.state = None;

        self.stats.detach();

        if let Some(endpoint) = self.endpoint.take() {
            endpoint.remove_session(self.id);
        }

        match error {
            Some(error) => {
                self.handshake.reject(error.clone());
                self.closed.reject(error);
            }
            None => {
                self.handshake.resolve(());
                self.closed.resolve(());
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.finish_close(None);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("alpn", &self.alpn)
            .field("destroyed", &self.destroyed())
            .field("closing", &self.closing())
            .field("streams", &self.streams.len())
            .finish_non_exhaustive()
    }
}
