/*!
# QUIC Session Wrapper

Lifecycle wrapper for one QUIC connection over an opaque native
transport handle.

## Overview

This library models everything that happens to a QUIC connection
between the moment the native engine hands over a connection handle
and the moment the connection is destroyed:

- TLS handshake completion, with ClientHello and OCSP interception
- Stream multiplexing over a session-owned registry
- Datagram send and receive
- Key update
- Graceful close, abrupt cancellation, and a single ordered teardown
  path

The native QUIC engine itself (packet framing, loss recovery,
congestion control, TLS record cryptography) stays behind the
`TransportHandle` and `StreamHandle` traits. The wrapper is
single-threaded and callback-driven: the runtime glue invokes the
`Session::on_*` callbacks, embedders observe outcomes through
one-shot result cells and the `poll_event` queue.
*/

pub mod config;
pub mod constants;
pub mod deferred;
pub mod endpoint;
pub mod error;
pub mod handle;
pub mod proto;
pub mod session;
pub mod state;
pub mod stream;
pub mod tls;

// Scripted native-layer doubles, shared by unit and integration tests.
pub mod test_utils;

// Re-export commonly used types for convenience
pub use config::{Role, SessionOptions};
pub use deferred::DeferredHandle;
pub use endpoint::{Capabilities, Endpoint};
pub use error::{Result, SessionError};
pub use handle::{Direction, EphemeralKeyInfo, StreamHandle, TransportHandle};
pub use proto::{select_protocol, ApplicationProtocol, DefaultProtocol, Http3Protocol};
pub use session::{
    CloseKind, CloseNotice, DatagramPayload, HandshakeInfo, PathValidationResult, Session,
    SessionEvent, SessionTicket, TextEncoding, ValidationError,
};
pub use state::{SessionState, SessionStats, StateBuffer, StatsBuffer};
pub use stream::{BodySource, OpenOptions, Stream};
pub use tls::{Cipher, ClientHello, OcspExchange, OcspRequest, OcspResponse, SecurityContext};
