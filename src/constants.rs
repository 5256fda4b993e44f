/*!
Constants for the QUIC session wrapper.

This module contains the fixed layout of the state and stats blocks
shared with the native transport handle, plus well-known ALPN
identifiers.
*/

/// Byte offsets into the shared session state block.
///
/// The native layer owns the block and writes each flag as a single
/// byte (0 or 1) at a fixed offset. The wrapper reads them through
/// the `SessionState` view without copying.
pub mod state {
    /// An OCSP exchange is pending.
    pub const IDX_STATE_OCSP: usize = 0;
    /// A client-hello exchange is pending.
    pub const IDX_STATE_CLIENT_HELLO: usize = 1;
    /// The client-hello exchange has completed.
    pub const IDX_STATE_CLIENT_HELLO_DONE: usize = 2;
    /// The session is closing.
    pub const IDX_STATE_CLOSING: usize = 3;
    /// The closing timer is armed.
    pub const IDX_STATE_CLOSING_TIMER_ENABLED: usize = 4;
    /// The session has been destroyed.
    pub const IDX_STATE_DESTROYED: usize = 5;
    /// A graceful close has been requested.
    pub const IDX_STATE_GRACEFUL_CLOSING: usize = 6;
    /// The TLS handshake is confirmed.
    pub const IDX_STATE_HANDSHAKE_CONFIRMED: usize = 7;
    /// The idle timeout fired.
    pub const IDX_STATE_IDLE_TIMEOUT: usize = 8;
    /// The session was terminated by a stateless reset.
    pub const IDX_STATE_STATELESS_RESET: usize = 9;
    /// The session closed silently (no CONNECTION_CLOSE sent).
    pub const IDX_STATE_SILENT_CLOSE: usize = 10;
    /// The transport currently allows opening new streams.
    pub const IDX_STATE_STREAM_OPEN_ALLOWED: usize = 11;
    /// The connection migrated to the server's preferred address.
    pub const IDX_STATE_USING_PREFERRED_ADDRESS: usize = 12;
    /// A wrapper object has claimed the handle. The only writable bit.
    pub const IDX_STATE_WRAPPED: usize = 13;

    /// Total length of the state block in bytes.
    pub const STATE_LEN: usize = 14;
}

/// Byte offsets into the shared session stats block.
///
/// Each counter is an unsigned 64-bit big-endian integer written by
/// the native layer.
pub mod stats {
    /// Timestamp at which the session was created.
    pub const IDX_STATS_CREATED_AT: usize = 0;
    /// Timestamp at which the handshake completed.
    pub const IDX_STATS_HANDSHAKE_COMPLETED_AT: usize = 8;
    /// Total bytes received on the connection.
    pub const IDX_STATS_BYTES_RECEIVED: usize = 16;
    /// Total bytes sent on the connection.
    pub const IDX_STATS_BYTES_SENT: usize = 24;
    /// Peer-initiated streams accepted.
    pub const IDX_STATS_STREAMS_IN: usize = 32;
    /// Locally-initiated streams opened.
    pub const IDX_STATS_STREAMS_OUT: usize = 40;
    /// Datagrams received.
    pub const IDX_STATS_DATAGRAMS_RECEIVED: usize = 48;
    /// Datagrams sent.
    pub const IDX_STATS_DATAGRAMS_SENT: usize = 56;
    /// Datagrams reported lost.
    pub const IDX_STATS_DATAGRAMS_LOST: usize = 64;

    /// Total length of the stats block in bytes.
    pub const STATS_LEN: usize = 72;
}

/// ALPN identifier for HTTP/3.
pub const ALPN_H3: &str = "h3";

/// ALPN identifier for the HTTP/3 pre-standard drafts still seen in
/// the wild.
pub const ALPN_H3_29: &str = "h3-29";
