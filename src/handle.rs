/*!
Contracts for the native transport layer.

The QUIC engine itself (packet framing, loss recovery, congestion
control, TLS record cryptography) lives behind these traits. The
session wrapper never reaches past them; everything it knows about
the connection arrives either through trait calls or through the
shared state/stats blocks.
*/

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::state::{StateBuffer, StatsBuffer};

/// Direction of a stream to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Bidirectional,
    Unidirectional,
}

/// Ephemeral key details for the TLS exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralKeyInfo {
    /// Key exchange kind, e.g. "ECDH".
    pub kind: String,
    /// Group or curve name, e.g. "X25519".
    pub name: String,
    /// Key size in bits.
    pub size: u32,
}

/// One QUIC connection owned by the native layer.
///
/// A handle is claimed by exactly one `Session`; the session marks
/// the claim through the state block's `wrapped` bit and never
/// reattaches a handle once detached.
pub trait TransportHandle: Send {
    /// Stable identifier for this connection.
    fn id(&self) -> u64;

    /// Ask the native layer for a new local stream in the given
    /// direction. `None` means the layer cannot allocate one.
    fn open_stream(&mut self, direction: Direction) -> Option<Box<dyn StreamHandle>>;

    /// Queue a datagram. Returns whether it was accepted.
    fn send_datagram(&mut self, payload: Bytes) -> bool;

    /// Begin a graceful close. Completion is reported back through
    /// the session's close notification callback.
    fn graceful_close(&mut self);

    /// Release all native resources for this connection.
    fn destroy(&mut self);

    /// Initiate a TLS key update.
    fn update_key(&mut self);

    fn remote_address(&self) -> Option<SocketAddr>;

    /// Local certificate in DER form.
    fn certificate(&self) -> Option<Bytes>;

    /// Peer certificate in DER form.
    fn peer_certificate(&self) -> Option<Bytes>;

    fn ephemeral_key_info(&self) -> Option<EphemeralKeyInfo>;

    /// The shared fixed-layout state block.
    fn state(&self) -> Arc<StateBuffer>;

    /// The shared fixed-layout stats block.
    fn stats(&self) -> Arc<StatsBuffer>;

    /// TLS key log stream, when enabled.
    fn keylog(&mut self) -> Option<mpsc::UnboundedReceiver<Bytes>> {
        None
    }

    /// qlog trace stream, when enabled.
    fn qlog(&mut self) -> Option<mpsc::UnboundedReceiver<Bytes>> {
        None
    }
}

/// One QUIC stream owned by the native layer.
pub trait StreamHandle: Send {
    /// The stream id assigned by the native layer.
    fn id(&self) -> u64;

    /// Hand a block of headers to the native layer for transmission.
    /// `terminal` marks the block as the final frame on the stream.
    /// Returns whether the block was accepted.
    fn send_headers(&mut self, headers: &[(String, String)], terminal: bool) -> bool;

    /// Hand body data to the native layer. `fin` closes the sending
    /// side. Returns whether the data was accepted.
    fn write(&mut self, data: Bytes, fin: bool) -> bool;

    /// Tear the stream down, optionally with an application error
    /// code to signal to the peer.
    fn destroy(&mut self, error_code: Option<u64>);
}
