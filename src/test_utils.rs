/*!
Scripted native-layer doubles for tests.

`MockTransport` and `MockStream` stand in for the native QUIC engine:
they record every call the wrapper makes and let tests script stream
allocation and flip state flags through the shared state block.
*/

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::handle::{Direction, EphemeralKeyInfo, StreamHandle, TransportHandle};
use crate::state::{StateBuffer, StatsBuffer};

/// Recording stream double. Clones share the recorders, so a test
/// can keep one clone while the wrapper owns the other.
#[derive(Clone)]
pub struct MockStream {
    id: u64,
    sent_headers: Arc<Mutex<Vec<(Vec<(String, String)>, bool)>>>,
    written: Arc<Mutex<Vec<(Bytes, bool)>>>,
    destroy_code: Arc<Mutex<Option<Option<u64>>>>,
    destroy_count: Arc<AtomicUsize>,
}

impl MockStream {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            sent_headers: Arc::new(Mutex::new(Vec::new())),
            written: Arc::new(Mutex::new(Vec::new())),
            destroy_code: Arc::new(Mutex::new(None)),
            destroy_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Header blocks handed to the native layer, with their terminal
    /// flags.
    pub fn sent_headers(&self) -> Vec<(Vec<(String, String)>, bool)> {
        self.sent_headers.lock().unwrap().clone()
    }

    /// Body writes handed to the native layer, with their fin flags.
    pub fn written(&self) -> Vec<(Bytes, bool)> {
        self.written.lock().unwrap().clone()
    }

    pub fn destroy_count(&self) -> usize {
        self.destroy_count.load(Ordering::SeqCst)
    }

    /// The error code the stream was destroyed with: `None` until
    /// destroyed, then `Some(code)` where `code` is what the wrapper
    /// signalled.
    pub fn destroy_code(&self) -> Option<Option<u64>> {
        *self.destroy_code.lock().unwrap()
    }
}

impl StreamHandle for MockStream {
    fn id(&self) -> u64 {
        self.id
    }

    fn send_headers(&mut self, headers: &[(String, String)], terminal: bool) -> bool {
        self.sent_headers
            .lock()
            .unwrap()
            .push((headers.to_vec(), terminal));
        true
    }

    fn write(&mut self, data: Bytes, fin: bool) -> bool {
        self.written.lock().unwrap().push((data, fin));
        true
    }

    fn destroy(&mut self, error_code: Option<u64>) {
        self.destroy_count.fetch_add(1, Ordering::SeqCst);
        *self.destroy_code.lock().unwrap() = Some(error_code);
    }
}

/// Recording transport double. Clones share all state, so a test can
/// keep a probe clone after boxing one into a session.
#[derive(Clone)]
pub struct MockTransport {
    id: u64,
    state: Arc<StateBuffer>,
    stats: Arc<StatsBuffer>,
    next_streams: Arc<Mutex<VecDeque<MockStream>>>,
    datagrams: Arc<Mutex<Vec<Bytes>>>,
    graceful_close_count: Arc<AtomicUsize>,
    destroy_count: Arc<AtomicUsize>,
    update_key_count: Arc<AtomicUsize>,
    remote_address: Option<SocketAddr>,
    certificate: Option<Bytes>,
    peer_certificate: Option<Bytes>,
    ephemeral_key_info: Option<EphemeralKeyInfo>,
}

impl MockTransport {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: Arc::new(StateBuffer::new()),
            stats: Arc::new(StatsBuffer::new()),
            next_streams: Arc::new(Mutex::new(VecDeque::new())),
            datagrams: Arc::new(Mutex::new(Vec::new())),
            graceful_close_count: Arc::new(AtomicUsize::new(0)),
            destroy_count: Arc::new(AtomicUsize::new(0)),
            update_key_count: Arc::new(AtomicUsize::new(0)),
            remote_address: Some("192.0.2.1:4433".parse().unwrap()),
            certificate: Some(Bytes::from_static(b"local-der")),
            peer_certificate: Some(Bytes::from_static(b"peer-der")),
            ephemeral_key_info: Some(EphemeralKeyInfo {
                kind: "ECDH".to_string(),
                name: "X25519".to_string(),
                size: 253,
            }),
        }
    }

    /// Script the next stream allocation.
    pub fn push_stream(&self, stream: MockStream) {
        self.next_streams.lock().unwrap().push_back(stream);
    }

    /// Flip a state flag, as the native layer would.
    pub fn set_flag(&self, idx: usize, on: bool) {
        self.state.set(idx, on);
    }

    pub fn state_buffer(&self) -> Arc<StateBuffer> {
        Arc::clone(&self.state)
    }

    pub fn stats_buffer(&self) -> Arc<StatsBuffer> {
        Arc::clone(&self.stats)
    }

    pub fn sent_datagrams(&self) -> Vec<Bytes> {
        self.datagrams.lock().unwrap().clone()
    }

    pub fn graceful_close_count(&self) -> usize {
        self.graceful_close_count.load(Ordering::SeqCst)
    }

    pub fn destroy_count(&self) -> usize {
        self.destroy_count.load(Ordering::SeqCst)
    }

    pub fn update_key_count(&self) -> usize {
        self.update_key_count.load(Ordering::SeqCst)
    }
}

impl TransportHandle for MockTransport {
    fn id(&self) -> u64 {
        self.id
    }

    fn open_stream(&mut self, _direction: Direction) -> Option<Box<dyn StreamHandle>> {
        self.next_streams
            .lock()
            .unwrap()
            .pop_front()
            .map(|stream| Box::new(stream) as Box<dyn StreamHandle>)
    }

    fn send_datagram(&mut self, payload: Bytes) -> bool {
        self.datagrams.lock().unwrap().push(payload);
        true
    }

    fn graceful_close(&mut self) {
        self.graceful_close_count.fetch_add(1, Ordering::SeqCst);
    }

    fn destroy(&mut self) {
        self.destroy_count.fetch_add(1, Ordering::SeqCst);
    }

    fn update_key(&mut self) {
        self.update_key_count.fetch_add(1, Ordering::SeqCst);
    }

    fn remote_address(&self) -> Option<SocketAddr> {
        self.remote_address
    }

    fn certificate(&self) -> Option<Bytes> {
        self.certificate.clone()
    }

    fn peer_certificate(&self) -> Option<Bytes> {
        self.peer_certificate.clone()
    }

    fn ephemeral_key_info(&self) -> Option<EphemeralKeyInfo> {
        self.ephemeral_key_info.clone()
    }

    fn state(&self) -> Arc<StateBuffer> {
        Arc::clone(&self.state)
    }

    fn stats(&self) -> Arc<StatsBuffer> {
        Arc::clone(&self.stats)
    }
}
