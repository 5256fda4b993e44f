/*!
Typed views over the state and stats blocks shared with the native
transport handle.

The native layer owns both blocks; the wrapper reads them in place.
`SessionState` exposes one getter per flag and a single writable
`wrapped` bit. `SessionStats` exposes the u64 counters and can be
detached into a final snapshot when the session is destroyed.
*/

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use byteorder::{BigEndian, ByteOrder};

use crate::constants::state::*;
use crate::constants::stats::*;

/// The raw session state block. One byte per flag.
///
/// Shared by reference between the native handle and the wrapper;
/// reads and writes are relaxed single-byte operations, there is no
/// cross-flag consistency requirement.
#[derive(Debug)]
pub struct StateBuffer {
    cells: [AtomicU8; STATE_LEN],
}

impl StateBuffer {
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| AtomicU8::new(0)),
        }
    }

    pub fn get(&self, idx: usize) -> bool {
        self.cells[idx].load(Ordering::Relaxed) != 0
    }

    pub fn set(&self, idx: usize, on: bool) {
        self.cells[idx].store(u8::from(on), Ordering::Relaxed);
    }
}

impl Default for StateBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-mostly view over a session's shared state block.
///
/// Must never outlive the native handle it aliases; the session
/// discards it together with the handle reference on destruction.
#[derive(Debug, Clone)]
pub struct SessionState {
    inner: Arc<StateBuffer>,
}

impl SessionState {
    pub fn new(inner: Arc<StateBuffer>) -> Self {
        Self { inner }
    }

    pub fn ocsp(&self) -> bool {
        self.inner.get(IDX_STATE_OCSP)
    }

    pub fn client_hello(&self) -> bool {
        self.inner.get(IDX_STATE_CLIENT_HELLO)
    }

    pub fn client_hello_done(&self) -> bool {
        self.inner.get(IDX_STATE_CLIENT_HELLO_DONE)
    }

    pub fn closing(&self) -> bool {
        self.inner.get(IDX_STATE_CLOSING)
    }

    pub fn closing_timer_enabled(&self) -> bool {
        self.inner.get(IDX_STATE_CLOSING_TIMER_ENABLED)
    }

    pub fn destroyed(&self) -> bool {
        self.inner.get(IDX_STATE_DESTROYED)
    }

    pub fn graceful_closing(&self) -> bool {
        self.inner.get(IDX_STATE_GRACEFUL_CLOSING)
    }

    pub fn handshake_confirmed(&self) -> bool {
        self.inner.get(IDX_STATE_HANDSHAKE_CONFIRMED)
    }

    pub fn idle_timeout(&self) -> bool {
        self.inner.get(IDX_STATE_IDLE_TIMEOUT)
    }

    pub fn stateless_reset(&self) -> bool {
        self.inner.get(IDX_STATE_STATELESS_RESET)
    }

    pub fn silent_close(&self) -> bool {
        self.inner.get(IDX_STATE_SILENT_CLOSE)
    }

    pub fn stream_open_allowed(&self) -> bool {
        self.inner.get(IDX_STATE_STREAM_OPEN_ALLOWED)
    }

    pub fn using_preferred_address(&self) -> bool {
        self.inner.get(IDX_STATE_USING_PREFERRED_ADDRESS)
    }

    pub fn wrapped(&self) -> bool {
        self.inner.get(IDX_STATE_WRAPPED)
    }

    /// Mark the handle as claimed by a wrapper. Set exactly once, at
    /// claim time.
    pub fn set_wrapped(&self) {
        self.inner.set(IDX_STATE_WRAPPED, true);
    }
}

/// The raw session stats block: u64 big-endian counters at fixed
/// offsets, written by the native layer.
#[derive(Debug)]
pub struct StatsBuffer {
    block: Mutex<[u8; STATS_LEN]>,
}

impl StatsBuffer {
    pub fn new() -> Self {
        Self {
            block: Mutex::new([0u8; STATS_LEN]),
        }
    }

    pub fn read_u64(&self, offset: usize) -> u64 {
        let block = self.block.lock().expect("stats block poisoned");
        BigEndian::read_u64(&block[offset..offset + 8])
    }

    pub fn write_u64(&self, offset: usize, value: u64) {
        let mut block = self.block.lock().expect("stats block poisoned");
        BigEndian::write_u64(&mut block[offset..offset + 8], value);
    }

    fn snapshot(&self) -> [u8; STATS_LEN] {
        *self.block.lock().expect("stats block poisoned")
    }
}

impl Default for StatsBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter view over a session's shared stats block.
///
/// While the session is alive the counters read through to the live
/// block; `detach` freezes them into a final snapshot at destruction
/// time.
#[derive(Debug)]
pub struct SessionStats {
    live: Option<Arc<StatsBuffer>>,
    frozen: [u8; STATS_LEN],
}

impl SessionStats {
    pub fn new(live: Arc<StatsBuffer>) -> Self {
        Self {
            live: Some(live),
            frozen: [0u8; STATS_LEN],
        }
    }

    /// Freeze the counters and release the shared block.
    pub(crate) fn detach(&mut self) {
        if let Some(live) = self.live.take() {
            self.frozen = live.snapshot();
        }
    }

    /// Whether the view has been detached from the live block.
    pub fn detached(&self) -> bool {
        self.live.is_none()
    }

    fn read(&self, offset: usize) -> u64 {
        match &self.live {
            Some(live) => live.read_u64(offset),
            None => BigEndian::read_u64(&self.frozen[offset..offset + 8]),
        }
    }

    pub fn created_at(&self) -> u64 {
        self.read(IDX_STATS_CREATED_AT)
    }

    pub fn handshake_completed_at(&self) -> u64 {
        self.read(IDX_STATS_HANDSHAKE_COMPLETED_AT)
    }

    pub fn bytes_received(&self) -> u64 {
        self.read(IDX_STATS_BYTES_RECEIVED)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.read(IDX_STATS_BYTES_SENT)
    }

    pub fn streams_in(&self) -> u64 {
        self.read(IDX_STATS_STREAMS_IN)
    }

    pub fn streams_out(&self) -> u64 {
        self.read(IDX_STATS_STREAMS_OUT)
    }

    pub fn datagrams_received(&self) -> u64 {
        self.read(IDX_STATS_DATAGRAMS_RECEIVED)
    }

    pub fn datagrams_sent(&self) -> u64 {
        self.read(IDX_STATS_DATAGRAMS_SENT)
    }

    pub fn datagrams_lost(&self) -> u64 {
        self.read(IDX_STATS_DATAGRAMS_LOST)
    }
}
