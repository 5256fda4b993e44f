/*!
Owning endpoint collaborator.

An endpoint owns zero or more sessions; each session removes itself
from the endpoint's registry as part of its teardown sequence. QUIC
availability is a capability decided once, at endpoint construction,
by the composition root assembling the networking stack.
*/

use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::{Result, SessionError};

/// Capabilities of the surrounding networking stack.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// Whether a native QUIC engine is present in this build.
    pub quic: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { quic: true }
    }
}

/// Registry of live sessions on one endpoint.
#[derive(Debug)]
pub struct Endpoint {
    sessions: Mutex<HashSet<u64>>,
}

impl Endpoint {
    /// Checked once at startup; everything downstream may assume the
    /// engine exists.
    pub fn new(capabilities: Capabilities) -> Result<Self> {
        if !capabilities.quic {
            return Err(SessionError::NotSupported);
        }
        Ok(Self {
            sessions: Mutex::new(HashSet::new()),
        })
    }

    pub(crate) fn register_session(&self, id: u64) {
        self.sessions.lock().expect("session registry poisoned").insert(id);
    }

    pub(crate) fn remove_session(&self, id: u64) {
        self.sessions.lock().expect("session registry poisoned").remove(&id);
    }

    pub fn has_session(&self, id: u64) -> bool {
        self.sessions.lock().expect("session registry poisoned").contains(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("session registry poisoned").len()
    }
}
