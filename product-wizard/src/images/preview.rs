//! Preview handles
//!
//! A preview handle is a revocable reference to image bytes used for
//! on-screen preview before upload (a `blob:` URI in a browser host). The
//! host only has a finite number of them, so every handle handed out by
//! [`PreviewPool::create`] must come back through [`PreviewPool::revoke`]
//! exactly once.

use super::FileHandle;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Preview handle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    /// All handles are in use
    #[error("No preview slot available ({capacity} in use)")]
    PoolExhausted { capacity: usize },

    /// Revoking a handle that is not live (already revoked or foreign)
    #[error("Preview handle {uri} is not live")]
    NotLive { uri: String },
}

/// Live preview handle. Move-only: it cannot be cloned, so it has exactly one owner.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    token: u64,
    uri: String,
}

impl PreviewHandle {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Debug)]
struct PoolState {
    capacity: usize,
    next_token: u64,
    live: HashSet<u64>,
    created: u64,
    revoked: u64,
}

/// Finite pool of preview handles for one session.
///
/// Clones share the same pool.
#[derive(Clone)]
pub struct PreviewPool {
    state: Arc<Mutex<PoolState>>,
}

impl PreviewPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(PoolState {
                capacity,
                next_token: 1,
                live: HashSet::new(),
                created: 0,
                revoked: 0,
            })),
        }
    }

    /// Allocate a handle for `file`
    pub fn create(&self, file: &FileHandle) -> Result<PreviewHandle, PreviewError> {
        let mut state = self.state.lock();
        if state.live.len() >= state.capacity {
            return Err(PreviewError::PoolExhausted {
                capacity: state.capacity,
            });
        }

        let token = state.next_token;
        state.next_token += 1;
        state.live.insert(token);
        state.created += 1;

        Ok(PreviewHandle {
            token,
            uri: format!("blob:preview/{}/{}", token, file.name()),
        })
    }

    /// Give a handle back to the host
    pub fn revoke(&self, handle: PreviewHandle) -> Result<(), PreviewError> {
        let mut state = self.state.lock();
        if !state.live.remove(&handle.token) {
            return Err(PreviewError::NotLive { uri: handle.uri });
        }
        state.revoked += 1;
        Ok(())
    }

    /// Handles created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().capacity
    }

    /// (created, revoked) since the pool was opened
    pub fn stats(&self) -> (u64, u64) {
        let state = self.state.lock();
        (state.created, state.revoked)
    }
}

impl fmt::Debug for PreviewPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PreviewPool")
            .field("capacity", &state.capacity)
            .field("live", &state.live.len())
            .finish()
    }
}
