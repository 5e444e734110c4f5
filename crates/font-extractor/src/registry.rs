//! Opaque-handle table for sessions shared across a call boundary.

use std::{
    fmt,
    num::NonZeroU64,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use dashmap::DashMap;
use glyphkit_font_path::GlyphPath;
use log::debug;

use crate::{
    FontSession, Variation,
    error::{Error, Result},
};

/// Opaque, never-zero identifier of an open session.
///
/// Zero is reserved as the null handle for callers that can only pass plain
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionHandle(NonZeroU64);

impl SessionHandle {
    /// Returns `None` for the null handle.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn into_raw(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}

/// Thread-safe table of open [`FontSession`]s keyed by [`SessionHandle`].
///
/// Each session sits behind its own mutex, so extractions on different
/// sessions run in parallel while extractions on the same session are
/// serialized. Handles are never reused, so a stale handle can only ever
/// fail with [`Error::InvalidHandle`].
pub struct SessionRegistry {
    sessions: DashMap<SessionHandle, Mutex<FontSession>>,
    next: AtomicU64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            next: AtomicU64::new(1),
        }
    }

    /// Parses `data` into a new session and returns its handle.
    pub fn open(&self, data: impl Into<Vec<u8>>) -> Result<SessionHandle> {
        let session = FontSession::new(data)?;
        Ok(self.insert(session))
    }

    /// Registers an already opened session.
    pub fn insert(&self, session: FontSession) -> SessionHandle {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        // The counter starts at one and would need 2^64 opens to wrap.
        let handle = SessionHandle(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN));
        self.sessions.insert(handle, Mutex::new(session));
        debug!("Registered session {handle}");
        handle
    }

    /// Runs one extraction on the session behind `handle`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidHandle` if the handle is unknown or already closed,
    /// plus anything [`FontSession::extract`] returns.
    pub fn extract(
        &self,
        handle: SessionHandle,
        codepoint: u32,
        variations: &[Variation],
    ) -> Result<GlyphPath> {
        let entry = self
            .sessions
            .get(&handle)
            .ok_or(Error::InvalidHandle(handle.into_raw()))?;
        // A panic mid-extraction leaves nothing half-written that the next
        // call does not overwrite.
        let mut session = entry.lock().unwrap_or_else(PoisonError::into_inner);
        session.extract(codepoint, variations)
    }

    /// Drops the session behind `handle`, releasing its font data.
    ///
    /// Closing an already closed handle fails with `Error::InvalidHandle`.
    pub fn close(&self, handle: SessionHandle) -> Result<()> {
        match self.sessions.remove(&handle) {
            Some(_) => {
                debug!("Closed session {handle}");
                Ok(())
            }
            None => Err(Error::InvalidHandle(handle.into_raw())),
        }
    }

    pub fn contains(&self, handle: SessionHandle) -> bool {
        self.sessions.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
