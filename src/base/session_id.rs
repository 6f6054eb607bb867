//! Opaque identifiers for outlining sessions.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Identifies the session (one open document) that produced a region list.
///
/// Region lists carry this handle instead of a reference to their owner, so
/// the parsing core never depends on the lifetime of whoever renders the
/// regions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(u32);

static NEXT_SESSION: AtomicU32 = AtomicU32::new(1);

impl SessionId {
    /// Placeholder for region lists not owned by any session.
    pub const DETACHED: SessionId = SessionId(0);

    /// Allocate a process-unique id.
    pub fn fresh() -> Self {
        Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = SessionId::fresh();
        let b = SessionId::fresh();

        assert_ne!(a, b);
        assert_ne!(a, SessionId::DETACHED);
    }

    #[test]
    fn test_session_id_size() {
        assert_eq!(std::mem::size_of::<SessionId>(), 4);
    }
}
