//! Sequence fencing for concurrent login calls.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number handed to one login call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoginTicket {
    pub seq: u64,
}

/// Monotonic counter of login calls.
///
/// Only the holder of the latest ticket may commit its result. Issuing a
/// ticket or invalidating the fence makes every earlier ticket stale.
#[derive(Debug, Default)]
pub struct LoginFence {
    latest: AtomicU64,
}

impl LoginFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket. Tickets start at 1.
    pub fn issue(&self) -> LoginTicket {
        LoginTicket {
            seq: self.latest.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_latest(&self, ticket: LoginTicket) -> bool {
        self.latest() == ticket.seq
    }

    /// Make every outstanding ticket stale without issuing a new one.
    /// Used on logout so a login still in flight cannot resurrect a session.
    pub fn invalidate(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }
}
