//! Auto-expiring status notices (the toast line of the source dapps).

use std::sync::RwLock;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    posted_at: Instant,
}

/// Single-slot notice board. A new notice replaces the previous one, and a
/// notice expires on its own after the TTL; callers never clean up.
pub struct NoticeBoard {
    ttl: Duration,
    slot: RwLock<Option<Notice>>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn post(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
            posted_at: Instant::now(),
        };
        *self.slot.write().unwrap_or_else(|p| p.into_inner()) = Some(notice);
    }

    /// Latest notice, or `None` once the TTL has elapsed.
    pub fn current(&self) -> Option<Notice> {
        self.slot
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .filter(|n| n.posted_at.elapsed() < self.ttl)
            .cloned()
    }
}
