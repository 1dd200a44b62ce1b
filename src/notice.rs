//! Transient user notices.
//!
//! A view-model shows at most one notice at a time. Posting a new one replaces the old one,
//! and each notice is dismissed by a timer after the configured time-to-live. A timer that
//! fires after its notice was already replaced does nothing.

use std::fmt::Display;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

impl Display for NoticeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notice_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Holds the notice currently on screen.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    next_id: u64,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            next_id: 1,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Replaces the current notice and returns the id its dismissal timer should carry.
    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;
        self.current = Some(Notice {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Clears the notice only if it is still the one identified by `id`.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        match &self.current {
            Some(notice) if notice.id == id => {
                debug!(%id, "Notice dismissed");
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

/// Sends `event` back to the owning actor once `ttl` has elapsed.
pub fn schedule_dismissal<E: Send + 'static>(
    events: mpsc::UnboundedSender<E>,
    ttl: Duration,
    event: E,
) {
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        // The actor may be gone by now.
        let _ = events.send(event);
    });
}
