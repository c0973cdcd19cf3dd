//! Transient user notices with an expiry.
//!
//! A notice is shown until its time-to-live elapses or it is dismissed.
//! Posting a new notice replaces the current one, so an older notice can
//! never outlive a newer one.

use jiff::{SignedDuration, Timestamp};

/// How long routine notices stay up.
pub const SHORT_TTL: SignedDuration = SignedDuration::from_secs(3);

/// How long failure notices stay up.
pub const LONG_TTL: SignedDuration = SignedDuration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: Timestamp,
    pub ttl: SignedDuration,
}

impl Notice {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.duration_since(self.posted_at) >= self.ttl
    }
}

/// Holds at most one notice.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    /// Show `message`, replacing whatever was showing.
    pub fn post(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        ttl: SignedDuration,
        now: Timestamp,
    ) {
        self.current = Some(Notice {
            kind,
            message: message.into(),
            posted_at: now,
            ttl,
        });
    }

    /// The notice showing at `now`, if it has not expired.
    pub fn active(&self, now: Timestamp) -> Option<&Notice> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Take the current notice down early.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.current.take()
    }
}
