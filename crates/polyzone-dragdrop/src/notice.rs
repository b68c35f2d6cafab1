use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// A transient on-screen message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

/// Holds at most one notice and dismisses it after a fixed delay.
///
/// Posting a new notice replaces the old one together with its deadline, so a
/// stale timer can never clear a newer message.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        if let Some(old) = self.current.as_ref() {
            log::debug!("notice {:?} replaced by {:?}", old.message, message);
        }
        self.current = Some(Notice {
            message,
            expires_at: now + self.ttl,
        });
    }

    /// Drop the notice if its deadline has passed. Returns `true` if one was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notice) if now >= notice.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Message still on screen at `now`.
    pub fn active(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.message.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
