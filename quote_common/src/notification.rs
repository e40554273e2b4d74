//! Transient user notifications that hide themselves after a short time.
use std::time::{Duration, Instant};

use crate::config::NOTIFICATION_TTL;

/// A message that stays visible for `ttl` after it was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text displayed to the user.
    pub message: String,
    /// When the notification appeared.
    pub shown_at: Instant,
    /// How long it stays visible.
    pub ttl: Duration,
}

impl Notification {
    /// Shows `message` now with the default three second lifetime.
    pub fn new(message: impl Into<String>) -> Self {
        Self::shown_at(message, Instant::now())
    }

    /// Creates a notification that appeared at `shown_at`.
    pub fn shown_at(message: impl Into<String>, shown_at: Instant) -> Self {
        Notification {
            message: message.into(),
            shown_at,
            ttl: NOTIFICATION_TTL,
        }
    }

    /// Whether the notification is still visible at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_after_three_seconds() {
        let start = Instant::now();
        let note = Notification::shown_at("Quotes synced with the server.", start);
        assert!(note.is_visible(start));
        assert!(note.is_visible(start + Duration::from_millis(2999)));
        assert!(!note.is_visible(start + Duration::from_secs(3)));
    }
}
