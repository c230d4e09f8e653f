//! Transient user notifications.
//!
//! Cart mutations announce themselves through a [`NotificationChannel`]:
//! fire-and-forget, no acknowledgment, no ordering promise between bursts.
//! [`ToastQueue`] is the stock channel. It keeps each message as a toast that
//! slides in, stays for the configured duration, slides out and is dropped.
//! Phases are computed from timestamps, so nothing runs in the background.

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::config::NotificationConfig;

/// Receives short user-visible messages.
pub trait NotificationChannel {
    fn notify(&mut self, message: &str);
}

/// Where a toast is in its on-screen lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Sliding in.
    Entering,
    /// Fully shown.
    Visible,
    /// Sliding out.
    Exiting,
    /// Gone; removed on the next prune.
    Dismissed,
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Timed toast notifications.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    config: NotificationConfig,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            toasts: Vec::new(),
        }
    }

    /// Add a toast created at `now`.
    pub fn push_at(&mut self, message: &str, now: DateTime<Utc>) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.to_string(),
            created_at: now,
        };
        let id = toast.id;
        tracing::info!(toast_id = %id, text = message, "Notification shown");
        self.toasts.push(toast);
        id
    }

    /// Phase of `toast` at `now`.
    #[must_use]
    pub fn phase(&self, toast: &Toast, now: DateTime<Utc>) -> ToastPhase {
        let elapsed = now - toast.created_at;
        let exit_at = self.config.display_duration;
        if elapsed < self.config.enter_delay {
            ToastPhase::Entering
        } else if elapsed < exit_at {
            ToastPhase::Visible
        } else if elapsed < exit_at + self.config.exit_duration {
            ToastPhase::Exiting
        } else {
            ToastPhase::Dismissed
        }
    }

    /// Toasts still on screen at `now`, oldest first.
    #[must_use]
    pub fn active(&self, now: DateTime<Utc>) -> Vec<(&Toast, ToastPhase)> {
        self.toasts
            .iter()
            .map(|t| (t, self.phase(t, now)))
            .filter(|(_, phase)| *phase != ToastPhase::Dismissed)
            .collect()
    }

    /// Drop dismissed toasts; returns how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.toasts.len();
        let lifetime = self.lifetime();
        self.toasts.retain(|t| now - t.created_at < lifetime);
        before - self.toasts.len()
    }

    /// Total time a toast spends on screen.
    #[must_use]
    pub fn lifetime(&self) -> TimeDelta {
        self.config.display_duration + self.config.exit_duration
    }

    /// Every toast not yet pruned, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

impl NotificationChannel for ToastQueue {
    fn notify(&mut self, message: &str) {
        let now = Utc::now();
        self.prune(now);
        self.push_at(message, now);
    }
}
