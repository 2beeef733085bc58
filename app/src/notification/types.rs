//! Notification state and actions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Visual context of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationContext {
    /// Green
    Success,
    /// Blue
    Info,
    /// Yellow
    Warning,
    /// Red
    Danger,
}

/// Identifies a notification in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A notification before it enters the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNotification {
    /// Text shown to the user
    pub message: Cow<'static, str>,
    /// Visual context
    pub context: NotificationContext,
    /// Whether the user can close it (and whether it auto-dismisses)
    pub dismissible: bool,
}

impl NewNotification {
    /// Dismissible notification
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>, context: NotificationContext) -> Self {
        Self {
            message: message.into(),
            context,
            dismissible: true,
        }
    }

    /// Shown after a successful login
    #[must_use]
    pub const fn login_success() -> Self {
        Self::fixed("Successfully authenticated", NotificationContext::Success)
    }

    /// Shown after a failed login
    #[must_use]
    pub const fn login_error() -> Self {
        Self::fixed("Authentication error", NotificationContext::Warning)
    }

    /// Shown after a successful registration
    #[must_use]
    pub const fn register_success() -> Self {
        Self::fixed("Successfully registered", NotificationContext::Success)
    }

    /// Shown after a failed registration
    #[must_use]
    pub const fn register_error() -> Self {
        Self::fixed("Registration error", NotificationContext::Warning)
    }

    const fn fixed(message: &'static str, context: NotificationContext) -> Self {
        Self {
            message: Cow::Borrowed(message),
            context,
            dismissible: true,
        }
    }
}

/// A queued notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Queue id
    pub id: NotificationId,
    /// Text shown to the user
    pub message: Cow<'static, str>,
    /// Visual context
    pub context: NotificationContext,
    /// Whether the user can close it
    pub dismissible: bool,
    /// When it was queued
    pub created_at: DateTime<Utc>,
}

/// Notification queue, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub(super) notifications: Vec<Notification>,
    pub(super) next_id: u64,
}

impl NotificationState {
    /// Queued notifications, oldest first
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Whether the queue is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Notification actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    /// Queue a notification
    Push(NewNotification),
    /// Remove one notification
    Dismiss {
        /// Notification to remove
        id: NotificationId,
    },
    /// Remove all notifications
    Clear,
}
