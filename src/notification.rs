//! Parse notification / diagnostic system.
//!
//! Non-fatal issues encountered while reading (skipped entity types, unknown
//! sections, dropped record ranges) are collected as `Notification` items
//! rather than being silently dropped or causing hard errors. Every
//! notification is also emitted as a `tracing` event.
//!
//! After a parse the caller can inspect [`DxfDoc::notifications`] to see
//! what was encountered.
//!
//! [`DxfDoc::notifications`]: crate::document::DxfDoc::notifications

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// An entity type, table or section the reader does not model.
    NotImplemented,
    /// Non-fatal warning (e.g., stray record, duplicate key).
    Warning,
    /// Error that was recovered from (e.g., bad group code value).
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
    /// Source line the notification refers to.
    pub line: Option<usize>,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a source line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] line {}: {}", self.notification_type, line, self.message),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Collects notifications during a parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.push(Notification::new(notification_type, message));
    }

    /// Record a notification tied to a source line.
    pub fn notify_at(
        &mut self,
        notification_type: NotificationType,
        line: usize,
        message: impl Into<String>,
    ) {
        self.push(Notification::new(notification_type, message).at_line(line));
    }

    fn push(&mut self, notification: Notification) {
        let line = notification.line.unwrap_or_default();
        match notification.notification_type {
            NotificationType::NotImplemented => {
                tracing::debug!(line, "{}", notification.message)
            }
            NotificationType::Warning => tracing::warn!(line, "{}", notification.message),
            NotificationType::Error => tracing::error!(line, "{}", notification.message),
        }
        self.items.push(notification);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
