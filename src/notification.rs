//! Recoverable issues collected while reading and flattening.
//!
//! Per-record problems (a vertex with no container, an insert naming a block
//! that does not exist, a block that inserts itself) never abort the
//! surrounding work. They are logged through `tracing` and also kept here so
//! the caller can inspect them on [`Document::notifications`] afterwards.
//!
//! [`Document::notifications`]: crate::Document::notifications

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A record kind the reader knows of but does not decode.
    NotImplemented,
    /// Valid input that this crate does not act on.
    NotSupported,
    /// Recovered inconsistency (missing reference, unattached vertex).
    Warning,
    /// A record that could not be used at all.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotImplemented => "NotImplemented",
            Self::NotSupported => "NotSupported",
            Self::Warning => "Warning",
            Self::Error => "Error",
        };
        f.write_str(label)
    }
}

/// Which pass produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationStage {
    Reading,
    Flattening,
}

/// A single recovered issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub stage: NotificationStage,
    pub message: String,
}

impl Notification {
    pub fn new(
        notification_type: NotificationType,
        stage: NotificationStage,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Ordered list of notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification raised while reading
    pub fn reading(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(
            notification_type,
            NotificationStage::Reading,
            message,
        ));
    }

    /// Record a notification raised while flattening
    pub fn flattening(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(
            notification_type,
            NotificationStage::Flattening,
            message,
        ));
    }

    /// Append everything from `other`
    pub fn extend(&mut self, other: NotificationCollection) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Notifications of one severity
    pub fn of_type(&self, nt: NotificationType) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| n.notification_type == nt)
    }

    /// Notifications raised by one pass
    pub fn of_stage(&self, stage: NotificationStage) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| n.stage == stage)
    }

    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
