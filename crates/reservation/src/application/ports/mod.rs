mod notification_sender;

pub use notification_sender::{Notification, NotificationError, NotificationSender};

#[cfg(any(test, feature = "test-utils"))]
mod notification_sender_stub;

#[cfg(any(test, feature = "test-utils"))]
pub use notification_sender_stub::RecordingNotificationSender;
