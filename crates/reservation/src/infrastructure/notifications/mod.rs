mod log_notification_sender;

pub use log_notification_sender::LogNotificationSender;
