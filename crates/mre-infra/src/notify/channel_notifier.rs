use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use mre_core::ports::NotificationPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Error,
}

/// A message for the toast area of the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Forwards notifications to whoever renders them through a channel.
///
/// Once the receiving side is gone, messages are only logged.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationPort for ChannelNotifier {
    fn notify_error(&self, message: &str) {
        let notification = Notification {
            level: NotificationLevel::Error,
            message: message.to_string(),
        };
        if let Err(err) = self.tx.send(notification) {
            warn!(message = %err.0.message, "notification dropped: no receiver");
        }
    }
}
