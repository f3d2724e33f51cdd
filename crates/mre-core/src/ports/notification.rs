/// User-visible error messages (toasts).
///
/// Fire-and-forget: delivery failures are the sink's own business.
pub trait NotificationPort: Send + Sync {
    fn notify_error(&self, message: &str);
}
