use authnlens_core::Notification;
use tokio::sync::mpsc;
use tracing::debug;

/// Receiving end handed to the host, which displays each notification.
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Sending end shared by the flows.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub fn channel() -> (Self, NotificationReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publish a notification. A host that stopped listening is not an error.
    pub fn notify(&self, notification: Notification) {
        debug!(
            title = %notification.title,
            severity = ?notification.severity,
            "publishing notification"
        );
        if self.tx.send(notification).is_err() {
            debug!("notification receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_in_order_and_survives_closed_receiver() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.notify(Notification::no_claim());
        notifier.notify(Notification::no_matches());
        assert_eq!(rx.try_recv().unwrap().title, "No claim");
        assert_eq!(rx.try_recv().unwrap().title, "No matches");
        drop(rx);
        notifier.notify(Notification::no_matches());
    }
}
