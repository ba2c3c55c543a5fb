use std::fmt;

use super::notification::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Notification)>;

enum Observer {
    Callback(Callback),
    Channel(flume::Sender<Notification>),
}

/// Typed observer registry. Observers are invoked synchronously, in
/// registration order, on the thread that posts.
#[derive(Default)]
pub struct NotificationCenter {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Notification) + 'static) -> SubscriptionId {
        self.register(Observer::Callback(Box::new(callback)))
    }

    /// Observer that reads notifications from a channel at its own pace.
    /// Dropping the receiver unsubscribes on the next post.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, flume::Receiver<Notification>) {
        let (tx, rx) = flume::unbounded();
        (self.register(Observer::Channel(tx)), rx)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        before != self.observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn post(&mut self, notification: Notification) {
        log::trace!("post {}", notification.name());
        self.observers.retain_mut(|(id, observer)| match observer {
            Observer::Callback(callback) => {
                callback(&notification);
                true
            }
            Observer::Channel(tx) => {
                if tx.send(notification.clone()).is_ok() {
                    return true;
                }
                log::debug!("dropping disconnected observer {id:?}");
                false
            }
        });
    }

    fn register(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }
}
