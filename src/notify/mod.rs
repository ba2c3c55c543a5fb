mod center;
mod delegate;
mod notification;

pub use center::{NotificationCenter, SubscriptionId};
pub use delegate::{NoopDelegate, SnapshotRequest, ViewerDelegate};
pub use notification::Notification;
