use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::controller::PageInteractionController;
use crate::notify::{Notification, SnapshotRequest, SubscriptionId};

/// What a snapshot window needs to be reopened later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSetup {
    pub page: usize,
    pub rect: Rect,
    pub scale: f64,
}

/// Read-only mirror of one page region. It never drives the controller; it
/// only watches notifications to learn when its copy is stale.
#[derive(Debug)]
pub struct SnapshotViewport {
    setup: SnapshotSetup,
    subscription: SubscriptionId,
    notifications: flume::Receiver<Notification>,
    needs_redraw: bool,
}

impl SnapshotViewport {
    pub fn open(controller: &mut PageInteractionController, request: SnapshotRequest) -> Self {
        let (subscription, notifications) = controller.subscribe_channel();
        log::debug!(
            "snapshot of page {} at {:?} opened as {subscription:?}",
            request.page,
            request.rect
        );
        Self {
            setup: SnapshotSetup {
                page: request.page,
                rect: request.rect,
                scale: request.scale,
            },
            subscription,
            notifications,
            needs_redraw: true,
        }
    }

    pub fn setup(&self) -> SnapshotSetup {
        self.setup
    }

    pub fn page(&self) -> usize {
        self.setup.page
    }

    /// Drains pending notifications. Returns whether the mirrored page changed.
    pub fn poll(&mut self) -> bool {
        let page = self.setup.page;
        for notification in self.notifications.try_iter() {
            if notification.page() == Some(page) {
                self.needs_redraw = true;
            }
        }
        self.needs_redraw
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        self.poll();
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn close(self, controller: &mut PageInteractionController) -> bool {
        controller.unsubscribe(self.subscription)
    }
}
