use kurbo::{Point, Rect, Vec2};

use crate::command::CommandOutcome;
use crate::document::DocumentModel;
use crate::error::{AppError, AppResult};
use crate::event::NavReason;
use crate::history::ViewPosition;
use crate::notify::Notification;

use super::core::PageInteractionController;
use super::mode::InteractionMode;

impl PageInteractionController {
    /// Displays `page`. Long jumps and zooms push the old position for rewind.
    pub fn go_to_page(
        &mut self,
        doc: &mut dyn DocumentModel,
        page: usize,
        reason: NavReason,
    ) -> AppResult<CommandOutcome> {
        doc.check_page(page)?;
        let from = doc.current_page();
        if from == page {
            return Ok(CommandOutcome::Noop);
        }

        if reason.records_history(from, page) {
            let position = self.view.position(doc);
            self.history.record_if_needed(position);
        }
        if !matches!(reason, NavReason::Pointer | NavReason::Pacer) {
            let top = self.view.page_top(doc, page);
            self.view.scroll = self
                .view
                .clamp_scroll(doc, Vec2::new(self.view.scroll.x, top));
        }
        self.switch_page(doc, page, reason)?;
        Ok(CommandOutcome::Applied)
    }

    pub fn next_page(&mut self, doc: &mut dyn DocumentModel) -> AppResult<CommandOutcome> {
        let next = doc.current_page() + 1;
        if next >= doc.page_count() {
            return Ok(CommandOutcome::Noop);
        }
        self.go_to_page(doc, next, NavReason::Step)
    }

    pub fn prev_page(&mut self, doc: &mut dyn DocumentModel) -> AppResult<CommandOutcome> {
        match doc.current_page().checked_sub(1) {
            Some(prev) => self.go_to_page(doc, prev, NavReason::Step),
            None => Ok(CommandOutcome::Noop),
        }
    }

    pub fn first_page(&mut self, doc: &mut dyn DocumentModel) -> AppResult<CommandOutcome> {
        if doc.page_count() == 0 {
            return Ok(CommandOutcome::Noop);
        }
        self.go_to_page(doc, 0, NavReason::Jump)
    }

    pub fn last_page(&mut self, doc: &mut dyn DocumentModel) -> AppResult<CommandOutcome> {
        match doc.page_count().checked_sub(1) {
            Some(last) => self.go_to_page(doc, last, NavReason::Jump),
            None => Ok(CommandOutcome::Noop),
        }
    }

    /// Changes magnification, keeping the top-left page point in place.
    pub fn set_scale(&mut self, doc: &mut dyn DocumentModel, scale: f64) -> CommandOutcome {
        if !scale.is_finite() {
            return CommandOutcome::Noop;
        }
        let scale = self.view.clamp_scale(scale);
        if (scale - self.view.scale).abs() <= f64::EPSILON {
            return CommandOutcome::Noop;
        }
        let anchor = self.view.position(doc);
        self.view.scale = scale;
        self.view.scroll = self.view.clamp_scroll(doc, self.view.scroll_for(doc, &anchor));
        self.post(Notification::MagnificationChanged { scale });
        CommandOutcome::Applied
    }

    /// Multiplies the scale by `factor`, centring `focus` when given.
    pub fn zoom_by(
        &mut self,
        doc: &mut dyn DocumentModel,
        factor: f64,
        focus: Option<(usize, Point)>,
    ) -> AppResult<CommandOutcome> {
        if let Some((page, _)) = focus {
            doc.check_page(page)?;
        }
        let outcome = self.set_scale(doc, self.view.scale * factor);
        if let Some((page, point)) = focus {
            self.view.scroll = self.view.scroll_centering(doc, page, point);
            self.sync_page_to_scroll(doc, NavReason::Zoom)?;
        }
        Ok(outcome)
    }

    /// Fits `rect` of `page` into the viewport. The pre-zoom position is
    /// recorded unless the zoom is itself a rewind replay.
    pub fn zoom_to_rect(
        &mut self,
        doc: &mut dyn DocumentModel,
        rect: Rect,
        page: usize,
    ) -> AppResult<CommandOutcome> {
        doc.check_page(page)?;
        let rect = rect.abs();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(AppError::invalid_argument("zoom rectangle must have an area"));
        }

        let before = self.view.position(doc);
        self.history.record_if_needed(before);

        let viewport = self.view.viewport;
        let scale = self
            .view
            .clamp_scale((viewport.width / rect.width()).min(viewport.height / rect.height()));
        let scale_changed = (scale - self.view.scale).abs() > f64::EPSILON;
        self.view.scale = scale;
        self.view.scroll = self.view.scroll_centering(doc, page, rect.center());
        if page != doc.current_page() {
            self.switch_page(doc, page, NavReason::Zoom)?;
        }
        if scale_changed {
            self.post(Notification::MagnificationChanged { scale });
        }
        log::debug!("zoomed to {rect:?} on page {page} at scale {scale:.3}");
        Ok(CommandOutcome::Applied)
    }

    /// Returns to the last recorded position. At the fence this is a reported
    /// no-op; an entry pointing past the document end is refused untouched.
    pub fn rewind(&mut self, doc: &mut dyn DocumentModel) -> AppResult<CommandOutcome> {
        if !self.history.can_rewind() {
            log::debug!("rewind blocked at history index {}", self.history.min_index());
            return Ok(CommandOutcome::Noop);
        }
        if let Some(top) = self.history.entries().last() {
            doc.check_page(top.page)?;
        }
        let Some(target) = self.history.rewind() else {
            return Ok(CommandOutcome::Noop);
        };

        self.history.begin_replay();
        let result = self.apply_position(doc, target);
        self.history.end_replay();
        result
    }

    pub fn fence_history(&mut self) -> CommandOutcome {
        self.history.fence_here();
        CommandOutcome::Applied
    }

    /// Drops every entry; used when the document is replaced underneath the view.
    pub fn reset_history(&mut self) -> CommandOutcome {
        self.history.reset();
        CommandOutcome::Applied
    }

    /// Entering a transient mode fences history; returning to normal restores
    /// the old fence and forgets what was visited in between.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) -> CommandOutcome {
        let old = self.interaction_mode;
        if old == mode {
            return CommandOutcome::Noop;
        }

        if !old.is_transient() && mode.is_transient() {
            self.history.push_fence();
        } else if old.is_transient() && !mode.is_transient() {
            self.history.pop_fence();
        }

        self.stop_pacer();
        if old == InteractionMode::Presentation {
            self.delegate.exit_presentation();
        }
        self.interaction_mode = mode;
        log::debug!("interaction mode {} -> {}", old.id(), mode.id());
        CommandOutcome::Applied
    }

    /// Makes the page under the scroll offset the displayed page.
    pub(crate) fn sync_page_to_scroll(
        &mut self,
        doc: &mut dyn DocumentModel,
        reason: NavReason,
    ) -> AppResult<()> {
        let page = self.view.page_at(doc, self.view.scroll.y);
        if page != doc.current_page() {
            self.switch_page(doc, page, reason)?;
        }
        Ok(())
    }

    /// Updates the displayed page without moving the view.
    pub(crate) fn switch_page(
        &mut self,
        doc: &mut dyn DocumentModel,
        page: usize,
        reason: NavReason,
    ) -> AppResult<()> {
        let from = doc.current_page();
        doc.set_current_page(page)?;

        if self.pending_annotation().is_some_and(|pending| pending.page != page) {
            self.cancel_gesture();
        }
        if let Some(id) = self.current
            && doc.note(id).is_some_and(|note| note.page != page)
        {
            self.set_current(None);
        }

        log::trace!("page {from} -> {page} ({reason:?})");
        self.post(Notification::PageChanged {
            from,
            to: page,
            reason,
        });
        self.follow_reading_bar(doc, page);
        Ok(())
    }

    fn apply_position(
        &mut self,
        doc: &mut dyn DocumentModel,
        target: ViewPosition,
    ) -> AppResult<CommandOutcome> {
        let scale = self.view.clamp_scale(target.scale);
        let scale_changed = (scale - self.view.scale).abs() > f64::EPSILON;
        self.view.scale = scale;
        self.view.scroll = self.view.clamp_scroll(doc, self.view.scroll_for(doc, &target));
        if target.page != doc.current_page() {
            self.switch_page(doc, target.page, NavReason::History)?;
        }
        if scale_changed {
            self.post(Notification::MagnificationChanged { scale });
        }
        Ok(CommandOutcome::Applied)
    }
}
