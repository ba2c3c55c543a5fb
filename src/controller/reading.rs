use kurbo::{Point, Vec2};

use crate::command::CommandOutcome;
use crate::document::DocumentModel;
use crate::error::AppResult;
use crate::event::NavReason;
use crate::notify::Notification;
use crate::reading_bar::ReadingBarChange;

use super::core::PageInteractionController;
use super::hit_test::BarRegion;

impl PageInteractionController {
    /// Shows or hides the bar on the displayed page. Showing it again resumes
    /// on the line the page last had.
    pub fn toggle_reading_bar(&mut self, doc: &dyn DocumentModel) -> AppResult<CommandOutcome> {
        let page = doc.current_page();
        let line_count = doc.page(page)?.line_count();
        let first_visible = self.first_visible_line(doc, page);
        let change = self.reading_bar.toggle(page, first_visible, line_count);
        log::debug!("reading bar {:?} -> {:?}", change.old, change.new);
        self.post_reading_bar(Some(change));
        Ok(CommandOutcome::Applied)
    }

    pub fn move_reading_bar(
        &mut self,
        doc: &mut dyn DocumentModel,
        page: usize,
        line: usize,
    ) -> AppResult<CommandOutcome> {
        let line_count = doc.page(page)?.line_count();
        if page != doc.current_page() {
            self.go_to_page(doc, page, NavReason::Jump)?;
        }
        let change = self.reading_bar.move_to(page, line, line_count);
        Ok(self.bar_outcome(doc, change))
    }

    pub fn reading_bar_next_line(
        &mut self,
        doc: &mut dyn DocumentModel,
    ) -> AppResult<CommandOutcome> {
        Ok(match self.advance_reading_bar(doc, true)? {
            true => CommandOutcome::Applied,
            false => CommandOutcome::Noop,
        })
    }

    pub fn reading_bar_prev_line(
        &mut self,
        doc: &mut dyn DocumentModel,
    ) -> AppResult<CommandOutcome> {
        Ok(match self.advance_reading_bar(doc, false)? {
            true => CommandOutcome::Applied,
            false => CommandOutcome::Noop,
        })
    }

    pub fn set_reading_bar_lines(&mut self, lines: usize) -> CommandOutcome {
        let position = self.reading_bar.visible_position();
        if !self.reading_bar.set_lines(lines) {
            return CommandOutcome::Noop;
        }
        self.post(Notification::ReadingBarChanged {
            old: position,
            new: position,
        });
        CommandOutcome::Applied
    }

    pub fn toggle_pacer(&mut self) -> CommandOutcome {
        let armed = self.pacer.toggle();
        log::debug!(
            "pacer {} at {:.2} pt/s",
            if armed { "armed" } else { "disarmed" },
            self.pacer.speed()
        );
        self.post(Notification::PacerStartedOrStopped { armed });
        CommandOutcome::Applied
    }

    /// Takes effect from the next tick.
    pub fn set_pacer_speed(&mut self, speed: f64) -> CommandOutcome {
        if self.pacer.set_speed(speed) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Noop
        }
    }

    /// Advances the reading bar by a line, or the view by one step when the
    /// bar is off. Reaching the end of the document disarms the pacer instead.
    pub fn pacer_tick(
        &mut self,
        doc: &mut dyn DocumentModel,
        generation: u64,
    ) -> AppResult<CommandOutcome> {
        if !self.pacer.accepts_tick(generation) {
            log::trace!("ignoring stale pacer tick {generation}");
            return Ok(CommandOutcome::Noop);
        }

        if self.reading_bar.is_enabled() {
            if !self.advance_reading_bar(doc, true)? {
                self.stop_pacer();
            }
            return Ok(CommandOutcome::Applied);
        }

        let next = self.view.scroll.y + self.pacer.step();
        if next > self.view.max_scroll(doc).y {
            self.stop_pacer();
            return Ok(CommandOutcome::Applied);
        }
        self.view.scroll.y = next;
        self.sync_page_to_scroll(doc, NavReason::Pacer)?;
        Ok(CommandOutcome::Applied)
    }

    pub(crate) fn stop_pacer(&mut self) {
        if self.pacer.disarm() {
            log::debug!("pacer disarmed");
            self.post(Notification::PacerStartedOrStopped { armed: false });
        }
    }

    pub(crate) fn follow_reading_bar(&mut self, doc: &dyn DocumentModel, page: usize) {
        let Ok(info) = doc.page(page) else {
            return;
        };
        let line_count = info.line_count();
        let first_visible = self.first_visible_line(doc, page);
        let change = self.reading_bar.follow_page(page, first_visible, line_count);
        self.post_reading_bar(change);
    }

    /// Moves or resizes the bar while one of its regions is dragged.
    pub(crate) fn drag_reading_bar(
        &mut self,
        doc: &dyn DocumentModel,
        region: BarRegion,
        page: usize,
        point: Point,
    ) -> AppResult<CommandOutcome> {
        let info = doc.page(page)?;
        let (Some(position), Some(line)) =
            (self.reading_bar.visible_position(), info.line_at(point.y))
        else {
            return Ok(CommandOutcome::Noop);
        };
        let line_count = info.line_count();
        let last = position.line + self.reading_bar.lines() - 1;

        match region {
            BarRegion::Body => {
                let change = self.reading_bar.move_to(page, line, line_count);
                Ok(self.bar_outcome(doc, change))
            }
            BarRegion::BottomEdge => {
                let lines = line.max(position.line) - position.line + 1;
                Ok(self.set_reading_bar_lines(lines))
            }
            BarRegion::TopEdge => {
                let start = line.min(last);
                let moved = self.reading_bar.move_to(page, start, line_count);
                let resized = self.reading_bar.set_lines(last - start + 1);
                if moved.is_none() && !resized {
                    return Ok(CommandOutcome::Noop);
                }
                let new = self.reading_bar.visible_position();
                self.post(Notification::ReadingBarChanged {
                    old: Some(position),
                    new,
                });
                Ok(CommandOutcome::Applied)
            }
        }
    }

    /// Steps the bar one line, crossing page boundaries. Returns false at
    /// either end of the document or when the bar is hidden.
    fn advance_reading_bar(
        &mut self,
        doc: &mut dyn DocumentModel,
        forward: bool,
    ) -> AppResult<bool> {
        let Some(position) = self.reading_bar.visible_position() else {
            return Ok(false);
        };
        let lines = self.reading_bar.lines();
        let line_count = doc.page(position.page)?.line_count();

        let target = if forward {
            if position.line + lines < line_count {
                Some((position.page, position.line + 1))
            } else {
                self.neighbour_with_lines(doc, position.page, true)
                    .map(|page| (page, 0))
            }
        } else if position.line > 0 {
            Some((position.page, position.line - 1))
        } else {
            self.neighbour_with_lines(doc, position.page, false)
                .and_then(|page| doc.page(page).ok().map(|info| (page, info.line_count())))
                .map(|(page, count)| (page, count.saturating_sub(lines)))
        };
        let Some((page, line)) = target else {
            return Ok(false);
        };

        if page != doc.current_page() {
            self.go_to_page(doc, page, NavReason::Step)?;
        }
        let line_count = doc.page(page)?.line_count();
        let change = self.reading_bar.move_to(page, line, line_count);
        Ok(self.bar_outcome(doc, change) == CommandOutcome::Applied)
    }

    fn neighbour_with_lines(
        &self,
        doc: &dyn DocumentModel,
        page: usize,
        forward: bool,
    ) -> Option<usize> {
        let mut candidates: Box<dyn Iterator<Item = usize>> = if forward {
            Box::new(page + 1..doc.page_count())
        } else {
            Box::new((0..page).rev())
        };
        candidates.find(|index| doc.page(*index).is_ok_and(|info| info.line_count() > 0))
    }

    fn bar_outcome(
        &mut self,
        doc: &dyn DocumentModel,
        change: Option<ReadingBarChange>,
    ) -> CommandOutcome {
        if !self.post_reading_bar(change) {
            return CommandOutcome::Noop;
        }
        self.reveal_reading_bar(doc);
        CommandOutcome::Applied
    }

    /// Scrolls just enough to bring the bar into the viewport.
    fn reveal_reading_bar(&mut self, doc: &dyn DocumentModel) {
        let Some(position) = self.reading_bar.visible_position() else {
            return;
        };
        let Some(bar) = doc
            .page(position.page)
            .ok()
            .and_then(|info| self.reading_bar.bar_rect(info))
        else {
            return;
        };
        let top = self.view.page_top(doc, position.page);
        let visible = self.view.visible_size();
        let (bar_top, bar_bottom) = (top + bar.y0, top + bar.y1);
        let scroll_y = if bar_top < self.view.scroll.y {
            bar_top
        } else if bar_bottom > self.view.scroll.y + visible.height {
            bar_bottom - visible.height
        } else {
            return;
        };
        self.view.scroll = self
            .view
            .clamp_scroll(doc, Vec2::new(self.view.scroll.x, scroll_y));
    }

    /// Topmost text line of `page` inside the viewport.
    pub(crate) fn first_visible_line(&self, doc: &dyn DocumentModel, page: usize) -> usize {
        let Ok(info) = doc.page(page) else {
            return 0;
        };
        self.view
            .visible_rect_on_page(doc, page)
            .and_then(|visible| info.line_at(visible.y0))
            .unwrap_or(0)
    }
}
