use crossterm::event::KeyModifiers;
use kurbo::{Point, Rect, Size, Vec2};

use crate::annotation::{Annotation, AnnotationType, bounds_of};
use crate::command::CommandOutcome;
use crate::document::DocumentModel;
use crate::error::AppResult;
use crate::event::NavReason;
use crate::geometry::{clamp_point, containing_offset, drag_rect, remap_point};
use crate::input::PointerEvent;
use crate::notify::{Notification, SnapshotRequest};

use super::core::PageInteractionController;
use super::flags::HighlightLayerState;
use super::hit_test::{BarRegion, InteractionArea, ResizeHandle};
use super::mode::{TemporaryToolMode, ToolMode};
use super::selection::SelectionRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RubberBand {
    Zoom,
    Snapshot,
}

/// What the pointer is doing between down and up.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Gesture {
    Idle,
    Creating {
        draft: Annotation,
        anchor: Point,
        /// Drawn under a temporary markup mode rather than the Note tool.
        from_temporary: bool,
    },
    Resizing {
        original: Annotation,
        working: Annotation,
        handle: ResizeHandle,
    },
    Moving {
        original: Annotation,
        working: Annotation,
        grab: Point,
    },
    Selecting {
        dragged: bool,
    },
    MovingSelection {
        last: Point,
    },
    RubberBand {
        purpose: RubberBand,
        page: usize,
        anchor: Point,
        focus: Point,
    },
    Panning {
        page: usize,
        grab: Point,
    },
    Magnifying {
        page: usize,
        point: Point,
    },
    DraggingBar {
        region: BarRegion,
        page: usize,
    },
}

impl Gesture {
    fn page(&self) -> Option<usize> {
        match self {
            Self::Creating { draft, .. } => Some(draft.page),
            Self::Resizing { working, .. } | Self::Moving { working, .. } => Some(working.page),
            Self::RubberBand { page, .. }
            | Self::Panning { page, .. }
            | Self::Magnifying { page, .. }
            | Self::DraggingBar { page, .. } => Some(*page),
            Self::Idle | Self::Selecting { .. } | Self::MovingSelection { .. } => None,
        }
    }
}

impl PageInteractionController {
    pub fn pointer_down(
        &mut self,
        doc: &mut dyn DocumentModel,
        event: PointerEvent,
    ) -> AppResult<CommandOutcome> {
        let bounds = self.clamp_bounds(doc, event.page)?;
        self.cancel_gesture();
        if event.page != doc.current_page() {
            self.go_to_page(doc, event.page, NavReason::Pointer)?;
        }

        let page = event.page;
        let point = clamp_point(event.point, bounds);
        let area = self.hit_test(doc, page, event.point)?;
        log::trace!("pointer down on page {page} at {point:?}, area {area:?}");

        if let Some(InteractionArea::Resize(handle)) = area
            && let Some(note) = self.current_annotation_on(doc, page).cloned()
        {
            self.gesture = Gesture::Resizing {
                original: note.clone(),
                working: note,
                handle,
            };
            return Ok(CommandOutcome::Applied);
        }

        if let Some(InteractionArea::ReadingBar(region)) = area {
            self.gesture = Gesture::DraggingBar { region, page };
            return Ok(CommandOutcome::Applied);
        }

        if let Some(kind) = self.creation_type() {
            let id = doc.next_annotation_id();
            let mut draft = Annotation::new(id, page, kind, Rect::from_points(point, point));
            match kind {
                AnnotationType::Line => draft.path = vec![point, point],
                AnnotationType::Ink => draft.path = vec![point],
                _ => {}
            }
            self.set_current(None);
            self.clear_selection();
            self.gesture = Gesture::Creating {
                draft,
                anchor: point,
                from_temporary: self.temporary_mode.annotation_type().is_some(),
            };
            return Ok(CommandOutcome::Applied);
        }

        if let Some(InteractionArea::Drag(id)) = area
            && !self.temporary_mode.is_active()
            && (self.current == Some(id) || matches!(self.tool_mode, ToolMode::Text | ToolMode::Select))
            && let Some(note) = doc.note(id).cloned()
        {
            self.set_current(Some(id));
            self.gesture = Gesture::Moving {
                original: note.clone(),
                working: note,
                grab: point,
            };
            return Ok(CommandOutcome::Applied);
        }

        self.set_current(None);
        self.gesture = match self.temporary_mode {
            TemporaryToolMode::Zoom => Gesture::RubberBand {
                purpose: RubberBand::Zoom,
                page,
                anchor: point,
                focus: point,
            },
            TemporaryToolMode::Snapshot => Gesture::RubberBand {
                purpose: RubberBand::Snapshot,
                page,
                anchor: point,
                focus: point,
            },
            _ => match self.tool_mode {
                ToolMode::Select
                    if area == Some(InteractionArea::Special) && self.selection.is_some() =>
                {
                    Gesture::MovingSelection { last: point }
                }
                ToolMode::Text | ToolMode::Select => self.begin_selection(page, point, event.modifiers),
                ToolMode::Move => Gesture::Panning {
                    page,
                    grab: event.point,
                },
                ToolMode::Magnify => Gesture::Magnifying { page, point },
                ToolMode::Note => Gesture::Idle,
            },
        };
        Ok(CommandOutcome::Applied)
    }

    pub fn pointer_dragged(
        &mut self,
        doc: &mut dyn DocumentModel,
        event: PointerEvent,
    ) -> AppResult<CommandOutcome> {
        let bounds = match self.gesture.page() {
            Some(page) => Some(self.clamp_bounds(doc, page)?),
            None => None,
        };
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let (next, outcome) = match (gesture, bounds) {
            (Gesture::Idle, _) => (Gesture::Idle, CommandOutcome::Noop),
            (
                Gesture::Creating {
                    mut draft,
                    anchor,
                    from_temporary,
                },
                Some(bounds),
            ) => {
                let point = clamp_point(self.point_on_page(doc, &event, draft.page), bounds);
                update_draft(&mut draft, anchor, point, bounds, event.modifiers);
                (
                    Gesture::Creating {
                        draft,
                        anchor,
                        from_temporary,
                    },
                    CommandOutcome::Applied,
                )
            }
            (
                Gesture::Resizing {
                    original,
                    mut working,
                    handle,
                },
                Some(bounds),
            ) => {
                let point = clamp_point(self.point_on_page(doc, &event, working.page), bounds);
                working.rect = handle.apply(original.rect, point);
                if working.kind.is_path_based() {
                    working.path = original
                        .path
                        .iter()
                        .map(|vertex| remap_point(*vertex, original.rect, working.rect))
                        .collect();
                }
                (
                    Gesture::Resizing {
                        original,
                        working,
                        handle,
                    },
                    CommandOutcome::Applied,
                )
            }
            (
                Gesture::Moving {
                    original, grab, ..
                },
                Some(bounds),
            ) => {
                let point = clamp_point(self.point_on_page(doc, &event, original.page), bounds);
                let delta = point - grab;
                let mut working = original.clone();
                working.translate(delta.x, delta.y);
                let fix = containing_offset(working.rect, bounds);
                working.translate(fix.x, fix.y);
                (
                    Gesture::Moving {
                        original,
                        working,
                        grab,
                    },
                    CommandOutcome::Applied,
                )
            }
            (Gesture::Selecting { .. }, _) => {
                self.extend_selection(doc, &event);
                (Gesture::Selecting { dragged: true }, CommandOutcome::Applied)
            }
            (Gesture::MovingSelection { last }, _) => match self.selection {
                Some(mut selection) => {
                    let point = self.point_on_page(doc, &event, selection.page());
                    let delta = point - last;
                    selection.anchor += delta;
                    selection.focus += delta;
                    self.set_selection(Some(selection), selection.page());
                    (
                        Gesture::MovingSelection { last: point },
                        CommandOutcome::Applied,
                    )
                }
                None => (Gesture::Idle, CommandOutcome::Noop),
            },
            (
                Gesture::RubberBand {
                    purpose,
                    page,
                    anchor,
                    ..
                },
                Some(bounds),
            ) => {
                let focus = clamp_point(self.point_on_page(doc, &event, page), bounds);
                (
                    Gesture::RubberBand {
                        purpose,
                        page,
                        anchor,
                        focus,
                    },
                    CommandOutcome::Applied,
                )
            }
            (Gesture::Panning { page, grab }, _) => {
                let point = self.point_on_page(doc, &event, page);
                let outcome = self.pan_by(doc, point - grab)?;
                (Gesture::Panning { page, grab }, outcome)
            }
            (Gesture::Magnifying { page, .. }, Some(bounds)) => {
                let point = clamp_point(self.point_on_page(doc, &event, page), bounds);
                (Gesture::Magnifying { page, point }, CommandOutcome::Applied)
            }
            (Gesture::DraggingBar { region, page }, _) => {
                let point = self.point_on_page(doc, &event, page);
                let outcome = self.drag_reading_bar(doc, region, page, point)?;
                (Gesture::DraggingBar { region, page }, outcome)
            }
            (gesture, None) => (gesture, CommandOutcome::Noop),
        };
        self.gesture = next;
        Ok(outcome)
    }

    /// Finalizes the gesture with the geometry of the last drag.
    pub fn pointer_up(
        &mut self,
        doc: &mut dyn DocumentModel,
        event: PointerEvent,
    ) -> AppResult<CommandOutcome> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle => Ok(CommandOutcome::Noop),
            Gesture::Creating { draft, .. } => self.commit_draft(doc, draft),
            Gesture::Resizing {
                original, working, ..
            }
            | Gesture::Moving {
                original, working, ..
            } => self.commit_geometry(doc, original, working),
            Gesture::Selecting { dragged } => {
                let tolerance = self.config.interaction.degenerate_tolerance;
                if !dragged || self.selection.is_some_and(|selection| selection.is_empty(tolerance)) {
                    self.clear_selection();
                }
                Ok(CommandOutcome::Applied)
            }
            Gesture::RubberBand {
                purpose,
                page,
                anchor,
                focus,
            } => {
                let rect = drag_rect(anchor, focus);
                let tolerance = self.config.interaction.degenerate_tolerance;
                let degenerate = rect.width() <= tolerance || rect.height() <= tolerance;
                match purpose {
                    RubberBand::Zoom if degenerate => {
                        self.zoom_by(doc, self.config.view.zoom_step, Some((page, anchor)))
                    }
                    RubberBand::Zoom => self.zoom_to_rect(doc, rect, page),
                    RubberBand::Snapshot if degenerate => Ok(CommandOutcome::Noop),
                    RubberBand::Snapshot => {
                        self.delegate.show_snapshot(SnapshotRequest {
                            page,
                            rect,
                            scale: self.view.scale,
                            auto_fits: event.modifiers.contains(KeyModifiers::SHIFT),
                        });
                        Ok(CommandOutcome::Applied)
                    }
                }
            }
            Gesture::MovingSelection { .. }
            | Gesture::Panning { .. }
            | Gesture::Magnifying { .. }
            | Gesture::DraggingBar { .. } => Ok(CommandOutcome::Applied),
        }
    }

    /// Hover hit-test for cursor feedback; flags the highlight layer over notes.
    pub fn pointer_moved(
        &mut self,
        doc: &dyn DocumentModel,
        event: PointerEvent,
    ) -> AppResult<Option<InteractionArea>> {
        let area = self.hit_test(doc, event.page, event.point)?;
        let highlight = match area {
            Some(InteractionArea::Drag(_) | InteractionArea::Resize(_)) => {
                HighlightLayerState::Visible
            }
            _ => HighlightLayerState::Hidden,
        };
        self.flags.set_highlight_layer(highlight);
        Ok(area)
    }

    /// Type a pointer-down would create, if any. Temporary markup modes win
    /// over the Note tool.
    pub(crate) fn creation_type(&self) -> Option<AnnotationType> {
        match self.temporary_mode.annotation_type() {
            Some(kind) => Some(kind),
            None if self.temporary_mode == TemporaryToolMode::None
                && self.tool_mode == ToolMode::Note =>
            {
                Some(self.annotation_mode)
            }
            None => None,
        }
    }

    pub(crate) fn clamp_bounds(&self, doc: &dyn DocumentModel, page: usize) -> AppResult<Rect> {
        Ok(doc.page(page)?.bounds(self.config.interaction.clamp_box))
    }

    pub(crate) fn commit_draft(
        &mut self,
        doc: &mut dyn DocumentModel,
        mut draft: Annotation,
    ) -> AppResult<CommandOutcome> {
        let interaction = &self.config.interaction;
        let tolerance = interaction.degenerate_tolerance;
        if draft.kind.is_text_bearing()
            && (draft.rect.width() <= tolerance || draft.rect.height() <= tolerance)
        {
            let size = match draft.kind {
                AnnotationType::FreeText => {
                    Size::new(interaction.free_text_width, interaction.free_text_height)
                }
                _ => Size::new(interaction.anchored_note_size, interaction.anchored_note_size),
            };
            let bounds = self.clamp_bounds(doc, draft.page)?;
            let rect = Rect::from_origin_size(draft.rect.origin(), size);
            draft.rect = rect + containing_offset(rect, bounds);
        }

        if draft.is_degenerate(tolerance) {
            log::debug!("discarding degenerate {} annotation", draft.kind.id());
            return Ok(CommandOutcome::Noop);
        }

        let (id, page, kind) = (draft.id, draft.page, draft.kind);
        doc.insert_note(draft, None)?;
        log::debug!("added {} annotation {id} on page {page}", kind.id());
        self.post(Notification::AnnotationAdded {
            annotation: id,
            page,
        });
        self.set_current(Some(id));
        if kind == AnnotationType::FreeText {
            self.editing = Some(id);
            self.delegate.did_begin_editing(id);
        }
        Ok(CommandOutcome::Applied)
    }

    fn commit_geometry(
        &mut self,
        doc: &mut dyn DocumentModel,
        original: Annotation,
        working: Annotation,
    ) -> AppResult<CommandOutcome> {
        if original.rect == working.rect && original.path == working.path {
            return Ok(CommandOutcome::Noop);
        }
        if working.is_degenerate(self.config.interaction.degenerate_tolerance) {
            log::debug!("keeping annotation {} at its previous geometry", working.id);
            return Ok(CommandOutcome::Noop);
        }

        let (id, page) = (working.id, working.page);
        doc.replace_note(working)?;
        self.post(Notification::AnnotationMoved {
            annotation: id,
            page,
        });
        Ok(CommandOutcome::Applied)
    }

    fn begin_selection(&mut self, page: usize, point: Point, modifiers: KeyModifiers) -> Gesture {
        let extend = modifiers.contains(KeyModifiers::SHIFT);
        let selection = match self.selection {
            Some(mut existing)
                if extend && (existing.page() == page || self.continuous_selection()) =>
            {
                existing.focus_page = page;
                existing.focus = point;
                existing
            }
            _ => SelectionRect::at(page, point),
        };
        self.set_selection(Some(selection), selection.page());
        Gesture::Selecting { dragged: extend }
    }

    fn extend_selection(&mut self, doc: &dyn DocumentModel, event: &PointerEvent) {
        let Some(mut selection) = self.selection else {
            return;
        };
        let clamp_box = self.config.interaction.clamp_box;
        let cross_page = self.continuous_selection() && event.page != selection.anchor_page;
        let (page, point) = match doc.page(event.page) {
            Ok(info) if cross_page => (event.page, clamp_point(event.point, info.bounds(clamp_box))),
            _ => {
                let page = selection.anchor_page;
                let point = self.point_on_page(doc, event, page);
                match doc.page(page) {
                    Ok(info) => (page, clamp_point(point, info.bounds(clamp_box))),
                    Err(_) => return,
                }
            }
        };
        selection.focus_page = page;
        selection.focus = point;
        self.set_selection(Some(selection), selection.page());
    }

    fn continuous_selection(&self) -> bool {
        self.config.interaction.continuous_selection
            && self.tool_mode == ToolMode::Text
            && !self.temporary_mode.is_active()
    }

    /// Re-expresses a pointer position in the space of `page`.
    fn point_on_page(&self, doc: &dyn DocumentModel, event: &PointerEvent, page: usize) -> Point {
        if event.page == page {
            return event.point;
        }
        let offset = self.view.page_top(doc, event.page) - self.view.page_top(doc, page);
        Point::new(event.point.x, event.point.y + offset)
    }

    fn pan_by(&mut self, doc: &mut dyn DocumentModel, delta: Vec2) -> AppResult<CommandOutcome> {
        let scroll = self.view.clamp_scroll(doc, self.view.scroll - delta);
        if scroll == self.view.scroll {
            return Ok(CommandOutcome::Noop);
        }
        self.view.scroll = scroll;
        self.sync_page_to_scroll(doc, NavReason::Pointer)?;
        Ok(CommandOutcome::Applied)
    }
}

fn update_draft(
    draft: &mut Annotation,
    anchor: Point,
    point: Point,
    bounds: Rect,
    modifiers: KeyModifiers,
) {
    match draft.kind {
        AnnotationType::Line => {
            draft.path = vec![anchor, point];
            draft.rect = drag_rect(anchor, point);
        }
        AnnotationType::Ink => {
            draft.path.push(point);
            if let Some(rect) = bounds_of(&draft.path) {
                draft.rect = rect;
            }
        }
        AnnotationType::Square | AnnotationType::Circle
            if modifiers.contains(KeyModifiers::SHIFT) =>
        {
            let delta = point - anchor;
            let side = delta.x.abs().min(delta.y.abs());
            let corner = anchor + Vec2::new(side * delta.x.signum(), side * delta.y.signum());
            draft.rect = drag_rect(anchor, clamp_point(corner, bounds));
        }
        _ => draft.rect = drag_rect(anchor, point),
    }
}
