use kurbo::{Rect, Size};

use crate::annotation::{AnnotationId, AnnotationType};
use crate::command::CommandOutcome;
use crate::document::DocumentModel;
use crate::error::{AppError, AppResult};
use crate::geometry::containing_offset;
use crate::notify::Notification;

use super::core::PageInteractionController;
use super::mode::{TemporaryToolMode, ToolMode};
use super::pointer::Gesture;

impl PageInteractionController {
    /// Switches the persistent tool. Any edit in flight is dropped, never committed.
    pub fn set_tool_mode(&mut self, mode: ToolMode) -> CommandOutcome {
        if self.tool_mode == mode {
            return CommandOutcome::Noop;
        }
        self.cancel_gesture();
        self.clear_selection();
        self.set_current(None);
        let old = self.tool_mode;
        self.tool_mode = mode;
        log::debug!("tool mode {} -> {}", old.id(), mode.id());
        self.post(Notification::ToolModeChanged { old, new: mode });
        CommandOutcome::Applied
    }

    pub fn set_annotation_mode(&mut self, kind: AnnotationType) -> CommandOutcome {
        if self.annotation_mode == kind {
            return CommandOutcome::Noop;
        }
        let old = self.annotation_mode;
        self.annotation_mode = kind;
        self.post(Notification::AnnotationModeChanged { old, new: kind });
        CommandOutcome::Applied
    }

    pub fn begin_temporary_mode(&mut self, mode: TemporaryToolMode) -> CommandOutcome {
        if !mode.is_active() || self.temporary_mode == mode {
            return CommandOutcome::Noop;
        }
        if matches!(self.gesture, Gesture::RubberBand { .. }) {
            self.cancel_gesture();
        }
        let old = self.temporary_mode;
        self.temporary_mode = mode;
        log::debug!("temporary mode {} -> {}", old.id(), mode.id());
        self.post(Notification::TemporaryToolModeChanged { old, new: mode });
        CommandOutcome::Applied
    }

    /// Falls back to the tool mode. A note drawn under the override is
    /// committed; a zoom or snapshot rectangle is dropped. Gestures begun
    /// under the tool mode carry on untouched.
    pub fn end_temporary_mode(
        &mut self,
        doc: &mut dyn DocumentModel,
    ) -> AppResult<CommandOutcome> {
        if !self.temporary_mode.is_active() {
            return Ok(CommandOutcome::Noop);
        }

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Creating {
                draft,
                from_temporary: true,
                ..
            } => {
                self.commit_draft(doc, draft)?;
            }
            Gesture::RubberBand { .. } => {}
            other => self.gesture = other,
        }

        let old = self.temporary_mode;
        self.temporary_mode = TemporaryToolMode::None;
        log::debug!("temporary mode {} ended", old.id());
        self.post(Notification::TemporaryToolModeChanged {
            old,
            new: TemporaryToolMode::None,
        });
        Ok(CommandOutcome::Applied)
    }

    /// Makes `id` current and opens it for editing: free text in place,
    /// everything else through the delegate.
    pub fn edit_annotation(
        &mut self,
        doc: &dyn DocumentModel,
        id: AnnotationId,
    ) -> AppResult<CommandOutcome> {
        let note = self.displayed_note(doc, id)?;
        if self.editing == Some(id) {
            return Ok(CommandOutcome::Noop);
        }
        self.cancel_gesture();
        self.set_current(Some(id));
        if note.kind == AnnotationType::FreeText {
            self.editing = Some(id);
            self.delegate.did_begin_editing(id);
        } else {
            self.delegate.edit_annotation(id);
        }
        Ok(CommandOutcome::Applied)
    }

    pub fn edit_current_annotation(
        &mut self,
        doc: &dyn DocumentModel,
    ) -> AppResult<CommandOutcome> {
        match self.current {
            Some(id) => self.edit_annotation(doc, id),
            None => Ok(CommandOutcome::Noop),
        }
    }

    /// Closes the in-place editor, storing `contents` when given.
    pub fn end_text_editing(
        &mut self,
        doc: &mut dyn DocumentModel,
        contents: Option<String>,
    ) -> AppResult<CommandOutcome> {
        let Some(id) = self.editing else {
            return Ok(CommandOutcome::Noop);
        };
        if let Some(contents) = contents {
            let mut note = doc.note(id).cloned().ok_or(AppError::UnknownAnnotation(id))?;
            note.contents = contents;
            doc.replace_note(note)?;
        }
        self.editing = None;
        self.delegate.did_end_editing(id);
        Ok(CommandOutcome::Applied)
    }

    pub fn remove_annotation(
        &mut self,
        doc: &mut dyn DocumentModel,
        id: AnnotationId,
    ) -> AppResult<CommandOutcome> {
        let note = self.displayed_note(doc, id)?;
        let index = doc.note_index(id).ok_or(AppError::UnknownAnnotation(id))?;
        doc.remove_note(index)?;

        if self.pending_annotation().is_some_and(|pending| pending.id == id) {
            self.cancel_gesture();
        }
        if self.current == Some(id) {
            self.set_current(None);
        }
        log::debug!("removed annotation {id} from page {}", note.page);
        self.post(Notification::AnnotationRemoved {
            annotation: id,
            page: note.page,
        });
        Ok(CommandOutcome::Applied)
    }

    pub fn remove_current_annotation(
        &mut self,
        doc: &mut dyn DocumentModel,
    ) -> AppResult<CommandOutcome> {
        match self.current {
            Some(id) => self.remove_annotation(doc, id),
            None => Ok(CommandOutcome::Noop),
        }
    }

    /// Fits a text-bearing note to its contents; geometry-only notes are left alone.
    pub fn auto_size_annotation(
        &mut self,
        doc: &mut dyn DocumentModel,
        id: AnnotationId,
    ) -> AppResult<CommandOutcome> {
        let mut note = self.displayed_note(doc, id)?;
        let interaction = &self.config.interaction;
        let size = match note.kind {
            AnnotationType::FreeText => {
                let text = doc.measure_text(&note.contents);
                let padding = interaction.text_padding * 2.0;
                Size::new(
                    (text.width + padding).max(interaction.anchored_note_size),
                    (text.height + padding).max(interaction.anchored_note_size),
                )
            }
            AnnotationType::Anchored => {
                Size::new(interaction.anchored_note_size, interaction.anchored_note_size)
            }
            _ => return Ok(CommandOutcome::Noop),
        };

        let bounds = self.clamp_bounds(doc, note.page)?;
        let rect = Rect::from_origin_size(note.rect.origin(), size);
        let rect = rect + containing_offset(rect, bounds);
        if rect == note.rect {
            return Ok(CommandOutcome::Noop);
        }
        note.rect = rect;
        let page = note.page;
        doc.replace_note(note)?;
        self.post(Notification::AnnotationMoved {
            annotation: id,
            page,
        });
        Ok(CommandOutcome::Applied)
    }

    pub fn auto_size_current_annotation(
        &mut self,
        doc: &mut dyn DocumentModel,
    ) -> AppResult<CommandOutcome> {
        match self.current {
            Some(id) => self.auto_size_annotation(doc, id),
            None => Ok(CommandOutcome::Noop),
        }
    }

    pub fn select_next_annotation(&mut self, doc: &dyn DocumentModel) -> CommandOutcome {
        self.cycle_annotation(doc, true)
    }

    pub fn select_previous_annotation(&mut self, doc: &dyn DocumentModel) -> CommandOutcome {
        self.cycle_annotation(doc, false)
    }

    pub fn deselect_all(&mut self) -> CommandOutcome {
        let cleared_current = self.set_current(None);
        let cleared_selection = self.clear_selection();
        if cleared_current || cleared_selection {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Noop
        }
    }

    /// Hidden notes are skipped by hit-testing and cannot stay current.
    pub fn set_hide_notes(&mut self, hidden: bool) -> CommandOutcome {
        if self.hide_notes == hidden {
            return CommandOutcome::Noop;
        }
        self.hide_notes = hidden;
        if hidden {
            if self.pending_annotation().is_some() {
                self.cancel_gesture();
            }
            self.set_current(None);
        }
        CommandOutcome::Applied
    }

    /// Abandons whatever is in flight. The document is never touched.
    pub fn cancel_edit(&mut self) -> CommandOutcome {
        let mut changed = self.cancel_gesture();
        if let Some(id) = self.editing.take() {
            self.delegate.did_end_editing(id);
            changed = true;
        }
        if changed {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Noop
        }
    }

    fn cycle_annotation(&mut self, doc: &dyn DocumentModel, forward: bool) -> CommandOutcome {
        if self.hide_notes {
            return CommandOutcome::Noop;
        }
        let ids: Vec<AnnotationId> = doc
            .notes_on_page(doc.current_page())
            .into_iter()
            .map(|note| note.id)
            .collect();
        if ids.is_empty() {
            return CommandOutcome::Noop;
        }

        let position = self
            .current
            .and_then(|current| ids.iter().position(|id| *id == current));
        let next = match (position, forward) {
            (Some(index), true) => (index + 1) % ids.len(),
            (Some(index), false) => (index + ids.len() - 1) % ids.len(),
            (None, true) => 0,
            (None, false) => ids.len() - 1,
        };
        self.cancel_gesture();
        if self.set_current(Some(ids[next])) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Noop
        }
    }
}
