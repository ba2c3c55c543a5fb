use crossterm::event::KeyEventKind;

use crate::command::{ActionId, CommandOutcome, dispatch, settle};
use crate::config::Config;
use crate::controller::{PageInteractionController, TemporaryToolMode};
use crate::document::DocumentModel;
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::input::keymap::{KeymapPreset, map_key_to_command_with_preset, temporary_mode_for_modifiers};
use crate::input::{PointerEvent, PointerPhase};
use crate::notify::ViewerDelegate;

use super::state::StatusState;

/// Event-thread owner of the controller. The document is passed in per event
/// so the window layer keeps ownership of it.
pub struct App {
    pub controller: PageInteractionController,
    pub status: StatusState,
    keymap: KeymapPreset,
    /// Temporary tool begun by a modifier chord on pointer-down.
    modifier_temporary: Option<TemporaryToolMode>,
}

impl App {
    pub fn new() -> AppResult<Self> {
        let config = Config::load()?;
        Ok(Self::new_with_config(config))
    }

    pub fn new_with_config(config: Config) -> Self {
        let keymap = KeymapPreset::parse(&config.keymap.preset);
        Self {
            controller: PageInteractionController::new(config),
            status: StatusState::default(),
            keymap,
            modifier_temporary: None,
        }
    }

    pub fn with_delegate(mut self, delegate: Box<dyn ViewerDelegate>) -> Self {
        self.controller = self.controller.with_delegate(delegate);
        self
    }

    pub fn handle_domain_event(
        &mut self,
        doc: &mut dyn DocumentModel,
        event: DomainEvent,
    ) -> AppResult<CommandOutcome> {
        match event {
            DomainEvent::Pointer { phase, event } => self.handle_pointer(doc, phase, event),
            DomainEvent::Key(key) => {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    return Ok(CommandOutcome::Noop);
                }
                match map_key_to_command_with_preset(key, self.keymap) {
                    Some(cmd) => dispatch(&mut self.controller, doc, &mut self.status, cmd),
                    None => Ok(CommandOutcome::Noop),
                }
            }
            DomainEvent::Command(cmd) => dispatch(&mut self.controller, doc, &mut self.status, cmd),
            DomainEvent::PacerTick { generation } => {
                let result = self.controller.pacer_tick(doc, generation);
                settle(&self.controller, doc, &mut self.status, ActionId::PacerTick, result)
            }
            DomainEvent::Shutdown => Ok(CommandOutcome::QuitRequested),
        }
    }

    fn handle_pointer(
        &mut self,
        doc: &mut dyn DocumentModel,
        phase: PointerPhase,
        event: PointerEvent,
    ) -> AppResult<CommandOutcome> {
        if phase == PointerPhase::Moved {
            if let Err(err) = self.controller.pointer_moved(doc, event) {
                log::trace!("hover ignored: {err}");
            }
            return Ok(CommandOutcome::Noop);
        }

        if phase == PointerPhase::Down
            && !self.controller.temporary_mode().is_active()
            && let Some(mode) = temporary_mode_for_modifiers(event.modifiers)
        {
            self.controller.begin_temporary_mode(mode);
            self.modifier_temporary = Some(mode);
        }

        let result = match phase {
            PointerPhase::Down => self.controller.pointer_down(doc, event),
            PointerPhase::Dragged => self.controller.pointer_dragged(doc, event),
            PointerPhase::Up => self.controller.pointer_up(doc, event),
            PointerPhase::Moved => Ok(CommandOutcome::Noop),
        };
        let outcome = settle(&self.controller, doc, &mut self.status, ActionId::Pointer, result);

        // The chord's mode ends with its gesture, failed or not.
        if (phase == PointerPhase::Up || outcome.is_err()) && self.modifier_temporary.take().is_some()
        {
            let ended = self.controller.end_temporary_mode(doc);
            let ended = settle(
                &self.controller,
                doc,
                &mut self.status,
                ActionId::EndTemporaryMode,
                ended,
            );
            let outcome = outcome?;
            ended?;
            return Ok(outcome);
        }
        outcome
    }
}
