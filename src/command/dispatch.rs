use crate::app::StatusState;
use crate::controller::PageInteractionController;
use crate::document::DocumentModel;
use crate::error::AppResult;
use crate::event::NavReason;

use super::types::{ActionId, Command, CommandOutcome};

/// Runs `cmd` against the controller and records the result in `status`.
///
/// Recoverable failures never leave this function: they become the status
/// message and a `Noop` outcome.
pub fn dispatch(
    controller: &mut PageInteractionController,
    doc: &mut dyn DocumentModel,
    status: &mut StatusState,
    cmd: Command,
) -> AppResult<CommandOutcome> {
    let action_id = cmd.action_id();
    let result = run_command(controller, doc, cmd);
    settle(controller, doc, status, action_id, result)
}

/// Converts an operation result into an outcome plus a status line.
pub fn settle(
    controller: &PageInteractionController,
    doc: &dyn DocumentModel,
    status: &mut StatusState,
    action_id: ActionId,
    result: AppResult<CommandOutcome>,
) -> AppResult<CommandOutcome> {
    status.last_action_id = Some(action_id);
    match result {
        Ok(outcome) => {
            status.message = describe(controller, doc, action_id, outcome);
            Ok(outcome)
        }
        Err(err) if err.is_recoverable() => {
            log::debug!("{} rejected: {err}", action_id.as_str());
            status.message = err.to_string();
            Ok(CommandOutcome::Noop)
        }
        Err(err) => Err(err),
    }
}

fn run_command(
    controller: &mut PageInteractionController,
    doc: &mut dyn DocumentModel,
    cmd: Command,
) -> AppResult<CommandOutcome> {
    let zoom_step = controller.config().view.zoom_step;
    match cmd {
        Command::SetToolMode { mode } => Ok(controller.set_tool_mode(mode)),
        Command::SetAnnotationMode { kind } => Ok(controller.set_annotation_mode(kind)),
        Command::BeginTemporaryMode { mode } => Ok(controller.begin_temporary_mode(mode)),
        Command::EndTemporaryMode => controller.end_temporary_mode(doc),
        Command::SetInteractionMode { mode } => Ok(controller.set_interaction_mode(mode)),
        Command::NextPage => controller.next_page(doc),
        Command::PrevPage => controller.prev_page(doc),
        Command::FirstPage => controller.first_page(doc),
        Command::LastPage => controller.last_page(doc),
        Command::GotoPage { page } => controller.go_to_page(doc, page, NavReason::Jump),
        Command::SetZoom { value } => Ok(controller.set_scale(doc, value)),
        Command::ZoomIn => controller.zoom_by(doc, zoom_step, None),
        Command::ZoomOut => controller.zoom_by(doc, zoom_step.recip(), None),
        Command::ZoomToRect { page, rect } => controller.zoom_to_rect(doc, rect, page),
        Command::ToggleReadingBar => controller.toggle_reading_bar(doc),
        Command::MoveReadingBar { page, line } => controller.move_reading_bar(doc, page, line),
        Command::ReadingBarNextLine => controller.reading_bar_next_line(doc),
        Command::ReadingBarPrevLine => controller.reading_bar_prev_line(doc),
        Command::SetReadingBarLines { lines } => Ok(controller.set_reading_bar_lines(lines)),
        Command::TogglePacer => Ok(controller.toggle_pacer()),
        Command::SetPacerSpeed { value } => Ok(controller.set_pacer_speed(value)),
        Command::PacerStep => {
            let generation = controller.pacer().generation();
            controller.pacer_tick(doc, generation)
        }
        Command::Rewind => controller.rewind(doc),
        Command::FenceHistory => Ok(controller.fence_history()),
        Command::ResetHistory => Ok(controller.reset_history()),
        Command::EditCurrentAnnotation => controller.edit_current_annotation(doc),
        Command::EndTextEditing { contents } => controller.end_text_editing(doc, contents),
        Command::RemoveCurrentAnnotation => controller.remove_current_annotation(doc),
        Command::AutoSizeCurrentAnnotation => controller.auto_size_current_annotation(doc),
        Command::SelectNextAnnotation => Ok(controller.select_next_annotation(doc)),
        Command::SelectPrevAnnotation => Ok(controller.select_previous_annotation(doc)),
        Command::DeselectAll => Ok(controller.deselect_all()),
        Command::ToggleHideNotes => {
            let hidden = !controller.hides_notes();
            Ok(controller.set_hide_notes(hidden))
        }
        Command::Cancel => Ok(controller.cancel_edit()),
        Command::Quit => Ok(CommandOutcome::QuitRequested),
    }
}

fn describe(
    controller: &PageInteractionController,
    doc: &dyn DocumentModel,
    action_id: ActionId,
    outcome: CommandOutcome,
) -> String {
    let page_count = doc.page_count();
    let page = doc.current_page() + 1;
    match (action_id, outcome) {
        (_, CommandOutcome::QuitRequested) => "quit requested".to_string(),
        (ActionId::NextPage, CommandOutcome::Noop) => {
            format!("already at last page ({page}/{page_count})")
        }
        (ActionId::PrevPage, CommandOutcome::Noop) => "already at first page (1)".to_string(),
        (ActionId::Rewind, CommandOutcome::Noop) => "nothing to rewind".to_string(),
        (
            ActionId::NextPage
            | ActionId::PrevPage
            | ActionId::FirstPage
            | ActionId::LastPage
            | ActionId::GotoPage
            | ActionId::Rewind,
            _,
        ) => format!("page {page}/{page_count}"),
        (ActionId::SetZoom | ActionId::ZoomIn | ActionId::ZoomOut | ActionId::ZoomToRect, _) => {
            format!("zoom {:.0}%", controller.view().scale * 100.0)
        }
        (ActionId::SetToolMode, _) => format!("tool: {}", controller.tool_mode().id()),
        (ActionId::SetAnnotationMode, _) => {
            format!("note type: {}", controller.annotation_mode().id())
        }
        (ActionId::BeginTemporaryMode | ActionId::EndTemporaryMode, _) => {
            format!("temporary tool: {}", controller.temporary_mode().id())
        }
        (ActionId::SetInteractionMode, _) => {
            format!("mode: {}", controller.interaction_mode().id())
        }
        (ActionId::TogglePacer | ActionId::SetPacerSpeed | ActionId::PacerStep, _) => format!(
            "pacer {} at {:.1} pt/s",
            if controller.pacer().is_armed() {
                "running"
            } else {
                "stopped"
            },
            controller.pacer().speed()
        ),
        (_, CommandOutcome::Noop) => format!("{}: nothing to do", action_id.as_str()),
        (_, CommandOutcome::Applied) => action_id.as_str().to_string(),
    }
}
