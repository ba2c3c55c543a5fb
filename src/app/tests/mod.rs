use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::annotation::{Annotation, AnnotationId};
use crate::command::{ActionId, Command, CommandOutcome};
use crate::config::Config;
use crate::controller::TemporaryToolMode;
use crate::document::{DocumentModel, MemoryDocument, PageInfo};
use crate::error::{AppError, AppResult};
use crate::event::DomainEvent;
use crate::input::{PointerEvent, PointerPhase, parse_script};

/// Document whose pages cannot be read back.
struct UnreadableDocument {
    inner: MemoryDocument,
}

impl DocumentModel for UnreadableDocument {
    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn page(&self, _index: usize) -> AppResult<&PageInfo> {
        Err(AppError::io_with_context(
            io::Error::other("disk gone"),
            "failed to read page",
        ))
    }

    fn notes(&self) -> &[Annotation] {
        self.inner.notes()
    }

    fn insert_note(&mut self, note: Annotation, at: Option<usize>) -> AppResult<usize> {
        self.inner.insert_note(note, at)
    }

    fn remove_note(&mut self, at: usize) -> AppResult<Annotation> {
        self.inner.remove_note(at)
    }

    fn current_page(&self) -> usize {
        self.inner.current_page()
    }

    fn set_current_page(&mut self, page: usize) -> AppResult<()> {
        self.inner.set_current_page(page)
    }

    fn next_annotation_id(&mut self) -> AnnotationId {
        self.inner.next_annotation_id()
    }
}

fn pointer(phase: PointerPhase, page: usize, x: f64, y: f64, modifiers: KeyModifiers) -> DomainEvent {
    DomainEvent::Pointer {
        phase,
        event: PointerEvent::new(page, x, y).with_modifiers(modifiers),
    }
}

#[test]
fn mapped_key_dispatches_a_command() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(2);

    let outcome = app
        .handle_domain_event(
            &mut doc,
            DomainEvent::Key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
        )
        .expect("key should be handled");

    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(doc.current_page(), 1);
    assert_eq!(app.status.last_action_id, Some(ActionId::NextPage));
}

#[test]
fn unmapped_key_is_a_noop() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(1);

    let outcome = app
        .handle_domain_event(
            &mut doc,
            DomainEvent::Key(KeyEvent::new(KeyCode::F(9), KeyModifiers::NONE)),
        )
        .expect("key should be handled");
    assert_eq!(outcome, CommandOutcome::Noop);
    assert_eq!(app.status.last_action_id, None);
}

#[test]
fn modifier_chord_holds_zoom_for_one_gesture() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(1);
    let tool = app.controller.tool_mode();
    let chord = KeyModifiers::CONTROL | KeyModifiers::SHIFT;

    app.handle_domain_event(&mut doc, pointer(PointerPhase::Down, 0, 100.0, 100.0, chord))
        .expect("down should be handled");
    assert_eq!(app.controller.temporary_mode(), TemporaryToolMode::Zoom);

    app.handle_domain_event(&mut doc, pointer(PointerPhase::Up, 0, 100.0, 100.0, chord))
        .expect("up should be handled");

    assert_eq!(app.controller.temporary_mode(), TemporaryToolMode::None);
    assert_eq!(app.controller.tool_mode(), tool);
    assert!((app.controller.view().scale - 1.25).abs() < 1e-9);
}

#[test]
fn pointer_on_a_missing_page_only_updates_the_status() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(1);

    let outcome = app
        .handle_domain_event(
            &mut doc,
            pointer(PointerPhase::Down, 4, 10.0, 10.0, KeyModifiers::NONE),
        )
        .expect("recoverable errors are not propagated");

    assert_eq!(outcome, CommandOutcome::Noop);
    assert_eq!(app.status.message, "page index 4 out of range (len 1)");
}

#[test]
fn failed_chord_gesture_still_ends_its_temporary_mode() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = UnreadableDocument {
        inner: MemoryDocument::with_uniform_pages(1),
    };
    let chord = KeyModifiers::CONTROL | KeyModifiers::SHIFT;

    let err = app
        .handle_domain_event(&mut doc, pointer(PointerPhase::Down, 0, 100.0, 100.0, chord))
        .expect_err("I/O failures propagate");

    assert!(matches!(err, AppError::Io { .. }));
    assert_eq!(app.controller.temporary_mode(), TemporaryToolMode::None);
}

#[test]
fn shutdown_requests_quit() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(1);
    let outcome = app
        .handle_domain_event(&mut doc, DomainEvent::Shutdown)
        .expect("shutdown should be handled");
    assert_eq!(outcome, CommandOutcome::QuitRequested);
}

#[tokio::test]
async fn run_replays_a_script_until_shutdown() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(3);
    let script = parse_script(
        "tool-mode note\n\
         annotation-mode square\n\
         down 1 10 10\n\
         drag 1 50 50\n\
         up 1 50 50\n\
         goto-page 3\n",
    )
    .expect("script should parse");

    app.run(&mut doc, script).await.expect("run should finish");

    assert_eq!(doc.current_page(), 2);
    assert_eq!(doc.notes().len(), 1);
    assert_eq!(app.status.last_action_id, Some(ActionId::GotoPage));
}

#[tokio::test]
async fn run_stops_at_quit_command() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::with_uniform_pages(3);
    let script = vec![
        crate::input::ScriptStep::Event(DomainEvent::Command(Command::Quit)),
        crate::input::ScriptStep::Event(DomainEvent::Command(Command::LastPage)),
    ];

    app.run(&mut doc, script).await.expect("run should finish");
    assert_eq!(doc.current_page(), 0);
}

#[tokio::test]
async fn run_rejects_empty_documents() {
    let mut app = App::new_with_config(Config::default());
    let mut doc = MemoryDocument::new(Vec::new());
    assert!(app.run(&mut doc, Vec::new()).await.is_err());
}
