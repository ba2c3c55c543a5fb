use std::cell::Cell;
use std::rc::Rc;

use kurbo::Rect;

use super::{controller, drag, note_controller, recorder};
use crate::annotation::AnnotationType;
use crate::command::CommandOutcome;
use crate::config::Config;
use crate::controller::{InteractionMode, PageInteractionController};
use crate::document::{DocumentModel, MemoryDocument};
use crate::error::AppError;
use crate::event::NavReason;
use crate::notify::{Notification, ViewerDelegate};

struct PresentationDelegate {
    exits: Rc<Cell<usize>>,
}

impl ViewerDelegate for PresentationDelegate {
    fn exit_presentation(&mut self) {
        self.exits.set(self.exits.get() + 1);
    }
}

#[test]
fn out_of_range_page_changes_nothing() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(2);
    let seen = recorder(&mut controller);

    let err = controller
        .go_to_page(&mut doc, 9, NavReason::Jump)
        .expect_err("page 9 of 2 should be rejected");

    assert!(matches!(
        err,
        AppError::OutOfRange {
            what: "page",
            index: 9,
            len: 2
        }
    ));
    assert_eq!(doc.current_page(), 0);
    assert!(controller.history().is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn neighbouring_steps_are_not_recorded() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(3);

    controller.next_page(&mut doc).expect("step should succeed");
    controller.next_page(&mut doc).expect("step should succeed");
    assert_eq!(controller.next_page(&mut doc).expect("step"), CommandOutcome::Noop);

    assert_eq!(doc.current_page(), 2);
    assert!(controller.history().is_empty());
    assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Noop);
}

#[test]
fn zoom_to_rect_fits_and_rewinds() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(2);
    let seen = recorder(&mut controller);

    controller
        .zoom_to_rect(&mut doc, Rect::new(100.0, 100.0, 300.0, 200.0), 1)
        .expect("zoom should succeed");

    assert_eq!(controller.view().scale, 4.0);
    assert_eq!(doc.current_page(), 1);
    assert_eq!(controller.history().len(), 1);
    assert!(
        seen.borrow()
            .contains(&Notification::MagnificationChanged { scale: 4.0 })
    );

    assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Applied);
    assert_eq!(doc.current_page(), 0);
    assert_eq!(controller.view().scale, 1.0);
    assert!(controller.history().is_empty());
}

#[test]
fn zoom_to_an_empty_rect_is_rejected() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(1);

    let err = controller
        .zoom_to_rect(&mut doc, Rect::new(100.0, 100.0, 100.0, 200.0), 0)
        .expect_err("zero-width rect should be rejected");

    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert!(controller.history().is_empty());
}

#[test]
fn notes_off_the_displayed_page_cannot_be_removed() {
    let mut controller = note_controller(AnnotationType::Square);
    let mut doc = MemoryDocument::with_uniform_pages(2);
    drag(&mut controller, &mut doc, 1, (10.0, 10.0), (50.0, 50.0));
    let id = doc.notes()[0].id;
    assert_eq!(doc.current_page(), 1);

    controller.prev_page(&mut doc).expect("step should succeed");
    assert_eq!(controller.current_annotation(), None);

    let err = controller
        .remove_annotation(&mut doc, id)
        .expect_err("note on page 1 should be out of reach");
    assert!(matches!(err, AppError::NotOnDisplayedPage { page: 0, .. }));
    assert_eq!(doc.notes().len(), 1);

    controller.next_page(&mut doc).expect("step should succeed");
    assert_eq!(
        controller.remove_annotation(&mut doc, id).expect("remove"),
        CommandOutcome::Applied
    );
    assert!(doc.notes().is_empty());
}

#[test]
fn presentation_forgets_its_own_history() {
    let exits = Rc::new(Cell::new(0));
    let delegate = PresentationDelegate {
        exits: Rc::clone(&exits),
    };
    let mut controller =
        PageInteractionController::new(Config::default()).with_delegate(Box::new(delegate));
    let mut doc = MemoryDocument::with_uniform_pages(6);

    controller
        .go_to_page(&mut doc, 3, NavReason::Jump)
        .expect("jump should succeed");
    assert_eq!(
        controller.set_interaction_mode(InteractionMode::Presentation),
        CommandOutcome::Applied
    );
    controller
        .go_to_page(&mut doc, 0, NavReason::Jump)
        .expect("jump should succeed");
    controller
        .go_to_page(&mut doc, 5, NavReason::Jump)
        .expect("jump should succeed");
    assert_eq!(controller.history().len(), 3);
    assert_eq!(controller.history().min_index(), 1);

    assert_eq!(
        controller.set_interaction_mode(InteractionMode::Normal),
        CommandOutcome::Applied
    );
    assert_eq!(exits.get(), 1);
    assert_eq!(controller.history().len(), 1);
    assert_eq!(controller.history().min_index(), 0);

    assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Applied);
    assert_eq!(doc.current_page(), 0);
    assert_eq!(
        controller.set_interaction_mode(InteractionMode::Normal),
        CommandOutcome::Noop
    );
    assert_eq!(exits.get(), 1);
}

#[test]
fn full_screen_does_not_call_exit_presentation() {
    let exits = Rc::new(Cell::new(0));
    let delegate = PresentationDelegate {
        exits: Rc::clone(&exits),
    };
    let mut controller =
        PageInteractionController::new(Config::default()).with_delegate(Box::new(delegate));

    controller.set_interaction_mode(InteractionMode::FullScreen);
    controller.set_interaction_mode(InteractionMode::Normal);

    assert_eq!(exits.get(), 0);
    assert_eq!(controller.interaction_mode(), InteractionMode::Normal);
}

#[test]
fn presentation_exit_survives_history_trimming() {
    let mut config = Config::default();
    config.history.capacity = 3;
    let mut controller = PageInteractionController::new(config);
    let mut doc = MemoryDocument::with_uniform_pages(6);

    controller
        .go_to_page(&mut doc, 2, NavReason::Jump)
        .expect("jump should succeed");
    controller.fence_history();
    controller
        .go_to_page(&mut doc, 4, NavReason::Jump)
        .expect("jump should succeed");
    controller.set_interaction_mode(InteractionMode::Presentation);
    for page in [0, 3] {
        controller
            .go_to_page(&mut doc, page, NavReason::Jump)
            .expect("jump should succeed");
    }
    assert_eq!(controller.history().len(), 3);

    controller.set_interaction_mode(InteractionMode::Normal);

    assert_eq!(controller.history().len(), 1);
    assert_eq!(controller.history().min_index(), 0);
    assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Applied);
    assert_eq!(doc.current_page(), 2);
}

#[test]
fn rewind_past_the_document_end_keeps_the_entry() {
    let mut controller = controller();
    let mut long = MemoryDocument::with_uniform_pages(6);
    controller
        .go_to_page(&mut long, 5, NavReason::Jump)
        .expect("jump should succeed");
    controller
        .go_to_page(&mut long, 0, NavReason::Jump)
        .expect("jump should succeed");
    assert_eq!(controller.history().len(), 2);

    let mut short = MemoryDocument::with_uniform_pages(2);
    let err = controller
        .rewind(&mut short)
        .expect_err("page 5 no longer exists");

    assert!(matches!(err, AppError::OutOfRange { index: 5, .. }));
    assert_eq!(controller.history().len(), 2);
    assert_eq!(controller.rewind(&mut long).expect("rewind"), CommandOutcome::Applied);
    assert_eq!(long.current_page(), 5);
}
