use kurbo::Rect;

use super::{controller, drag, note_controller, recorder};
use crate::annotation::AnnotationType;
use crate::command::CommandOutcome;
use crate::controller::{InteractionArea, ResizeHandle, TemporaryToolMode, ToolMode};
use crate::document::{DocumentModel, MemoryDocument};
use crate::event::NavReason;
use crate::input::PointerEvent;
use crate::notify::Notification;
use crate::reading_bar::BarPosition;

#[test]
fn square_drawn_with_the_note_tool_lands_on_page_zero() {
    let mut controller = note_controller(AnnotationType::Square);
    let mut doc = MemoryDocument::with_uniform_pages(2);
    let seen = recorder(&mut controller);

    drag(&mut controller, &mut doc, 0, (10.0, 10.0), (50.0, 50.0));

    let notes = doc.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, AnnotationType::Square);
    assert_eq!(notes[0].page, 0);
    assert_eq!(notes[0].rect, Rect::new(10.0, 10.0, 50.0, 50.0));
    assert_eq!(controller.current_annotation(), Some(notes[0].id));
    assert!(seen.borrow().contains(&Notification::AnnotationAdded {
        annotation: notes[0].id,
        page: 0,
    }));
}

#[test]
fn click_without_drag_discards_area_annotations() {
    for kind in [
        AnnotationType::Square,
        AnnotationType::Circle,
        AnnotationType::Highlight,
        AnnotationType::Line,
    ] {
        let mut controller = note_controller(kind);
        let mut doc = MemoryDocument::with_uniform_pages(1);

        controller
            .pointer_down(&mut doc, PointerEvent::new(0, 30.0, 30.0))
            .expect("pointer down should succeed");
        let outcome = controller
            .pointer_up(&mut doc, PointerEvent::new(0, 30.0, 30.0))
            .expect("pointer up should succeed");

        assert_eq!(outcome, CommandOutcome::Noop, "{kind:?}");
        assert!(doc.notes().is_empty(), "{kind:?}");
        assert_eq!(controller.current_annotation(), None);
    }
}

#[test]
fn click_places_a_default_sized_free_text_note() {
    let mut controller = note_controller(AnnotationType::FreeText);
    let mut doc = MemoryDocument::with_uniform_pages(1);

    controller
        .pointer_down(&mut doc, PointerEvent::new(0, 30.0, 30.0))
        .expect("pointer down should succeed");
    controller
        .pointer_up(&mut doc, PointerEvent::new(0, 30.0, 30.0))
        .expect("pointer up should succeed");

    let notes = doc.notes();
    assert_eq!(notes.len(), 1);
    let interaction = &controller.config().interaction;
    assert_eq!(notes[0].rect.width(), interaction.free_text_width);
    assert_eq!(notes[0].rect.height(), interaction.free_text_height);
    assert_eq!(controller.editing_annotation(), Some(notes[0].id));
}

#[test]
fn resize_handle_wins_over_the_body_it_overlaps() {
    let mut controller = note_controller(AnnotationType::Square);
    let mut doc = MemoryDocument::with_uniform_pages(1);
    drag(&mut controller, &mut doc, 0, (10.0, 10.0), (50.0, 50.0));
    let id = doc.notes()[0].id;

    let area = controller
        .hit_test(&doc, 0, kurbo::Point::new(48.0, 48.0))
        .expect("hit test should succeed");
    assert_eq!(area, Some(InteractionArea::Resize(ResizeHandle::SouthEast)));

    let body = controller
        .hit_test(&doc, 0, kurbo::Point::new(30.0, 30.0))
        .expect("hit test should succeed");
    assert_eq!(body, Some(InteractionArea::Drag(id)));

    drag(&mut controller, &mut doc, 0, (48.0, 48.0), (70.0, 80.0));
    assert_eq!(doc.notes().len(), 1);
    assert_eq!(doc.notes()[0].rect, Rect::new(10.0, 10.0, 70.0, 80.0));
}

#[test]
fn set_tool_mode_to_the_active_mode_posts_nothing() {
    let mut controller = controller();
    let seen = recorder(&mut controller);

    assert_eq!(controller.set_tool_mode(ToolMode::Text), CommandOutcome::Noop);
    assert!(seen.borrow().is_empty());

    for mode in ToolMode::ALL {
        controller.set_tool_mode(mode);
        assert_eq!(controller.tool_mode(), mode);
    }
    let changes = seen
        .borrow()
        .iter()
        .filter(|notification| matches!(notification, Notification::ToolModeChanged { .. }))
        .count();
    assert_eq!(changes, ToolMode::ALL.len() - 1);
}

#[test]
fn temporary_mode_restores_the_tool_and_commits_its_note() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(1);
    controller.set_tool_mode(ToolMode::Select);

    controller.begin_temporary_mode(TemporaryToolMode::Highlight);
    controller
        .pointer_down(&mut doc, PointerEvent::new(0, 72.0, 72.0))
        .expect("pointer down should succeed");
    controller
        .pointer_dragged(&mut doc, PointerEvent::new(0, 300.0, 84.0))
        .expect("pointer drag should succeed");
    controller
        .end_temporary_mode(&mut doc)
        .expect("temporary mode should end");

    assert_eq!(controller.tool_mode(), ToolMode::Select);
    assert_eq!(controller.temporary_mode(), TemporaryToolMode::None);
    assert_eq!(doc.notes().len(), 1);
    assert_eq!(doc.notes()[0].kind, AnnotationType::Highlight);
}

#[test]
fn rewind_never_crosses_the_fence() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(6);

    controller
        .go_to_page(&mut doc, 3, NavReason::Jump)
        .expect("jump should succeed");
    controller.fence_history();
    controller
        .go_to_page(&mut doc, 0, NavReason::Jump)
        .expect("jump should succeed");
    controller
        .go_to_page(&mut doc, 5, NavReason::Jump)
        .expect("jump should succeed");

    assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Applied);
    assert_eq!(doc.current_page(), 0);
    assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Applied);
    assert_eq!(doc.current_page(), 3);

    for _ in 0..3 {
        assert_eq!(controller.rewind(&mut doc).expect("rewind"), CommandOutcome::Noop);
        assert_eq!(doc.current_page(), 3);
    }
}

#[test]
fn pacer_disarms_on_the_last_page_without_scrolling() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(2);
    controller.last_page(&mut doc).expect("jump should succeed");
    let scroll = controller.view().scroll;

    controller.toggle_pacer();
    assert!(controller.pacer().is_armed());
    let generation = controller.pacer().generation();
    controller
        .pacer_tick(&mut doc, generation)
        .expect("tick should succeed");

    assert!(!controller.pacer().is_armed());
    assert_eq!(controller.view().scroll, scroll);
    assert_eq!(doc.current_page(), 1);
}

#[test]
fn reading_bar_resumes_on_the_page_it_was_left() {
    let mut controller = controller();
    let mut doc = MemoryDocument::with_uniform_pages(2);

    controller.toggle_reading_bar(&doc).expect("toggle should succeed");
    assert_eq!(
        controller.reading_bar().visible_position(),
        Some(BarPosition { page: 0, line: 0 })
    );

    controller.next_page(&mut doc).expect("next page should succeed");
    for _ in 0..3 {
        controller
            .reading_bar_next_line(&mut doc)
            .expect("next line should succeed");
    }
    controller.toggle_reading_bar(&doc).expect("toggle should succeed");
    assert_eq!(controller.reading_bar().visible_position(), None);
    controller.toggle_reading_bar(&doc).expect("toggle should succeed");

    assert_eq!(
        controller.reading_bar().visible_position(),
        Some(BarPosition { page: 1, line: 3 })
    );
}
