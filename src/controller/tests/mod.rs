use std::cell::RefCell;
use std::rc::Rc;

use crate::annotation::AnnotationType;
use crate::config::Config;
use crate::document::MemoryDocument;
use crate::input::PointerEvent;
use crate::notify::Notification;

use super::{PageInteractionController, ToolMode};

mod navigation;
mod scenarios;

fn controller() -> PageInteractionController {
    PageInteractionController::new(Config::default())
}

fn recorder(controller: &mut PageInteractionController) -> Rc<RefCell<Vec<Notification>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    controller.subscribe(move |notification| sink.borrow_mut().push(notification.clone()));
    seen
}

fn drag(
    controller: &mut PageInteractionController,
    doc: &mut MemoryDocument,
    page: usize,
    from: (f64, f64),
    to: (f64, f64),
) {
    controller
        .pointer_down(doc, PointerEvent::new(page, from.0, from.1))
        .expect("pointer down should succeed");
    controller
        .pointer_dragged(doc, PointerEvent::new(page, to.0, to.1))
        .expect("pointer drag should succeed");
    controller
        .pointer_up(doc, PointerEvent::new(page, to.0, to.1))
        .expect("pointer up should succeed");
}

/// Note tool armed to draw `kind`.
fn note_controller(kind: AnnotationType) -> PageInteractionController {
    let mut controller = controller();
    controller.set_tool_mode(ToolMode::Note);
    controller.set_annotation_mode(kind);
    controller
}
