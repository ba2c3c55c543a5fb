use kurbo::Rect;

use crate::annotation::AnnotationId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRequest {
    pub page: usize,
    pub rect: Rect,
    pub scale: f64,
    pub auto_fits: bool,
}

/// Optional hooks the window layer implements. Every hook defaults to doing
/// nothing and is called synchronously, in event order.
pub trait ViewerDelegate {
    fn did_begin_editing(&mut self, annotation: AnnotationId) {
        let _ = annotation;
    }

    fn did_end_editing(&mut self, annotation: AnnotationId) {
        let _ = annotation;
    }

    /// Open an editor for a note that is not edited in place.
    fn edit_annotation(&mut self, annotation: AnnotationId) {
        let _ = annotation;
    }

    fn show_snapshot(&mut self, request: SnapshotRequest) {
        let _ = request;
    }

    fn exit_presentation(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelegate;

impl ViewerDelegate for NoopDelegate {}
