use crate::annotation::{AnnotationId, AnnotationType};
use crate::controller::{SelectionRect, TemporaryToolMode, ToolMode};
use crate::event::NavReason;
use crate::reading_bar::BarPosition;

/// Change broadcast by the interaction controller after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    AnnotationAdded {
        annotation: AnnotationId,
        page: usize,
    },
    AnnotationRemoved {
        annotation: AnnotationId,
        page: usize,
    },
    /// Covers both moves and resizes.
    AnnotationMoved {
        annotation: AnnotationId,
        page: usize,
    },
    SelectionChanged {
        selection: Option<SelectionRect>,
        page: usize,
    },
    ToolModeChanged {
        old: ToolMode,
        new: ToolMode,
    },
    TemporaryToolModeChanged {
        old: TemporaryToolMode,
        new: TemporaryToolMode,
    },
    AnnotationModeChanged {
        old: AnnotationType,
        new: AnnotationType,
    },
    ReadingBarChanged {
        old: Option<BarPosition>,
        new: Option<BarPosition>,
    },
    PacerStartedOrStopped {
        armed: bool,
    },
    CurrentAnnotationChanged {
        old: Option<AnnotationId>,
        new: Option<AnnotationId>,
    },
    MagnificationChanged {
        scale: f64,
    },
    PageChanged {
        from: usize,
        to: usize,
        reason: NavReason,
    },
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnnotationAdded { .. } => "annotation-added",
            Self::AnnotationRemoved { .. } => "annotation-removed",
            Self::AnnotationMoved { .. } => "annotation-moved",
            Self::SelectionChanged { .. } => "selection-changed",
            Self::ToolModeChanged { .. } => "tool-mode-changed",
            Self::TemporaryToolModeChanged { .. } => "temporary-tool-mode-changed",
            Self::AnnotationModeChanged { .. } => "annotation-mode-changed",
            Self::ReadingBarChanged { .. } => "reading-bar-changed",
            Self::PacerStartedOrStopped { .. } => "pacer-started-or-stopped",
            Self::CurrentAnnotationChanged { .. } => "current-annotation-changed",
            Self::MagnificationChanged { .. } => "magnification-changed",
            Self::PageChanged { .. } => "page-changed",
        }
    }

    /// Page whose rendering this change affects, when there is exactly one.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::AnnotationAdded { page, .. }
            | Self::AnnotationRemoved { page, .. }
            | Self::AnnotationMoved { page, .. }
            | Self::SelectionChanged { page, .. } => Some(*page),
            Self::ReadingBarChanged { old, new } => new.or(*old).map(|position| position.page),
            _ => None,
        }
    }
}
