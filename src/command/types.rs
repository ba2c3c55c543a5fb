use kurbo::Rect;

use crate::annotation::AnnotationType;
use crate::controller::{InteractionMode, TemporaryToolMode, ToolMode};

/// User-level request. Page and line values are 0-based indices; the text
/// parser accepts 1-based numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetToolMode { mode: ToolMode },
    SetAnnotationMode { kind: AnnotationType },
    BeginTemporaryMode { mode: TemporaryToolMode },
    EndTemporaryMode,
    SetInteractionMode { mode: InteractionMode },
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GotoPage { page: usize },
    SetZoom { value: f64 },
    ZoomIn,
    ZoomOut,
    ZoomToRect { page: usize, rect: Rect },
    ToggleReadingBar,
    MoveReadingBar { page: usize, line: usize },
    ReadingBarNextLine,
    ReadingBarPrevLine,
    SetReadingBarLines { lines: usize },
    TogglePacer,
    SetPacerSpeed { value: f64 },
    PacerStep,
    Rewind,
    FenceHistory,
    ResetHistory,
    EditCurrentAnnotation,
    EndTextEditing { contents: Option<String> },
    RemoveCurrentAnnotation,
    AutoSizeCurrentAnnotation,
    SelectNextAnnotation,
    SelectPrevAnnotation,
    DeselectAll,
    ToggleHideNotes,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    SetToolMode,
    SetAnnotationMode,
    BeginTemporaryMode,
    EndTemporaryMode,
    SetInteractionMode,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GotoPage,
    SetZoom,
    ZoomIn,
    ZoomOut,
    ZoomToRect,
    ToggleReadingBar,
    MoveReadingBar,
    ReadingBarNextLine,
    ReadingBarPrevLine,
    SetReadingBarLines,
    TogglePacer,
    SetPacerSpeed,
    PacerStep,
    Rewind,
    FenceHistory,
    ResetHistory,
    EditAnnotation,
    EndTextEditing,
    RemoveAnnotation,
    AutoSizeAnnotation,
    SelectNextAnnotation,
    SelectPrevAnnotation,
    DeselectAll,
    ToggleHideNotes,
    Cancel,
    Quit,
    Pointer,
    Key,
    PacerTick,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetToolMode => "tool-mode",
            Self::SetAnnotationMode => "annotation-mode",
            Self::BeginTemporaryMode => "begin-temporary-mode",
            Self::EndTemporaryMode => "end-temporary-mode",
            Self::SetInteractionMode => "interaction-mode",
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::FirstPage => "first-page",
            Self::LastPage => "last-page",
            Self::GotoPage => "goto-page",
            Self::SetZoom => "set-zoom",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::ZoomToRect => "zoom-to-rect",
            Self::ToggleReadingBar => "toggle-reading-bar",
            Self::MoveReadingBar => "move-reading-bar",
            Self::ReadingBarNextLine => "reading-bar-next-line",
            Self::ReadingBarPrevLine => "reading-bar-prev-line",
            Self::SetReadingBarLines => "reading-bar-lines",
            Self::TogglePacer => "toggle-pacer",
            Self::SetPacerSpeed => "pacer-speed",
            Self::PacerStep => "pacer-step",
            Self::Rewind => "rewind",
            Self::FenceHistory => "fence-history",
            Self::ResetHistory => "reset-history",
            Self::EditAnnotation => "edit-annotation",
            Self::EndTextEditing => "end-editing",
            Self::RemoveAnnotation => "remove-annotation",
            Self::AutoSizeAnnotation => "auto-size-annotation",
            Self::SelectNextAnnotation => "next-annotation",
            Self::SelectPrevAnnotation => "prev-annotation",
            Self::DeselectAll => "deselect-all",
            Self::ToggleHideNotes => "toggle-hide-notes",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
            Self::Pointer => "pointer",
            Self::Key => "key",
            Self::PacerTick => "pacer-tick",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::SetToolMode { .. } => ActionId::SetToolMode,
            Self::SetAnnotationMode { .. } => ActionId::SetAnnotationMode,
            Self::BeginTemporaryMode { .. } => ActionId::BeginTemporaryMode,
            Self::EndTemporaryMode => ActionId::EndTemporaryMode,
            Self::SetInteractionMode { .. } => ActionId::SetInteractionMode,
            Self::NextPage => ActionId::NextPage,
            Self::PrevPage => ActionId::PrevPage,
            Self::FirstPage => ActionId::FirstPage,
            Self::LastPage => ActionId::LastPage,
            Self::GotoPage { .. } => ActionId::GotoPage,
            Self::SetZoom { .. } => ActionId::SetZoom,
            Self::ZoomIn => ActionId::ZoomIn,
            Self::ZoomOut => ActionId::ZoomOut,
            Self::ZoomToRect { .. } => ActionId::ZoomToRect,
            Self::ToggleReadingBar => ActionId::ToggleReadingBar,
            Self::MoveReadingBar { .. } => ActionId::MoveReadingBar,
            Self::ReadingBarNextLine => ActionId::ReadingBarNextLine,
            Self::ReadingBarPrevLine => ActionId::ReadingBarPrevLine,
            Self::SetReadingBarLines { .. } => ActionId::SetReadingBarLines,
            Self::TogglePacer => ActionId::TogglePacer,
            Self::SetPacerSpeed { .. } => ActionId::SetPacerSpeed,
            Self::PacerStep => ActionId::PacerStep,
            Self::Rewind => ActionId::Rewind,
            Self::FenceHistory => ActionId::FenceHistory,
            Self::ResetHistory => ActionId::ResetHistory,
            Self::EditCurrentAnnotation => ActionId::EditAnnotation,
            Self::EndTextEditing { .. } => ActionId::EndTextEditing,
            Self::RemoveCurrentAnnotation => ActionId::RemoveAnnotation,
            Self::AutoSizeCurrentAnnotation => ActionId::AutoSizeAnnotation,
            Self::SelectNextAnnotation => ActionId::SelectNextAnnotation,
            Self::SelectPrevAnnotation => ActionId::SelectPrevAnnotation,
            Self::DeselectAll => ActionId::DeselectAll,
            Self::ToggleHideNotes => ActionId::ToggleHideNotes,
            Self::Cancel => ActionId::Cancel,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    F64,
    I32,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}
