use crate::annotation::AnnotationType;

/// Persistent input interpretation chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolMode {
    #[default]
    Text,
    Move,
    Magnify,
    Select,
    Note,
}

impl ToolMode {
    pub const ALL: [Self; 5] = [Self::Text, Self::Move, Self::Magnify, Self::Select, Self::Note];

    pub fn id(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Move => "move",
            Self::Magnify => "magnify",
            Self::Select => "select",
            Self::Note => "note",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == value)
    }
}

/// Override that holds only while its trigger (modifier, gesture) is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemporaryToolMode {
    #[default]
    None,
    Zoom,
    Snapshot,
    Highlight,
    Underline,
    StrikeOut,
    Ink,
}

impl TemporaryToolMode {
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Zoom,
        Self::Snapshot,
        Self::Highlight,
        Self::Underline,
        Self::StrikeOut,
        Self::Ink,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Zoom => "zoom",
            Self::Snapshot => "snapshot",
            Self::Highlight => "highlight",
            Self::Underline => "underline",
            Self::StrikeOut => "strike-out",
            Self::Ink => "ink",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == value)
    }

    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Markup created by a drag while this override is held.
    pub fn annotation_type(self) -> Option<AnnotationType> {
        match self {
            Self::Highlight => Some(AnnotationType::Highlight),
            Self::Underline => Some(AnnotationType::Underline),
            Self::StrikeOut => Some(AnnotationType::StrikeOut),
            Self::Ink => Some(AnnotationType::Ink),
            Self::None | Self::Zoom | Self::Snapshot => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    #[default]
    Normal,
    FullScreen,
    Presentation,
}

impl InteractionMode {
    pub fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::FullScreen => "full-screen",
            Self::Presentation => "presentation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Normal, Self::FullScreen, Self::Presentation]
            .into_iter()
            .find(|mode| mode.id() == value)
    }

    pub fn is_transient(self) -> bool {
        self != Self::Normal
    }
}

/// Coarse view of what the current annotation edit is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStateKind {
    None,
    Creating,
    Resizing,
    Moving,
    EditingText,
}
