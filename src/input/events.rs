use crossterm::event::KeyModifiers;
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Dragged,
    Up,
    Moved,
}

impl PointerPhase {
    pub fn id(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Dragged => "drag",
            Self::Up => "up",
            Self::Moved => "move",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Down, Self::Dragged, Self::Up, Self::Moved]
            .into_iter()
            .find(|phase| phase.id() == value)
    }
}

/// Pointer position already converted into the page space of `page`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub page: usize,
    pub point: Point,
    pub modifiers: KeyModifiers,
}

impl PointerEvent {
    pub fn new(page: usize, x: f64, y: f64) -> Self {
        Self {
            page,
            point: Point::new(x, y),
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
