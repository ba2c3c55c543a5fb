use crossterm::event::KeyEvent;

use crate::command::Command;
use crate::input::{PointerEvent, PointerPhase};

/// Describes *why* the displayed page changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavReason {
    /// Incremental movement (next-page, prev-page).
    Step,
    /// Direct jump (first-page, last-page, goto-page).
    Jump,
    /// Rewind through navigation history.
    History,
    /// Zoom onto a rectangle of another page.
    Zoom,
    /// A pointer pressed on a page other than the displayed one.
    Pointer,
    /// Pacer auto-scroll crossed a page boundary.
    Pacer,
}

impl NavReason {
    /// Jumps are worth remembering for rewind; steps are not.
    pub fn records_history(self, from: usize, to: usize) -> bool {
        match self {
            Self::Jump => from.abs_diff(to) > 1,
            Self::Zoom => true,
            Self::Step | Self::History | Self::Pointer | Self::Pacer => false,
        }
    }
}

/// Everything the serial event loop consumes. Pacer ticks share the queue
/// with input so a tick never lands in the middle of a transition.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    Pointer {
        phase: PointerPhase,
        event: PointerEvent,
    },
    Key(KeyEvent),
    Command(Command),
    PacerTick {
        generation: u64,
    },
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::NavReason;

    #[test]
    fn only_long_jumps_and_zooms_record_history() {
        assert!(NavReason::Jump.records_history(0, 5));
        assert!(!NavReason::Jump.records_history(2, 3));
        assert!(NavReason::Zoom.records_history(1, 1));
        assert!(!NavReason::Step.records_history(0, 9));
        assert!(!NavReason::History.records_history(9, 0));
    }
}
