use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightLayerState {
    #[default]
    Hidden,
    Visible,
}

impl HighlightLayerState {
    fn to_raw(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Visible => 1,
        }
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Visible,
            _ => Self::Hidden,
        }
    }
}

/// Copy of the flags as of the UI thread's last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiFlagsSnapshot {
    pub in_key_window: bool,
    pub highlight_layer: HighlightLayerState,
}

#[derive(Debug, Default)]
struct Flags {
    in_key_window: AtomicBool,
    highlight_layer: AtomicU8,
}

/// Read-mostly flags another thread may query without synchronizing with the
/// event loop. Only the controller writes them; readers see eventually
/// consistent values.
#[derive(Debug, Clone, Default)]
pub struct SharedUiFlags {
    inner: Arc<Flags>,
}

impl SharedUiFlags {
    pub fn snapshot(&self) -> UiFlagsSnapshot {
        UiFlagsSnapshot {
            in_key_window: self.inner.in_key_window.load(Ordering::Relaxed),
            highlight_layer: HighlightLayerState::from_raw(
                self.inner.highlight_layer.load(Ordering::Relaxed),
            ),
        }
    }

    pub(crate) fn set_in_key_window(&self, value: bool) -> bool {
        self.inner.in_key_window.swap(value, Ordering::Relaxed) != value
    }

    pub(crate) fn set_highlight_layer(&self, state: HighlightLayerState) -> bool {
        let raw = state.to_raw();
        self.inner.highlight_layer.swap(raw, Ordering::Relaxed) != raw
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{HighlightLayerState, SharedUiFlags};

    #[test]
    fn snapshot_is_visible_from_another_thread() {
        let flags = SharedUiFlags::default();
        assert!(flags.set_in_key_window(true));
        assert!(!flags.set_in_key_window(true));
        assert!(flags.set_highlight_layer(HighlightLayerState::Visible));

        let reader = flags.clone();
        let snapshot = thread::spawn(move || reader.snapshot())
            .join()
            .expect("reader thread should finish");
        assert!(snapshot.in_key_window);
        assert_eq!(snapshot.highlight_layer, HighlightLayerState::Visible);
    }
}
