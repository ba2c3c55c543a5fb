mod core;
mod edit;
mod flags;
mod hit_test;
mod mode;
mod navigation;
mod pointer;
mod reading;
mod selection;
mod view;

#[cfg(test)]
mod tests;

pub use core::PageInteractionController;
pub use flags::{HighlightLayerState, SharedUiFlags, UiFlagsSnapshot};
pub use hit_test::{BarRegion, InteractionArea, ResizeHandle};
pub use mode::{EditStateKind, InteractionMode, TemporaryToolMode, ToolMode};
pub use selection::SelectionRect;
pub use view::ViewState;
