mod events;
pub mod keymap;
pub mod script;

pub use events::{PointerEvent, PointerPhase};
pub use script::{ScriptStep, parse_script};
