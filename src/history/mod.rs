mod state;

pub use state::{NavigationHistory, ViewPosition};
