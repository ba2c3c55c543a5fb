mod state;

pub use state::{BarPosition, ReadingBarChange, ReadingBarModel};
