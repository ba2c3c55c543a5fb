mod driver;
mod state;

pub use driver::{PacerDriver, PacerSchedule};
pub use state::PacerTimer;
