mod core;
mod event_bus;
mod event_loop;
mod state;

#[cfg(test)]
mod tests;

pub use core::App;
pub use state::StatusState;
