mod viewport;


pub use viewport::{SnapshotSetup, SnapshotViewport};
