mod memory;
mod traits;

pub use memory::{LETTER_SIZE_PT, MemoryDocument};
pub use traits::{DocumentModel, PageBox, PageInfo};
