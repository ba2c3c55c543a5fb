mod frame;
mod strips;

pub use frame::RgbaFrame;
pub use strips::StripsTransition;

use crate::error::AppResult;

/// Image effect played when animating between two rendered pages.
///
/// Implementations are stateless: the same frames and `t` in `[0, 1]` always
/// compose the same image. `t = 0` shows `from`, `t = 1` shows `to`.
pub trait TransitionEngine {
    fn compose(&self, from: &RgbaFrame, to: &RgbaFrame, t: f64) -> AppResult<RgbaFrame>;
}
