use crate::error::{AppError, AppResult};

use super::TransitionEngine;
use super::frame::{BYTES_PER_PIXEL, RgbaFrame};

/// Horizontal strips of the target slide in, alternating from the left and
/// the right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripsTransition {
    /// Strip height in pixels.
    pub strip_height: u32,
}

impl Default for StripsTransition {
    fn default() -> Self {
        Self { strip_height: 50 }
    }
}

impl TransitionEngine for StripsTransition {
    fn compose(&self, from: &RgbaFrame, to: &RgbaFrame, t: f64) -> AppResult<RgbaFrame> {
        if from.width != to.width || from.height != to.height {
            return Err(AppError::invalid_argument(format!(
                "transition frames differ in size: {}x{} vs {}x{}",
                from.width, from.height, to.width, to.height
            )));
        }
        if !t.is_finite() {
            return Err(AppError::invalid_argument("transition time must be finite"));
        }
        let t = t.clamp(0.0, 1.0);
        let strip_height = self.strip_height.max(1);

        let width = from.width as usize;
        // Columns of the target already on screen.
        let covered = ((width as f64) * t).round() as usize;
        let mut pixels = Vec::with_capacity(from.byte_len());

        for y in 0..from.height {
            let source = from.row(y);
            let target = to.row(y);
            let from_left = (y / strip_height) % 2 == 0;
            let split = if from_left { covered } else { width - covered };

            for x in 0..width {
                let (row, column) = match (from_left, x < split) {
                    (true, true) => (target, x + width - covered),
                    (false, false) => (target, x - split),
                    _ => (source, x),
                };
                let start = column * BYTES_PER_PIXEL;
                pixels.extend_from_slice(&row[start..start + BYTES_PER_PIXEL]);
            }
        }

        RgbaFrame::new(from.width, from.height, pixels)
    }
}
