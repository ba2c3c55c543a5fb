use std::sync::Arc;

use crate::error::{AppError, AppResult};

pub const BYTES_PER_PIXEL: usize = 4;

/// Rendered page image, tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl RgbaFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> AppResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(AppError::invalid_argument(format!(
                "frame {width}x{height} needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Frame filled with one colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let pixels: Vec<u8> = std::iter::repeat_n(rgba, count).flatten().collect();
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let bytes = self.pixels.get(start..start + BYTES_PER_PIXEL)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }
}

#[cfg(test)]
mod tests {
    use super::RgbaFrame;

    #[test]
    fn new_rejects_mismatched_buffers() {
        assert!(RgbaFrame::new(2, 2, vec![0; 16]).is_ok());
        assert!(RgbaFrame::new(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn pixel_reads_row_major_rgba() {
        let frame = RgbaFrame::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).expect("frame should build");
        assert_eq!(frame.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(RgbaFrame::solid(3, 2, [9, 9, 9, 255]).byte_len(), 24);
    }
}
