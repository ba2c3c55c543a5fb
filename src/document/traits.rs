use kurbo::{Rect, Size};
use serde::Deserialize;

use crate::annotation::{Annotation, AnnotationId};
use crate::error::{AppError, AppResult};

const FALLBACK_GLYPH_WIDTH_PT: f64 = 6.5;
const FALLBACK_LINE_HEIGHT_PT: f64 = 14.0;

/// Which page box geometry is clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageBox {
    Media,
    #[default]
    Crop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    pub media_box: Rect,
    pub crop_box: Rect,
    /// Text line bounds in reading order.
    pub line_rects: Vec<Rect>,
}

impl PageInfo {
    pub fn new(size: Size) -> Self {
        let bounds = size.to_rect();
        Self {
            media_box: bounds,
            crop_box: bounds,
            line_rects: Vec::new(),
        }
    }

    pub fn with_crop_box(mut self, crop_box: Rect) -> Self {
        self.crop_box = crop_box.intersect(self.media_box);
        self
    }

    pub fn with_line_rects(mut self, line_rects: Vec<Rect>) -> Self {
        self.line_rects = line_rects;
        self
    }

    pub fn bounds(&self, page_box: PageBox) -> Rect {
        match page_box {
            PageBox::Media => self.media_box,
            PageBox::Crop => self.crop_box,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_rects.len()
    }

    /// First line not entirely above `y`; the last line when `y` is below all of them.
    pub fn line_at(&self, y: f64) -> Option<usize> {
        if self.line_rects.is_empty() {
            return None;
        }
        Some(
            self.line_rects
                .iter()
                .position(|rect| y < rect.y1)
                .unwrap_or(self.line_rects.len() - 1),
        )
    }

    pub fn height(&self) -> f64 {
        self.media_box.height()
    }
}

/// The document collaborator the interaction core drives.
///
/// Notes keep their insertion order; `insert_note` and `remove_note` are the
/// only mutation paths.
pub trait DocumentModel {
    fn page_count(&self) -> usize;
    fn page(&self, index: usize) -> AppResult<&PageInfo>;
    fn notes(&self) -> &[Annotation];
    fn insert_note(&mut self, note: Annotation, at: Option<usize>) -> AppResult<usize>;
    fn remove_note(&mut self, at: usize) -> AppResult<Annotation>;
    fn current_page(&self) -> usize;
    fn set_current_page(&mut self, page: usize) -> AppResult<()>;
    fn next_annotation_id(&mut self) -> AnnotationId;

    /// Rendered size of `text`. Renderers override this with real layout.
    fn measure_text(&self, text: &str) -> Size {
        let columns = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let rows = text.lines().count().max(1);
        Size::new(
            columns as f64 * FALLBACK_GLYPH_WIDTH_PT,
            rows as f64 * FALLBACK_LINE_HEIGHT_PT,
        )
    }

    fn note_index(&self, id: AnnotationId) -> Option<usize> {
        self.notes().iter().position(|note| note.id == id)
    }

    fn note(&self, id: AnnotationId) -> Option<&Annotation> {
        self.notes().iter().find(|note| note.id == id)
    }

    fn notes_on_page(&self, page: usize) -> Vec<&Annotation> {
        self.notes().iter().filter(|note| note.page == page).collect()
    }

    /// Swaps a note in place, keeping its position in the list.
    fn replace_note(&mut self, note: Annotation) -> AppResult<()> {
        let index = self
            .note_index(note.id)
            .ok_or(AppError::UnknownAnnotation(note.id))?;
        self.remove_note(index)?;
        self.insert_note(note, Some(index))?;
        Ok(())
    }

    fn check_page(&self, page: usize) -> AppResult<()> {
        let len = self.page_count();
        if page >= len {
            return Err(AppError::out_of_range("page", page, len));
        }
        Ok(())
    }
}
