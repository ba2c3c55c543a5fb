use kurbo::{Rect, Size};

use crate::annotation::{Annotation, AnnotationId};
use crate::error::{AppError, AppResult};

use super::traits::{DocumentModel, PageInfo};

pub const LETTER_SIZE_PT: Size = Size::new(612.0, 792.0);
const LINE_MARGIN_PT: f64 = 72.0;
const LINE_PITCH_PT: f64 = 16.0;
const LINE_HEIGHT_PT: f64 = 12.0;

/// Document kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<PageInfo>,
    notes: Vec<Annotation>,
    current_page: usize,
    next_id: u64,
}

impl MemoryDocument {
    pub fn new(pages: Vec<PageInfo>) -> Self {
        Self {
            pages,
            notes: Vec::new(),
            current_page: 0,
            next_id: 1,
        }
    }

    /// `page_count` letter-sized pages filled with evenly spaced text lines.
    pub fn with_uniform_pages(page_count: usize) -> Self {
        let page = PageInfo::new(LETTER_SIZE_PT).with_line_rects(text_lines(LETTER_SIZE_PT));
        Self::new(vec![page; page_count])
    }

    pub fn pages(&self) -> &[PageInfo] {
        &self.pages
    }
}

fn text_lines(size: Size) -> Vec<Rect> {
    let mut lines = Vec::new();
    let mut top = LINE_MARGIN_PT;
    while top + LINE_HEIGHT_PT <= size.height - LINE_MARGIN_PT {
        lines.push(Rect::new(
            LINE_MARGIN_PT,
            top,
            size.width - LINE_MARGIN_PT,
            top + LINE_HEIGHT_PT,
        ));
        top += LINE_PITCH_PT;
    }
    lines
}

impl DocumentModel for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> AppResult<&PageInfo> {
        self.pages
            .get(index)
            .ok_or(AppError::out_of_range("page", index, self.pages.len()))
    }

    fn notes(&self) -> &[Annotation] {
        &self.notes
    }

    fn insert_note(&mut self, note: Annotation, at: Option<usize>) -> AppResult<usize> {
        self.check_page(note.page)?;
        let index = at.unwrap_or(self.notes.len());
        if index > self.notes.len() {
            return Err(AppError::out_of_range("note", index, self.notes.len()));
        }
        self.notes.insert(index, note);
        Ok(index)
    }

    fn remove_note(&mut self, at: usize) -> AppResult<Annotation> {
        if at >= self.notes.len() {
            return Err(AppError::out_of_range("note", at, self.notes.len()));
        }
        Ok(self.notes.remove(at))
    }

    fn current_page(&self) -> usize {
        self.current_page
    }

    fn set_current_page(&mut self, page: usize) -> AppResult<()> {
        self.check_page(page)?;
        self.current_page = page;
        Ok(())
    }

    fn next_annotation_id(&mut self) -> AnnotationId {
        let id = AnnotationId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }
}
