use kurbo::{Point, Rect};

/// In-progress content selection. Spans several pages only when continuous
/// selection is allowed; otherwise anchor and focus share a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub anchor_page: usize,
    pub anchor: Point,
    pub focus_page: usize,
    pub focus: Point,
}

impl SelectionRect {
    pub fn at(page: usize, point: Point) -> Self {
        Self {
            anchor_page: page,
            anchor: point,
            focus_page: page,
            focus: point,
        }
    }

    /// Page the selection started on.
    pub fn page(&self) -> usize {
        self.anchor_page
    }

    pub fn first_page(&self) -> usize {
        self.anchor_page.min(self.focus_page)
    }

    pub fn last_page(&self) -> usize {
        self.anchor_page.max(self.focus_page)
    }

    pub fn spans_pages(&self) -> bool {
        self.anchor_page != self.focus_page
    }

    pub fn is_empty(&self, tolerance: f64) -> bool {
        !self.spans_pages()
            && ((self.anchor.x - self.focus.x).abs() <= tolerance
                || (self.anchor.y - self.focus.y).abs() <= tolerance)
    }

    /// Rectangle covered on `page`, given that page's bounds.
    pub fn rect_on_page(&self, page: usize, bounds: Rect) -> Option<Rect> {
        if page < self.first_page() || page > self.last_page() {
            return None;
        }
        if !self.spans_pages() {
            return Some(Rect::from_points(self.anchor, self.focus));
        }

        let (start, end) = if self.anchor_page < self.focus_page {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        };
        let rect = if page == self.first_page() {
            Rect::new(bounds.x0, start.y, bounds.x1, bounds.y1)
        } else if page == self.last_page() {
            Rect::new(bounds.x0, bounds.y0, bounds.x1, end.y)
        } else {
            bounds
        };
        Some(rect)
    }
}
