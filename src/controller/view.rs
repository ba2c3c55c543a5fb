use kurbo::{Point, Rect, Size, Vec2};

use crate::config::ViewConfig;
use crate::document::DocumentModel;
use crate::history::ViewPosition;

/// Scale and scroll of the page stack. Pages are laid out top to bottom with
/// `page_gap` points between them; `scroll` is in unscaled document points.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    pub scroll: Vec2,
    pub viewport: Size,
    pub page_gap: f64,
    min_scale: f64,
    max_scale: f64,
}

impl ViewState {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            scale: 1.0_f64.max(config.min_scale).min(config.max_scale),
            scroll: Vec2::ZERO,
            viewport: Size::new(config.viewport_width, config.viewport_height),
            page_gap: config.page_gap,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
        }
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    /// Viewport size in document points.
    pub fn visible_size(&self) -> Size {
        Size::new(self.viewport.width / self.scale, self.viewport.height / self.scale)
    }

    pub fn page_top(&self, doc: &dyn DocumentModel, page: usize) -> f64 {
        (0..page)
            .filter_map(|index| doc.page(index).ok())
            .map(|info| info.height() + self.page_gap)
            .sum()
    }

    pub fn document_height(&self, doc: &dyn DocumentModel) -> f64 {
        let count = doc.page_count();
        if count == 0 {
            return 0.0;
        }
        self.page_top(doc, count - 1)
            + doc.page(count - 1).map(|info| info.height()).unwrap_or(0.0)
    }

    pub fn document_width(&self, doc: &dyn DocumentModel) -> f64 {
        (0..doc.page_count())
            .filter_map(|index| doc.page(index).ok())
            .map(|info| info.media_box.width())
            .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self, doc: &dyn DocumentModel) -> Vec2 {
        let visible = self.visible_size();
        Vec2::new(
            (self.document_width(doc) - visible.width).max(0.0),
            (self.document_height(doc) - visible.height).max(0.0),
        )
    }

    pub fn clamp_scroll(&self, doc: &dyn DocumentModel, scroll: Vec2) -> Vec2 {
        let max = self.max_scroll(doc);
        Vec2::new(scroll.x.clamp(0.0, max.x), scroll.y.clamp(0.0, max.y))
    }

    /// Page whose span (including the gap below it) contains document offset `y`.
    pub fn page_at(&self, doc: &dyn DocumentModel, y: f64) -> usize {
        let mut top = 0.0;
        let count = doc.page_count();
        for index in 0..count {
            let Ok(info) = doc.page(index) else {
                break;
            };
            top += info.height() + self.page_gap;
            if y < top {
                return index;
            }
        }
        count.saturating_sub(1)
    }

    /// Part of `page` inside the viewport, in page space.
    pub fn visible_rect_on_page(&self, doc: &dyn DocumentModel, page: usize) -> Option<Rect> {
        let info = doc.page(page).ok()?;
        let top = self.page_top(doc, page);
        let visible = self.visible_size();
        let window = Rect::new(
            self.scroll.x,
            self.scroll.y - top,
            self.scroll.x + visible.width,
            self.scroll.y - top + visible.height,
        );
        let clipped = window.intersect(info.media_box);
        (clipped.area() > 0.0).then_some(clipped)
    }

    pub fn position(&self, doc: &dyn DocumentModel) -> ViewPosition {
        let page = doc.current_page();
        let top = self.page_top(doc, page);
        ViewPosition {
            page,
            point: Point::new(self.scroll.x, self.scroll.y - top),
            scale: self.scale,
        }
    }

    pub fn scroll_for(&self, doc: &dyn DocumentModel, position: &ViewPosition) -> Vec2 {
        let top = self.page_top(doc, position.page);
        Vec2::new(position.point.x, top + position.point.y)
    }

    /// Scroll that puts `point` on `page` at the centre of the viewport.
    pub fn scroll_centering(&self, doc: &dyn DocumentModel, page: usize, point: Point) -> Vec2 {
        let visible = self.visible_size();
        let top = self.page_top(doc, page);
        self.clamp_scroll(
            doc,
            Vec2::new(
                point.x - visible.width / 2.0,
                top + point.y - visible.height / 2.0,
            ),
        )
    }
}
