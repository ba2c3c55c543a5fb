use std::collections::HashMap;

use kurbo::Rect;

use crate::document::PageInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarPosition {
    pub page: usize,
    pub line: usize,
}

/// Old and new visible positions; `None` means the bar is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingBarChange {
    pub old: Option<BarPosition>,
    pub new: Option<BarPosition>,
}

/// Highlighted band over one or more text lines.
///
/// Disabling hides the bar but keeps its position; each page remembers the
/// last line the bar sat on.
#[derive(Debug, Clone)]
pub struct ReadingBarModel {
    enabled: bool,
    position: Option<BarPosition>,
    lines: usize,
    remembered: HashMap<usize, usize>,
}

impl ReadingBarModel {
    pub fn new(lines: usize) -> Self {
        Self {
            enabled: false,
            position: None,
            lines: lines.max(1),
            remembered: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Position while the bar is shown.
    pub fn visible_position(&self) -> Option<BarPosition> {
        self.position.filter(|_| self.enabled)
    }

    /// Position kept while the bar is hidden.
    pub fn retained_position(&self) -> Option<BarPosition> {
        self.position
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn remembered_line(&self, page: usize) -> Option<usize> {
        self.remembered.get(&page).copied()
    }

    pub fn toggle(
        &mut self,
        current_page: usize,
        first_visible_line: usize,
        line_count: usize,
    ) -> ReadingBarChange {
        let old = self.visible_position();
        if self.enabled {
            self.enabled = false;
            return ReadingBarChange { old, new: None };
        }

        self.enabled = true;
        let resume = match self.position {
            Some(position) if position.page == current_page => position.line,
            _ => self
                .remembered_line(current_page)
                .unwrap_or(first_visible_line),
        };
        self.place(current_page, resume, line_count);
        ReadingBarChange {
            old,
            new: self.visible_position(),
        }
    }

    /// Repositions the bar, clamping `line` to the page's lines.
    pub fn move_to(&mut self, page: usize, line: usize, line_count: usize) -> Option<ReadingBarChange> {
        let old = self.visible_position();
        self.place(page, line, line_count);
        let new = self.visible_position();
        (old != new).then_some(ReadingBarChange { old, new })
    }

    /// Carries an enabled bar along when the displayed page changes.
    pub fn follow_page(
        &mut self,
        page: usize,
        first_visible_line: usize,
        line_count: usize,
    ) -> Option<ReadingBarChange> {
        if !self.enabled || self.position.is_some_and(|position| position.page == page) {
            return None;
        }
        let line = self.remembered_line(page).unwrap_or(first_visible_line);
        self.move_to(page, line, line_count)
    }

    pub fn set_lines(&mut self, lines: usize) -> bool {
        let lines = lines.max(1);
        if self.lines == lines {
            return false;
        }
        self.lines = lines;
        true
    }

    /// Union of the covered line rectangles on `page`.
    pub fn bar_rect(&self, page: &PageInfo) -> Option<Rect> {
        let position = self.visible_position()?;
        let end = (position.line + self.lines).min(page.line_rects.len());
        page.line_rects
            .get(position.line..end)?
            .iter()
            .copied()
            .reduce(|acc, rect| acc.union(rect))
    }

    pub fn clear(&mut self) {
        self.enabled = false;
        self.position = None;
        self.remembered.clear();
    }

    fn place(&mut self, page: usize, line: usize, line_count: usize) {
        let line = line.min(line_count.saturating_sub(1));
        self.position = Some(BarPosition { page, line });
        self.remembered.insert(page, line);
    }
}
