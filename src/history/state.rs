use kurbo::Point;

const DEFAULT_CAPACITY: usize = 64;

/// A place the view has been: page, point on the page at the top-left of the
/// viewport, and magnification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPosition {
    pub page: usize,
    pub point: Point,
    pub scale: f64,
}

/// Back-navigation stack with a floor below which rewinding is disallowed.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<ViewPosition>,
    min_index: usize,
    /// Fence to go back to when the current fenced stretch is popped.
    saved_min_index: Option<usize>,
    replaying: bool,
    capacity: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NavigationHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            min_index: 0,
            saved_min_index: None,
            replaying: false,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ViewPosition] {
        &self.entries
    }

    pub fn min_index(&self) -> usize {
        self.min_index
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn can_rewind(&self) -> bool {
        self.entries.len() > self.min_index
    }

    /// Pushes `position` unless a rewind is being replayed or it repeats the top entry.
    pub fn record_if_needed(&mut self, position: ViewPosition) -> bool {
        if self.replaying {
            return false;
        }
        if self.entries.last() == Some(&position) {
            return false;
        }

        if self.entries.len() >= self.capacity {
            self.entries.remove(0);
            self.min_index = self.min_index.saturating_sub(1);
            self.saved_min_index = self.saved_min_index.map(|index| index.saturating_sub(1));
        }
        self.entries.push(position);
        true
    }

    /// Pops the most recent entry above the fence.
    pub fn rewind(&mut self) -> Option<ViewPosition> {
        if !self.can_rewind() {
            return None;
        }
        self.entries.pop()
    }

    pub fn fence_here(&mut self) {
        self.min_index = self.entries.len();
    }

    /// Fences here, remembering the current fence for [`Self::pop_fence`].
    pub fn push_fence(&mut self) {
        self.saved_min_index = Some(self.min_index);
        self.fence_here();
    }

    /// Drops everything recorded since [`Self::push_fence`] and restores the
    /// fence saved there. Returns false when nothing was pushed.
    pub fn pop_fence(&mut self) -> bool {
        let Some(saved) = self.saved_min_index.take() else {
            return false;
        };
        self.entries.truncate(self.min_index);
        self.min_index = saved.min(self.entries.len());
        true
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.min_index = 0;
        self.saved_min_index = None;
        self.replaying = false;
    }

    pub fn begin_replay(&mut self) {
        self.replaying = true;
    }

    pub fn end_replay(&mut self) {
        self.replaying = false;
    }
}
