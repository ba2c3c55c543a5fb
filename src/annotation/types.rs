use std::fmt;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationType {
    FreeText,
    Anchored,
    Circle,
    Square,
    Highlight,
    Underline,
    StrikeOut,
    Line,
    Ink,
}

impl AnnotationType {
    pub const ALL: [Self; 9] = [
        Self::FreeText,
        Self::Anchored,
        Self::Circle,
        Self::Square,
        Self::Highlight,
        Self::Underline,
        Self::StrikeOut,
        Self::Line,
        Self::Ink,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::FreeText => "free-text",
            Self::Anchored => "anchored",
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Highlight => "highlight",
            Self::Underline => "underline",
            Self::StrikeOut => "strike-out",
            Self::Line => "line",
            Self::Ink => "ink",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == value)
    }

    /// Types whose geometry is meaningless without a non-empty rectangle.
    pub fn requires_area(self) -> bool {
        matches!(
            self,
            Self::Circle | Self::Square | Self::Highlight | Self::Underline | Self::StrikeOut
        )
    }

    pub fn is_text_bearing(self) -> bool {
        matches!(self, Self::FreeText | Self::Anchored)
    }

    /// Line and Ink track a point path in addition to their bounds.
    pub fn is_path_based(self) -> bool {
        matches!(self, Self::Line | Self::Ink)
    }

    pub fn is_markup(self) -> bool {
        matches!(self, Self::Highlight | Self::Underline | Self::StrikeOut)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub page: usize,
    pub kind: AnnotationType,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Point>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contents: String,
}

impl Annotation {
    pub fn new(id: AnnotationId, page: usize, kind: AnnotationType, rect: Rect) -> Self {
        Self {
            id,
            page,
            kind,
            rect: rect.abs(),
            path: Vec::new(),
            contents: String::new(),
        }
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = contents.into();
        self
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        let offset = kurbo::Vec2::new(dx, dy);
        self.rect = self.rect + offset;
        for point in &mut self.path {
            *point += offset;
        }
    }

    /// Degenerate geometry is discarded instead of committed.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        match self.kind {
            AnnotationType::Line => match self.path.as_slice() {
                [start, end] => start.distance(*end) <= tolerance,
                _ => true,
            },
            AnnotationType::Ink => {
                let Some(first) = self.path.first() else {
                    return true;
                };
                !self
                    .path
                    .iter()
                    .any(|point| point.distance(*first) > tolerance)
            }
            kind if kind.requires_area() => {
                self.rect.width() <= tolerance || self.rect.height() <= tolerance
            }
            _ => false,
        }
    }

    pub fn size(&self) -> Size {
        self.rect.size()
    }
}

pub(crate) fn bounds_of(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |acc, point| {
                acc.union_pt(*point)
            }),
    )
}
