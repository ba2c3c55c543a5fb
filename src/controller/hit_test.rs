use kurbo::{Point, Rect};

use crate::annotation::AnnotationId;
use crate::document::DocumentModel;
use crate::error::AppResult;
use crate::geometry::{area, square_around};

use super::core::PageInteractionController;
use super::mode::ToolMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
    ];

    /// Handle centre on `rect` (y grows downward, so north is `y0`).
    pub fn anchor(self, rect: Rect) -> Point {
        let center = rect.center();
        match self {
            Self::North => Point::new(center.x, rect.y0),
            Self::South => Point::new(center.x, rect.y1),
            Self::East => Point::new(rect.x1, center.y),
            Self::West => Point::new(rect.x0, center.y),
            Self::NorthEast => Point::new(rect.x1, rect.y0),
            Self::NorthWest => Point::new(rect.x0, rect.y0),
            Self::SouthEast => Point::new(rect.x1, rect.y1),
            Self::SouthWest => Point::new(rect.x0, rect.y1),
        }
    }

    /// Moves the edges this handle controls to `point`.
    pub fn apply(self, rect: Rect, point: Point) -> Rect {
        let mut out = rect;
        match self {
            Self::North => out.y0 = point.y,
            Self::South => out.y1 = point.y,
            Self::East => out.x1 = point.x,
            Self::West => out.x0 = point.x,
            Self::NorthEast => {
                out.y0 = point.y;
                out.x1 = point.x;
            }
            Self::NorthWest => {
                out.y0 = point.y;
                out.x0 = point.x;
            }
            Self::SouthEast => {
                out.y1 = point.y;
                out.x1 = point.x;
            }
            Self::SouthWest => {
                out.y1 = point.y;
                out.x0 = point.x;
            }
        }
        out.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarRegion {
    TopEdge,
    BottomEdge,
    Body,
}

/// Semantic region under a point, used to pick the drag behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionArea {
    Resize(ResizeHandle),
    ReadingBar(BarRegion),
    Drag(AnnotationId),
    Special,
    Temporary,
}

impl InteractionArea {
    /// Lower wins.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Resize(_) => 0,
            Self::ReadingBar(_) => 1,
            Self::Drag(_) => 2,
            Self::Special => 3,
            Self::Temporary => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct HitCandidate {
    pub(crate) area: InteractionArea,
    pub(crate) region: Rect,
}

/// Highest-precedence candidate; equal precedence goes to the smallest region.
pub(crate) fn resolve(candidates: &[HitCandidate]) -> Option<InteractionArea> {
    candidates
        .iter()
        .min_by(|left, right| {
            left.area
                .precedence()
                .cmp(&right.area.precedence())
                .then(area(left.region).total_cmp(&area(right.region)))
        })
        .map(|candidate| candidate.area)
}

impl PageInteractionController {
    /// Region under `point` on `page`, by the precedence
    /// resize handle > reading bar > annotation body > tool area > temporary tool area.
    pub fn hit_test(
        &self,
        doc: &dyn DocumentModel,
        page: usize,
        point: Point,
    ) -> AppResult<Option<InteractionArea>> {
        let info = doc.page(page)?;
        let bounds = info.bounds(self.config.interaction.clamp_box);
        let mut candidates = Vec::new();

        if let Some(current) = self.current_annotation_on(doc, page) {
            let radius = self.config.interaction.handle_size;
            for handle in ResizeHandle::ALL {
                let region = square_around(handle.anchor(current.rect), radius);
                if region.contains(point) {
                    candidates.push(HitCandidate {
                        area: InteractionArea::Resize(handle),
                        region,
                    });
                }
            }
        }

        if let Some(position) = self.reading_bar.visible_position()
            && position.page == page
            && let Some(bar) = self.reading_bar.bar_rect(info)
        {
            let edge = self.config.interaction.reading_bar_edge;
            let bands = [
                (
                    BarRegion::TopEdge,
                    Rect::new(bar.x0, bar.y0 - edge, bar.x1, bar.y0 + edge),
                ),
                (
                    BarRegion::BottomEdge,
                    Rect::new(bar.x0, bar.y1 - edge, bar.x1, bar.y1 + edge),
                ),
                (BarRegion::Body, bar),
            ];
            for (region_kind, region) in bands {
                if region.contains(point) {
                    candidates.push(HitCandidate {
                        area: InteractionArea::ReadingBar(region_kind),
                        region,
                    });
                }
            }
        }

        if !self.hide_notes {
            for note in doc.notes_on_page(page) {
                if note.contains(point) {
                    candidates.push(HitCandidate {
                        area: InteractionArea::Drag(note.id),
                        region: note.rect,
                    });
                }
            }
        }

        if bounds.contains(point) {
            match self.tool_mode {
                ToolMode::Select => {
                    if let Some(selection) = self.selection
                        && let Some(region) = selection.rect_on_page(page, bounds)
                        && region.contains(point)
                    {
                        candidates.push(HitCandidate {
                            area: InteractionArea::Special,
                            region,
                        });
                    }
                }
                ToolMode::Magnify => candidates.push(HitCandidate {
                    area: InteractionArea::Special,
                    region: bounds,
                }),
                ToolMode::Text | ToolMode::Move | ToolMode::Note => {}
            }

            if self.temporary_mode.is_active() {
                candidates.push(HitCandidate {
                    area: InteractionArea::Temporary,
                    region: bounds,
                });
            }
        }

        Ok(resolve(&candidates))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{BarRegion, HitCandidate, InteractionArea, ResizeHandle, resolve};
    use crate::annotation::AnnotationId;

    #[test]
    fn resize_beats_overlapping_drag() {
        let candidates = [
            HitCandidate {
                area: InteractionArea::Drag(AnnotationId(1)),
                region: Rect::new(0.0, 0.0, 4.0, 4.0),
            },
            HitCandidate {
                area: InteractionArea::Resize(ResizeHandle::SouthEast),
                region: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
        ];
        assert_eq!(
            resolve(&candidates),
            Some(InteractionArea::Resize(ResizeHandle::SouthEast))
        );
    }

    #[test]
    fn ties_go_to_the_smallest_region() {
        let candidates = [
            HitCandidate {
                area: InteractionArea::Drag(AnnotationId(1)),
                region: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
            HitCandidate {
                area: InteractionArea::Drag(AnnotationId(2)),
                region: Rect::new(10.0, 10.0, 20.0, 20.0),
            },
            HitCandidate {
                area: InteractionArea::ReadingBar(BarRegion::Body),
                region: Rect::new(0.0, 0.0, 500.0, 14.0),
            },
            HitCandidate {
                area: InteractionArea::ReadingBar(BarRegion::TopEdge),
                region: Rect::new(0.0, -3.0, 500.0, 3.0),
            },
        ];
        assert_eq!(
            resolve(&candidates),
            Some(InteractionArea::ReadingBar(BarRegion::TopEdge))
        );
        assert_eq!(
            resolve(&candidates[..2]),
            Some(InteractionArea::Drag(AnnotationId(2)))
        );
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn handles_move_their_own_edges() {
        let rect = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(ResizeHandle::North.anchor(rect), Point::new(30.0, 10.0));
        assert_eq!(
            ResizeHandle::SouthEast.apply(rect, Point::new(80.0, 70.0)),
            Rect::new(10.0, 10.0, 80.0, 70.0)
        );
        assert_eq!(
            ResizeHandle::West.apply(rect, Point::new(60.0, 0.0)),
            Rect::new(50.0, 10.0, 60.0, 50.0)
        );
    }
}
