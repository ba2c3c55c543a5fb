use kurbo::{Point, Rect, Vec2};

pub(crate) fn clamp_point(point: Point, bounds: Rect) -> Point {
    Point::new(
        point.x.clamp(bounds.x0, bounds.x1),
        point.y.clamp(bounds.y0, bounds.y1),
    )
}

/// Normalized rectangle spanned by a drag from `anchor` to `point`.
pub(crate) fn drag_rect(anchor: Point, point: Point) -> Rect {
    Rect::from_points(anchor, point)
}

/// Smallest translation that keeps `rect` inside `bounds`.
///
/// A rectangle larger than `bounds` is pinned to the top-left corner.
pub(crate) fn containing_offset(rect: Rect, bounds: Rect) -> Vec2 {
    fn axis(lo: f64, hi: f64, min: f64, max: f64) -> f64 {
        if hi - lo >= max - min || lo < min {
            min - lo
        } else if hi > max {
            max - hi
        } else {
            0.0
        }
    }
    Vec2::new(
        axis(rect.x0, rect.x1, bounds.x0, bounds.x1),
        axis(rect.y0, rect.y1, bounds.y0, bounds.y1),
    )
}

/// Square of half-side `radius` centred on `center`.
pub(crate) fn square_around(center: Point, radius: f64) -> Rect {
    Rect::from_center_size(center, (radius * 2.0, radius * 2.0))
}

pub(crate) fn area(rect: Rect) -> f64 {
    rect.width().abs() * rect.height().abs()
}

/// Maps `point` from `from` into `to`, scaling each axis that has extent.
pub(crate) fn remap_point(point: Point, from: Rect, to: Rect) -> Point {
    fn axis(value: f64, lo: f64, len: f64, new_lo: f64, new_len: f64) -> f64 {
        if len.abs() <= f64::EPSILON {
            new_lo + (value - lo)
        } else {
            new_lo + (value - lo) * new_len / len
        }
    }
    Point::new(
        axis(point.x, from.x0, from.width(), to.x0, to.width()),
        axis(point.y, from.y0, from.height(), to.y0, to.height()),
    )
}
