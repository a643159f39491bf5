//! Center-anchored window geometry.
//!
//! All coordinates are screen pixels. A resize is always applied to a single
//! axis and keeps the window's center on that axis where the work area allows.

/// Smallest extent (width or height) a resize may produce.
pub const MIN_EXTENT: i32 = 100;

/// Axis a wheel event resizes along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Width (left/right edges).
    Horizontal,
    /// Height (top/bottom edges).
    Vertical,
}

/// A one-dimensional interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

impl Span {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn extent(&self) -> i32 {
        self.end.saturating_sub(self.start)
    }
}

/// Rectangle in screen coordinates, edges as reported by the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// The interval this rectangle covers along `axis`.
    pub fn span(&self, axis: Axis) -> Span {
        match axis {
            Axis::Horizontal => Span::new(self.left, self.right),
            Axis::Vertical => Span::new(self.top, self.bottom),
        }
    }

    /// Replace the interval along `axis`, keeping the other axis.
    pub fn with_span(self, axis: Axis, span: Span) -> Self {
        match axis {
            Axis::Horizontal => Self {
                left: span.start,
                right: span.end,
                ..self
            },
            Axis::Vertical => Self {
                top: span.start,
                bottom: span.end,
                ..self
            },
        }
    }
}

/// Grow or shrink `current` by `increment` around its center, clamped to
/// `[work_start, work_end]`.
///
/// Returns `current` unchanged when the result would be smaller than
/// `min_extent`, either before or after clamping. When the grown span would
/// cross `work_start` its start is pinned there; when it would cross `work_end`
/// the extent is cut instead, so the start stays where it landed.
pub fn resize_axis(
    current: Span,
    increment: i32,
    work_start: i32,
    work_end: i32,
    min_extent: i32,
) -> Span {
    let extent = current.extent();
    let mut new_extent = extent.saturating_add(increment);
    if new_extent < min_extent {
        return current;
    }

    let center = current.start.saturating_add(extent / 2);
    let mut new_start = center.saturating_sub(new_extent / 2);

    if new_start < work_start {
        new_start = work_start;
    }
    if new_start.saturating_add(new_extent) > work_end {
        new_extent = work_end.saturating_sub(new_start);
    }

    if new_extent < min_extent {
        return current;
    }

    Span::new(new_start, new_start.saturating_add(new_extent))
}

/// Apply [`resize_axis`] to one axis of `rect`, using the matching edges of
/// `work_area` as bounds and [`MIN_EXTENT`] as the floor.
pub fn resize_rect(rect: Rect, axis: Axis, increment: i32, work_area: Rect) -> Rect {
    let bounds = work_area.span(axis);
    let span = resize_axis(
        rect.span(axis),
        increment,
        bounds.start,
        bounds.end,
        MIN_EXTENT,
    );
    rect.with_span(axis, span)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_grow_width_keeps_center() {
        let rect = Rect::new(100, 100, 500, 400);
        let resized = resize_rect(rect, Axis::Horizontal, 50, SCREEN);
        assert_eq!(resized, Rect::new(75, 100, 525, 400));
        assert_eq!(resized.left + resized.width() / 2, 300);
    }

    #[test]
    fn test_shrink_below_minimum_is_noop() {
        let rect = Rect::new(100, 100, 500, 400);
        assert_eq!(resize_rect(rect, Axis::Horizontal, -350, SCREEN), rect);
    }

    #[test]
    fn test_clamped_to_left_edge() {
        let rect = Rect::new(-20, 100, 180, 400);
        let resized = resize_rect(rect, Axis::Horizontal, 40, SCREEN);
        assert_eq!(resized.left, 0);
        assert_eq!(resized.width(), 240);
        assert_eq!(resized.top, 100);
        assert_eq!(resized.bottom, 400);
    }

    #[test]
    fn test_clamped_to_right_edge_cuts_extent() {
        let span = resize_axis(Span::new(1700, 1900), 100, 0, 1920, MIN_EXTENT);
        // center 1800, start 1800 - 150 = 1650, end would be 1950
        assert_eq!(span, Span::new(1650, 1920));
    }

    #[test]
    fn test_post_clamp_minimum_is_noop() {
        // Start is pinned at 0 and a 60px work area leaves no room.
        let current = Span::new(0, 120);
        assert_eq!(resize_axis(current, 10, 0, 60, MIN_EXTENT), current);
    }

    #[test]
    fn test_vertical_only_touches_height() {
        let rect = Rect::new(100, 100, 500, 400);
        let resized = resize_rect(rect, Axis::Vertical, 20, SCREEN);
        assert_eq!(resized, Rect::new(100, 90, 500, 410));
    }

    #[test]
    fn test_opposite_increments_restore_size() {
        for rect in [Rect::new(100, 100, 500, 400), Rect::new(100, 100, 501, 401)] {
            let grown = resize_rect(rect, Axis::Horizontal, 10, SCREEN);
            let back = resize_rect(grown, Axis::Horizontal, -10, SCREEN);
            assert_eq!(back, rect);
        }
    }

    #[test]
    fn test_center_preserved_within_one_pixel() {
        let work = (-5000, 5000);
        for start in [-301, -7, 0, 13, 250] {
            for extent in [100, 101, 333, 640] {
                for increment in [-40, -1, 1, 7, 55] {
                    let current = Span::new(start, start + extent);
                    let out = resize_axis(current, increment, work.0, work.1, MIN_EXTENT);
                    if out == current {
                        continue;
                    }
                    let before = start + extent / 2;
                    let after = out.start + out.extent() / 2;
                    assert!((before - after).abs() <= 1, "{current:?} + {increment} -> {out:?}");
                }
            }
        }
    }

    #[test]
    fn test_result_stays_inside_work_area() {
        let (work_start, work_end) = (0, 1000);
        for start in [-50, 0, 400, 850, 950] {
            for increment in [-30, 10, 90, 400] {
                let current = Span::new(start, start + 150);
                let out = resize_axis(current, increment, work_start, work_end, MIN_EXTENT);
                if out == current {
                    continue;
                }
                assert!(out.extent() >= MIN_EXTENT);
                assert!(out.start >= work_start);
                assert!(out.end <= work_end);
            }
        }
    }
}
