use vitae_protocol::{Bounds, Point, Rect, Size};

/// Whether a viewport-relative rectangle lies entirely inside the viewport.
pub fn is_in_viewport(rect: &Rect, viewport: Size) -> bool {
    rect.x >= 0.0 && rect.y >= 0.0 && rect.bottom() <= viewport.height && rect.right() <= viewport.width
}

/// Convert a viewport-relative rectangle into document coordinates.
pub fn document_position(rect: &Rect, scroll: Point) -> Rect {
    Rect::new(rect.x + scroll.x, rect.y + scroll.y, rect.w, rect.h)
}

/// Fraction of an element's height visible in the (margin-adjusted)
/// viewport, in `0.0..=1.0`.
///
/// `root_margin_bottom` grows (positive) or shrinks (negative) the bottom
/// edge of the viewport, like an intersection observer's `rootMargin`.
/// Zero-height elements report 1.0 when they sit inside the viewport.
pub fn intersection_ratio(
    element: Bounds,
    scroll_y: f64,
    viewport_height: f64,
    root_margin_bottom: f64,
) -> f64 {
    let view_top = scroll_y;
    let view_bottom = scroll_y + viewport_height + root_margin_bottom;
    if view_bottom <= view_top {
        return 0.0;
    }
    if element.height <= 0.0 {
        return if element.top >= view_top && element.top <= view_bottom {
            1.0
        } else {
            0.0
        };
    }
    let visible = element.bottom().min(view_bottom) - element.top.max(view_top);
    (visible / element.height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_containment() {
        let vp = Size::new(800.0, 600.0);
        assert!(is_in_viewport(&Rect::new(0.0, 0.0, 800.0, 600.0), vp));
        assert!(!is_in_viewport(&Rect::new(-1.0, 10.0, 10.0, 10.0), vp));
        assert!(!is_in_viewport(&Rect::new(10.0, 590.0, 10.0, 20.0), vp));
    }

    #[test]
    fn document_offsets() {
        let r = document_position(&Rect::new(10.0, 20.0, 5.0, 5.0), Point::new(0.0, 300.0));
        assert_eq!(r, Rect::new(10.0, 320.0, 5.0, 5.0));
    }

    #[test]
    fn ratio_honours_bottom_margin() {
        let el = Bounds::new(900.0, 200.0);
        // Viewport 0..1000 shrunk to 0..900: element just touches.
        assert_eq!(intersection_ratio(el, 0.0, 1000.0, -100.0), 0.0);
        // Scrolled by 100: 1000 visible bottom, 100px of the element.
        assert!((intersection_ratio(el, 100.0, 1000.0, -100.0) - 0.5).abs() < 1e-9);
        assert_eq!(intersection_ratio(el, 900.0, 1000.0, -100.0), 1.0);
        assert_eq!(intersection_ratio(el, 2000.0, 1000.0, -100.0), 0.0);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(intersection_ratio(Bounds::new(10.0, 0.0), 0.0, 100.0, 0.0), 1.0);
        assert_eq!(intersection_ratio(Bounds::new(10.0, 50.0), 0.0, 50.0, -80.0), 0.0);
    }
}
