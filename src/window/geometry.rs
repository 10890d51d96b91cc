use super::{FloatRect, HalfSide, MaximizeMode, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeZone {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeZone {
    fn moves_left_edge(self) -> bool {
        matches!(
            self,
            ResizeZone::Left | ResizeZone::TopLeft | ResizeZone::BottomLeft
        )
    }

    fn moves_right_edge(self) -> bool {
        matches!(
            self,
            ResizeZone::Right | ResizeZone::TopRight | ResizeZone::BottomRight
        )
    }

    fn moves_top_edge(self) -> bool {
        matches!(
            self,
            ResizeZone::Top | ResizeZone::TopLeft | ResizeZone::TopRight
        )
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(
            self,
            ResizeZone::Bottom | ResizeZone::BottomLeft | ResizeZone::BottomRight
        )
    }

    pub fn is_resize(self) -> bool {
        self != ResizeZone::None
    }
}

/// Classify `point` against the border bands of `rect`.
///
/// Points outside the window, and every point of a window that is not
/// resizable, fall in [`ResizeZone::None`]. On windows narrower than two
/// insets the left/top band wins.
pub fn zone_at(rect: FloatRect, point: Point, inset: u16, resizable: bool) -> ResizeZone {
    if !resizable || inset == 0 || !rect.contains(point) {
        return ResizeZone::None;
    }
    let inset = inset as i32;
    let left = point.x - rect.x < inset;
    let right = !left && rect.right() - 1 - point.x < inset;
    let top = point.y - rect.y < inset;
    let bottom = !top && rect.bottom() - 1 - point.y < inset;
    match (left, right, top, bottom) {
        (true, _, true, _) => ResizeZone::TopLeft,
        (_, true, true, _) => ResizeZone::TopRight,
        (true, _, _, true) => ResizeZone::BottomLeft,
        (_, true, _, true) => ResizeZone::BottomRight,
        (true, _, _, _) => ResizeZone::Left,
        (_, true, _, _) => ResizeZone::Right,
        (_, _, true, _) => ResizeZone::Top,
        (_, _, _, true) => ResizeZone::Bottom,
        _ => ResizeZone::None,
    }
}

/// Resize `start` along the axes of `zone` by the pointer displacement
/// `(dx, dy)`. Shrinking below `min` is clamped, keeping the opposite edge
/// fixed. Edge math runs in `i64` so extreme displacements saturate instead
/// of overflowing.
pub fn apply_resize(start: FloatRect, zone: ResizeZone, dx: i32, dy: i32, min: Size) -> FloatRect {
    let (dx, dy) = (i64::from(dx), i64::from(dy));
    let mut x = i64::from(start.x);
    let mut y = i64::from(start.y);
    let mut width = i64::from(start.width);
    let mut height = i64::from(start.height);

    if zone.moves_left_edge() {
        x += dx;
        width -= dx;
    } else if zone.moves_right_edge() {
        width += dx;
    }
    if zone.moves_top_edge() {
        y += dy;
        height -= dy;
    } else if zone.moves_bottom_edge() {
        height += dy;
    }

    let min_w = i64::from(min.width.max(1));
    let min_h = i64::from(min.height.max(1));
    if width < min_w {
        if zone.moves_left_edge() {
            x -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if zone.moves_top_edge() {
            y -= min_h - height;
        }
        height = min_h;
    }

    let max_dim = i64::from(u16::MAX);
    if width > max_dim {
        if zone.moves_left_edge() {
            x += width - max_dim;
        }
        width = max_dim;
    }
    if height > max_dim {
        if zone.moves_top_edge() {
            y += height - max_dim;
        }
        height = max_dim;
    }

    FloatRect {
        x: saturate_i32(x),
        y: saturate_i32(y),
        width: width as u16,
        height: height as u16,
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Translate `start` by `(dx, dy)` and pull it back so at least `margin`
/// pixels of it stay inside `screen` horizontally and vertically. The top
/// edge never rises above the screen so the title area stays reachable.
///
/// Returns `None` when `screen` is empty: without bounds there is no
/// position that is known to stay visible.
pub fn apply_move(
    start: FloatRect,
    dx: i32,
    dy: i32,
    screen: FloatRect,
    margin: u16,
) -> Option<Point> {
    if screen.width == 0 || screen.height == 0 {
        return None;
    }
    let x = i64::from(start.x) + i64::from(dx);
    let y = i64::from(start.y) + i64::from(dy);

    let visible_w = i64::from(margin.min(start.width).max(1));
    let visible_h = i64::from(margin.min(start.height).max(1));

    let min_x = i64::from(screen.x) - (i64::from(start.width) - visible_w);
    let max_x = (i64::from(screen.right()) - visible_w).max(min_x);
    let min_y = i64::from(screen.y);
    let max_y = (i64::from(screen.bottom()) - visible_h).max(min_y);

    Some(Point::new(
        saturate_i32(x.clamp(min_x, max_x)),
        saturate_i32(y.clamp(min_y, max_y)),
    ))
}

/// Maximize request implied by releasing a move drag at `pointer`, if the
/// pointer sits inside a snap band of `screen`.
pub fn snap_target(pointer: Point, screen: FloatRect, band: u16) -> Option<MaximizeMode> {
    if band == 0 || screen.width == 0 || screen.height == 0 {
        return None;
    }
    let band = i32::from(band);
    if pointer.y < screen.y.saturating_add(band) {
        Some(MaximizeMode::Maximize)
    } else if pointer.x < screen.x.saturating_add(band) {
        Some(MaximizeMode::HalfMaximize(HalfSide::Left))
    } else if pointer.x >= screen.right().saturating_sub(band) {
        Some(MaximizeMode::HalfMaximize(HalfSide::Right))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIN: FloatRect = FloatRect::new(100, 100, 400, 300);

    #[test]
    fn zone_detection_corners_and_edges() {
        assert_eq!(zone_at(WIN, Point::new(100, 100), 6, true), ResizeZone::TopLeft);
        assert_eq!(zone_at(WIN, Point::new(499, 100), 6, true), ResizeZone::TopRight);
        assert_eq!(
            zone_at(WIN, Point::new(100, 399), 6, true),
            ResizeZone::BottomLeft
        );
        assert_eq!(
            zone_at(WIN, Point::new(499, 399), 6, true),
            ResizeZone::BottomRight
        );
        assert_eq!(zone_at(WIN, Point::new(103, 250), 6, true), ResizeZone::Left);
        assert_eq!(zone_at(WIN, Point::new(300, 396), 6, true), ResizeZone::Bottom);
        assert_eq!(zone_at(WIN, Point::new(300, 250), 6, true), ResizeZone::None);
    }

    #[test]
    fn zone_none_outside_or_not_resizable() {
        assert_eq!(zone_at(WIN, Point::new(300, 400), 6, true), ResizeZone::None);
        assert_eq!(zone_at(WIN, Point::new(100, 100), 6, false), ResizeZone::None);
        assert_eq!(zone_at(WIN, Point::new(100, 100), 0, true), ResizeZone::None);
    }

    #[test]
    fn resize_top_left_moves_origin() {
        let res = apply_resize(WIN, ResizeZone::TopLeft, 50, 40, Size::new(200, 150));
        assert_eq!(res, FloatRect::new(150, 140, 350, 260));
    }

    #[test]
    fn resize_bottom_right_keeps_origin() {
        let res = apply_resize(WIN, ResizeZone::BottomRight, 25, -10, Size::new(1, 1));
        assert_eq!(res, FloatRect::new(100, 100, 425, 290));
    }

    #[test]
    fn resize_single_axis_ignores_other_delta() {
        let res = apply_resize(WIN, ResizeZone::Left, 30, 77, Size::new(1, 1));
        assert_eq!(res, FloatRect::new(130, 100, 370, 300));
        let res = apply_resize(WIN, ResizeZone::Bottom, 77, 30, Size::new(1, 1));
        assert_eq!(res, FloatRect::new(100, 100, 400, 330));
    }

    #[test]
    fn resize_clamps_to_minimum_and_pins_opposite_edge() {
        let res = apply_resize(WIN, ResizeZone::TopLeft, 1000, 1000, Size::new(200, 150));
        assert_eq!(res, FloatRect::new(300, 250, 200, 150));
        assert_eq!(res.right(), WIN.right());
        assert_eq!(res.bottom(), WIN.bottom());
    }

    const SCREEN: FloatRect = FloatRect::new(0, 0, 1920, 1080);

    #[test]
    fn resize_survives_extreme_displacement() {
        let res = apply_resize(WIN, ResizeZone::Left, i32::MIN, 0, Size::new(200, 150));
        assert_eq!(res.width, u16::MAX);
        assert_eq!(res.right(), WIN.right());
        let res = apply_resize(WIN, ResizeZone::Left, i32::MAX, 0, Size::new(200, 150));
        assert_eq!(res, FloatRect::new(300, 100, 200, 300));
        let res = apply_resize(
            WIN,
            ResizeZone::BottomRight,
            i32::MAX,
            i32::MIN,
            Size::new(200, 150),
        );
        assert_eq!(res, FloatRect::new(100, 100, u16::MAX, 150));
    }

    #[test]
    fn move_clamps_to_visible_margin() {
        let p = apply_move(WIN, -9999, -9999, SCREEN, 24);
        assert_eq!(p, Some(Point::new(-(400 - 24), 0)));
        let p = apply_move(WIN, 9999, 9999, SCREEN, 24);
        assert_eq!(p, Some(Point::new(1920 - 24, 1080 - 24)));
        let p = apply_move(WIN, i32::MIN, i32::MAX, SCREEN, 24);
        assert_eq!(p, Some(Point::new(-(400 - 24), 1080 - 24)));
    }

    #[test]
    fn move_on_screen_left_of_primary() {
        let left_head = FloatRect::new(-1280, -200, 1280, 1024);
        let p = apply_move(WIN, -5000, -5000, left_head, 24);
        assert_eq!(p, Some(Point::new(-1280 - (400 - 24), -200)));
    }

    #[test]
    fn move_without_screen_is_refused() {
        assert_eq!(apply_move(WIN, -9999, 5, FloatRect::default(), 24), None);
    }

    #[test]
    fn snap_bands() {
        let screen = SCREEN;
        assert_eq!(
            snap_target(Point::new(900, 0), screen, 2),
            Some(MaximizeMode::Maximize)
        );
        assert_eq!(
            snap_target(Point::new(1, 500), screen, 2),
            Some(MaximizeMode::HalfMaximize(HalfSide::Left))
        );
        assert_eq!(
            snap_target(Point::new(1919, 500), screen, 2),
            Some(MaximizeMode::HalfMaximize(HalfSide::Right))
        );
        assert_eq!(snap_target(Point::new(900, 500), screen, 2), None);
    }
}
