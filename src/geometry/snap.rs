//! Window-to-window snapping.
//!
//! Each axis is solved independently. For a dragged rect and a sibling, the
//! four edge pairings on an axis (leading/trailing against leading/trailing)
//! are candidate deltas; the smallest one within the threshold wins. Ties keep
//! whichever candidate was seen first, iterating siblings in the order given.

use super::{Rect, ResizeDirection, SnapGuides};

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSnap {
    delta: f64,
    guide: f64,
}

/// Best alignment of the span `[moving_a, moving_b]` onto the edges of
/// `[target_a, target_b]`.
fn best_snap_1d(
    moving_a: f64,
    moving_b: f64,
    target_a: f64,
    target_b: f64,
    snap_px: f64,
) -> Option<AxisSnap> {
    let candidates = [
        (target_a - moving_a, target_a),
        (target_b - moving_a, target_b),
        (target_a - moving_b, target_a),
        (target_b - moving_b, target_b),
    ];
    best_of(candidates.into_iter(), snap_px)
}

/// Strictly smaller magnitude replaces the current best, so the first
/// minimal candidate survives a tie.
fn best_of(candidates: impl Iterator<Item = (f64, f64)>, snap_px: f64) -> Option<AxisSnap> {
    let mut best: Option<AxisSnap> = None;
    let mut best_abs = f64::INFINITY;
    for (delta, guide) in candidates {
        let abs = delta.abs();
        if abs <= snap_px && abs < best_abs {
            best_abs = abs;
            best = Some(AxisSnap { delta, guide });
        }
    }
    best
}

fn snap_axes(rect: Rect, targets: &[Rect], snap_px: f64) -> (Option<AxisSnap>, Option<AxisSnap>) {
    let x_candidates = targets.iter().filter_map(|t| {
        best_snap_1d(rect.x, rect.right(), t.x, t.right(), snap_px).map(|s| (s.delta, s.guide))
    });
    let best_x = best_of(x_candidates, snap_px);

    let y_candidates = targets.iter().filter_map(|t| {
        best_snap_1d(rect.y, rect.bottom(), t.y, t.bottom(), snap_px).map(|s| (s.delta, s.guide))
    });
    let best_y = best_of(y_candidates, snap_px);

    (best_x, best_y)
}

/// Translate `rect` so its edges align with the nearest sibling edges within
/// `snap_px`. Size is never changed.
pub fn snap_rect_to_other_rects(rect: Rect, targets: &[Rect], snap_px: f64) -> Rect {
    snap_rect_to_other_rects_with_guides(rect, targets, snap_px).0
}

/// Like [`snap_rect_to_other_rects`], also reporting the sibling coordinate
/// each axis snapped to.
pub fn snap_rect_to_other_rects_with_guides(
    rect: Rect,
    targets: &[Rect],
    snap_px: f64,
) -> (Rect, SnapGuides) {
    if targets.is_empty() {
        return (rect, SnapGuides::default());
    }
    let (best_x, best_y) = snap_axes(rect, targets, snap_px);
    let snapped = Rect {
        x: best_x.map_or(rect.x, |s| rect.x + s.delta),
        y: best_y.map_or(rect.y, |s| rect.y + s.delta),
        ..rect
    };
    let guides = SnapGuides {
        x: best_x.map(|s| s.guide),
        y: best_y.map(|s| s.guide),
    };
    (snapped, guides)
}

fn best_edge_snap(value: f64, edges: &[f64], snap_px: f64) -> Option<AxisSnap> {
    best_of(edges.iter().map(|&edge| (edge - value, edge)), snap_px)
}

/// Snap only the edges named in `direction` to sibling edges.
///
/// Every sibling edge on an axis is a candidate regardless of where the
/// sibling sits on the other axis. When a leading edge (west or north)
/// snaps, the opposite edge stays fixed and the size absorbs the change.
pub fn resize_rect_with_window_snap(
    rect: Rect,
    direction: ResizeDirection,
    targets: &[Rect],
    snap_px: f64,
) -> (Rect, SnapGuides) {
    if targets.is_empty() {
        return (rect, SnapGuides::default());
    }

    let x_edges: Vec<f64> = targets.iter().flat_map(|t| [t.x, t.right()]).collect();
    let y_edges: Vec<f64> = targets.iter().flat_map(|t| [t.y, t.bottom()]).collect();

    let Rect {
        mut x,
        mut y,
        mut w,
        mut h,
    } = rect;
    let left = rect.x;
    let right = rect.right();
    let top = rect.y;
    let bottom = rect.bottom();
    let mut guides = SnapGuides::default();

    if direction.moves_east()
        && let Some(snap) = best_edge_snap(right, &x_edges, snap_px)
    {
        w = right + snap.delta - x;
        guides.x = Some(snap.guide);
    }
    if direction.moves_west()
        && let Some(snap) = best_edge_snap(left, &x_edges, snap_px)
    {
        x = left + snap.delta;
        w = right - x;
        guides.x = Some(snap.guide);
    }
    if direction.moves_south()
        && let Some(snap) = best_edge_snap(bottom, &y_edges, snap_px)
    {
        h = bottom + snap.delta - y;
        guides.y = Some(snap.guide);
    }
    if direction.moves_north()
        && let Some(snap) = best_edge_snap(top, &y_edges, snap_px)
    {
        y = top + snap.delta;
        h = bottom - y;
        guides.y = Some(snap.guide);
    }

    (Rect { x, y, w, h }, guides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_targets_is_identity() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(snap_rect_to_other_rects(rect, &[], 8.0), rect);
        let (r, g) = resize_rect_with_window_snap(rect, ResizeDirection::SE, &[], 8.0);
        assert_eq!(r, rect);
        assert!(g.is_empty());
    }

    #[test]
    fn snaps_left_edge_to_sibling_right_edge() {
        let sibling = Rect::new(0.0, 0.0, 200.0, 200.0);
        let moving = Rect::new(205.0, 300.0, 100.0, 100.0);
        let (res, guides) = snap_rect_to_other_rects_with_guides(moving, &[sibling], 8.0);
        assert_eq!(res, Rect::new(200.0, 300.0, 100.0, 100.0));
        assert_eq!(guides.x, Some(200.0));
        // 100 away from the sibling's bottom edge on Y: no vertical snap
        assert_eq!(guides.y, None);
    }

    #[test]
    fn smallest_delta_wins_across_targets() {
        let far = Rect::new(0.0, 0.0, 106.0, 50.0);
        let near = Rect::new(0.0, 500.0, 102.0, 50.0);
        let moving = Rect::new(100.0, 200.0, 50.0, 50.0);
        let (res, guides) = snap_rect_to_other_rects_with_guides(moving, &[far, near], 8.0);
        assert_eq!(res.x, 102.0);
        assert_eq!(guides.x, Some(102.0));
    }

    #[test]
    fn ties_keep_first_target() {
        let a = Rect::new(0.0, 0.0, 96.0, 10.0);
        let b = Rect::new(0.0, 500.0, 104.0, 10.0);
        let moving = Rect::new(100.0, 200.0, 50.0, 50.0);
        let (res, guides) = snap_rect_to_other_rects_with_guides(moving, &[a, b], 8.0);
        assert_eq!(res.x, 96.0);
        assert_eq!(guides.x, Some(96.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        let sibling = Rect::new(0.0, 0.0, 100.0, 100.0);
        let at = Rect::new(108.0, 400.0, 10.0, 10.0);
        let past = Rect::new(109.0, 400.0, 10.0, 10.0);
        assert_eq!(snap_rect_to_other_rects(at, &[sibling], 8.0).x, 100.0);
        assert_eq!(snap_rect_to_other_rects(past, &[sibling], 8.0).x, 109.0);
    }

    #[test]
    fn resize_snap_moves_only_dragged_edges() {
        let sibling = Rect::new(300.0, 0.0, 100.0, 100.0);
        let rect = Rect::new(0.0, 0.0, 296.0, 150.0);
        let (res, guides) = resize_rect_with_window_snap(rect, ResizeDirection::E, &[sibling], 8.0);
        assert_eq!(res, Rect::new(0.0, 0.0, 300.0, 150.0));
        assert_eq!(guides.x, Some(300.0));
        assert_eq!(guides.y, None);

        // dragging south only: the nearby east edge is ignored
        let (res, guides) = resize_rect_with_window_snap(rect, ResizeDirection::S, &[sibling], 8.0);
        assert_eq!(res.w, 296.0);
        assert_eq!(guides.x, None);
        assert_eq!(res.h, 150.0);
    }

    #[test]
    fn resize_snap_west_keeps_right_edge_fixed() {
        let sibling = Rect::new(0.0, 500.0, 100.0, 10.0);
        let rect = Rect::new(95.0, 0.0, 200.0, 100.0);
        let (res, guides) = resize_rect_with_window_snap(rect, ResizeDirection::NW, &[sibling], 8.0);
        assert_eq!(res.x, 100.0);
        assert_eq!(res.right(), 295.0);
        assert_eq!(guides.x, Some(100.0));
        // sibling edges on Y are 500 and 510, far from the top edge
        assert_eq!(guides.y, None);
    }

    #[test]
    fn resize_snap_vertical_edges() {
        let sibling = Rect::new(500.0, 0.0, 100.0, 100.0);

        let rect = Rect::new(0.0, 20.0, 200.0, 74.0);
        let (res, guides) = resize_rect_with_window_snap(rect, ResizeDirection::S, &[sibling], 8.0);
        assert_eq!(res, Rect::new(0.0, 20.0, 200.0, 80.0));
        assert_eq!(guides.y, Some(100.0));
        assert_eq!(guides.x, None);

        let rect = Rect::new(0.0, 104.0, 200.0, 100.0);
        let (res, guides) = resize_rect_with_window_snap(rect, ResizeDirection::N, &[sibling], 8.0);
        assert_eq!(res, Rect::new(0.0, 100.0, 200.0, 104.0));
        assert_eq!(res.bottom(), 204.0);
        assert_eq!(guides.y, Some(100.0));
    }
}
