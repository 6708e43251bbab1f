use super::{Bounds, Rect, ResizeDirection, Size, snap_to_grid};
use crate::constants::{EDGE_SNAP_PX, GRID_SIZE_PX, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::utils::clamp;

/// Tuning for [`move_rect_within_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOptions {
    pub edge_snap_px: f64,
    /// Footprint used for clamping instead of the rect's own size, e.g. just
    /// the title bar of a collapsed window.
    pub effective_size: Option<Size>,
    pub grid_size: f64,
    pub enable_edge_snap: bool,
    pub enable_grid_snap: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            edge_snap_px: EDGE_SNAP_PX,
            effective_size: None,
            grid_size: GRID_SIZE_PX,
            enable_edge_snap: true,
            enable_grid_snap: false,
        }
    }
}

/// Tuning for [`resize_rect_within_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    pub min_width: f64,
    pub min_height: f64,
    pub grid_size: f64,
    pub enable_grid_snap: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
            grid_size: GRID_SIZE_PX,
            enable_grid_snap: false,
        }
    }
}

/// Translate `start` by `(dx, dy)` and keep it inside `bounds`.
///
/// Order matters: clamp, then edge snap, then grid snap, then clamp again.
/// The final clamp is authoritative so a grid step can never push the
/// window out of the container. Unconstrained bounds return the raw
/// translation. Width and height are never changed.
pub fn move_rect_within_bounds(
    start: Rect,
    dx: f64,
    dy: f64,
    bounds: Bounds,
    opts: &MoveOptions,
) -> Rect {
    let raw_x = start.x + dx;
    let raw_y = start.y + dy;

    if !bounds.is_constrained() {
        return Rect {
            x: raw_x,
            y: raw_y,
            ..start
        };
    }

    let footprint = opts.effective_size.unwrap_or(start.size());
    let max_x = (bounds.w - footprint.w).max(0.0);
    let max_y = (bounds.h - footprint.h).max(0.0);

    let mut x = clamp(raw_x, 0.0, max_x);
    let mut y = clamp(raw_y, 0.0, max_y);

    if opts.enable_edge_snap {
        let snap = opts.edge_snap_px;
        if x.abs() <= snap {
            x = 0.0;
        }
        if (x - max_x).abs() <= snap {
            x = max_x;
        }
        if y.abs() <= snap {
            y = 0.0;
        }
        if (y - max_y).abs() <= snap {
            y = max_y;
        }
    }

    if opts.enable_grid_snap && opts.grid_size > 1.0 {
        x = clamp(snap_to_grid(x, opts.grid_size), 0.0, max_x);
        y = clamp(snap_to_grid(y, opts.grid_size), 0.0, max_y);
    }

    Rect { x, y, ..start }
}

/// Raise a size below `min` back to `min`. When the edge being dragged is
/// the leading one (west or north) the origin moves back by the deficit so
/// the opposite edge stays put.
fn enforce_min(origin: f64, len: f64, min: f64, leading_edge: bool) -> (f64, f64) {
    if len >= min {
        return (origin, len);
    }
    if leading_edge {
        (origin - (min - len), min)
    } else {
        (origin, min)
    }
}

/// Resize `start` by dragging the edges named in `direction` by `(dx, dy)`.
///
/// East and south grow with the delta; west and north move the origin and
/// shrink by it. Minimum size is enforced first, then optional grid snap of
/// only the moving edges (re-enforcing the minimum afterwards), and finally
/// the bounds clamp which trims any edge outside the container while still
/// honoring the minimum.
pub fn resize_rect_within_bounds(
    start: Rect,
    dx: f64,
    dy: f64,
    direction: ResizeDirection,
    bounds: Bounds,
    opts: &ResizeOptions,
) -> Rect {
    let mut x = start.x;
    let mut y = start.y;
    let mut w = start.w;
    let mut h = start.h;

    if direction.moves_east() {
        w = start.w + dx;
    }
    if direction.moves_south() {
        h = start.h + dy;
    }
    if direction.moves_west() {
        x = start.x + dx;
        w = start.w - dx;
    }
    if direction.moves_north() {
        y = start.y + dy;
        h = start.h - dy;
    }

    (x, w) = enforce_min(x, w, opts.min_width, direction.moves_west());
    (y, h) = enforce_min(y, h, opts.min_height, direction.moves_north());

    if opts.enable_grid_snap && opts.grid_size > 1.0 {
        let gs = opts.grid_size;
        let right = x + w;
        let bottom = y + h;

        if direction.moves_east() {
            w = snap_to_grid(right, gs) - x;
        }
        if direction.moves_west() {
            x = snap_to_grid(x, gs);
            w = right - x;
        }
        if direction.moves_south() {
            h = snap_to_grid(bottom, gs) - y;
        }
        if direction.moves_north() {
            y = snap_to_grid(y, gs);
            h = bottom - y;
        }

        (x, w) = enforce_min(x, w, opts.min_width, direction.moves_west());
        (y, h) = enforce_min(y, h, opts.min_height, direction.moves_north());
    }

    if bounds.is_constrained() {
        if x < 0.0 {
            if direction.moves_west() {
                w = (w + x).max(opts.min_width);
            }
            x = 0.0;
        }
        if y < 0.0 {
            if direction.moves_north() {
                h = (h + y).max(opts.min_height);
            }
            y = 0.0;
        }

        let max_w = opts.min_width.max(bounds.w - x);
        let max_h = opts.min_height.max(bounds.h - y);

        if w > max_w {
            if direction.moves_west() {
                x = (x + (w - max_w)).max(0.0);
            }
            w = max_w;
        }
        if h > max_h {
            if direction.moves_north() {
                y = (y + (h - max_h)).max(0.0);
            }
            h = max_h;
        }
    }

    Rect { x, y, w, h }
}

/// Clamp only the position of `rect` into `bounds`, leaving its size alone.
pub fn clamp_rect_position(rect: Rect, bounds: Bounds, effective_size: Option<Size>) -> Rect {
    if !bounds.is_constrained() {
        return rect;
    }
    let footprint = effective_size.unwrap_or(rect.size());
    let max_x = (bounds.w - footprint.w).max(0.0);
    let max_y = (bounds.h - footprint.h).max(0.0);
    Rect {
        x: clamp(rect.x, 0.0, max_x),
        y: clamp(rect.y, 0.0, max_y),
        ..rect
    }
}

/// Fit `rect` into `bounds` after the container itself changed size.
///
/// Size is raised to the minimum, the origin is kept where a minimum-sized
/// window would still fit, then the size is trimmed to what remains.
pub fn normalize_rect_within_bounds(
    rect: Rect,
    bounds: Bounds,
    min_width: f64,
    min_height: f64,
) -> Rect {
    let mut x = rect.x;
    let mut y = rect.y;
    let mut w = rect.w.max(min_width);
    let mut h = rect.h.max(min_height);

    if bounds.is_constrained() {
        x = clamp(x, 0.0, (bounds.w - min_width).max(0.0));
        y = clamp(y, 0.0, (bounds.h - min_height).max(0.0));
        let max_w = min_width.max(bounds.w - x);
        let max_h = min_height.max(bounds.h - y);
        w = clamp(w, min_width, max_w);
        h = clamp(h, min_height, max_h);
    }

    Rect { x, y, w, h }
}
