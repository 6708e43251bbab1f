//! Shared crate-wide constants.

use crate::geometry::Rect;
use crate::window::WindowFlags;

/// Height of a window title bar in logical units. A collapsed window keeps
/// only this much of its footprint, so drags clamp against it.
pub const TITLE_BAR_HEIGHT: f64 = 28.0;

/// Distance from the container edge within which a dragged window snaps
/// flush against that edge.
///
/// Units: logical pixels. Comparisons are inclusive (`<=`).
pub const EDGE_SNAP_PX: f64 = 8.0;

/// Distance within which a dragged edge aligns with an edge of a sibling
/// window.
///
/// Units: logical pixels. Comparisons are inclusive (`<=`).
pub const WINDOW_SNAP_PX: f64 = 8.0;

/// Spacing of the snapping grid. Grid sizes of 1 or less disable grid
/// snapping entirely.
pub const GRID_SIZE_PX: f64 = 16.0;

/// Minimum window width enforced by interactive resizes.
pub const MIN_WINDOW_WIDTH: f64 = 320.0;

/// Minimum window height enforced by interactive resizes.
pub const MIN_WINDOW_HEIGHT: f64 = 240.0;

/// Geometry used for any field a caller leaves out when opening a window.
pub const DEFAULT_RECT: Rect = Rect {
    x: 40.0,
    y: 40.0,
    w: 480.0,
    h: 320.0,
};

/// Capabilities granted to a window unless the caller overrides them.
/// `is_blocking_window` is derived from the layer at open time instead.
pub const DEFAULT_FLAGS: WindowFlags = WindowFlags {
    movable: true,
    resizable: true,
    closable: true,
    minimizable: true,
    maximizable: true,
    close_on_esc: false,
    close_on_backdrop: false,
    is_blocking_window: false,
};
