//! Pointer-driven move and resize gestures.
//!
//! A session records where the gesture started; every pointer update
//! recomputes the rect from that start so rounding and clamping never
//! accumulate. The result is written through [`WindowManager::move_window`]
//! or [`WindowManager::resize_window`].

use super::{WindowId, WindowManager, WindowState};
use crate::geometry::{
    Bounds, Point, Rect, ResizeDirection, Size, SnapGuides, clamp_rect_position,
    move_rect_within_bounds, resize_rect_with_window_snap, resize_rect_within_bounds,
    snap_rect_to_other_rects_with_guides,
};
use crate::options::WmOptions;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDrag {
    pub window_id: WindowId,
    pub start_pointer: Point,
    pub start_rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub window_id: WindowId,
    pub direction: ResizeDirection,
    pub start_pointer: Point,
    pub start_rect: Rect,
}

/// An in-progress gesture on one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSession {
    Move(MoveDrag),
    Resize(ResizeDrag),
}

impl DragSession {
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, DragSession::Move(_))
    }

    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragSession::Resize(_))
    }

    pub fn window_id(&self) -> WindowId {
        match self {
            DragSession::Move(drag) => drag.window_id,
            DragSession::Resize(drag) => drag.window_id,
        }
    }
}

fn delta(from: Point, to: Point) -> (f64, f64) {
    (to.x - from.x, to.y - from.y)
}

fn fits(rect: Rect, bounds: Bounds, opts: &WmOptions) -> bool {
    if rect.w < opts.min_width || rect.h < opts.min_height {
        return false;
    }
    !bounds.is_constrained()
        || (rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= bounds.w && rect.bottom() <= bounds.h)
}

impl<C: 'static, M: Clone + 'static> WindowManager<C, M> {
    /// Start dragging a window by its title bar.
    ///
    /// Refused while the surface is locked, for windows that are not
    /// movable, and for maximized windows.
    pub fn begin_move_drag(
        &self,
        id: WindowId,
        pointer: Point,
        opts: &WmOptions,
    ) -> Option<DragSession> {
        let window = self.get(id)?;
        if opts.locked || !window.flags.movable || window.state == WindowState::Maximized {
            tracing::debug!(window_id = %id, "move drag refused");
            return None;
        }
        Some(DragSession::Move(MoveDrag {
            window_id: id,
            start_pointer: pointer,
            start_rect: window.rect,
        }))
    }

    /// Start dragging the given edges of a window. Collapsed windows have no
    /// body to resize and are refused along with locked, fixed-size and
    /// maximized ones.
    pub fn begin_resize_drag(
        &self,
        id: WindowId,
        direction: ResizeDirection,
        pointer: Point,
        opts: &WmOptions,
    ) -> Option<DragSession> {
        let window = self.get(id)?;
        if opts.locked || !window.flags.resizable || window.state != WindowState::Open {
            tracing::debug!(window_id = %id, %direction, "resize drag refused");
            return None;
        }
        Some(DragSession::Resize(ResizeDrag {
            window_id: id,
            direction,
            start_pointer: pointer,
            start_rect: window.rect,
        }))
    }

    /// Apply the pointer's current position to a session.
    ///
    /// Returns `None` when nothing was applied (the window is gone, was
    /// maximized mid-gesture, or the surface got locked). Otherwise returns
    /// the alignment guides to draw, which are always empty unless
    /// `show_guides` is set.
    pub fn update_drag(
        &mut self,
        session: &DragSession,
        pointer: Point,
        bounds: Bounds,
        opts: &WmOptions,
    ) -> Option<SnapGuides> {
        if opts.locked {
            return None;
        }
        let state = self.get(session.window_id())?.state;
        if state == WindowState::Maximized {
            return None;
        }

        let guides = match session {
            DragSession::Move(drag) => self.apply_move(drag, pointer, bounds, opts, state),
            DragSession::Resize(drag) => self.apply_resize(drag, pointer, bounds, opts),
        };
        Some(if opts.show_guides {
            guides
        } else {
            SnapGuides::default()
        })
    }

    fn apply_move(
        &mut self,
        drag: &MoveDrag,
        pointer: Point,
        bounds: Bounds,
        opts: &WmOptions,
        state: WindowState,
    ) -> SnapGuides {
        let (dx, dy) = delta(drag.start_pointer, pointer);
        let effective = (state == WindowState::Minimized)
            .then(|| Size::new(drag.start_rect.w, opts.title_bar_height));
        let mut rect = move_rect_within_bounds(
            drag.start_rect,
            dx,
            dy,
            bounds,
            &opts.move_options(effective),
        );

        let mut guides = SnapGuides::default();
        if opts.snap_to_windows {
            let targets = self.sibling_rects(drag.window_id);
            let (snapped, found) =
                snap_rect_to_other_rects_with_guides(rect, &targets, opts.window_snap_px);
            let clamped = clamp_rect_position(snapped, bounds, effective);
            // a guide only holds if the clamp left that axis where it snapped
            guides.x = found.x.filter(|_| clamped.x == snapped.x);
            guides.y = found.y.filter(|_| clamped.y == snapped.y);
            rect = clamped;
        }

        self.move_window(drag.window_id, rect);
        guides
    }

    fn apply_resize(
        &mut self,
        drag: &ResizeDrag,
        pointer: Point,
        bounds: Bounds,
        opts: &WmOptions,
    ) -> SnapGuides {
        let (dx, dy) = delta(drag.start_pointer, pointer);
        let mut rect = resize_rect_within_bounds(
            drag.start_rect,
            dx,
            dy,
            drag.direction,
            bounds,
            &opts.resize_options(),
        );

        let mut guides = SnapGuides::default();
        if opts.snap_to_windows {
            let targets = self.sibling_rects(drag.window_id);
            let (snapped, found) =
                resize_rect_with_window_snap(rect, drag.direction, &targets, opts.window_snap_px);
            if fits(snapped, bounds, opts) {
                rect = snapped;
                guides = found;
            }
        }

        self.resize_window(drag.window_id, rect);
        guides
    }
}
