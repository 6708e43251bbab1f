use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use super::hooks::{NoHooks, WindowHooks};
use super::{CreateWindowInput, WindowId, WindowLayer, WindowRecord, WindowState};
use crate::geometry::{Bounds, Rect, normalize_rect_within_bounds};
use crate::utils::IdAllocator;

const BAND_COUNT: usize = WindowLayer::ALL.len();

/// Maximized windows own their geometry until restored.
fn write_rect<C, M>(
    windows: &mut BTreeMap<WindowId, WindowRecord<C, M>>,
    id: WindowId,
    rect: Rect,
) -> Option<&WindowRecord<C, M>> {
    let window = windows.get_mut(&id)?;
    if window.state == WindowState::Maximized {
        return None;
    }
    window.rect = rect;
    Some(window)
}

/// A close that has been started but not yet decided.
///
/// Returned by [`WindowManager::begin_close`]. The window stays fully usable
/// while the token is outstanding, except that further close attempts on the
/// same id are refused. The lock is released when the token goes away,
/// whether [`WindowManager::finish_close`] consumed it or it was dropped.
#[derive(Debug)]
#[must_use = "dropping a pending close abandons it"]
pub struct PendingClose<C, M = ()> {
    id: WindowId,
    snapshot: WindowRecord<C, M>,
    lock: Rc<Cell<bool>>,
}

impl<C, M> Drop for PendingClose<C, M> {
    fn drop(&mut self) {
        self.lock.set(false);
    }
}

impl<C, M> PendingClose<C, M> {
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// The window as it was when the close began.
    pub fn snapshot(&self) -> &WindowRecord<C, M> {
        &self.snapshot
    }
}

/// Snapshot of a window paired with its global paint position.
#[derive(Debug)]
pub struct RenderEntry<C, M = ()> {
    pub z_index: usize,
    pub window: WindowRecord<C, M>,
}

impl<C, M: Clone> Clone for RenderEntry<C, M> {
    fn clone(&self) -> Self {
        Self {
            z_index: self.z_index,
            window: self.window.clone(),
        }
    }
}

/// Owns every open window, partitioned into priority bands.
///
/// Within a band, order is z-order: the last id is topmost. Concatenating the
/// bands in [`WindowLayer::ALL`] order gives the global z-order. A window
/// lives in exactly one band, fixed by its layer.
pub struct WindowManager<C, M = ()> {
    windows: BTreeMap<WindowId, WindowRecord<C, M>>,
    bands: [Vec<WindowId>; BAND_COUNT],
    ids: IdAllocator,
    hooks: Box<dyn WindowHooks<C, M>>,
    last_focused: Option<WindowId>,
}

impl<C: 'static, M: Clone + 'static> Default for WindowManager<C, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static, M: Clone + 'static> WindowManager<C, M> {
    pub fn new() -> Self {
        Self::with_hooks(NoHooks)
    }

    pub fn with_hooks(hooks: impl WindowHooks<C, M> + 'static) -> Self {
        Self {
            windows: BTreeMap::new(),
            bands: Default::default(),
            ids: IdAllocator::new(),
            hooks: Box::new(hooks),
            last_focused: None,
        }
    }

    fn band(&self, layer: WindowLayer) -> &[WindowId] {
        &self.bands[layer.index()]
    }

    fn band_mut(&mut self, layer: WindowLayer) -> &mut Vec<WindowId> {
        &mut self.bands[layer.index()]
    }

    fn ordered_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.bands.iter().flat_map(|band| band.iter().copied())
    }

    /// Open a window on top of its band and return its id.
    pub fn open_window(&mut self, input: CreateWindowInput<C, M>) -> WindowId {
        let id = WindowId::from_raw(self.ids.next_id());
        let layer = input.layer;
        let window = WindowRecord {
            id,
            title: input.title,
            content: input.content,
            state: input.state,
            rect: input.rect.resolve(),
            prev_rect: None,
            flags: input.flags.resolve(layer),
            layer,
            meta: input.meta,
            closing: Rc::new(Cell::new(false)),
        };
        tracing::debug!(window_id = %id, ?layer, state = ?window.state, "opened window");
        self.windows.insert(id, window);
        self.band_mut(layer).push(id);
        if let Some(window) = self.windows.get(&id) {
            self.hooks.window_opened(window);
        }
        id
    }

    /// Bring a window to the top of its band, subject to blocking windows.
    ///
    /// A blocking system window admits only itself. Otherwise, while any modal
    /// is open only the topmost modal may be activated. Refusals and
    /// activating the band's current top are silent no-ops.
    pub fn activate_window(&mut self, id: WindowId) {
        let Some(layer) = self.windows.get(&id).map(|w| w.layer) else {
            return;
        };

        if let Some(blocker) = self.topmost_blocking_system().map(|w| w.id) {
            if blocker != id {
                tracing::debug!(window_id = %id, blocker = %blocker, "activation refused");
                return;
            }
        } else if let Some(modal) = self.topmost_in_layer(WindowLayer::Modal).map(|w| w.id)
            && modal != id
        {
            tracing::debug!(window_id = %id, blocker = %modal, "activation refused");
            return;
        }

        let band = self.band(layer);
        if band.last() == Some(&id) {
            return;
        }

        if let Some(window) = self.windows.get(&id) {
            self.hooks.before_window_activate(window);
        }
        self.bring_to_front(id, layer);
        tracing::debug!(window_id = %id, ?layer, "activated window");
        if let Some(window) = self.windows.get(&id) {
            self.hooks.window_activated(window);
        }
    }

    fn bring_to_front(&mut self, id: WindowId, layer: WindowLayer) {
        let band = self.band_mut(layer);
        if let Some(pos) = band.iter().position(|&x| x == id) {
            let item = band.remove(pos);
            band.push(item);
        }
    }

    /// Track the focused window without touching z-order.
    ///
    /// Notifies `window_activated` only when the focus actually changes to a
    /// window that exists.
    pub fn focus_window(&mut self, id: Option<WindowId>) {
        if id == self.last_focused {
            return;
        }
        self.last_focused = id;
        let Some(id) = id else {
            return;
        };
        if let Some(window) = self.windows.get(&id) {
            self.hooks.window_activated(window);
        }
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.last_focused
    }

    /// Start closing a window and ask [`WindowHooks::before_window_close`]
    /// for a verdict.
    ///
    /// Returns `None` when the id is unknown or a close is already in flight.
    /// Otherwise returns the close token, carrying a snapshot taken before
    /// anything changed, together with the hook's verdict future. The future
    /// does not borrow the manager, so the window stays fully operable while
    /// it is pending. Pass its result to [`Self::finish_close`]; dropping the
    /// token instead abandons the close and releases the lock.
    pub fn begin_close(
        &mut self,
        id: WindowId,
    ) -> Option<(PendingClose<C, M>, LocalBoxFuture<'static, bool>)> {
        let window = self.windows.get(&id)?;
        if window.closing.get() {
            tracing::debug!(window_id = %id, "close already in flight");
            return None;
        }
        let snapshot = window.clone();
        let lock = Rc::clone(&window.closing);
        lock.set(true);
        tracing::debug!(window_id = %id, "closing window");
        let verdict = self.hooks.before_window_close(&snapshot);
        Some((PendingClose { id, snapshot, lock }, verdict))
    }

    /// Settle a pending close. An approved close removes the window and
    /// reports the pre-close snapshot; a vetoed one leaves it untouched.
    /// Either way the close lock is released. Returns whether the window was
    /// removed.
    pub fn finish_close(&mut self, pending: PendingClose<C, M>, approved: bool) -> bool {
        let id = pending.id;
        let owns_lock = self
            .windows
            .get(&id)
            .is_some_and(|w| Rc::ptr_eq(&w.closing, &pending.lock) && w.closing.get());
        if !owns_lock {
            return false;
        }
        if !approved {
            tracing::debug!(window_id = %id, "close vetoed");
            return false;
        }
        self.windows.remove(&id);
        self.band_mut(pending.snapshot.layer).retain(|x| *x != id);
        if self.last_focused == Some(id) {
            self.last_focused = None;
        }
        tracing::debug!(window_id = %id, "closed window");
        self.hooks.window_closed(&pending.snapshot);
        true
    }

    /// Close a window once [`WindowHooks::before_window_close`] approves.
    ///
    /// Holds the manager until the verdict arrives. Hosts that keep using the
    /// manager meanwhile call [`Self::begin_close`] and
    /// [`Self::finish_close`] themselves. Dropping this future mid-verdict
    /// releases the close lock.
    pub async fn close_window(&mut self, id: WindowId) -> bool {
        let Some((pending, verdict)) = self.begin_close(id) else {
            return false;
        };
        let approved = verdict.await;
        self.finish_close(pending, approved)
    }

    /// Overwrite the rect of an open or minimized window.
    ///
    /// Clamping and snapping are the caller's job; see [`crate::window::drag`].
    pub fn move_window(&mut self, id: WindowId, rect: Rect) {
        let Some(window) = write_rect(&mut self.windows, id, rect) else {
            return;
        };
        tracing::trace!(window_id = %id, x = rect.x, y = rect.y, "moved window");
        self.hooks.window_moved(window);
    }

    pub fn resize_window(&mut self, id: WindowId, rect: Rect) {
        let Some(window) = write_rect(&mut self.windows, id, rect) else {
            return;
        };
        tracing::trace!(window_id = %id, w = rect.w, h = rect.h, "resized window");
        self.hooks.window_resized(window);
    }

    /// Open <-> Minimized. Restoring brings back the saved width and height
    /// but keeps the current position.
    pub fn toggle_minimize(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if !window.flags.minimizable {
            return;
        }
        match window.state {
            WindowState::Minimized => {
                if let Some(prev) = window.prev_rect.take() {
                    window.rect.w = prev.w;
                    window.rect.h = prev.h;
                }
                window.state = WindowState::Open;
                tracing::debug!(window_id = %id, "restored minimized window");
            }
            WindowState::Open => {
                window.prev_rect = Some(window.rect);
                window.state = WindowState::Minimized;
                tracing::debug!(window_id = %id, "minimized window");
            }
            WindowState::Maximized => {}
        }
    }

    /// Open <-> Maximized. Maximizing fills `bounds` from the origin;
    /// restoring brings back the whole saved rect.
    pub fn toggle_maximize(&mut self, id: WindowId, bounds: Bounds) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if !window.flags.maximizable {
            return;
        }
        match window.state {
            WindowState::Maximized => {
                if let Some(prev) = window.prev_rect.take() {
                    window.rect = prev;
                }
                window.state = WindowState::Open;
                tracing::debug!(window_id = %id, "restored maximized window");
            }
            WindowState::Open => {
                window.prev_rect = Some(window.rect);
                window.rect = Rect::new(0.0, 0.0, bounds.w, bounds.h);
                window.state = WindowState::Maximized;
                tracing::debug!(window_id = %id, "maximized window");
            }
            WindowState::Minimized => {}
        }
    }

    /// Refit every open window after the container changed size.
    pub fn normalize_all(&mut self, bounds: Bounds, min_width: f64, min_height: f64) {
        let ids: Vec<WindowId> = self.ordered_ids().collect();
        for id in ids {
            let Some(window) = self.windows.get(&id) else {
                continue;
            };
            if window.state != WindowState::Open {
                continue;
            }
            let current = window.rect;
            let next = normalize_rect_within_bounds(current, bounds, min_width, min_height);
            if next == current {
                continue;
            }
            if next.w != current.w || next.h != current.h {
                self.resize_window(id, next);
            } else {
                self.move_window(id, next);
            }
        }
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord<C, M>> {
        self.windows.get(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn is_closing(&self, id: WindowId) -> bool {
        self.windows.get(&id).is_some_and(|w| w.closing.get())
    }

    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Ids of one band, bottom to top.
    pub fn layer_order(&self, layer: WindowLayer) -> &[WindowId] {
        self.band(layer)
    }

    pub fn topmost_in_layer(&self, layer: WindowLayer) -> Option<&WindowRecord<C, M>> {
        self.band(layer).last().and_then(|id| self.windows.get(id))
    }

    pub fn topmost_overall(&self) -> Option<&WindowRecord<C, M>> {
        self.bands
            .iter()
            .rev()
            .find_map(|band| band.last())
            .and_then(|id| self.windows.get(id))
    }

    pub fn topmost_blocking_system(&self) -> Option<&WindowRecord<C, M>> {
        self.band(WindowLayer::System)
            .iter()
            .rev()
            .filter_map(|id| self.windows.get(id))
            .find(|w| w.flags.is_blocking_window)
    }

    pub fn has_modal_windows(&self) -> bool {
        !self.band(WindowLayer::Modal).is_empty()
    }

    /// Number of windows in all bands below `layer`; the paint index of the
    /// first window in that band.
    pub fn layer_start_index(&self, layer: WindowLayer) -> usize {
        self.bands[..layer.index()].iter().map(Vec::len).sum()
    }

    /// Copies of every window in global z-order, bottom first.
    pub fn windows(&self) -> Vec<WindowRecord<C, M>> {
        self.ordered_ids()
            .filter_map(|id| self.windows.get(&id).cloned())
            .collect()
    }

    pub fn windows_for_layer(&self, layer: WindowLayer) -> Vec<WindowRecord<C, M>> {
        self.band(layer)
            .iter()
            .filter_map(|id| self.windows.get(id).cloned())
            .collect()
    }

    pub fn windows_for_render(&self) -> Vec<RenderEntry<C, M>> {
        self.windows()
            .into_iter()
            .enumerate()
            .map(|(z_index, window)| RenderEntry { z_index, window })
            .collect()
    }

    /// Rects of every open window other than `id`, for window-to-window
    /// snapping.
    pub fn sibling_rects(&self, id: WindowId) -> Vec<Rect> {
        self.ordered_ids()
            .filter(|other| *other != id)
            .filter_map(|other| self.windows.get(&other))
            .filter(|w| w.state == WindowState::Open)
            .map(|w| w.rect)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures_util::FutureExt;
    use futures_util::future::{self, LocalBoxFuture};

    use crate::window::FlagOverrides;

    type Wm = WindowManager<()>;

    fn input(title: &str, layer: WindowLayer) -> CreateWindowInput<()> {
        CreateWindowInput::new(title, Rc::new(())).layer(layer)
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
        allow_close: bool,
    }

    impl WindowHooks<(), ()> for Recorder {
        fn window_opened(&mut self, w: &WindowRecord<()>) {
            self.events.borrow_mut().push(format!("opened {}", w.title));
        }
        fn before_window_activate(&mut self, w: &WindowRecord<()>) {
            self.events.borrow_mut().push(format!("before {}", w.title));
        }
        fn window_activated(&mut self, w: &WindowRecord<()>) {
            self.events.borrow_mut().push(format!("activated {}", w.title));
        }
        fn before_window_close(&mut self, _w: &WindowRecord<()>) -> LocalBoxFuture<'static, bool> {
            future::ready(self.allow_close).boxed_local()
        }
        fn window_closed(&mut self, w: &WindowRecord<()>) {
            self.events.borrow_mut().push(format!("closed {}", w.title));
        }
        fn window_moved(&mut self, w: &WindowRecord<()>) {
            self.events.borrow_mut().push(format!("moved {}", w.title));
        }
    }

    #[test]
    fn open_appends_to_band_and_notifies() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm: Wm = WindowManager::with_hooks(Recorder {
            events: events.clone(),
            allow_close: true,
        });
        let a = wm.open_window(input("a", WindowLayer::Normal));
        let b = wm.open_window(input("b", WindowLayer::Normal));
        assert_eq!(wm.layer_order(WindowLayer::Normal), &[a, b]);
        assert_eq!(*events.borrow(), vec!["opened a", "opened b"]);
        assert_ne!(a, b);
    }

    #[test]
    fn activation_is_band_relative_and_idempotent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm: Wm = WindowManager::with_hooks(Recorder {
            events: events.clone(),
            allow_close: true,
        });
        let a = wm.open_window(input("a", WindowLayer::Normal));
        let b = wm.open_window(input("b", WindowLayer::Normal));
        let u = wm.open_window(input("u", WindowLayer::Utility));
        events.borrow_mut().clear();

        wm.activate_window(a);
        wm.activate_window(b);
        assert_eq!(wm.layer_order(WindowLayer::Normal), &[a, b]);
        assert_eq!(wm.layer_order(WindowLayer::Utility), &[u]);
        assert_eq!(wm.topmost_overall().map(|w| w.id), Some(u));

        // already on top: nothing fires
        events.borrow_mut().clear();
        wm.activate_window(b);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn activation_fires_before_and_after() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm: Wm = WindowManager::with_hooks(Recorder {
            events: events.clone(),
            allow_close: true,
        });
        let a = wm.open_window(input("a", WindowLayer::Normal));
        wm.open_window(input("b", WindowLayer::Normal));
        events.borrow_mut().clear();
        wm.activate_window(a);
        assert_eq!(*events.borrow(), vec!["before a", "activated a"]);
    }

    #[test]
    fn modal_blocks_other_activation() {
        let mut wm = Wm::new();
        let a = wm.open_window(input("a", WindowLayer::Normal));
        let b = wm.open_window(input("b", WindowLayer::Normal));
        let m1 = wm.open_window(input("m1", WindowLayer::Modal));
        let m2 = wm.open_window(input("m2", WindowLayer::Modal));

        wm.activate_window(a);
        assert_eq!(wm.layer_order(WindowLayer::Normal), &[a, b]);
        // lower modal is refused too
        wm.activate_window(m1);
        assert_eq!(wm.layer_order(WindowLayer::Modal), &[m1, m2]);
    }

    #[test]
    fn blocking_system_window_owns_activation() {
        let mut wm = Wm::new();
        let a = wm.open_window(input("a", WindowLayer::Normal));
        let b = wm.open_window(input("b", WindowLayer::Normal));
        let m = wm.open_window(input("m", WindowLayer::Modal));
        let s = wm.open_window(input("s", WindowLayer::System));
        let toast = wm.open_window(input("toast", WindowLayer::System).flags(FlagOverrides {
            is_blocking_window: Some(false),
            ..Default::default()
        }));

        assert_eq!(wm.topmost_blocking_system().map(|w| w.id), Some(s));
        wm.activate_window(a);
        wm.activate_window(m);
        wm.activate_window(toast);
        assert_eq!(wm.topmost_in_layer(WindowLayer::Normal).map(|w| w.id), Some(b));
        assert_eq!(wm.topmost_in_layer(WindowLayer::Modal).map(|w| w.id), Some(m));
        assert_eq!(wm.topmost_in_layer(WindowLayer::System).map(|w| w.id), Some(toast));

        wm.activate_window(s);
        assert_eq!(wm.layer_order(WindowLayer::System), &[toast, s]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut wm = Wm::new();
        let a = wm.open_window(input("a", WindowLayer::Normal));
        let ghost = WindowId::from_raw(999);
        wm.activate_window(ghost);
        wm.move_window(ghost, Rect::new(1.0, 1.0, 1.0, 1.0));
        wm.toggle_minimize(ghost);
        wm.toggle_maximize(ghost, Bounds::new(10.0, 10.0));
        assert!(wm.begin_close(ghost).is_none());
        assert_eq!(wm.count(), 1);
        assert!(wm.contains(a));
    }

    #[test]
    fn maximized_windows_reject_rect_writes() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm: Wm = WindowManager::with_hooks(Recorder {
            events: events.clone(),
            allow_close: true,
        });
        let id = wm.open_window(input("w", WindowLayer::Normal).rect(Rect::new(1.0, 2.0, 300.0, 200.0)));
        wm.toggle_maximize(id, Bounds::new(800.0, 600.0));
        events.borrow_mut().clear();
        wm.move_window(id, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(wm.get(id).map(|w| w.rect), Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert!(events.borrow().is_empty());

        wm.toggle_maximize(id, Bounds::new(800.0, 600.0));
        wm.move_window(id, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(wm.get(id).map(|w| w.rect), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert_eq!(*events.borrow(), vec!["moved w"]);
    }

    #[test]
    fn minimize_restores_size_but_not_position() {
        let mut wm = Wm::new();
        let id = wm.open_window(
            input("w", WindowLayer::Normal).rect(Rect::new(100.0, 120.0, 600.0, 400.0)),
        );
        wm.toggle_minimize(id);
        assert_eq!(wm.get(id).map(|w| w.state), Some(WindowState::Minimized));
        assert_eq!(
            wm.get(id).and_then(|w| w.prev_rect),
            Some(Rect::new(100.0, 120.0, 600.0, 400.0))
        );
        // minimized windows may still be moved; the collapsed size sticks too
        wm.move_window(id, Rect::new(10.0, 700.0, 600.0, 28.0));
        wm.toggle_minimize(id);
        let w = wm.get(id).expect("window present");
        assert_eq!(w.state, WindowState::Open);
        assert_eq!(w.rect, Rect::new(10.0, 700.0, 600.0, 400.0));
        assert_eq!(w.prev_rect, None);
    }

    #[test]
    fn minimize_and_maximize_exclude_each_other() {
        let mut wm = Wm::new();
        let id = wm.open_window(input("w", WindowLayer::Normal));
        wm.toggle_minimize(id);
        wm.toggle_maximize(id, Bounds::new(800.0, 600.0));
        assert_eq!(wm.get(id).map(|w| w.state), Some(WindowState::Minimized));
        wm.toggle_minimize(id);
        wm.toggle_maximize(id, Bounds::new(800.0, 600.0));
        wm.toggle_minimize(id);
        assert_eq!(wm.get(id).map(|w| w.state), Some(WindowState::Maximized));
    }

    #[test]
    fn opening_maximized_has_nothing_to_restore() {
        let mut wm = Wm::new();
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        let id = wm.open_window(
            input("w", WindowLayer::Normal)
                .state(WindowState::Maximized)
                .rect(rect),
        );
        assert_eq!(wm.get(id).and_then(|w| w.prev_rect), None);
        wm.toggle_maximize(id, Bounds::new(800.0, 600.0));
        let w = wm.get(id).expect("window present");
        assert_eq!(w.state, WindowState::Open);
        assert_eq!(w.rect, rect);
    }

    #[test]
    fn capability_flags_gate_toggles() {
        let mut wm = Wm::new();
        let id = wm.open_window(input("w", WindowLayer::Normal).flags(FlagOverrides {
            minimizable: Some(false),
            maximizable: Some(false),
            ..Default::default()
        }));
        wm.toggle_minimize(id);
        wm.toggle_maximize(id, Bounds::new(800.0, 600.0));
        assert_eq!(wm.get(id).map(|w| w.state), Some(WindowState::Open));
    }

    #[test]
    fn pending_close_blocks_reentry_and_keeps_window_live() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm: Wm = WindowManager::with_hooks(Recorder {
            events: events.clone(),
            allow_close: true,
        });
        let id = wm.open_window(input("w", WindowLayer::Normal));
        let (pending, verdict) = wm.begin_close(id).expect("close starts");
        assert!(wm.is_closing(id));
        assert!(wm.begin_close(id).is_none());

        // still operable while the close is undecided
        wm.move_window(id, Rect::new(9.0, 9.0, 100.0, 100.0));
        assert_eq!(pending.snapshot().rect, crate::constants::DEFAULT_RECT);

        let approved = verdict.now_or_never().expect("ready verdict");
        assert!(wm.finish_close(pending, approved));
        assert!(!wm.contains(id));
        // the closed notification carries the pre-close snapshot title
        assert_eq!(events.borrow().last().map(String::as_str), Some("closed w"));
    }

    #[test]
    fn hook_verdict_comes_with_the_token() {
        let mut wm: Wm = WindowManager::with_hooks(Recorder::default());
        let id = wm.open_window(input("w", WindowLayer::Normal));
        let (pending, verdict) = wm.begin_close(id).expect("close starts");
        assert_eq!(verdict.now_or_never(), Some(false));
        assert!(!wm.finish_close(pending, false));
        assert!(wm.contains(id));
    }

    #[test]
    fn vetoed_close_releases_lock() {
        let mut wm = Wm::new();
        let id = wm.open_window(input("w", WindowLayer::Normal));
        let (pending, _) = wm.begin_close(id).expect("close starts");
        assert!(!wm.finish_close(pending, false));
        assert!(wm.contains(id));
        assert!(!wm.is_closing(id));
        assert!(wm.begin_close(id).is_some());
    }

    #[test]
    fn dropped_token_releases_lock() {
        let mut wm = Wm::new();
        let id = wm.open_window(input("w", WindowLayer::Normal));
        let (pending, verdict) = wm.begin_close(id).expect("close starts");
        drop(verdict);
        drop(pending);
        assert!(!wm.is_closing(id));

        let (pending, verdict) = wm.begin_close(id).expect("close restarts");
        let approved = verdict.now_or_never().expect("ready verdict");
        assert!(wm.finish_close(pending, approved));
        assert!(!wm.contains(id));
    }

    #[test]
    fn token_from_another_manager_is_ignored() {
        let mut a = Wm::new();
        let mut b = Wm::new();
        let id_a = a.open_window(input("a", WindowLayer::Normal));
        let id_b = b.open_window(input("b", WindowLayer::Normal));
        assert_eq!(id_a, id_b);
        let (foreign, _) = a.begin_close(id_a).expect("close starts");
        let (_own, _) = b.begin_close(id_b).expect("close starts");
        assert!(!b.finish_close(foreign, true));
        assert!(b.contains(id_b));
        assert!(b.is_closing(id_b));
    }

    #[test]
    fn layer_start_index_counts_lower_bands() {
        let mut wm = Wm::new();
        wm.open_window(input("n1", WindowLayer::Normal));
        wm.open_window(input("n2", WindowLayer::Normal));
        wm.open_window(input("u1", WindowLayer::Utility));
        wm.open_window(input("o1", WindowLayer::Overlay));
        let starts: Vec<usize> = WindowLayer::ALL
            .iter()
            .map(|layer| wm.layer_start_index(*layer))
            .collect();
        assert_eq!(starts, vec![0, 2, 3, 4, 4]);
    }

    #[test]
    fn render_entries_follow_global_order() {
        let mut wm = Wm::new();
        let s = wm.open_window(input("s", WindowLayer::System));
        let n = wm.open_window(input("n", WindowLayer::Normal));
        let o = wm.open_window(input("o", WindowLayer::Overlay));
        let order: Vec<(usize, WindowId)> = wm
            .windows_for_render()
            .into_iter()
            .map(|e| (e.z_index, e.window.id))
            .collect();
        assert_eq!(order, vec![(0, n), (1, o), (2, s)]);
    }

    #[test]
    fn snapshots_are_detached_copies() {
        let mut wm = Wm::new();
        let id = wm.open_window(input("w", WindowLayer::Normal));
        let mut snapshot = wm.windows();
        snapshot[0].rect.x = 9999.0;
        snapshot[0].title.push_str(" changed");
        let live = wm.get(id).expect("window present");
        assert_eq!(live.rect.x, crate::constants::DEFAULT_RECT.x);
        assert_eq!(live.title, "w");
    }

    #[test]
    fn focus_window_notifies_on_change_only() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut wm: Wm = WindowManager::with_hooks(Recorder {
            events: events.clone(),
            allow_close: true,
        });
        let a = wm.open_window(input("a", WindowLayer::Normal));
        let b = wm.open_window(input("b", WindowLayer::Normal));
        events.borrow_mut().clear();
        wm.focus_window(Some(a));
        wm.focus_window(Some(a));
        wm.focus_window(None);
        wm.focus_window(Some(a));
        assert_eq!(*events.borrow(), vec!["activated a", "activated a"]);
        assert_eq!(wm.focused_window(), Some(a));
        // focus never reorders
        assert_eq!(wm.layer_order(WindowLayer::Normal), &[a, b]);
    }

    #[test]
    fn normalize_all_refits_open_windows() {
        let mut wm = Wm::new();
        let open = wm.open_window(
            input("o", WindowLayer::Normal).rect(Rect::new(700.0, 500.0, 600.0, 400.0)),
        );
        let minimized = wm.open_window(
            input("m", WindowLayer::Normal).rect(Rect::new(700.0, 500.0, 600.0, 400.0)),
        );
        wm.toggle_minimize(minimized);
        wm.normalize_all(Bounds::new(800.0, 600.0), 320.0, 240.0);
        assert_eq!(
            wm.get(open).map(|w| w.rect),
            Some(Rect::new(480.0, 360.0, 320.0, 240.0))
        );
        assert_eq!(
            wm.get(minimized).map(|w| w.rect),
            Some(Rect::new(700.0, 500.0, 600.0, 400.0))
        );
    }

    #[test]
    fn sibling_rects_skip_self_and_hidden() {
        let mut wm = Wm::new();
        let a = wm.open_window(input("a", WindowLayer::Normal).rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = wm.open_window(input("b", WindowLayer::Normal).rect(Rect::new(20.0, 0.0, 10.0, 10.0)));
        let c = wm.open_window(input("c", WindowLayer::Normal).rect(Rect::new(40.0, 0.0, 10.0, 10.0)));
        wm.toggle_minimize(c);
        assert_eq!(wm.sibling_rects(a), vec![Rect::new(20.0, 0.0, 10.0, 10.0)]);
        assert_eq!(wm.sibling_rects(b).len(), 1);
    }
}
