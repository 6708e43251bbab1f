pub mod drag;
pub mod hooks;

mod window_manager;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::constants::{DEFAULT_FLAGS, DEFAULT_RECT};
use crate::geometry::Rect;

pub use hooks::{NoHooks, WindowHooks};
pub use window_manager::{PendingClose, RenderEntry, WindowManager};

/// Opaque window identifier, unique for the lifetime of its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w_{:x}", self.0)
    }
}

/// Lifecycle state. Closed windows are removed, never flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Open,
    Minimized,
    Maximized,
}

/// Priority band a window lives in, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WindowLayer {
    #[default]
    Normal,
    Utility,
    Overlay,
    Modal,
    System,
}

impl WindowLayer {
    /// Fixed paint order of the bands, bottom to top.
    pub const ALL: [WindowLayer; 5] = [
        WindowLayer::Normal,
        WindowLayer::Utility,
        WindowLayer::Overlay,
        WindowLayer::Modal,
        WindowLayer::System,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            WindowLayer::Normal => 0,
            WindowLayer::Utility => 1,
            WindowLayer::Overlay => 2,
            WindowLayer::Modal => 3,
            WindowLayer::System => 4,
        }
    }

    /// Modal and system windows block activation of others unless told not to.
    pub fn blocks_by_default(self) -> bool {
        matches!(self, WindowLayer::Modal | WindowLayer::System)
    }
}

/// Capabilities of a window, fixed when it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub movable: bool,
    pub resizable: bool,
    pub closable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
    pub close_on_esc: bool,
    pub close_on_backdrop: bool,
    pub is_blocking_window: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        DEFAULT_FLAGS
    }
}

/// Per-field overrides merged onto [`DEFAULT_FLAGS`] at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagOverrides {
    pub movable: Option<bool>,
    pub resizable: Option<bool>,
    pub closable: Option<bool>,
    pub minimizable: Option<bool>,
    pub maximizable: Option<bool>,
    pub close_on_esc: Option<bool>,
    pub close_on_backdrop: Option<bool>,
    pub is_blocking_window: Option<bool>,
}

impl FlagOverrides {
    /// Merge onto the defaults. An unset blocking flag follows the layer.
    pub fn resolve(&self, layer: WindowLayer) -> WindowFlags {
        let d = DEFAULT_FLAGS;
        WindowFlags {
            movable: self.movable.unwrap_or(d.movable),
            resizable: self.resizable.unwrap_or(d.resizable),
            closable: self.closable.unwrap_or(d.closable),
            minimizable: self.minimizable.unwrap_or(d.minimizable),
            maximizable: self.maximizable.unwrap_or(d.maximizable),
            close_on_esc: self.close_on_esc.unwrap_or(d.close_on_esc),
            close_on_backdrop: self.close_on_backdrop.unwrap_or(d.close_on_backdrop),
            is_blocking_window: self
                .is_blocking_window
                .unwrap_or_else(|| layer.blocks_by_default()),
        }
    }
}

/// Partial geometry; absent fields come from [`DEFAULT_RECT`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialRect {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl PartialRect {
    pub fn resolve(&self) -> Rect {
        Rect {
            x: self.x.unwrap_or(DEFAULT_RECT.x),
            y: self.y.unwrap_or(DEFAULT_RECT.y),
            w: self.w.unwrap_or(DEFAULT_RECT.w),
            h: self.h.unwrap_or(DEFAULT_RECT.h),
        }
    }
}

impl From<Rect> for PartialRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            w: Some(rect.w),
            h: Some(rect.h),
        }
    }
}

/// Everything a caller supplies to open a window.
#[derive(Debug)]
pub struct CreateWindowInput<C, M = ()> {
    pub title: String,
    pub content: Rc<C>,
    pub layer: WindowLayer,
    pub state: WindowState,
    pub rect: PartialRect,
    pub flags: FlagOverrides,
    pub meta: M,
}

impl<C, M: Default> CreateWindowInput<C, M> {
    pub fn new(title: impl Into<String>, content: Rc<C>) -> Self {
        Self {
            title: title.into(),
            content,
            layer: WindowLayer::Normal,
            state: WindowState::Open,
            rect: PartialRect::default(),
            flags: FlagOverrides::default(),
            meta: M::default(),
        }
    }
}

impl<C, M> CreateWindowInput<C, M> {
    pub fn layer(mut self, layer: WindowLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn state(mut self, state: WindowState) -> Self {
        self.state = state;
        self
    }

    pub fn rect(mut self, rect: impl Into<PartialRect>) -> Self {
        self.rect = rect.into();
        self
    }

    pub fn flags(mut self, flags: FlagOverrides) -> Self {
        self.flags = flags;
        self
    }

    pub fn meta(mut self, meta: M) -> Self {
        self.meta = meta;
        self
    }
}

/// One open window.
///
/// `content` is shared with the caller and never inspected; cloning a record
/// copies geometry, flags and metadata but only bumps the content refcount.
#[derive(Debug)]
pub struct WindowRecord<C, M = ()> {
    pub id: WindowId,
    pub title: String,
    pub content: Rc<C>,
    pub state: WindowState,
    pub rect: Rect,
    /// Geometry saved on minimize/maximize entry; set only while the window
    /// is minimized or maximized and only if it was open before.
    pub prev_rect: Option<Rect>,
    pub flags: WindowFlags,
    pub layer: WindowLayer,
    pub meta: M,
    /// Close lock, shared with the outstanding [`PendingClose`] if any.
    pub(crate) closing: Rc<Cell<bool>>,
}

impl<C, M: Clone> Clone for WindowRecord<C, M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            title: self.title.clone(),
            content: Rc::clone(&self.content),
            state: self.state,
            rect: self.rect,
            prev_rect: self.prev_rect,
            flags: self.flags,
            layer: self.layer,
            meta: self.meta.clone(),
            // copies never share the live lock
            closing: Rc::new(Cell::new(self.closing.get())),
        }
    }
}

impl<C, M> WindowRecord<C, M> {
    /// Whether a close is in flight for this window.
    pub fn is_closing(&self) -> bool {
        self.closing.get()
    }

    pub fn is_open(&self) -> bool {
        self.state == WindowState::Open
    }
}
