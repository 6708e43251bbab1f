//! Window stacking and drag/snap geometry for floating desktop surfaces.
//!
//! The crate owns no rendering and no input capture. A presentation layer
//! calls into [`window::WindowManager`] to open, activate, move, resize and
//! close windows, reads back copy-safe snapshots to paint, and listens to
//! lifecycle notifications through [`window::WindowHooks`].

pub mod constants;
pub mod geometry;
pub mod options;
pub mod tracing_sub;
pub mod utils;
pub mod window;

pub use geometry::{Bounds, Point, Rect, ResizeDirection, Size, SnapGuides};
pub use options::WmOptions;
pub use window::{
    CreateWindowInput, FlagOverrides, PartialRect, PendingClose, WindowFlags, WindowHooks, WindowId,
    WindowLayer, WindowManager, WindowRecord, WindowState,
};
