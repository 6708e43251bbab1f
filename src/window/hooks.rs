use futures_util::FutureExt;
use futures_util::future::{self, LocalBoxFuture};

use super::WindowRecord;

/// Lifecycle notifications delivered to the presentation layer.
///
/// Every method has a no-op default so implementors only override what they
/// care about. Notifications run synchronously inside the manager call that
/// triggered them, after the state change they describe (the `before_*`
/// methods run before it).
pub trait WindowHooks<C, M> {
    fn window_opened(&mut self, _window: &WindowRecord<C, M>) {}

    fn before_window_activate(&mut self, _window: &WindowRecord<C, M>) {}

    fn window_activated(&mut self, _window: &WindowRecord<C, M>) {}

    /// Decide whether a close may proceed. Resolving to `false` vetoes it.
    ///
    /// `snapshot` is a copy taken before the close started; the returned
    /// future must not borrow it.
    fn before_window_close(&mut self, _snapshot: &WindowRecord<C, M>) -> LocalBoxFuture<'static, bool> {
        future::ready(true).boxed_local()
    }

    /// Receives the same pre-close snapshot `before_window_close` saw.
    fn window_closed(&mut self, _snapshot: &WindowRecord<C, M>) {}

    fn window_moved(&mut self, _window: &WindowRecord<C, M>) {}

    fn window_resized(&mut self, _window: &WindowRecord<C, M>) {}
}

/// Hooks bundle with nothing attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<C, M> WindowHooks<C, M> for NoHooks {}
