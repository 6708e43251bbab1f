pub mod css;

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics when the range is inverted; the
/// lower bound wins, which is what the geometry code relies on when a window
/// is larger than its container.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Monotonic source of opaque identifiers.
///
/// Identifiers are never reused for the lifetime of the allocator, so a
/// closed window's id can not alias a window opened later.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}
