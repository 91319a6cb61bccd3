//! Element handles: the bridge between a focus group and real input focus.
//!
//! Each registered item owns an [`ElementHandle`] that stands in for its
//! underlying focusable element. When arrow navigation selects the item, the
//! group calls [`ElementHandle::request_focus`]; the host polls
//! [`ElementHandle::take_focus_request`] and moves the terminal cursor (or
//! whatever its focus primitive is) to the element.
//!
//! Handles also carry optional activation callbacks:
//!
//! ```ignore
//! let handle = ElementHandle::new()
//!     .on_focus(|| println!("Focused!"))
//!     .on_blur(|| println!("Blurred!"));
//! ```

use crate::events::FocusCallback;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct HandleInner {
    focus_requests: AtomicUsize,
    on_focus: RwLock<Option<FocusCallback>>,
    on_blur: RwLock<Option<FocusCallback>>,
}

/// Shared handle to a focusable element.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone, Default)]
pub struct ElementHandle {
    inner: Arc<HandleInner>,
}

impl ElementHandle {
    /// Create a handle with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback fired when the item becomes the active item.
    pub fn on_focus<F>(self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.inner.on_focus.write() = Some(Arc::new(callback));
        self
    }

    /// Set the callback fired when the item stops being the active item.
    pub fn on_blur<F>(self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.inner.on_blur.write() = Some(Arc::new(callback));
        self
    }

    /// Check whether an input-focus request is pending.
    pub fn has_focus_request(&self) -> bool {
        self.inner.focus_requests.load(Ordering::Acquire) > 0
    }

    /// Consume any pending input-focus request.
    ///
    /// Returns true if at least one request was pending. Hosts call this
    /// once per frame for the element they are about to focus.
    pub fn take_focus_request(&self) -> bool {
        self.inner.focus_requests.swap(0, Ordering::AcqRel) > 0
    }

    /// Ask the host to move real input focus to this element.
    pub(crate) fn request_focus(&self) {
        self.inner.focus_requests.fetch_add(1, Ordering::AcqRel);
    }

    /// Fire the focus callback, if any.
    pub(crate) fn notify_focus(&self) {
        let callback = self.inner.on_focus.read().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Fire the blur callback, if any.
    pub(crate) fn notify_blur(&self) {
        let callback = self.inner.on_blur.read().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementHandle")
            .field(
                "focus_requests",
                &self.inner.focus_requests.load(Ordering::Relaxed),
            )
            .field("on_focus", &self.inner.on_focus.read().is_some())
            .field("on_blur", &self.inner.on_blur.read().is_some())
            .finish()
    }
}
