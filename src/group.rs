//! The focus group state machine and its shared scope handle.
//!
//! A [`FocusGroup`] implements the roving tab index pattern: among the
//! registered items exactly one is *active* (eligible for tab focus,
//! `tabindex = 0`); every other item is parked at `tabindex = -1` and is
//! reached with arrow keys instead. Registration order is tab order.
//!
//! [`FocusScope`] wraps a group in a cloneable shared handle so a container
//! can hand the same group to every item explicitly; there is no global
//! registry. Items read their derived state through [`FocusScope::view`].
//!
//! Focus and blur callbacks run synchronously inside the state transition.
//! Do not call back into the same group or scope from a callback.

use crate::events::{EventResult, FocusCallback, KeyCallback, KeyCode, KeyEvent, KeyModifiers};
use crate::handle::ElementHandle;
use crate::props::{Props, TAB_INDEX};
use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smartstring::alias::String as SmartString;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for a registered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Generate a new unique item ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        ItemId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where to move the active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Next item in registration order, wrapping to the first.
    Next,
    /// Previous item in registration order, wrapping to the last.
    Previous,
    /// First item.
    First,
    /// Last item.
    Last,
}

impl Direction {
    /// Map a key event to a navigation direction.
    ///
    /// Down/Right move forward, Up/Left move backward, Home and End jump to
    /// the ends. Events with modifiers held are not navigation.
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        if event.modifiers != KeyModifiers::NONE {
            return None;
        }
        match event.code {
            KeyCode::Down | KeyCode::Right => Some(Self::Next),
            KeyCode::Up | KeyCode::Left => Some(Self::Previous),
            KeyCode::Home => Some(Self::First),
            KeyCode::End => Some(Self::Last),
            _ => None,
        }
    }
}

/// A focus transition observed by the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    /// The item became the active item.
    Gained(ItemId),
    /// The item stopped being the active item.
    Lost(ItemId),
}

/// Focus group error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// An item was mounted or rendered with no enclosing focus group.
    #[error("roving item used outside of a focus group; mount it through a group scope")]
    MissingProvider,
    /// A derived view was requested for an id the group does not know.
    #[error("no item registered with {0:?}")]
    UnknownItem(ItemId),
}

struct Registration {
    handle: ElementHandle,
    key: Option<SmartString>,
}

/// Roving tab index state machine.
///
/// Owns the registration table and the active item. All mutation goes
/// through [`register`](Self::register), [`unregister`](Self::unregister),
/// [`activate`](Self::activate), and [`move_active`](Self::move_active);
/// items never touch the table directly.
pub struct FocusGroup {
    items: IndexMap<ItemId, Registration>,
    keys: FxHashMap<SmartString, ItemId>,
    active: Option<ItemId>,
    events: Vec<FocusEvent>,
}

impl FocusGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
            keys: FxHashMap::default(),
            active: None,
            events: Vec::new(),
        }
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether no items are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The active item, if any.
    pub fn active(&self) -> Option<ItemId> {
        self.active
    }

    /// Check whether an id is registered.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Check whether an item is the active item.
    pub fn is_active(&self, id: ItemId) -> bool {
        self.active == Some(id)
    }

    /// Tab index for a registered item: 0 for the active item, -1 otherwise.
    pub fn tab_index(&self, id: ItemId) -> Option<i32> {
        self.items
            .contains_key(&id)
            .then(|| if self.is_active(id) { 0 } else { -1 })
    }

    /// Registration order, which is tab order.
    pub fn order(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// Position of an item in tab order.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    /// Clone the element handle for a registered item.
    pub fn handle_of(&self, id: ItemId) -> Option<ElementHandle> {
        self.items.get(&id).map(|reg| reg.handle.clone())
    }

    /// String key of the active item, if it has one.
    pub fn active_key(&self) -> Option<&str> {
        let id = self.active?;
        self.items.get(&id)?.key.as_deref()
    }

    /// Register an item at the end of tab order.
    ///
    /// The first item registered into an empty group becomes active.
    /// Re-registering a known id keeps its position and only refreshes the
    /// stored handle.
    pub fn register(&mut self, id: ItemId, handle: ElementHandle) {
        self.insert(id, handle, None);
    }

    /// Register an item under a string key for later [`activate_key`](Self::activate_key) lookup.
    pub fn register_keyed(
        &mut self,
        id: ItemId,
        key: impl Into<SmartString>,
        handle: ElementHandle,
    ) {
        self.insert(id, handle, Some(key.into()));
    }

    fn insert(&mut self, id: ItemId, handle: ElementHandle, key: Option<SmartString>) {
        if let Some(reg) = self.items.get_mut(&id) {
            // Re-registration: ordering untouched.
            reg.handle = handle;
            if let Some(new_key) = key {
                if let Some(old_key) = reg.key.take() {
                    self.keys.remove(&old_key);
                }
                self.keys.insert(new_key.clone(), id);
                reg.key = Some(new_key);
            }
            return;
        }

        if let Some(k) = &key {
            self.keys.insert(k.clone(), id);
        }
        self.items.insert(id, Registration { handle, key });

        #[cfg(feature = "tracing")]
        tracing::trace!(?id, len = self.items.len(), "item registered");

        if self.active.is_none() {
            self.set_active(Some(id), false);
        }
    }

    /// Remove an item from the group.
    ///
    /// If the active item is removed, activation falls back to the item now
    /// occupying the same ordinal position, or the new last item, or none.
    /// The fallback is a data transition only; no input focus is requested.
    pub fn unregister(&mut self, id: ItemId) {
        let Some((index, _, removed)) = self.items.shift_remove_full(&id) else {
            return;
        };
        if let Some(key) = removed.key {
            self.keys.remove(&key);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?id, len = self.items.len(), "item unregistered");

        if self.active == Some(id) {
            let fallback = if self.items.is_empty() {
                None
            } else {
                let idx = index.min(self.items.len() - 1);
                self.items.get_index(idx).map(|(next, _)| *next)
            };
            self.set_active(fallback, false);
        }
    }

    /// Make an item active in response to its own focus or click event.
    ///
    /// The element already holds real input focus when this fires, so no
    /// focus request is issued. Unknown ids are a no-op: the event may race
    /// with unmounting.
    pub fn activate(&mut self, id: ItemId) {
        if self.items.contains_key(&id) {
            self.set_active(Some(id), false);
        }
    }

    /// Activate an item by its string key. Returns false if no item has it.
    pub fn activate_key(&mut self, key: &str) -> bool {
        match self.keys.get(key).copied() {
            Some(id) => {
                self.activate(id);
                true
            }
            None => false,
        }
    }

    /// Move the active item and request input focus for it.
    ///
    /// No-op on an empty group. On a group of one, the active item is
    /// unchanged but a focus request is still issued, matching what arrow
    /// keys do in a real widget.
    pub fn move_active(&mut self, direction: Direction) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        let current = self.active.and_then(|id| self.items.get_index_of(&id));
        let target = match direction {
            Direction::Next => current.map_or(0, |i| (i + 1) % len),
            Direction::Previous => current.map_or(len - 1, |i| (i + len - 1) % len),
            Direction::First => 0,
            Direction::Last => len - 1,
        };
        let next = self.items.get_index(target).map(|(id, _)| *id);
        self.set_active(next, true);
    }

    /// Offer a key event to the group; arrow/Home/End navigation consumes it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> EventResult {
        match Direction::from_key(event) {
            Some(direction) => {
                self.move_active(direction);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Drain accumulated focus transition events.
    pub fn drain_events(&mut self) -> Vec<FocusEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_active(&mut self, next: Option<ItemId>, request_input_focus: bool) {
        let prev = self.active;
        if prev != next {
            #[cfg(feature = "tracing")]
            tracing::trace!(?prev, ?next, "active item changed");

            if let Some(prev_id) = prev {
                let handle = self.handle_of(prev_id);
                if let Some(handle) = handle {
                    handle.notify_blur();
                }
                self.events.push(FocusEvent::Lost(prev_id));
            }
            self.active = next;
            if let Some(next_id) = next {
                let handle = self.handle_of(next_id);
                if let Some(handle) = handle {
                    handle.notify_focus();
                }
                self.events.push(FocusEvent::Gained(next_id));
            }
        }
        if request_input_focus {
            if let Some(handle) = self.active.and_then(|id| self.handle_of(id)) {
                handle.request_focus();
            }
        }
    }
}

impl Default for FocusGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FocusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusGroup")
            .field("order", &self.items.keys().collect::<Vec<_>>())
            .field("active", &self.active)
            .finish()
    }
}

/// Per-item derived view handed to an item by the group.
///
/// `on_focus` activates the item (wire it to the element's focus/click
/// event); `on_key` feeds arrow navigation back to the group.
#[derive(Clone)]
pub struct ItemView {
    /// The item this view describes.
    pub id: ItemId,
    /// Whether the item is the active item.
    pub is_active: bool,
    /// 0 for the active item, -1 for everything else.
    pub tab_index: i32,
    /// Activates the item when its element gains focus directly.
    pub on_focus: FocusCallback,
    /// Routes key events into group navigation.
    pub on_key: KeyCallback,
}

impl ItemView {
    /// The controller-owned props derived from this view.
    pub fn props(&self) -> Props {
        Props::new().set(TAB_INDEX, self.tab_index)
    }
}

impl fmt::Debug for ItemView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemView")
            .field("id", &self.id)
            .field("is_active", &self.is_active)
            .field("tab_index", &self.tab_index)
            .finish()
    }
}

/// Cloneable shared handle to a [`FocusGroup`].
///
/// The container owns the scope and passes clones to items; every clone
/// addresses the same group. Events are processed one at a time on the UI
/// thread, so the lock is never contended in practice.
#[derive(Clone, Default)]
pub struct FocusScope {
    inner: Arc<RwLock<FocusGroup>>,
}

impl FocusScope {
    /// Create a scope around an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure with read access to the group.
    pub fn with<R>(&self, f: impl FnOnce(&FocusGroup) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with write access to the group.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut FocusGroup) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// See [`FocusGroup::register`].
    pub fn register(&self, id: ItemId, handle: ElementHandle) {
        self.inner.write().register(id, handle);
    }

    /// See [`FocusGroup::register_keyed`].
    pub fn register_keyed(&self, id: ItemId, key: impl Into<SmartString>, handle: ElementHandle) {
        self.inner.write().register_keyed(id, key, handle);
    }

    /// See [`FocusGroup::unregister`].
    pub fn unregister(&self, id: ItemId) {
        self.inner.write().unregister(id);
    }

    /// See [`FocusGroup::activate`].
    pub fn activate(&self, id: ItemId) {
        self.inner.write().activate(id);
    }

    /// See [`FocusGroup::activate_key`].
    pub fn activate_key(&self, key: &str) -> bool {
        self.inner.write().activate_key(key)
    }

    /// See [`FocusGroup::move_active`].
    pub fn move_active(&self, direction: Direction) {
        self.inner.write().move_active(direction);
    }

    /// See [`FocusGroup::handle_key`].
    pub fn handle_key(&self, event: &KeyEvent) -> EventResult {
        self.inner.write().handle_key(event)
    }

    /// The active item, if any.
    pub fn active(&self) -> Option<ItemId> {
        self.inner.read().active()
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// See [`FocusGroup::drain_events`].
    pub fn drain_events(&self) -> Vec<FocusEvent> {
        self.inner.write().drain_events()
    }

    /// Build the derived view for a registered item.
    pub fn view(&self, id: ItemId) -> Result<ItemView, FocusError> {
        let is_active = {
            let group = self.inner.read();
            if !group.contains(id) {
                return Err(FocusError::UnknownItem(id));
            }
            group.is_active(id)
        };

        let on_focus: FocusCallback = {
            let scope = self.clone();
            Arc::new(move || scope.activate(id))
        };
        let on_key: KeyCallback = {
            let scope = self.clone();
            Arc::new(move |event: &KeyEvent| scope.handle_key(event))
        };

        Ok(ItemView {
            id,
            is_active,
            tab_index: if is_active { 0 } else { -1 },
            on_focus,
            on_key,
        })
    }
}

impl fmt::Debug for FocusScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.read().fmt(f)
    }
}
