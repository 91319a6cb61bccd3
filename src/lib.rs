//! Roving tab index focus management for terminal UI component trees.
//!
//! Composite widgets (toolbars, tree views, menus) keep exactly one child in
//! the tab sequence at a time; the rest are reached with arrow keys. This
//! crate implements that state machine: a [`FocusGroup`] tracks an ordered
//! set of registered items and the single *active* item whose element gets
//! `tabindex = 0`, moving activation on arrow/Home/End navigation and
//! re-resolving it when items mount or unmount.
//!
//! # Quick Start
//!
//! ```ignore
//! use roving::prelude::*;
//!
//! let mut group = RovingGroup::new()
//!     .item(RovingItem::as_element("button").prop("class", "save").child("Save"))
//!     .item(RovingItem::as_element("button").child("Cancel"))
//!     .item(RovingItem::render_with(|view| {
//!         ElementNode::new("chip")
//!             .prop("tabindex", view.tab_index)
//!             .into()
//!     }));
//!
//! // Arrow keys move the active item and request real input focus for it.
//! group.handle_key(&KeyEvent::new(KeyCode::Down));
//!
//! // Render: one child has tabindex=0, the rest tabindex=-1, and the
//! // group's focus/key handlers are installed on each element.
//! let tree = group.render()?;
//! ```
//!
//! # Design
//!
//! - No hidden registry: the container owns a [`FocusScope`] and passes it
//!   to items explicitly. Mounting an item without a scope fails with
//!   [`FocusError::MissingProvider`].
//! - All mutation is synchronous and happens on the UI thread in event
//!   order; the scope's lock is uncontended by construction.
//! - Hosts observe focus side effects through [`ElementHandle`]: arrow
//!   navigation requests real input focus on the target element, which the
//!   host applies with its own focus primitive.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`group`] | Focus group state machine and shared scope |
//! | [`item`] | Per-item declarations and render polymorphism |
//! | [`container`] | Component-level group wrapper |
//! | [`handle`] | Element handles and focus/blur callbacks |
//! | [`node`] | Minimal rendered-tree types |
//! | [`props`] | Ordered prop bags with reserved-key merging |
//! | [`events`] | Key events and handler callback types |

#![forbid(unsafe_code)]

pub mod container;
pub mod events;
pub mod group;
pub mod handle;
pub mod item;
pub mod node;
pub mod props;

pub use container::RovingGroup;
pub use events::{EventResult, FocusCallback, KeyCallback, KeyCode, KeyEvent, KeyModifiers};
pub use group::{Direction, FocusError, FocusEvent, FocusGroup, FocusScope, ItemId, ItemView};
pub use handle::ElementHandle;
pub use item::{ItemRender, MountedItem, RenderFn, RovingItem};
pub use node::{ElementNode, Node, NodeChildren, TextNode};
pub use props::{PropValue, Props, TAB_INDEX};

/// Commonly used types, re-exported for glob import.
pub mod prelude {
    pub use crate::container::RovingGroup;
    pub use crate::events::{EventResult, KeyCode, KeyEvent, KeyModifiers};
    pub use crate::group::{Direction, FocusError, FocusEvent, FocusScope, ItemId, ItemView};
    pub use crate::handle::ElementHandle;
    pub use crate::item::{MountedItem, RovingItem};
    pub use crate::node::{ElementNode, Node, TextNode};
    pub use crate::props::{PropValue, Props};
}
