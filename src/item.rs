//! Roving items: the per-child half of the roving tab index pattern.
//!
//! A [`RovingItem`] declares how one focusable child renders. It is either a
//! substitute element (`as_element("button")`, props forwarded, handlers
//! injected) or a render function called with the item's derived
//! [`ItemView`]. Exactly one mode applies per item.
//!
//! Mounting registers the item with a [`FocusScope`]; the returned
//! [`MountedItem`] unregisters on drop, so item lifetime is tied to the
//! value like any other RAII guard.

use crate::group::{FocusError, FocusScope, ItemId, ItemView};
use crate::handle::ElementHandle;
use crate::node::{ElementNode, Node, NodeChildren};
use crate::props::{PropValue, Props};
use smartstring::alias::String as SmartString;
use std::fmt;
use std::sync::Arc;

/// Render function mode: called with the derived view, returns the tree.
pub type RenderFn = Arc<dyn Fn(&ItemView) -> Node + Send + Sync>;

/// How an item turns its derived view into a tree.
#[derive(Clone)]
pub enum ItemRender {
    /// Render as the given substitute element tag.
    As(SmartString),
    /// Render through a caller-supplied function.
    With(RenderFn),
}

impl fmt::Debug for ItemRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::As(tag) => f.debug_tuple("As").field(tag).finish(),
            Self::With(_) => f.write_str("With(<render fn>)"),
        }
    }
}

/// Declaration of one focusable child of a focus group.
pub struct RovingItem {
    id: ItemId,
    render: ItemRender,
    props: Props,
    children: NodeChildren,
    key: Option<SmartString>,
    handle: ElementHandle,
}

impl RovingItem {
    fn new(render: ItemRender) -> Self {
        Self {
            id: ItemId::new(),
            render,
            props: Props::new(),
            children: NodeChildren::new(),
            key: None,
            handle: ElementHandle::new(),
        }
    }

    /// Render as a substitute element with the given tag.
    pub fn as_element(tag: impl Into<SmartString>) -> Self {
        Self::new(ItemRender::As(tag.into()))
    }

    /// Render through a function receiving the derived view.
    pub fn render_with<F>(render: F) -> Self
    where
        F: Fn(&ItemView) -> Node + Send + Sync + 'static,
    {
        Self::new(ItemRender::With(Arc::new(render)))
    }

    /// This item's id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Set a string key for [`FocusScope::activate_key`] lookup.
    pub fn key(mut self, key: impl Into<SmartString>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set a pass-through prop (forwarded in `as_element` mode).
    pub fn prop(mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Append a pass-through child (forwarded in `as_element` mode).
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(Box::new(node.into()));
        self
    }

    /// Replace the element handle, e.g. to attach focus/blur callbacks.
    pub fn with_handle(mut self, handle: ElementHandle) -> Self {
        self.handle = handle;
        self
    }

    /// Clone this item's element handle for host wiring.
    pub fn handle(&self) -> ElementHandle {
        self.handle.clone()
    }

    /// Mount into a focus group scope.
    ///
    /// Fails with [`FocusError::MissingProvider`] when no scope is supplied:
    /// tab index and activation are undefined outside a group, so there is
    /// no sensible standalone rendering.
    pub fn mount(self, scope: Option<&FocusScope>) -> Result<MountedItem, FocusError> {
        match scope {
            Some(scope) => Ok(self.mount_in(scope)),
            None => Err(FocusError::MissingProvider),
        }
    }

    /// Mount into a known scope.
    pub fn mount_in(self, scope: &FocusScope) -> MountedItem {
        match &self.key {
            Some(key) => scope.register_keyed(self.id, key.clone(), self.handle.clone()),
            None => scope.register(self.id, self.handle.clone()),
        }
        MountedItem {
            scope: scope.clone(),
            item: self,
        }
    }
}

impl fmt::Debug for RovingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RovingItem")
            .field("id", &self.id)
            .field("render", &self.render)
            .field("key", &self.key)
            .finish()
    }
}

/// A mounted item. Dropping it unregisters the item from its group.
pub struct MountedItem {
    scope: FocusScope,
    item: RovingItem,
}

impl MountedItem {
    /// The item's id.
    pub fn id(&self) -> ItemId {
        self.item.id
    }

    /// Clone the element handle for host wiring.
    pub fn handle(&self) -> ElementHandle {
        self.item.handle.clone()
    }

    /// The derived view at this instant.
    pub fn view(&self) -> Result<ItemView, FocusError> {
        self.scope.view(self.item.id)
    }

    /// Render the item.
    ///
    /// In `as_element` mode the caller's props are forwarded and merged with
    /// the derived props (caller wins except for reserved keys), and the
    /// group's focus/key handlers are installed on the element. In render-fn
    /// mode the function receives the derived view and builds the tree
    /// itself.
    pub fn render(&self) -> Result<Node, FocusError> {
        let view = self.scope.view(self.item.id)?;
        let node = match &self.item.render {
            ItemRender::With(render) => render(&view),
            ItemRender::As(tag) => {
                let mut props = self.item.props.clone();
                props.merge_derived(&view.props());
                let mut el = ElementNode::new(tag.clone())
                    .props(props)
                    .on_focus(view.on_focus.clone())
                    .on_key(view.on_key.clone());
                el.children = self.item.children.clone();
                el.into()
            }
        };
        Ok(node)
    }
}

impl Drop for MountedItem {
    fn drop(&mut self) {
        self.scope.unregister(self.item.id);
    }
}

impl fmt::Debug for MountedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedItem")
            .field("item", &self.item)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::props::TAB_INDEX;

    #[test]
    fn mount_without_scope_fails() {
        let err = RovingItem::as_element("button").mount(None).unwrap_err();
        assert_eq!(err, FocusError::MissingProvider);
    }

    #[test]
    fn mount_registers_and_drop_unregisters() {
        let scope = FocusScope::new();
        let mounted = RovingItem::as_element("button").mount(Some(&scope)).unwrap();
        let id = mounted.id();
        assert_eq!(scope.active(), Some(id));
        assert_eq!(scope.len(), 1);

        drop(mounted);
        assert!(scope.is_empty());
        assert_eq!(scope.active(), None);
    }

    #[test]
    fn as_element_injects_derived_props_and_handlers() {
        let scope = FocusScope::new();
        let mounted = RovingItem::as_element("button")
            .prop("class", "my-button")
            .child("Click Me!")
            .mount_in(&scope);

        let node = mounted.render().unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.tag, "button");
        assert_eq!(el.props.get("class"), Some(&PropValue::from("my-button")));
        assert_eq!(el.props.get(TAB_INDEX), Some(&PropValue::Int(0)));
        assert!(el.has_focus_handler());
        assert!(el.has_key_handler());
        assert_eq!(el.children.len(), 1);
    }

    #[test]
    fn caller_cannot_override_tab_index() {
        let scope = FocusScope::new();
        let active = RovingItem::as_element("button").mount_in(&scope);
        let parked = RovingItem::as_element("button")
            .prop(TAB_INDEX, 7)
            .mount_in(&scope);

        let node = parked.render().unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.props.get(TAB_INDEX), Some(&PropValue::Int(-1)));
        drop(active);
    }

    #[test]
    fn render_fn_receives_view() {
        let scope = FocusScope::new();
        let mounted = RovingItem::render_with(|view| {
            ElementNode::new("custom")
                .prop("active", view.is_active)
                .prop(TAB_INDEX, view.tab_index)
                .into()
        })
        .mount_in(&scope);

        let node = mounted.render().unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.tag, "custom");
        assert_eq!(el.props.get("active"), Some(&PropValue::Bool(true)));
        assert_eq!(el.props.get(TAB_INDEX), Some(&PropValue::Int(0)));
    }

    #[test]
    fn keyed_item_activates_by_key() {
        let scope = FocusScope::new();
        let _first = RovingItem::as_element("button").mount_in(&scope);
        let second = RovingItem::as_element("button").key("save").mount_in(&scope);

        assert!(scope.activate_key("save"));
        assert_eq!(scope.active(), Some(second.id()));
    }
}
