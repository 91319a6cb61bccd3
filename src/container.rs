//! Container component owning a focus group and its mounted items.

use crate::events::{EventResult, KeyEvent};
use crate::group::{FocusError, FocusEvent, FocusScope, ItemId};
use crate::item::{MountedItem, RovingItem};
use crate::node::{ElementNode, Node};
use crate::props::{PropValue, Props};
use smartstring::alias::String as SmartString;
use std::fmt;

/// A focus group together with the items mounted in it.
///
/// This is the component-level surface: push items, feed it key events,
/// render the whole group as one element. For finer control, work with
/// [`FocusScope`] and [`RovingItem::mount`] directly.
///
/// ```ignore
/// let mut group = RovingGroup::new()
///     .item(RovingItem::as_element("button").child("First"))
///     .item(RovingItem::as_element("button").child("Second"));
///
/// group.handle_key(&KeyEvent::new(KeyCode::Down));
/// let tree = group.render();
/// ```
pub struct RovingGroup {
    tag: SmartString,
    props: Props,
    scope: FocusScope,
    items: Vec<MountedItem>,
}

impl RovingGroup {
    /// Create an empty group rendering as a `"group"` element.
    pub fn new() -> Self {
        Self {
            tag: SmartString::from("group"),
            props: Props::new(),
            scope: FocusScope::new(),
            items: Vec::new(),
        }
    }

    /// Set the container element tag.
    pub fn tag(mut self, tag: impl Into<SmartString>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set a container prop.
    pub fn prop(mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Builder-style [`push`](Self::push).
    pub fn item(mut self, item: RovingItem) -> Self {
        self.push(item);
        self
    }

    /// Mount an item at the end of tab order.
    pub fn push(&mut self, item: RovingItem) -> ItemId {
        let id = item.id();
        self.items.push(item.mount_in(&self.scope));
        id
    }

    /// Unmount an item. Returns false if the id is not in this group.
    pub fn remove(&mut self, id: ItemId) -> bool {
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                // Dropping the mounted item unregisters it.
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Borrow a mounted item by id.
    pub fn get(&self, id: ItemId) -> Option<&MountedItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Clone the group's scope.
    pub fn scope(&self) -> FocusScope {
        self.scope.clone()
    }

    /// The active item, if any.
    pub fn active(&self) -> Option<ItemId> {
        self.scope.active()
    }

    /// Number of mounted items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the group has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offer a key event to the group's navigation.
    pub fn handle_key(&self, event: &KeyEvent) -> EventResult {
        self.scope.handle_key(event)
    }

    /// Drain focus transition events since the last call.
    pub fn drain_events(&self) -> Vec<FocusEvent> {
        self.scope.drain_events()
    }

    /// Render the container element with every item as a child.
    pub fn render(&self) -> Result<Node, FocusError> {
        let mut el = ElementNode::new(self.tag.clone()).props(self.props.clone());
        for item in &self.items {
            el = el.child(item.render()?);
        }
        Ok(el.into())
    }
}

impl Default for RovingGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RovingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RovingGroup")
            .field("tag", &self.tag)
            .field("items", &self.items)
            .field("active", &self.scope.active())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::KeyCode;
    use crate::props::TAB_INDEX;

    fn three_buttons() -> (RovingGroup, Vec<ItemId>) {
        let mut group = RovingGroup::new();
        let ids = vec![
            group.push(RovingItem::as_element("button").child("X")),
            group.push(RovingItem::as_element("button").child("Y")),
            group.push(RovingItem::as_element("button").child("Z")),
        ];
        (group, ids)
    }

    #[test]
    fn first_item_active_after_mounting() {
        let (group, ids) = three_buttons();
        assert_eq!(group.active(), Some(ids[0]));
    }

    #[test]
    fn render_marks_exactly_one_item_tabbable() {
        let (group, _) = three_buttons();
        let tree = group.render().unwrap();
        let el = tree.as_element().unwrap();
        let tabbable = el
            .children
            .iter()
            .filter(|child| {
                child.as_element().and_then(|c| c.props.get(TAB_INDEX))
                    == Some(&PropValue::Int(0))
            })
            .count();
        assert_eq!(tabbable, 1);
        assert_eq!(el.children.len(), 3);
    }

    #[test]
    fn arrow_key_moves_activation() {
        let (group, ids) = three_buttons();
        let result = group.handle_key(&KeyEvent::new(KeyCode::Down));
        assert!(result.is_consumed());
        assert_eq!(group.active(), Some(ids[1]));
    }

    #[test]
    fn remove_active_promotes_next_item() {
        let (mut group, ids) = three_buttons();
        assert!(group.remove(ids[0]));
        assert_eq!(group.active(), Some(ids[1]));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn remove_unknown_returns_false() {
        let (mut group, _) = three_buttons();
        assert!(!group.remove(ItemId::new()));
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn container_tag_and_props_render() {
        let group = RovingGroup::new()
            .tag("toolbar")
            .prop("class", "actions")
            .item(RovingItem::as_element("button").child("Go"));
        let tree = group.render().unwrap();
        let el = tree.as_element().unwrap();
        assert_eq!(el.tag, "toolbar");
        assert_eq!(el.props.get("class"), Some(&PropValue::from("actions")));
    }
}
