#![allow(clippy::unwrap_used)]
//! Snapshot tests over the compact rendered-tree format.
//!
//! The compact format is deterministic: props print in insertion order and
//! handler slots print as markers, so these snapshots pin both prop
//! forwarding and handler injection.

use roving::prelude::*;

#[test]
fn fresh_group_marks_first_item_tabbable() {
    let group = RovingGroup::new()
        .item(RovingItem::as_element("button").child("X"))
        .item(RovingItem::as_element("button").child("Y"))
        .item(RovingItem::as_element("button").child("Z"));

    let tree = group.render().unwrap();
    insta::assert_snapshot!(
        tree.to_compact_string(),
        @r#"(group (button tabindex=0 @focus @keys "X") (button tabindex=-1 @focus @keys "Y") (button tabindex=-1 @focus @keys "Z"))"#
    );
}

#[test]
fn navigation_moves_the_tabbable_slot() {
    let group = RovingGroup::new()
        .item(RovingItem::as_element("button").child("X"))
        .item(RovingItem::as_element("button").child("Y"));

    group.handle_key(&KeyEvent::new(KeyCode::Down));
    let tree = group.render().unwrap();
    insta::assert_snapshot!(
        tree.to_compact_string(),
        @r#"(group (button tabindex=-1 @focus @keys "X") (button tabindex=0 @focus @keys "Y"))"#
    );
}

#[test]
fn substitute_element_with_forwarded_class() {
    let scope = FocusScope::new();
    let mounted = RovingItem::as_element("button")
        .prop("class", "my-button")
        .child("Click Me!")
        .mount_in(&scope);

    let node = mounted.render().unwrap();
    insta::assert_snapshot!(
        node.to_compact_string(),
        @r#"(button class="my-button" tabindex=0 @focus @keys "Click Me!")"#
    );
}

#[test]
fn render_fn_controls_its_own_tree() {
    let scope = FocusScope::new();
    let mounted = RovingItem::render_with(|view| {
        ElementNode::new("chip")
            .prop("tabindex", view.tab_index)
            .prop("active", view.is_active)
            .child("Pick Me")
            .into()
    })
    .mount_in(&scope);

    let node = mounted.render().unwrap();
    insta::assert_snapshot!(
        node.to_compact_string(),
        @r#"(chip tabindex=0 active=true "Pick Me")"#
    );
}

#[test]
fn container_tag_and_props_print_first() {
    let group = RovingGroup::new()
        .tag("toolbar")
        .prop("class", "actions")
        .item(RovingItem::as_element("button").child("Go"));

    let tree = group.render().unwrap();
    insta::assert_snapshot!(
        tree.to_compact_string(),
        @r#"(toolbar class="actions" (button tabindex=0 @focus @keys "Go"))"#
    );
}
