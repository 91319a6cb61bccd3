//! Node types for rendered element trees.
//!
//! This is the minimal tree surface the focus group needs: enough structure
//! to show which element a roving item rendered as, which props were
//! forwarded, and where the group injected its focus and key handlers.
//! Layout and painting are a host concern.

use crate::events::{fmt_handler, EventResult, FocusCallback, KeyCallback, KeyEvent};
use crate::props::{PropValue, Props};
use smallvec::SmallVec;
use smartstring::alias::String as SmartString;
use std::fmt;

/// Type alias for node children collections.
/// The Box provides the indirection the recursive type needs; SmallVec keeps
/// small child lists off the heap.
pub type NodeChildren = SmallVec<[Box<Node>; 4]>;

/// A node in a rendered tree.
#[derive(Clone)]
pub enum Node {
    /// An element with a tag, props, handlers, and children.
    Element(ElementNode),
    /// Plain text content.
    Text(TextNode),
}

impl Node {
    /// Borrow the element if this node is one.
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Render the tree as a single deterministic line.
    ///
    /// Elements print as `(tag key=value .. @focus @keys children..)`;
    /// handler slots print as markers rather than values. Used by snapshot
    /// tests and debug logging.
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            Self::Text(text) => {
                out.push('"');
                out.push_str(&text.content);
                out.push('"');
            }
            Self::Element(el) => {
                out.push('(');
                out.push_str(&el.tag);
                for (key, value) in el.props.iter() {
                    out.push(' ');
                    out.push_str(key);
                    out.push('=');
                    match value {
                        PropValue::Str(s) => {
                            out.push('"');
                            out.push_str(s);
                            out.push('"');
                        }
                        PropValue::Int(i) => out.push_str(&i.to_string()),
                        PropValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
                    }
                }
                if el.on_focus.is_some() {
                    out.push_str(" @focus");
                }
                if el.on_key.is_some() {
                    out.push_str(" @keys");
                }
                for child in &el.children {
                    out.push(' ');
                    child.write_compact(out);
                }
                out.push(')');
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(el) => el.fmt(f),
            Self::Text(text) => text.fmt(f),
        }
    }
}

/// An element node: tag, props, optional handlers, children.
#[derive(Clone, Default)]
pub struct ElementNode {
    /// Element tag (e.g. `"button"`).
    pub tag: SmartString,
    /// Forwarded props.
    pub props: Props,
    /// Children in render order.
    pub children: NodeChildren,
    on_focus: Option<FocusCallback>,
    on_key: Option<KeyCallback>,
}

impl ElementNode {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<SmartString>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set a single prop.
    pub fn prop(mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Replace the whole prop bag.
    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(Box::new(node.into()));
        self
    }

    /// Install the focus handler.
    pub fn on_focus(mut self, callback: FocusCallback) -> Self {
        self.on_focus = Some(callback);
        self
    }

    /// Install the key handler.
    pub fn on_key(mut self, callback: KeyCallback) -> Self {
        self.on_key = Some(callback);
        self
    }

    /// Check whether a focus handler is installed.
    pub fn has_focus_handler(&self) -> bool {
        self.on_focus.is_some()
    }

    /// Check whether a key handler is installed.
    pub fn has_key_handler(&self) -> bool {
        self.on_key.is_some()
    }

    /// Deliver a focus event to this element, as a host does when the
    /// element is clicked or tabbed into directly.
    pub fn emit_focus(&self) {
        if let Some(callback) = &self.on_focus {
            callback();
        }
    }

    /// Offer a key event to this element's handler.
    pub fn emit_key(&self, event: &KeyEvent) -> EventResult {
        match &self.on_key {
            Some(callback) => callback(event),
            None => EventResult::Ignored,
        }
    }
}

impl fmt::Debug for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ElementNode {{ tag: {:?}, props: {:?}, on_focus: ",
            self.tag, self.props
        )?;
        fmt_handler(f, self.on_focus.is_some())?;
        f.write_str(", on_key: ")?;
        fmt_handler(f, self.on_key.is_some())?;
        write!(f, ", children: {:?} }}", self.children)
    }
}

/// Plain text content.
#[derive(Debug, Clone, Default)]
pub struct TextNode {
    /// The text.
    pub content: String,
}

impl TextNode {
    /// Create a text node.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl From<ElementNode> for Node {
    fn from(el: ElementNode) -> Self {
        Self::Element(el)
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(TextNode::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::KeyCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn compact_string_plain_element() {
        let node: Node = ElementNode::new("button")
            .prop("class", "primary")
            .child("Save")
            .into();
        assert_eq!(
            node.to_compact_string(),
            r#"(button class="primary" "Save")"#
        );
    }

    #[test]
    fn compact_string_marks_handlers() {
        let node: Node = ElementNode::new("button").on_focus(Arc::new(|| {})).into();
        assert_eq!(node.to_compact_string(), "(button @focus)");
    }

    #[test]
    fn compact_string_nested() {
        let node: Node = ElementNode::new("group")
            .child(ElementNode::new("item").prop("tabindex", 0))
            .child(ElementNode::new("item").prop("tabindex", -1))
            .into();
        assert_eq!(
            node.to_compact_string(),
            "(group (item tabindex=0) (item tabindex=-1))"
        );
    }

    #[test]
    fn emit_focus_runs_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let el = ElementNode::new("button").on_focus(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        el.emit_focus();
        el.emit_focus();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn emit_key_without_handler_is_ignored() {
        let el = ElementNode::new("button");
        let result = el.emit_key(&KeyEvent::new(KeyCode::Down));
        assert_eq!(result, EventResult::Ignored);
    }
}
