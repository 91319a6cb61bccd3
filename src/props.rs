//! Property bags for rendered elements.
//!
//! Props are ordered key/value pairs forwarded onto a rendered element.
//! Insertion order is preserved so rendered output is deterministic.
//!
//! The `tabindex` key is reserved: the focus group always controls it, and a
//! caller-supplied value is overwritten when the derived view is merged in.

use indexmap::IndexMap;
use smartstring::alias::String as SmartString;

/// Reserved prop key owned by the focus group.
pub const TAB_INDEX: &str = "tabindex";

/// A single property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// String value.
    Str(SmartString),
    /// Integer value.
    Int(i64),
    /// Boolean value.
    Bool(bool),
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(SmartString::from(s))
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(SmartString::from(s))
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Ordered property bag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Props {
    map: IndexMap<SmartString, PropValue>,
}

impl Props {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn set(mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing any existing value for the key in place.
    pub fn insert(&mut self, key: impl Into<SmartString>, value: impl Into<PropValue>) {
        self.map.insert(key.into(), value.into());
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.map.get(key)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate props in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check whether a key is reserved for the focus group.
    pub fn is_reserved(key: &str) -> bool {
        key.eq_ignore_ascii_case(TAB_INDEX)
    }

    /// Merge controller-derived props into caller props.
    ///
    /// Caller values win for ordinary keys; reserved keys are always taken
    /// from `derived`, replacing a caller value in place so prop order stays
    /// stable.
    pub fn merge_derived(&mut self, derived: &Props) {
        for (key, value) in &derived.map {
            if Self::is_reserved(key) || !self.map.contains_key(key) {
                self.map.insert(key.clone(), value.clone());
            }
        }
    }
}
