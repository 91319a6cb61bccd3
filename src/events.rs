//! Key event types and handler callbacks.
//!
//! These are thin wrappers over the subset of terminal input that focus
//! navigation cares about. Hosts that read events with crossterm can convert
//! them directly via the provided `From` impls.

use std::fmt;
use std::sync::Arc;

/// Key codes relevant to focus navigation.
///
/// Anything the conversion layer does not recognize maps to
/// [`KeyCode::Other`], which navigation treats as unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Tab key.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Enter/Return.
    Enter,
    /// Escape.
    Esc,
    /// Any key this crate does not track.
    Other,
}

/// Modifier key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Control key held.
    pub ctrl: bool,
    /// Alt key held.
    pub alt: bool,
    /// Shift key held.
    pub shift: bool,
    /// Super/Command key held.
    pub super_key: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        super_key: false,
    };

    /// Control only.
    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        super_key: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
        super_key: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        super_key: false,
    };

    /// Check whether no modifier is held.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// A keyboard event: code plus modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held at the time.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create an event with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create an event with explicit modifiers.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

impl From<crossterm::event::KeyModifiers> for KeyModifiers {
    fn from(m: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers as Cm;
        Self {
            ctrl: m.contains(Cm::CONTROL),
            alt: m.contains(Cm::ALT),
            shift: m.contains(Cm::SHIFT),
            super_key: m.contains(Cm::SUPER),
        }
    }
}

impl From<crossterm::event::KeyCode> for KeyCode {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode as Cc;
        match code {
            Cc::Char(c) => Self::Char(c),
            Cc::Up => Self::Up,
            Cc::Down => Self::Down,
            Cc::Left => Self::Left,
            Cc::Right => Self::Right,
            Cc::Home => Self::Home,
            Cc::End => Self::End,
            Cc::Tab => Self::Tab,
            Cc::BackTab => Self::BackTab,
            Cc::Enter => Self::Enter,
            Cc::Esc => Self::Esc,
            _ => Self::Other,
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self {
            code: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}

/// Result of offering an event to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The handler acted on the event; stop propagation.
    Consumed,
    /// The handler did not act; offer the event elsewhere.
    Ignored,
}

impl EventResult {
    /// Check whether the event was consumed.
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Callback invoked when an element gains or loses activation.
pub type FocusCallback = Arc<dyn Fn() + Send + Sync>;

/// Callback offered keyboard events for an element.
pub type KeyCallback = Arc<dyn Fn(&KeyEvent) -> EventResult + Send + Sync>;

/// Format a callback slot for Debug impls without exposing the closure.
pub(crate) fn fmt_handler(f: &mut fmt::Formatter<'_>, present: bool) -> fmt::Result {
    if present {
        f.write_str("Some(<handler>)")
    } else {
        f.write_str("None")
    }
}
