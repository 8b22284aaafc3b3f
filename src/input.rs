use glam::Vec2;

/// Keyboard modifier snapshot carried with every input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: true,
    };

    pub fn any(self) -> bool {
        self.ctrl || self.alt || self.shift
    }
}

/// Mouse button state mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseButtons {
    pub const LEFT: MouseButtons = MouseButtons {
        left: true,
        right: false,
        middle: false,
    };
    pub const RIGHT: MouseButtons = MouseButtons {
        left: false,
        right: true,
        middle: false,
    };
    pub const LEFT_RIGHT: MouseButtons = MouseButtons {
        left: true,
        right: true,
        middle: false,
    };

    pub fn any(self) -> bool {
        self.left || self.right || self.middle
    }
}

/// Navigation keys the controller understands. The windowing adapter maps
/// platform key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    F,
    Q,
    E,
    T,
    G,
    Z,
    X,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
}

impl Key {
    /// The digit row, in order, for preset bindings.
    pub const DIGITS: [Key; 9] = [
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
    ];
}

/// A mouse press/release/move, in window coordinates.
#[derive(Debug, Clone, Copy)]
pub struct MouseEvent {
    pub buttons: MouseButtons,
    pub pos: Vec2,
    pub modifiers: Modifiers,
}

/// A wheel turn; positive delta is "toward the screen" (zoom in).
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    pub delta: f32,
    pub modifiers: Modifiers,
}
