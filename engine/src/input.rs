//! Normalized per-frame input snapshot.
//!
//! The platform layer fills an [`Input`] while it pumps window/device messages, the game reads it
//! once per frame, and [`Input::begin_frame`] then resets everything that only describes "this
//! frame" (changed bits, mouse delta, the event queue). Held state (`down`) persists.

use serde::{Deserialize, Serialize};

pub const KEY_COUNT: usize = 256;
pub const MOUSE_BUTTON_COUNT: usize = 5;
pub const JOYSTICK_COUNT: usize = 4;
pub const JOYSTICK_BUTTON_COUNT: usize = 32;
pub const JOYSTICK_AXIS_COUNT: usize = 8;
pub const JOYSTICK_POV_COUNT: usize = 4;
pub const INPUT_EVENT_CAPACITY: usize = 64;

/// Raw POV value reported when a hat is centered.
pub const POV_CENTERED: i32 = -1;

/// Key codes, numbered like Windows virtual keys so the whole space fits in 256 slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    Back = 0x08,
    Tab = 0x09,
    Return = 0x0D,
    Pause = 0x13,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    Insert = 0x2D,
    Delete = 0x2E,
    Key0 = 0x30,
    Key1 = 0x31,
    Key2 = 0x32,
    Key3 = 0x33,
    Key4 = 0x34,
    Key5 = 0x35,
    Key6 = 0x36,
    Key7 = 0x37,
    Key8 = 0x38,
    Key9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    LShift = 0xA0,
    RShift = 0xA1,
    LControl = 0xA2,
    RControl = 0xA3,
    LAlt = 0xA4,
    RAlt = 0xA5,
    /// Not a physical key: the platform presses it when the user asks to close the window.
    Quit = 0xFF,
}

impl Key {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

impl MouseButton {
    const fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::X1 => 3,
            MouseButton::X2 => 4,
        }
    }
}

/// Cardinal POV hat directions. Raw values are hundredths of a degree, clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PovDirection {
    Up,
    Right,
    Down,
    Left,
}

impl PovDirection {
    pub const fn raw(self) -> i32 {
        match self {
            PovDirection::Up => 0,
            PovDirection::Right => 9000,
            PovDirection::Down => 18000,
            PovDirection::Left => 27000,
        }
    }

    /// Only exact cardinal values map to a direction; centered and diagonal positions do not.
    pub const fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(PovDirection::Up),
            9000 => Some(PovDirection::Right),
            18000 => Some(PovDirection::Down),
            27000 => Some(PovDirection::Left),
            _ => None,
        }
    }
}

/// `down` is the level, `changed` means it toggled at least once during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub down: bool,
    pub changed: bool,
}

impl KeyState {
    pub fn pressed(self) -> bool {
        self.down && self.changed
    }

    pub fn released(self) -> bool {
        !self.down && self.changed
    }
}

/// Mouse buttons use the same level/edge encoding as keys.
pub type ButtonState = KeyState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub wheel: i32,
    pub buttons: [ButtonState; MOUSE_BUTTON_COUNT],
}

impl MouseState {
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickState {
    /// Bit `n` set while button `n` is held.
    pub buttons: u32,
    /// Bit `n` set if button `n` toggled this frame.
    pub changed_buttons: u32,
    pub axes: [i32; JOYSTICK_AXIS_COUNT],
    pub povs: [i32; JOYSTICK_POV_COUNT],
    pub pov_changed: [bool; JOYSTICK_POV_COUNT],
}

impl Default for JoystickState {
    fn default() -> Self {
        Self {
            buttons: 0,
            changed_buttons: 0,
            axes: [0; JOYSTICK_AXIS_COUNT],
            povs: [POV_CENTERED; JOYSTICK_POV_COUNT],
            pov_changed: [false; JOYSTICK_POV_COUNT],
        }
    }
}

impl JoystickState {
    pub fn button_down(&self, button: u8) -> bool {
        (button as usize) < JOYSTICK_BUTTON_COUNT && self.buttons & (1u32 << button) != 0
    }

    pub fn button_pressed(&self, button: u8) -> bool {
        self.button_down(button) && self.changed_buttons & (1u32 << button) != 0
    }

    pub fn pov(&self, pov: usize) -> Option<PovDirection> {
        self.povs.get(pov).and_then(|&v| PovDirection::from_raw(v))
    }

    /// Direction a hat moved *into* this frame, if any.
    pub fn pov_pressed(&self, pov: usize) -> Option<PovDirection> {
        if !self.pov_changed.get(pov).copied().unwrap_or(false) {
            return None;
        }
        self.pov(pov)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { button: MouseButton, x: i32, y: i32 },
    MouseUp { button: MouseButton, x: i32, y: i32 },
    MouseMove { x: i32, y: i32 },
    MouseWheel { delta: i32 },
    KeyDown(Key),
    KeyUp(Key),
    Char(char),
    ButtonDown { joystick: usize, button: u8 },
    ButtonUp { joystick: usize, button: u8 },
    Axis { joystick: usize, axis: usize, value: i32 },
    Pov { joystick: usize, pov: usize, value: i32 },
}

#[derive(Debug, Clone)]
pub struct Input {
    pub mouse: MouseState,
    keys: [KeyState; KEY_COUNT],
    joysticks: [JoystickState; JOYSTICK_COUNT],
    events: Vec<InputEvent>,
    dropped_events: usize,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            keys: [KeyState::default(); KEY_COUNT],
            joysticks: [JoystickState::default(); JOYSTICK_COUNT],
            events: Vec::with_capacity(INPUT_EVENT_CAPACITY),
            dropped_events: 0,
        }
    }

    /// Forgets per-frame transitions while keeping held state.
    pub fn begin_frame(&mut self) {
        for key in &mut self.keys {
            key.changed = false;
        }
        self.mouse.dx = 0;
        self.mouse.dy = 0;
        self.mouse.wheel = 0;
        for button in &mut self.mouse.buttons {
            button.changed = false;
        }
        for joy in &mut self.joysticks {
            joy.changed_buttons = 0;
            joy.pov_changed = [false; JOYSTICK_POV_COUNT];
        }
        self.events.clear();
        self.dropped_events = 0;
    }

    pub fn key(&self, key: Key) -> KeyState {
        self.keys[key.code() as usize]
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.key(key).pressed()
    }

    pub fn joystick(&self, index: usize) -> Option<&JoystickState> {
        self.joysticks.get(index)
    }

    pub fn joysticks(&self) -> &[JoystickState] {
        &self.joysticks
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn dropped_events(&self) -> usize {
        self.dropped_events
    }

    pub fn key_down(&mut self, key: Key) {
        let state = &mut self.keys[key.code() as usize];
        if state.down {
            // OS auto-repeat.
            return;
        }
        state.down = true;
        state.changed = true;
        log::debug!("key {key:?} down");
        self.push_event(InputEvent::KeyDown(key));
    }

    pub fn key_up(&mut self, key: Key) {
        let state = &mut self.keys[key.code() as usize];
        if !state.down {
            return;
        }
        state.down = false;
        state.changed = true;
        log::debug!("key {key:?} up");
        self.push_event(InputEvent::KeyUp(key));
    }

    pub fn char_input(&mut self, ch: char) {
        self.push_event(InputEvent::Char(ch));
    }

    pub fn mouse_move(&mut self, x: i32, y: i32) {
        if self.mouse.x == x && self.mouse.y == y {
            return;
        }
        self.mouse.dx += x - self.mouse.x;
        self.mouse.dy += y - self.mouse.y;
        self.mouse.x = x;
        self.mouse.y = y;
        self.push_event(InputEvent::MouseMove { x, y });
    }

    pub fn mouse_button(&mut self, button: MouseButton, down: bool) {
        let state = &mut self.mouse.buttons[button.index()];
        if state.down == down {
            return;
        }
        state.down = down;
        state.changed = true;
        let (x, y) = (self.mouse.x, self.mouse.y);
        log::trace!("mouse {button:?} {}", if down { "down" } else { "up" });
        self.push_event(if down {
            InputEvent::MouseDown { button, x, y }
        } else {
            InputEvent::MouseUp { button, x, y }
        });
    }

    pub fn mouse_wheel(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.mouse.wheel += delta;
        self.push_event(InputEvent::MouseWheel { delta });
    }

    pub fn joystick_button(&mut self, joystick: usize, button: u8, down: bool) {
        if (button as usize) >= JOYSTICK_BUTTON_COUNT {
            return;
        }
        let Some(joy) = self.joysticks.get_mut(joystick) else {
            return;
        };
        let bit = 1u32 << button;
        if (joy.buttons & bit != 0) == down {
            return;
        }
        if down {
            joy.buttons |= bit;
        } else {
            joy.buttons &= !bit;
        }
        joy.changed_buttons |= bit;
        log::debug!(
            "joystick #{joystick} button #{button} {}",
            if down { "down" } else { "up" }
        );
        self.push_event(if down {
            InputEvent::ButtonDown { joystick, button }
        } else {
            InputEvent::ButtonUp { joystick, button }
        });
    }

    pub fn joystick_axis(&mut self, joystick: usize, axis: usize, value: i32) {
        let Some(joy) = self.joysticks.get_mut(joystick) else {
            return;
        };
        let Some(slot) = joy.axes.get_mut(axis) else {
            return;
        };
        if *slot == value {
            return;
        }
        *slot = value;
        log::trace!("joystick #{joystick} axis #{axis} moved to {value}");
        self.push_event(InputEvent::Axis {
            joystick,
            axis,
            value,
        });
    }

    pub fn joystick_pov(&mut self, joystick: usize, pov: usize, value: i32) {
        let Some(joy) = self.joysticks.get_mut(joystick) else {
            return;
        };
        if pov >= JOYSTICK_POV_COUNT || joy.povs[pov] == value {
            return;
        }
        joy.povs[pov] = value;
        joy.pov_changed[pov] = true;
        log::debug!("joystick #{joystick} pov #{pov} moved to {value}");
        self.push_event(InputEvent::Pov {
            joystick,
            pov,
            value,
        });
    }

    fn push_event(&mut self, event: InputEvent) {
        if self.events.len() >= INPUT_EVENT_CAPACITY {
            self.dropped_events += 1;
            log::debug!("input event queue full, dropping {event:?}");
            return;
        }
        self.events.push(event);
    }
}
