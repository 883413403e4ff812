//! Translation from winit window events into [`Input`] updates.

use winit::event::{ElementState, MouseScrollDelta, VirtualKeyCode, WindowEvent};

use crate::input::{Input, Key, MouseButton};

/// Feeds one window event into `input`. Events with no input meaning are ignored.
pub fn apply_window_event(input: &mut Input, event: &WindowEvent<'_>) {
    match event {
        WindowEvent::KeyboardInput { input: key, .. } => {
            let Some(code) = key.virtual_keycode.and_then(map_key) else {
                return;
            };
            match key.state {
                ElementState::Pressed => input.key_down(code),
                ElementState::Released => input.key_up(code),
            }
        }
        WindowEvent::ReceivedCharacter(ch) => input.char_input(*ch),
        WindowEvent::CursorMoved { position, .. } => {
            input.mouse_move(position.x.round() as i32, position.y.round() as i32);
        }
        WindowEvent::MouseInput { state, button, .. } => {
            if let Some(button) = map_mouse_button(*button) {
                input.mouse_button(button, *state == ElementState::Pressed);
            }
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
                MouseScrollDelta::PixelDelta(pos) => pos.y.signum() as i32,
            };
            input.mouse_wheel(lines);
        }
        _ => {}
    }
}

pub fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Other(_) => None,
    }
}

pub fn map_key(code: VirtualKeyCode) -> Option<Key> {
    use VirtualKeyCode as V;

    let key = match code {
        V::Back => Key::Back,
        V::Tab => Key::Tab,
        V::Return | V::NumpadEnter => Key::Return,
        V::Pause => Key::Pause,
        V::Escape => Key::Escape,
        V::Space => Key::Space,
        V::PageUp => Key::PageUp,
        V::PageDown => Key::PageDown,
        V::End => Key::End,
        V::Home => Key::Home,
        V::Left => Key::Left,
        V::Up => Key::Up,
        V::Right => Key::Right,
        V::Down => Key::Down,
        V::Insert => Key::Insert,
        V::Delete => Key::Delete,
        V::Key0 => Key::Key0,
        V::Key1 => Key::Key1,
        V::Key2 => Key::Key2,
        V::Key3 => Key::Key3,
        V::Key4 => Key::Key4,
        V::Key5 => Key::Key5,
        V::Key6 => Key::Key6,
        V::Key7 => Key::Key7,
        V::Key8 => Key::Key8,
        V::Key9 => Key::Key9,
        V::A => Key::A,
        V::B => Key::B,
        V::C => Key::C,
        V::D => Key::D,
        V::E => Key::E,
        V::F => Key::F,
        V::G => Key::G,
        V::H => Key::H,
        V::I => Key::I,
        V::J => Key::J,
        V::K => Key::K,
        V::L => Key::L,
        V::M => Key::M,
        V::N => Key::N,
        V::O => Key::O,
        V::P => Key::P,
        V::Q => Key::Q,
        V::R => Key::R,
        V::S => Key::S,
        V::T => Key::T,
        V::U => Key::U,
        V::V => Key::V,
        V::W => Key::W,
        V::X => Key::X,
        V::Y => Key::Y,
        V::Z => Key::Z,
        V::Numpad0 => Key::Numpad0,
        V::Numpad1 => Key::Numpad1,
        V::Numpad2 => Key::Numpad2,
        V::Numpad3 => Key::Numpad3,
        V::Numpad4 => Key::Numpad4,
        V::Numpad5 => Key::Numpad5,
        V::Numpad6 => Key::Numpad6,
        V::Numpad7 => Key::Numpad7,
        V::Numpad8 => Key::Numpad8,
        V::Numpad9 => Key::Numpad9,
        V::F1 => Key::F1,
        V::F2 => Key::F2,
        V::F3 => Key::F3,
        V::F4 => Key::F4,
        V::F5 => Key::F5,
        V::F6 => Key::F6,
        V::F7 => Key::F7,
        V::F8 => Key::F8,
        V::F9 => Key::F9,
        V::F10 => Key::F10,
        V::F11 => Key::F11,
        V::F12 => Key::F12,
        V::LShift => Key::LShift,
        V::RShift => Key::RShift,
        V::LControl => Key::LControl,
        V::RControl => Key::RControl,
        V::LAlt => Key::LAlt,
        V::RAlt => Key::RAlt,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_letters_map_to_virtual_key_codes() {
        assert_eq!(map_key(VirtualKeyCode::Left).map(Key::code), Some(0x25));
        assert_eq!(map_key(VirtualKeyCode::Down).map(Key::code), Some(0x28));
        assert_eq!(map_key(VirtualKeyCode::W).map(Key::code), Some(0x57));
        assert_eq!(map_key(VirtualKeyCode::Escape).map(Key::code), Some(0x1B));
        assert_eq!(map_key(VirtualKeyCode::F12).map(Key::code), Some(0x7B));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(VirtualKeyCode::Snapshot), None);
        assert_eq!(map_mouse_button(winit::event::MouseButton::Other(7)), None);
    }
}
