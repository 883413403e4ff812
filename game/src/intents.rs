//! Input translation: one frame's [`Input`] snapshot in, a deduplicated set of intents out.
//!
//! Intents fire on transitions ("went down this frame"), never on held levels. A transition is
//! seen either through the state's changed bit or through a queued down event, so a press and
//! release inside one frame still counts. Any number of bound sources asserting the same intent
//! collapse into a single `true`.

use engine::input::{Input, InputEvent, Key, PovDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub rotate: bool,
    pub quit: bool,
}

impl Intents {
    pub fn any(&self) -> bool {
        self.move_left
            || self.move_right
            || self.soft_drop
            || self.hard_drop
            || self.rotate
            || self.quit
    }
}

/// A physical control that can feed an intent. POV and button sources match any joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Key(Key),
    Pov(PovDirection),
    Button(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub move_left: Vec<InputSource>,
    pub move_right: Vec<InputSource>,
    pub soft_drop: Vec<InputSource>,
    pub hard_drop: Vec<InputSource>,
    pub rotate: Vec<InputSource>,
    /// Window close ([`Key::Quit`]) always quits in addition to these.
    pub quit: Vec<Key>,
}

impl Default for Bindings {
    fn default() -> Self {
        use InputSource::{Button, Key as K, Pov};

        Self {
            move_left: vec![K(Key::Left), K(Key::A), Pov(PovDirection::Left)],
            move_right: vec![K(Key::Right), K(Key::D), Pov(PovDirection::Right)],
            soft_drop: vec![K(Key::Down), K(Key::S), Pov(PovDirection::Down)],
            hard_drop: vec![K(Key::Space), Button(1)],
            rotate: vec![K(Key::Up), K(Key::W), Pov(PovDirection::Up), Button(0)],
            quit: vec![Key::Escape],
        }
    }
}

pub fn translate(input: &Input, bindings: &Bindings) -> Intents {
    let quit = key_went_down(input, Key::Quit)
        || bindings.quit.iter().any(|&key| key_went_down(input, key));
    if quit {
        return Intents {
            quit: true,
            ..Intents::default()
        };
    }

    let intents = Intents {
        move_left: any_fired(input, &bindings.move_left),
        move_right: any_fired(input, &bindings.move_right),
        soft_drop: any_fired(input, &bindings.soft_drop),
        hard_drop: any_fired(input, &bindings.hard_drop),
        rotate: any_fired(input, &bindings.rotate),
        quit: false,
    };
    if intents.any() {
        log::trace!("intents {intents:?}");
    }
    intents
}

fn any_fired(input: &Input, sources: &[InputSource]) -> bool {
    sources.iter().any(|&source| fired(input, source))
}

fn fired(input: &Input, source: InputSource) -> bool {
    match source {
        InputSource::Key(key) => key_went_down(input, key),
        InputSource::Pov(direction) => pov_went_to(input, direction),
        InputSource::Button(button) => button_went_down(input, button),
    }
}

fn key_went_down(input: &Input, key: Key) -> bool {
    input.key_pressed(key)
        || input
            .events()
            .iter()
            .any(|event| matches!(event, InputEvent::KeyDown(k) if *k == key))
}

fn pov_went_to(input: &Input, direction: PovDirection) -> bool {
    let from_state = input.joysticks().iter().any(|joy| {
        (0..joy.povs.len()).any(|pov| joy.pov_pressed(pov) == Some(direction))
    });
    from_state
        || input.events().iter().any(|event| {
            matches!(event, InputEvent::Pov { value, .. }
                if PovDirection::from_raw(*value) == Some(direction))
        })
}

fn button_went_down(input: &Input, button: u8) -> bool {
    input.joysticks().iter().any(|joy| joy.button_pressed(button))
        || input.events().iter().any(|event| {
            matches!(event, InputEvent::ButtonDown { button: b, .. } if *b == button)
        })
}
