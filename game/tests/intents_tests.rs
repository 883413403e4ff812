use engine::input::{Input, Key, POV_CENTERED, PovDirection};
use game::intents::{Bindings, InputSource, Intents, translate};

fn intents_for(setup: impl FnOnce(&mut Input)) -> Intents {
    let mut input = Input::new();
    setup(&mut input);
    translate(&input, &Bindings::default())
}

#[test]
fn arrow_keys_map_to_intents() {
    let intents = intents_for(|input| {
        input.key_down(Key::Left);
        input.key_down(Key::Up);
        input.key_down(Key::Down);
    });
    assert_eq!(
        intents,
        Intents {
            move_left: true,
            rotate: true,
            soft_drop: true,
            ..Intents::default()
        }
    );
    assert!(intents_for(|input| input.key_down(Key::Space)).hard_drop);
    assert!(intents_for(|input| input.key_down(Key::Right)).move_right);
}

#[test]
fn keyboard_and_pov_for_same_intent_collapse() {
    let intents = intents_for(|input| {
        input.key_down(Key::Left);
        input.key_down(Key::A);
        input.joystick_pov(0, 0, PovDirection::Left.raw());
    });
    assert_eq!(
        intents,
        Intents {
            move_left: true,
            ..Intents::default()
        }
    );
}

#[test]
fn held_keys_do_not_repeat() {
    let mut input = Input::new();
    input.key_down(Key::Left);
    assert!(translate(&input, &Bindings::default()).move_left);

    input.begin_frame();
    input.key_down(Key::Left);
    assert!(!translate(&input, &Bindings::default()).any());
}

#[test]
fn tap_within_one_frame_still_fires() {
    let intents = intents_for(|input| {
        input.key_down(Key::Up);
        input.key_up(Key::Up);
    });
    assert!(intents.rotate);
}

#[test]
fn escape_and_window_close_quit_before_anything_else() {
    let intents = intents_for(|input| {
        input.key_down(Key::Space);
        input.key_down(Key::Escape);
    });
    assert_eq!(
        intents,
        Intents {
            quit: true,
            ..Intents::default()
        }
    );
    assert!(intents_for(|input| input.key_down(Key::Quit)).quit);
}

#[test]
fn joystick_buttons_rotate_and_drop() {
    let intents = intents_for(|input| {
        input.joystick_button(2, 0, true);
        input.joystick_button(3, 1, true);
    });
    assert!(intents.rotate);
    assert!(intents.hard_drop);
}

#[test]
fn pov_fires_only_on_entering_a_direction() {
    let mut input = Input::new();
    input.joystick_pov(0, 0, PovDirection::Down.raw());
    assert!(translate(&input, &Bindings::default()).soft_drop);

    input.begin_frame();
    assert!(!translate(&input, &Bindings::default()).soft_drop);

    input.joystick_pov(0, 0, POV_CENTERED);
    assert!(!translate(&input, &Bindings::default()).any());
}

#[test]
fn custom_bindings_replace_defaults() {
    let bindings = Bindings {
        rotate: vec![InputSource::Key(Key::X)],
        ..Bindings::default()
    };
    let mut input = Input::new();
    input.key_down(Key::Up);
    assert!(!translate(&input, &bindings).rotate);
    input.key_down(Key::X);
    assert!(translate(&input, &bindings).rotate);
}
