//! Keyboard input collection for one rendered frame.

use app::app_loop::{FrameKeys, MOVE_KEYS};
use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const ACTION_KEYS: [KeyCode; 16] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
    KeyCode::Period,
    KeyCode::Space,
    KeyCode::T,
    KeyCode::I,
    KeyCode::P,
    KeyCode::L,
    KeyCode::N,
];

pub fn capture_frame_input() -> FrameKeys {
    let mut pressed = Vec::with_capacity(4);
    for key in MOVE_KEYS.into_iter().chain(ACTION_KEYS) {
        if is_key_pressed(key) {
            pressed.push(key);
        }
    }
    let held_move = MOVE_KEYS.into_iter().find(|&key| is_key_down(key));
    FrameKeys { pressed, held_move }
}
