//! # Input
//!
//! The core never polls devices. The application shell implements [`Input`] over
//! whatever windowing layer it uses, and the engine reads it once per frame to turn
//! pointer presses into block edits.

use super::voxels::block::block_type::BlockType;

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Derives the state from whether the input was down last frame and is down now
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// Keys the engine may query. Mapping physical keys onto these is up to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move towards the view direction
    Forward,
    /// Move away from the view direction
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Move up
    Up,
    /// Move down
    Down,
}

/// Pointer buttons the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button; breaks blocks
    Primary,
    /// Usually the right mouse button; places blocks
    Secondary,
}

/// Read-only view of the input devices for the current frame.
pub trait Input {
    /// State of a key this frame.
    fn key_state(&self, key: Key) -> RawInputState;

    /// State of a pointer button this frame.
    fn button_state(&self, button: PointerButton) -> RawInputState;

    /// Pointer position in window coordinates.
    fn pointer_position(&self) -> (f64, f64);

    /// Whether `key` is down (pressed this frame or held).
    fn is_key_pressed(&self, key: Key) -> bool {
        self.key_state(key).is_active()
    }
}

/// A block edit driven by a ray from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEdit {
    /// Replace the hit block with air
    Break,
    /// Fill the empty cell in front of the hit face
    Place(BlockType),
}

impl BlockEdit {
    /// Translates this frame's pointer presses into an edit.
    ///
    /// Only fresh presses count; holding a button does not repeat the edit. The
    /// primary button wins when both were pressed in the same frame.
    pub fn from_input(input: &dyn Input) -> Option<BlockEdit> {
        if input.button_state(PointerButton::Primary).is_just_pressed() {
            Some(BlockEdit::Break)
        } else if input.button_state(PointerButton::Secondary).is_just_pressed() {
            Some(BlockEdit::Place(BlockType::COBBLESTONE))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Buttons {
        primary: RawInputState,
        secondary: RawInputState,
    }

    impl Input for Buttons {
        fn key_state(&self, _key: Key) -> RawInputState {
            RawInputState::Held
        }

        fn button_state(&self, button: PointerButton) -> RawInputState {
            match button {
                PointerButton::Primary => self.primary,
                PointerButton::Secondary => self.secondary,
            }
        }

        fn pointer_position(&self) -> (f64, f64) {
            (0.0, 0.0)
        }
    }

    #[test]
    fn transitions_follow_previous_and_current_state() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert!(!RawInputState::default().is_active());
    }

    #[test]
    fn fresh_presses_become_edits() {
        let input = Buttons {
            primary: RawInputState::from_raw_states(false, true),
            secondary: RawInputState::NotPressed,
        };
        assert_eq!(BlockEdit::from_input(&input), Some(BlockEdit::Break));
        assert!(input.is_key_pressed(Key::Forward));

        let input = Buttons {
            primary: RawInputState::Held,
            secondary: RawInputState::Pressed,
        };
        assert_eq!(
            BlockEdit::from_input(&input),
            Some(BlockEdit::Place(BlockType::COBBLESTONE))
        );

        let input = Buttons {
            primary: RawInputState::Held,
            secondary: RawInputState::Released,
        };
        assert_eq!(BlockEdit::from_input(&input), None);
    }
}
