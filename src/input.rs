//! Keyboard handling shared by the demos.
//!
//! Key repeat guards live in [`InputState`]: a held key acts once, on the
//! press, and is armed again by its release.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Speeds the colour pulse up.
    K,
    /// Slows the colour pulse down.
    J,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputAction {
    Close,
    SpeedChanged(f32),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    color_speed: f32,
    k_held: bool,
    j_held: bool,
}

impl InputState {
    pub fn color_speed(&self) -> f32 {
        self.color_speed
    }

    pub fn handle_key(&mut self, key: Key, pressed: bool) -> Option<InputAction> {
        match key {
            Key::Escape => pressed.then_some(InputAction::Close),
            Key::K => Self::step(&mut self.k_held, &mut self.color_speed, 1.0, pressed),
            Key::J => Self::step(&mut self.j_held, &mut self.color_speed, -1.0, pressed),
        }
    }

    fn step(held: &mut bool, speed: &mut f32, delta: f32, pressed: bool) -> Option<InputAction> {
        if !pressed {
            *held = false;
            return None;
        }

        if *held {
            return None;
        }

        *held = true;
        *speed += delta;
        Some(InputAction::SpeedChanged(*speed))
    }

    /// Re-arms both speed keys, for when their releases can no longer be seen.
    pub fn release_keys(&mut self) {
        self.k_held = false;
        self.j_held = false;
    }

    /// Brightness factor in `[0, 1]` after `elapsed` seconds.
    pub fn pulse(&self, elapsed: f32) -> f32 {
        if self.color_speed == 0.0 {
            return 1.0;
        }

        (elapsed * self.color_speed).sin() / 2.0 + 0.5
    }
}
