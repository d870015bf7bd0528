//! Keyboard-driven camera motion.
//!
//! Six keys move the camera along the three world axes. Pressing a key sets
//! the velocity on its axis to plus or minus the configured speed; releasing
//! it sets the velocity on that axis back to zero, even if the opposite key
//! is still held.
//!
//! | key | motion   | axis | sign |
//! |-----|----------|------|------|
//! | W   | forward  | z    | +    |
//! | S   | back     | z    | −    |
//! | Q   | up       | y    | +    |
//! | E   | down     | y    | −    |
//! | A   | left     | x    | +    |
//! | D   | right    | x    | −    |

use softras_core::math::{Vec3, vec3};
use softras_core::render::World;

/// A direction in which the camera can be moved.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Motion {
    Forward,
    Back,
    Up,
    Down,
    Left,
    Right,
}

/// The camera velocity resulting from the keys currently held.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Input {
    vel: [f32; 3],
    speed: f32,
}

impl Motion {
    /// Returns the motion bound to `key`, if any. Case insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        use Motion::*;
        Some(match key.to_ascii_lowercase() {
            'w' => Forward,
            's' => Back,
            'q' => Up,
            'e' => Down,
            'a' => Left,
            'd' => Right,
            _ => return None,
        })
    }

    /// Returns the index of the axis `self` moves along, and the sign of
    /// the movement.
    fn axis(self) -> (usize, f32) {
        use Motion::*;
        match self {
            Forward => (2, 1.0),
            Back => (2, -1.0),
            Up => (1, 1.0),
            Down => (1, -1.0),
            Left => (0, 1.0),
            Right => (0, -1.0),
        }
    }
}

impl Input {
    /// Returns a new `Input` with no keys held and the given speed in
    /// world units per frame.
    pub fn new(speed: f32) -> Self {
        Self { vel: [0.0; 3], speed }
    }

    /// Starts moving in direction `m`.
    pub fn press(&mut self, m: Motion) {
        let (i, sign) = m.axis();
        self.vel[i] = sign * self.speed;
    }

    /// Stops all movement along the axis of `m`.
    pub fn release(&mut self, m: Motion) {
        let (i, _) = m.axis();
        self.vel[i] = 0.0;
    }

    /// Returns the current camera velocity.
    pub fn velocity(&self) -> Vec3<World> {
        let [x, y, z] = self.vel;
        vec3(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert_eq!(Motion::from_key('w'), Some(Motion::Forward));
        assert_eq!(Motion::from_key('D'), Some(Motion::Right));
        assert_eq!(Motion::from_key('x'), None);
    }

    #[test]
    fn press_sets_axis_velocity() {
        let mut inp = Input::new(0.01);
        inp.press(Motion::Forward);
        assert_eq!(inp.velocity(), vec3(0.0, 0.0, 0.01));
        inp.press(Motion::Down);
        inp.press(Motion::Right);
        assert_eq!(inp.velocity(), vec3(-0.01, -0.01, 0.01));
    }

    #[test]
    fn later_press_on_same_axis_wins() {
        let mut inp = Input::new(0.5);
        inp.press(Motion::Left);
        inp.press(Motion::Right);
        assert_eq!(inp.velocity(), vec3(-0.5, 0.0, 0.0));
    }

    #[test]
    fn release_zeroes_whole_axis() {
        let mut inp = Input::new(0.01);
        inp.press(Motion::Up);
        inp.press(Motion::Back);
        // Releasing the opposite key still stops the motion
        inp.release(Motion::Down);
        assert_eq!(inp.velocity(), vec3(0.0, 0.0, -0.01));
        inp.release(Motion::Forward);
        assert_eq!(inp.velocity(), vec3(0.0, 0.0, 0.0));
    }
}
