use crate::model::{Size, Vec2};

use super::joystick::JoystickChange;

/// Which input source currently writes the movement target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Pointer,
    Joystick,
}

/// Shared movement intent, in world units relative to the camera centre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Steering {
    pub mode: InputMode,
    pub target: Vec2,
    /// Camera scale as of the last frame.
    pub camera_scale: f64,
}

/// Joystick at full power moves the target this many screen pixels away.
const JOYSTICK_REACH: f64 = 100.0;

impl Steering {
    /// Camera scale usable as a divisor; `None` while degenerate, in which
    /// case the target holds its last value.
    fn usable_scale(&self) -> Option<f64> {
        (self.camera_scale.is_finite() && self.camera_scale > 0.0).then_some(self.camera_scale)
    }

    /// Pointer moved to `pointer` (surface pixels). No effect while the joystick is held.
    pub fn pointer_moved(&mut self, pointer: Vec2, surface: Size) {
        if self.mode != InputMode::Pointer {
            return;
        }
        let Some(scale) = self.usable_scale() else { return };
        let target = (pointer - surface.center()) / scale;
        if target.x.is_finite() && target.y.is_finite() {
            self.target = target;
        }
    }

    pub fn joystick_started(&mut self) {
        self.mode = InputMode::Joystick;
    }

    /// Target keeps its last joystick value until the pointer moves again.
    pub fn joystick_ended(&mut self) {
        self.mode = InputMode::Pointer;
    }

    pub fn joystick_changed(&mut self, change: JoystickChange) {
        let Some(scale) = self.usable_scale() else { return };
        let p = change.power * JOYSTICK_REACH / scale;
        let rad = (-change.angle).to_radians();
        let target = Vec2::new(rad.cos() * p, rad.sin() * p);
        if target.x.is_finite() && target.y.is_finite() {
            self.target = target;
        }
    }
}
