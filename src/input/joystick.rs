use log::debug;
use yew::Callback;

use super::quantizer::{Quantized, quantize};
use crate::model::{Direction, Vec2};

/// Payload of `on_change`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoystickChange {
    pub angle: f64,
    pub direction: Direction,
    pub power: f64,
}

impl From<Quantized> for JoystickChange {
    fn from(q: Quantized) -> Self {
        Self {
            angle: q.angle,
            direction: q.direction,
            power: q.power,
        }
    }
}

#[derive(Clone, Default)]
pub struct JoystickCallbacks {
    pub on_start: Option<Callback<()>>,
    pub on_change: Option<Callback<JoystickChange>>,
    pub on_end: Option<Callback<()>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    Idle,
    /// `pointer` is the id of the pointer that began the drag.
    Dragging { start: Vec2, pointer: i32 },
}

/// On-screen joystick. Positions passed in are local to the joystick centre.
pub struct Joystick {
    /// Screen position of the centre, set by the layout step.
    pub position: Vec2,
    pub base_radius: f64,
    pub outer_radius: f64,
    pub handle_radius: f64,
    pub standby_alpha: f64,
    /// Handle offset from the centre.
    pub handle: Vec2,
    pub handle_alpha: f64,
    /// Last emitted direction, for the overlay needle.
    pub last_direction: Option<Direction>,
    pub callbacks: JoystickCallbacks,
    drag: Drag,
}

impl Joystick {
    pub fn new(base_radius: f64, outer_radius: f64, handle_radius: f64, standby_alpha: f64) -> Self {
        Self {
            position: Vec2::ZERO,
            base_radius,
            outer_radius,
            handle_radius,
            standby_alpha,
            handle: Vec2::ZERO,
            handle_alpha: standby_alpha,
            last_direction: None,
            callbacks: JoystickCallbacks::default(),
            drag: Drag::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Dragging { .. })
    }

    /// Whether `pointer` is the one driving the current drag.
    pub fn owns(&self, pointer: i32) -> bool {
        matches!(self.drag, Drag::Dragging { pointer: p, .. } if p == pointer)
    }

    /// Screen point to joystick-local coordinates.
    pub fn to_local(&self, screen: Vec2) -> Vec2 {
        screen - self.position
    }

    pub fn hit(&self, screen: Vec2) -> bool {
        self.to_local(screen).length() <= self.base_radius
    }

    /// Begins a drag session for `pointer`. Ignored while one is already active.
    pub fn drag_start(&mut self, local: Vec2, pointer: i32) {
        if self.is_dragging() {
            return;
        }
        self.drag = Drag::Dragging { start: local, pointer };
        self.handle_alpha = 1.0;
        debug!("joystick drag start");
        if let Some(cb) = &self.callbacks.on_start {
            cb.emit(());
        }
    }

    /// Moves from pointers other than the dragging one are ignored.
    pub fn drag_move(&mut self, local: Vec2, pointer: i32) {
        let Drag::Dragging { start, pointer: owner } = self.drag else {
            return;
        };
        if owner != pointer {
            return;
        }
        let Some(q) = quantize(local - start, self.outer_radius) else {
            return;
        };
        self.handle = q.point;
        self.last_direction = Some(q.direction);
        if let Some(cb) = &self.callbacks.on_change {
            cb.emit(q.into());
        }
    }

    /// Ends the drag if `pointer` owns it; the "released outside" case goes
    /// through here too.
    pub fn drag_end(&mut self, pointer: i32) {
        if !self.owns(pointer) {
            return;
        }
        self.drag = Drag::Idle;
        self.handle = Vec2::ZERO;
        self.handle_alpha = self.standby_alpha;
        self.last_direction = None;
        debug!("joystick drag end");
        if let Some(cb) = &self.callbacks.on_end {
            cb.emit(());
        }
    }
}
