// Everything the frame loop and the input handlers mutate, in one place.
use std::cell::RefCell;
use std::rc::Rc;

use yew::Callback;

use super::{Camera, HueShift, OverlayLayout, ResizeMonitor};
use crate::config::{ClientConfig, DisplaySettings};
use crate::input::{ActionButton, Command, Joystick, JoystickCallbacks, Keyboard, Steering};
use crate::model::{Border, Size, Vec2, World};

/// Issues the single full-scene draw of a frame.
pub trait Renderer {
    fn draw(&mut self, state: &ClientState);
}

/// What a pointer-down on the overlay layer hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Joystick,
    Button(Command),
    Field,
}

pub struct ClientState {
    pub config: ClientConfig,
    pub settings: DisplaySettings,
    pub world: World,
    pub camera: Camera,
    /// Shared with the joystick callbacks.
    pub steering: Rc<RefCell<Steering>>,
    pub joystick: Joystick,
    pub split: ActionButton,
    pub eject: ActionButton,
    pub keyboard: Keyboard,
    pub resize: ResizeMonitor,
    pub layout: OverlayLayout,
    pub hue: HueShift,
    pub now: f64,
    last_tick: Option<f64>,
}

impl ClientState {
    pub fn new(config: ClientConfig, settings: DisplaySettings, surface: Size, border: Border) -> Self {
        let steering = Rc::new(RefCell::new(Steering::default()));
        let mut joystick = Joystick::new(
            config.joystick_base_radius,
            config.joystick_outer_radius(),
            config.joystick_handle_radius,
            config.joystick_standby_alpha,
        );
        joystick.callbacks = steering_callbacks(&steering);
        let camera = Camera::new(&config);
        steering.borrow_mut().camera_scale = camera.s;
        let mut state = Self {
            camera,
            split: ActionButton::new("SPLIT", config.button_radius, config.button_debounce_ms),
            eject: ActionButton::new("EJECT", config.button_radius, config.button_debounce_ms),
            resize: ResizeMonitor::new(surface, config.resize_threshold_px),
            layout: OverlayLayout::default(),
            world: World::new(border),
            keyboard: Keyboard::default(),
            hue: HueShift::default(),
            now: 0.0,
            last_tick: None,
            steering,
            joystick,
            settings,
            config,
        };
        state.relayout();
        state
    }

    pub fn surface(&self) -> Size {
        self.resize.surface
    }

    /// One frame: advance entities, then the camera, then draw exactly once.
    pub fn tick<R: Renderer>(&mut self, now: f64, renderer: &mut R) {
        self.now = now;
        let dt = match self.last_tick {
            Some(prev) => now - prev,
            None => 0.0,
        };
        self.last_tick = Some(now);

        self.world.update_all(now);
        let surface = self.surface();
        self.camera.update(&self.world, surface, dt);
        self.steering.borrow_mut().camera_scale = self.camera.s;
        renderer.draw(self);
    }

    /// Empties the world; the loop keeps running.
    pub fn clear(&mut self) {
        self.world.clear();
    }

    /// Resize poll. On a change the caller resizes the canvas to the returned size.
    pub fn poll_resize(&mut self, actual: Size) -> Option<Size> {
        let resized = self.resize.poll(actual)?;
        log::debug!("surface resized to {}x{}", resized.width, resized.height);
        self.relayout();
        Some(resized)
    }

    pub fn relayout(&mut self) {
        self.layout = OverlayLayout::for_surface(self.surface());
        self.joystick.position = self.layout.joystick;
        self.split.position = self.layout.split;
        self.eject.position = self.layout.eject;
    }

    pub fn scroll(&mut self, delta_y: f64) {
        self.camera.scroll(delta_y, self.config.scroll_sensitivity);
    }

    /// `pointer` is the event's pointer id; only the first pointer on the
    /// joystick drives it until released.
    pub fn pointer_down(&mut self, p: Vec2, pointer: i32, now: f64) -> PointerTarget {
        if !self.joystick.is_dragging() && self.joystick.hit(p) {
            let local = self.joystick.to_local(p);
            self.joystick.drag_start(local, pointer);
            return PointerTarget::Joystick;
        }
        if self.split.hit(p) {
            if self.split.press(now) {
                return PointerTarget::Button(Command::Split);
            }
            return PointerTarget::Field;
        }
        if self.eject.hit(p) && self.eject.press(now) {
            return PointerTarget::Button(Command::Eject);
        }
        PointerTarget::Field
    }

    pub fn pointer_move(&mut self, p: Vec2, pointer: i32) {
        if self.joystick.is_dragging() {
            let local = self.joystick.to_local(p);
            self.joystick.drag_move(local, pointer);
            return;
        }
        let surface = self.surface();
        self.steering.borrow_mut().pointer_moved(p, surface);
    }

    /// Pointer released anywhere, inside or outside the overlays.
    pub fn pointer_up(&mut self, pointer: i32) {
        self.joystick.drag_end(pointer);
        self.split.release();
        self.eject.release();
    }

    pub fn target(&self) -> Vec2 {
        self.steering.borrow().target
    }
}

fn steering_callbacks(steering: &Rc<RefCell<Steering>>) -> JoystickCallbacks {
    let (a, b, c) = (steering.clone(), steering.clone(), steering.clone());
    JoystickCallbacks {
        on_start: Some(Callback::from(move |_| a.borrow_mut().joystick_started())),
        on_change: Some(Callback::from(move |change| b.borrow_mut().joystick_changed(change))),
        on_end: Some(Callback::from(move |_| c.borrow_mut().joystick_ended())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Smoothing;
    use crate::input::InputMode;
    use crate::model::{EntityKind, EntityUpdate, Rgb};

    fn state() -> ClientState {
        let config = ClientConfig {
            smoothing: Smoothing::PerFrame {
                position_divisor: 7.0,
                scale_divisor: 20.0,
            },
            ..Default::default()
        };
        ClientState::new(
            config,
            DisplaySettings::default(),
            Size::new(800.0, 600.0),
            Size::new(1000.0, 1000.0),
        )
    }

    #[derive(Default)]
    struct Recorder {
        draws: u32,
        camera_x: Vec<f64>,
        entity_x: Vec<f64>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, s: &ClientState) {
            self.draws += 1;
            self.camera_x.push(s.camera.target.x);
            self.entity_x.push(s.world.entities.get(&1).map(|e| e.x).unwrap_or(f64::NAN));
        }
    }

    fn cell(x: f64) -> EntityUpdate {
        EntityUpdate {
            id: 1,
            kind: EntityKind::Cell,
            x,
            y: 0.0,
            r: 20.0,
            color: Rgb { r: 1, g: 2, b: 3 },
            name: None,
        }
    }

    #[test]
    fn tick_updates_entities_before_camera_and_draws_once() {
        let mut s = state();
        s.world.apply(&cell(0.0), 0.0);
        s.world.apply(&cell(240.0), 0.0);
        s.world.add_owned(1);
        let mut r = Recorder::default();
        s.tick(60.0, &mut r);
        assert_eq!(r.draws, 1);
        // the camera saw the interpolated position of this frame
        assert!((r.entity_x[0] - 120.0).abs() < 1e-9);
        assert!((r.camera_x[0] - 120.0).abs() < 1e-9);
        s.tick(200.0, &mut r);
        assert_eq!(r.draws, 2);
        assert!((r.camera_x[1] - 240.0).abs() < 1e-9);
    }

    #[test]
    fn clear_keeps_ticking() {
        let mut s = state();
        s.world.apply(&cell(10.0), 0.0);
        s.world.add_owned(1);
        let mut r = Recorder::default();
        s.tick(16.0, &mut r);
        s.clear();
        s.tick(32.0, &mut r);
        assert_eq!(r.draws, 2);
        assert_eq!(s.camera.target.x, 10.0);
    }

    #[test]
    fn joystick_drag_drives_steering_and_blocks_pointer() {
        let mut s = state();
        s.steering.borrow_mut().camera_scale = 1.0;
        let centre = s.joystick.position;
        assert_eq!(centre, Vec2::new(675.0, 475.0));
        assert_eq!(s.pointer_down(centre, 1, 0.0), PointerTarget::Joystick);
        assert_eq!(s.steering.borrow().mode, InputMode::Joystick);
        s.pointer_move(centre + Vec2::new(0.0, 30.0), 1);
        let t = s.target();
        assert!(t.x.abs() < 1e-9);
        assert!((t.y - 100.0 * 30.0 / 48.0).abs() < 1e-9);
        s.pointer_up(1);
        assert_eq!(s.steering.borrow().mode, InputMode::Pointer);
        assert_eq!(s.joystick.handle, Vec2::ZERO);
        s.pointer_move(Vec2::new(400.0, 300.0), 1);
        assert_eq!(s.target(), Vec2::ZERO);
    }

    #[test]
    fn second_finger_on_split_leaves_joystick_drag_alone() {
        let mut s = state();
        s.steering.borrow_mut().camera_scale = 1.0;
        let centre = s.joystick.position;
        assert_eq!(s.pointer_down(centre, 1, 0.0), PointerTarget::Joystick);
        s.pointer_move(centre + Vec2::new(0.0, 30.0), 1);
        let held = s.joystick.handle;

        let split = s.split.position;
        assert_eq!(s.pointer_down(split, 2, 10.0), PointerTarget::Button(Command::Split));
        s.pointer_move(split + Vec2::new(5.0, 5.0), 2);
        assert_eq!(s.joystick.handle, held);
        s.pointer_up(2);
        assert!(s.joystick.is_dragging());
        assert_eq!(s.steering.borrow().mode, InputMode::Joystick);

        s.pointer_up(1);
        assert!(!s.joystick.is_dragging());
    }

    #[test]
    fn pointer_before_first_tick_gives_finite_target() {
        let mut s = state();
        s.pointer_move(Vec2::new(700.0, 300.0), 1);
        let t = s.target();
        assert!(t.x.is_finite() && t.y.is_finite());
        assert!(t.x > 0.0);
    }

    #[test]
    fn buttons_report_commands_with_debounce() {
        let mut s = state();
        let split = s.split.position;
        assert_eq!(s.pointer_down(split, 1, 1000.0), PointerTarget::Button(Command::Split));
        s.pointer_up(1);
        assert_eq!(s.pointer_down(split, 1, 1020.0), PointerTarget::Field);
        let eject = s.eject.position + Vec2::new(30.0, 0.0);
        assert_eq!(s.pointer_down(eject, 1, 1030.0), PointerTarget::Button(Command::Eject));
    }

    #[test]
    fn resize_relayouts_overlays() {
        let mut s = state();
        assert_eq!(s.poll_resize(Size::new(801.0, 600.0)), None);
        assert_eq!(s.poll_resize(Size::new(1000.0, 700.0)), Some(Size::new(1000.0, 700.0)));
        assert_eq!(s.joystick.position, Vec2::new(875.0, 575.0));
        assert_eq!(s.eject.position, Vec2::new(200.0, 600.0));
    }
}
