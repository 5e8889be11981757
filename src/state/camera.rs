// Camera follow and zoom smoothing
use crate::config::{ClientConfig, Smoothing};
use crate::model::{Size, Vec2, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub x: f64,
    pub y: f64,
    pub s: f64,
}

/// World-to-screen mapping: `screen = (world - pivot) * scale + origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub pivot: Vec2,
    pub scale: f64,
    pub origin: Vec2,
}

impl ViewTransform {
    /// Canvas `set_transform` arguments (a, b, c, d, e, f).
    pub fn matrix(&self) -> [f64; 6] {
        let s = self.scale;
        [
            s,
            0.0,
            0.0,
            s,
            self.origin.x - self.pivot.x * s,
            self.origin.y - self.pivot.y * s,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub s: f64,
    /// Zoom base, adjusted by the wheel.
    pub zoom: f64,
    /// Sum of floor(r^2 / 100) over owned entities at the last update.
    pub score: u64,
    pub target: CameraTarget,
    zoom_min: f64,
    zoom_max: f64,
    reference_width: f64,
    smoothing: Smoothing,
}

impl Camera {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            s: 1.0,
            zoom: config.zoom_initial,
            score: 0,
            target: CameraTarget { x: 1.0, y: 1.0, s: 1.0 },
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            reference_width: config.reference_width,
            smoothing: config.smoothing,
        }
    }

    /// Wheel input: positive `delta_y` (scroll down) zooms out.
    pub fn scroll(&mut self, delta_y: f64, sensitivity: f64) {
        self.zoom += -delta_y * sensitivity;
        self.zoom = self.zoom.clamp(self.zoom_min, self.zoom_max);
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Fractions of the remaining distance covered this frame (position, scale).
    pub fn easing(&self, dt_ms: f64) -> (f64, f64) {
        match self.smoothing {
            Smoothing::PerFrame {
                position_divisor,
                scale_divisor,
            } => (1.0 / position_divisor, 1.0 / scale_divisor),
            Smoothing::TimeConstant {
                position_tau_ms,
                scale_tau_ms,
            } => {
                if dt_ms <= 0.0 {
                    return (0.0, 0.0);
                }
                (
                    1.0 - (-dt_ms / position_tau_ms).exp(),
                    1.0 - (-dt_ms / scale_tau_ms).exp(),
                )
            }
        }
    }

    /// One frame of follow: recentre the target on the owned entities and
    /// ease position and scale towards it. With nothing owned the last
    /// target is held.
    pub fn update(&mut self, world: &World, viewport: Size, dt_ms: f64) {
        let mut n = 0usize;
        let mut sum = Vec2::ZERO;
        let mut score = 0u64;
        for e in world.owned_entities() {
            n += 1;
            sum += e.position();
            score += (e.r * e.r / 100.0).floor() as u64;
        }
        if n > 0 {
            self.target.x = sum.x / n as f64;
            self.target.y = sum.y / n as f64;
        }
        self.score = score;

        let (kp, ks) = self.easing(dt_ms);
        self.x += (self.target.x - self.x) * kp;
        self.y += (self.target.y - self.y) * kp;

        self.target.s = self.zoom * (viewport.width / self.reference_width) / 2.0;
        self.s += (self.target.s - self.s) * ks;
    }

    pub fn transform(&self, viewport: Size) -> ViewTransform {
        ViewTransform {
            pivot: self.position(),
            scale: self.s,
            origin: viewport.center(),
        }
    }
}
