use crate::model::Vec2;

const TINT_IDLE: u32 = 0x404040;

/// Round on-screen action button (SPLIT / EJECT).
#[derive(Clone, Debug, PartialEq)]
pub struct ActionButton {
    pub caption: &'static str,
    pub position: Vec2,
    pub radius: f64,
    pub tint: u32,
    debounce_ms: f64,
    last_click: Option<f64>,
}

impl ActionButton {
    pub fn new(caption: &'static str, radius: f64, debounce_ms: f64) -> Self {
        Self {
            caption,
            position: Vec2::ZERO,
            radius,
            tint: TINT_IDLE,
            debounce_ms,
            last_click: None,
        }
    }

    pub fn hit(&self, p: Vec2) -> bool {
        (p - self.position).length() <= self.radius
    }

    /// Pointer down at `now` (ms). Returns true when the press counts as a click.
    pub fn press(&mut self, now: f64) -> bool {
        if let Some(last) = self.last_click {
            if last + self.debounce_ms > now {
                return false;
            }
        }
        self.last_click = Some(now);
        if self.tint < 0x800000 {
            self.tint = 0xffffff - self.tint;
        }
        true
    }

    /// Pointer up, inside or outside.
    pub fn release(&mut self) {
        if self.tint > 0x800000 {
            self.tint = 0xffffff - self.tint;
        }
    }

    pub fn tint_css(&self) -> String {
        format!("#{:06x}", self.tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_inside_window_are_dropped() {
        let mut b = ActionButton::new("SPLIT", 60.0, 100.0);
        assert!(b.press(1000.0));
        b.release();
        assert!(!b.press(1050.0));
        assert!(b.press(1100.0));
    }

    #[test]
    fn tint_toggles_on_press_and_release() {
        let mut b = ActionButton::new("EJECT", 60.0, 100.0);
        b.press(0.0);
        assert_eq!(b.tint, 0xbfbfbf);
        b.release();
        assert_eq!(b.tint, 0x404040);
        b.release();
        assert_eq!(b.tint_css(), "#404040");
    }

    #[test]
    fn hit_is_circular() {
        let mut b = ActionButton::new("SPLIT", 60.0, 100.0);
        b.position = Vec2::new(70.0, 450.0);
        assert!(b.hit(Vec2::new(70.0, 390.0)));
        assert!(!b.hit(Vec2::new(120.0, 400.0)));
    }
}
