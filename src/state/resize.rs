// Drawing-surface size tracking and fixed overlay layout
use crate::model::{Size, Vec2};

/// Screen positions of the fixed overlays, derived from the surface size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayLayout {
    pub joystick: Vec2,
    pub split: Vec2,
    pub eject: Vec2,
    /// Centre of the minimap panel.
    pub minimap: Vec2,
}

impl OverlayLayout {
    pub fn for_surface(surface: Size) -> Self {
        let (w, h) = (surface.width, surface.height);
        Self {
            joystick: Vec2::new(w - 125.0, h - 125.0),
            split: Vec2::new(70.0, h - 150.0),
            eject: Vec2::new(200.0, h - 100.0),
            minimap: Vec2::new(w / 2.0, h - 105.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResizeMonitor {
    pub surface: Size,
    threshold: f64,
}

impl ResizeMonitor {
    pub fn new(surface: Size, threshold: f64) -> Self {
        Self { surface, threshold }
    }

    /// Compares the measured viewport with the surface. Returns the new size
    /// when either axis moved by more than the threshold; zero or negative
    /// measurements are ignored.
    pub fn poll(&mut self, actual: Size) -> Option<Size> {
        if !(actual.width > 0.0 && actual.height > 0.0) {
            return None;
        }
        let dw = (actual.width - self.surface.width).abs();
        let dh = (actual.height - self.surface.height).abs();
        if dw > self.threshold || dh > self.threshold {
            self.surface = actual;
            Some(actual)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_pixel_is_ignored_two_resizes_once() {
        let mut m = ResizeMonitor::new(Size::new(800.0, 600.0), 1.0);
        assert_eq!(m.poll(Size::new(801.0, 600.0)), None);
        assert_eq!(m.poll(Size::new(800.0, 599.0)), None);
        let mut resized = 0;
        let mut layouts = Vec::new();
        for _ in 0..3 {
            if let Some(s) = m.poll(Size::new(802.0, 600.0)) {
                resized += 1;
                layouts.push(OverlayLayout::for_surface(s));
            }
        }
        assert_eq!(resized, 1);
        assert_eq!(layouts.len(), 1);
        assert_eq!(m.surface, Size::new(802.0, 600.0));
    }

    #[test]
    fn degenerate_viewport_is_skipped() {
        let mut m = ResizeMonitor::new(Size::new(800.0, 600.0), 1.0);
        assert_eq!(m.poll(Size::new(0.0, 600.0)), None);
        assert_eq!(m.poll(Size::new(1024.0, 0.0)), None);
        assert_eq!(m.surface, Size::new(800.0, 600.0));
    }

    #[test]
    fn layout_offsets_from_edges() {
        let l = OverlayLayout::for_surface(Size::new(1000.0, 700.0));
        assert_eq!(l.joystick, Vec2::new(875.0, 575.0));
        assert_eq!(l.split, Vec2::new(70.0, 550.0));
        assert_eq!(l.eject, Vec2::new(200.0, 600.0));
        assert_eq!(l.minimap, Vec2::new(500.0, 595.0));
    }
}
