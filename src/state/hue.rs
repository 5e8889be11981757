/// Hue rotation of the rainbow border, advanced once per frame by its own task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueShift {
    pub degree: u32,
}

impl HueShift {
    pub fn advance(&mut self) {
        self.degree += 1;
        if self.degree > 360 {
            self.degree = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_360() {
        let mut h = HueShift { degree: 359 };
        h.advance();
        assert_eq!(h.degree, 360);
        h.advance();
        assert_eq!(h.degree, 0);
    }
}
