//! Turns a drag displacement into joystick output: a clamped handle point,
//! a power in [0, 1], an eight-way direction and a continuous angle.

use std::f64::consts::PI;

use crate::model::{Direction, Vec2};

/// Result of quantizing one displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantized {
    /// Degrees in [0, 360), measured from +X towards screen-up (-Y).
    pub angle: f64,
    pub direction: Direction,
    pub power: f64,
    /// Where the handle is drawn, relative to the joystick centre.
    pub point: Vec2,
}

/// Sector lower bounds in atan2 space (screen coordinates), half-open `[lower, next)`.
const SECTORS: [(f64, Direction); 8] = [
    (-7.0 * PI / 8.0, Direction::TopLeft),
    (-5.0 * PI / 8.0, Direction::Top),
    (-3.0 * PI / 8.0, Direction::TopRight),
    (-PI / 8.0, Direction::Right),
    (PI / 8.0, Direction::BottomRight),
    (3.0 * PI / 8.0, Direction::Bottom),
    (5.0 * PI / 8.0, Direction::BottomLeft),
    (7.0 * PI / 8.0, Direction::Left),
];

/// Classifies an angle in radians (atan2 of a screen-space vector) into a sector.
/// Any finite input is accepted and wrapped into [-PI, PI).
pub fn direction_from_radians(rad: f64) -> Direction {
    let mut rad = rad;
    if !(-PI..PI).contains(&rad) {
        rad = (rad + PI).rem_euclid(2.0 * PI) - PI;
    }
    // [-PI, -7PI/8) wraps around to the Left sector
    let mut dir = Direction::Left;
    for (lower, d) in SECTORS {
        if rad >= lower {
            dir = d;
        } else {
            break;
        }
    }
    dir
}

pub fn direction_of(v: Vec2) -> Direction {
    direction_from_radians(v.y.atan2(v.x))
}

fn power_of(point: Vec2, outer_radius: f64) -> f64 {
    (point.length() / outer_radius).min(1.0)
}

/// Quantizes `d` against `outer_radius`. Returns `None` for a zero displacement.
///
/// Exact horizontal or vertical drags clamp per axis without trigonometry.
/// Off-axis drags outside the ring are projected onto it; inside the ring each
/// component is clamped to `outer_radius` on its own.
pub fn quantize(d: Vec2, outer_radius: f64) -> Option<Quantized> {
    let (sx, sy) = (d.x, d.y);
    if sx == 0.0 && sy == 0.0 {
        return None;
    }

    if sx == 0.0 {
        let (point, angle, direction) = if sy > 0.0 {
            (Vec2::new(0.0, sy.min(outer_radius)), 270.0, Direction::Bottom)
        } else {
            (Vec2::new(0.0, -sy.abs().min(outer_radius)), 90.0, Direction::Top)
        };
        return Some(Quantized {
            angle,
            direction,
            power: power_of(point, outer_radius),
            point,
        });
    }

    if sy == 0.0 {
        let (point, angle, direction) = if sx > 0.0 {
            (Vec2::new(sx.abs().min(outer_radius), 0.0), 0.0, Direction::Right)
        } else {
            (Vec2::new(-sx.abs().min(outer_radius), 0.0), 180.0, Direction::Left)
        };
        return Some(Quantized {
            angle,
            direction,
            power: power_of(point, outer_radius),
            point,
        });
    }

    let radian = (sy / sx).abs().atan();
    let base = radian.to_degrees();

    let (mut cx, mut cy) = if d.length_squared() >= outer_radius * outer_radius {
        (outer_radius * radian.cos(), outer_radius * radian.sin())
    } else {
        (sx.abs().min(outer_radius), sy.abs().min(outer_radius))
    };
    if sy < 0.0 {
        cy = -cy.abs();
    }
    if sx < 0.0 {
        cx = -cx.abs();
    }

    let angle = match (sx > 0.0, sy > 0.0) {
        (true, false) => base,
        (false, false) => 180.0 - base,
        (false, true) => 180.0 + base,
        (true, true) => 360.0 - base,
    };
    // a vanishing sy rounds 360 - base up to 360 itself
    let angle = if angle >= 360.0 { angle - 360.0 } else { angle };

    let point = Vec2::new(cx, cy);
    Some(Quantized {
        angle,
        direction: direction_of(point),
        power: power_of(point, outer_radius),
        point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_displacement_yields_nothing() {
        assert!(quantize(Vec2::ZERO, 60.0).is_none());
    }

    #[test]
    fn straight_down_inside_ring() {
        let q = quantize(Vec2::new(0.0, 50.0), 60.0).unwrap();
        assert!(approx(q.power, 50.0 / 60.0));
        assert_eq!(q.direction, Direction::Bottom);
        assert_eq!(q.point, Vec2::new(0.0, 50.0));
        assert_eq!(q.angle, 270.0);
    }

    #[test]
    fn near_axis_bottom_right_angle_stays_below_360() {
        let q = quantize(Vec2::new(1.0, 1e-17), 60.0).unwrap();
        assert!((0.0..360.0).contains(&q.angle));
        assert_eq!(q.angle, 0.0);
        assert_eq!(q.direction, Direction::Right);
    }

    #[test]
    fn axis_drags_clamp_per_axis() {
        let up = quantize(Vec2::new(0.0, -500.0), 60.0).unwrap();
        assert_eq!(up.point, Vec2::new(0.0, -60.0));
        assert_eq!((up.direction, up.angle, up.power), (Direction::Top, 90.0, 1.0));

        let left = quantize(Vec2::new(-10.0, 0.0), 60.0).unwrap();
        assert_eq!(left.point, Vec2::new(-10.0, 0.0));
        assert_eq!((left.direction, left.angle), (Direction::Left, 180.0));

        let right = quantize(Vec2::new(90.0, 0.0), 60.0).unwrap();
        assert_eq!(right.point, Vec2::new(60.0, 0.0));
        assert_eq!((right.direction, right.angle), (Direction::Right, 0.0));
    }

    #[test]
    fn diagonal_beyond_ring_projects_onto_it() {
        let q = quantize(Vec2::new(100.0, 100.0), 60.0).unwrap();
        assert!(approx(q.point.length(), 60.0));
        assert!(approx(q.point.x, q.point.y));
        assert!(approx(q.power, 1.0));
        assert_eq!(q.direction, Direction::BottomRight);
        assert!(approx(q.angle, 315.0));
    }

    #[test]
    fn off_axis_inside_ring_clamps_componentwise() {
        // magnitude 50 < 60, components are left alone
        let q = quantize(Vec2::new(-30.0, -40.0), 60.0).unwrap();
        assert_eq!(q.point, Vec2::new(-30.0, -40.0));
        assert_eq!(q.direction, Direction::TopLeft);
        assert!(approx(q.angle, 180.0 - (40.0f64 / 30.0).atan().to_degrees()));
    }

    #[test]
    fn angle_quadrants() {
        let cases = [
            (Vec2::new(10.0, -10.0), 45.0),
            (Vec2::new(-10.0, -10.0), 135.0),
            (Vec2::new(-10.0, 10.0), 225.0),
            (Vec2::new(10.0, 10.0), 315.0),
        ];
        for (d, want) in cases {
            let q = quantize(d, 60.0).unwrap();
            assert!(approx(q.angle, want), "{d:?} -> {}", q.angle);
            assert!((0.0..360.0).contains(&q.angle));
        }
    }

    #[test]
    fn quantize_is_pure() {
        let d = Vec2::new(13.5, -7.25);
        assert_eq!(quantize(d, 60.0), quantize(d, 60.0));
    }

    #[test]
    fn sectors_are_exhaustive_and_right_centered() {
        let mut seen = std::collections::HashSet::new();
        let mut step = 0;
        while step < 36_000 {
            let deg = step as f64 / 100.0;
            let dir = direction_from_radians(deg.to_radians());
            seen.insert(dir);
            // screen convention: positive radians turn towards +Y (down)
            let expected = Direction::ALL[(((deg + 22.5) / 45.0).floor() as usize) % 8];
            if ((deg + 22.5) % 45.0).abs() > 1e-6 {
                assert_eq!(dir, expected, "angle {deg}");
            }
            step += 1;
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(direction_from_radians(0.0), Direction::Right);
        assert_eq!(direction_from_radians(-PI / 8.0), Direction::Right);
        assert_eq!(direction_from_radians(PI / 8.0), Direction::BottomRight);
        assert_eq!(direction_from_radians(PI), Direction::Left);
        assert_eq!(direction_from_radians(-PI), Direction::Left);
    }
}
