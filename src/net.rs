//! Seam to the network layer, plus an offline sandbox implementation so the
//! client runs without a server.

use log::{debug, info};

use crate::input::{Command, ExtraKey};
use crate::model::{Border, EntityKind, EntityUpdate, Rgb, Size, Vec2, World};

pub trait Session {
    fn border(&self) -> Border;
    fn ping(&self) -> u32;
    fn minion_controlled(&self) -> bool;
    /// Pushes pending entity changes into `world` (creates, moves, removals, owned ids).
    fn poll(&mut self, now: f64, world: &mut World);
    /// Movement target relative to the player's centre, in world units.
    fn send_target(&mut self, target: Vec2);
    fn send_split(&mut self);
    fn send_eject(&mut self);
    fn send_minion_switch(&mut self);
    fn send_extra(&mut self, key: ExtraKey);

    fn send(&mut self, cmd: Command) {
        match cmd {
            Command::Split => self.send_split(),
            Command::Eject => self.send_eject(),
            Command::MinionSwitch => self.send_minion_switch(),
            Command::Extra(k) => self.send_extra(k),
        }
    }
}

const FOOD_COUNT: usize = 300;
const FOOD_RADIUS: f64 = 10.0;
const PLAYER_RADIUS: f64 = 32.0;
const PLAYER_ID: u32 = 1;
const PLAYER_COLOR: Rgb = Rgb { r: 80, g: 200, b: 255 };

/// Single-player sandbox: one owned cell steering towards the target over a
/// static field of food. Split, eject and the extra keys are only logged.
pub struct OfflineSession {
    border: Border,
    player: Vec2,
    food: Vec<(Vec2, Rgb)>,
    food_sent: bool,
    target: Vec2,
    minion: bool,
    last_step: Option<f64>,
    /// Split/eject requests received, for the log and tests.
    splits: u32,
    ejects: u32,
}

fn browser_random() -> f64 {
    js_sys::Math::random()
}

fn speed_for(r: f64) -> f64 {
    2200.0 * r.max(1.0).powf(-0.439)
}

impl OfflineSession {
    pub fn new(border: Border) -> Self {
        Self::with_rng(border, browser_random)
    }

    pub fn with_rng(border: Border, rand: fn() -> f64) -> Self {
        let food = (0..FOOD_COUNT)
            .map(|_| {
                let pos = Vec2::new(
                    (rand() - 0.5) * border.width,
                    (rand() - 0.5) * border.height,
                );
                let color = Rgb {
                    r: (rand() * 255.0) as u8,
                    g: (rand() * 255.0) as u8,
                    b: (rand() * 255.0) as u8,
                };
                (pos, color)
            })
            .collect();
        info!("offline session started, border {}x{}", border.width, border.height);
        Self {
            border,
            player: Vec2::ZERO,
            food,
            food_sent: false,
            target: Vec2::ZERO,
            minion: false,
            last_step: None,
            splits: 0,
            ejects: 0,
        }
    }

    fn clamp_to_border(&self, p: Vec2) -> Vec2 {
        let hw = self.border.width / 2.0;
        let hh = self.border.height / 2.0;
        Vec2::new(p.x.clamp(-hw, hw), p.y.clamp(-hh, hh))
    }

    fn step(&mut self, dt: f64) {
        let dist = self.target.length();
        if dist > 0.0 && dist.is_finite() {
            let step = (speed_for(PLAYER_RADIUS) * dt).min(dist);
            self.player = self.clamp_to_border(self.player + self.target / dist * step);
        }
    }
}

impl Session for OfflineSession {
    fn border(&self) -> Border {
        self.border
    }

    fn ping(&self) -> u32 {
        0
    }

    fn minion_controlled(&self) -> bool {
        self.minion
    }

    fn poll(&mut self, now: f64, world: &mut World) {
        let dt = match self.last_step {
            Some(prev) => ((now - prev) / 1000.0).clamp(0.0, 0.25),
            None => 0.0,
        };
        self.last_step = Some(now);
        if dt > 0.0 {
            self.step(dt);
        }

        world.border = self.border;
        if !self.food_sent {
            for (i, (pos, color)) in self.food.iter().enumerate() {
                world.apply(
                    &EntityUpdate {
                        id: PLAYER_ID + 1 + i as u32,
                        kind: EntityKind::Food,
                        x: pos.x,
                        y: pos.y,
                        r: FOOD_RADIUS,
                        color: *color,
                        name: None,
                    },
                    now,
                );
            }
            self.food_sent = true;
        }
        world.apply(
            &EntityUpdate {
                id: PLAYER_ID,
                kind: EntityKind::Cell,
                x: self.player.x,
                y: self.player.y,
                r: PLAYER_RADIUS,
                color: PLAYER_COLOR,
                name: Some("you".to_string()),
            },
            now,
        );
        world.add_owned(PLAYER_ID);
    }

    fn send_target(&mut self, target: Vec2) {
        if target.x.is_finite() && target.y.is_finite() {
            self.target = target;
        }
    }

    fn send_split(&mut self) {
        self.splits += 1;
        debug!("offline split request #{}", self.splits);
    }

    fn send_eject(&mut self) {
        self.ejects += 1;
        debug!("offline eject request #{}", self.ejects);
    }

    fn send_minion_switch(&mut self) {
        self.minion = !self.minion;
    }

    fn send_extra(&mut self, key: ExtraKey) {
        debug!("offline session ignores {key:?}");
    }
}

/// Default sandbox bounds.
pub fn offline_border() -> Size {
    Size::new(6000.0, 6000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static SEED: Cell<u64> = const { Cell::new(42) };
    }

    fn lcg() -> f64 {
        SEED.with(|s| {
            let v = s.get().wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            s.set(v);
            (v >> 11) as f64 / (1u64 << 53) as f64
        })
    }

    fn session() -> OfflineSession {
        OfflineSession::with_rng(Size::new(2000.0, 2000.0), lcg)
    }

    #[test]
    fn first_poll_populates_world() {
        let mut s = session();
        let mut w = World::default();
        s.poll(0.0, &mut w);
        assert_eq!(w.entities.len(), FOOD_COUNT + 1);
        assert_eq!(w.owned.len(), 1);
        assert_eq!(w.border, Size::new(2000.0, 2000.0));
        for e in w.entities.values() {
            assert!(e.x.abs() <= 1000.0 && e.y.abs() <= 1000.0);
        }
    }

    #[test]
    fn owned_cell_moves_towards_target() {
        let mut s = session();
        let mut w = World::default();
        s.poll(0.0, &mut w);
        s.send_target(Vec2::new(500.0, 0.0));
        s.poll(100.0, &mut w);
        let id = w.owned[0];
        w.update_all(10_000.0);
        let e = &w.entities[&id];
        assert!(e.x > 0.0);
        assert!(e.y.abs() < 1e-9);
    }

    #[test]
    fn split_and_eject_are_recorded_without_spawning() {
        let mut s = session();
        let mut w = World::default();
        s.poll(0.0, &mut w);
        s.send(Command::Split);
        s.send(Command::Eject);
        s.send(Command::Eject);
        s.poll(16.0, &mut w);
        assert_eq!((s.splits, s.ejects), (1, 2));
        assert_eq!(w.owned, vec![PLAYER_ID]);
        assert_eq!(w.entities.len(), FOOD_COUNT + 1);
    }

    #[test]
    fn non_finite_target_is_dropped() {
        let mut s = session();
        let mut w = World::default();
        s.poll(0.0, &mut w);
        s.send_target(Vec2::new(f64::INFINITY, 0.0));
        s.poll(100.0, &mut w);
        w.update_all(10_000.0);
        let e = &w.entities[&PLAYER_ID];
        assert!(e.x.is_finite() && e.y.is_finite());
        assert_eq!((e.x, e.y), (0.0, 0.0));
    }

    #[test]
    fn minion_switch_toggles() {
        let mut s = session();
        s.send(Command::MinionSwitch);
        assert!(s.minion_controlled());
        s.send(Command::MinionSwitch);
        assert!(!s.minion_controlled());
    }
}
