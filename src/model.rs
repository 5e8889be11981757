//! Core data models for the arena client.
//! Vectors, world bounds, the entity set and the compass directions shared by
//! the input and camera code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Entities ease from their last known state to the newest one over this window.
pub const INTERPOLATION_MS: f64 = 120.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, o: Vec2) {
        self.x += o.x;
        self.y += o.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, s: f64) -> Vec2 {
        Vec2::new(self.x / s, self.y / s)
    }
}

/// Width/height pair in CSS pixels (surface) or world units (border).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// World bounds reported by the session, centred on the origin.
pub type Border = Size;

/// One of the eight compass sectors a joystick deflection falls into.
/// Screen convention: +Y points down, so `Bottom` is positive Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Top,
    TopRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
    ];

    /// Unit step for the direction, screen coordinates.
    pub fn step(self) -> (i8, i8) {
        match self {
            Direction::Right => (1, 0),
            Direction::BottomRight => (1, 1),
            Direction::Bottom => (0, 1),
            Direction::BottomLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::TopLeft => (-1, -1),
            Direction::Top => (0, -1),
            Direction::TopRight => (1, -1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Cell,
    Virus,
    Food,
    Ejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One record of the session's entity stream: create-or-move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityUpdate {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub color: Rgb,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub color: Rgb,
    pub name: Option<String>,
    /// Interpolated state, valid after the last `update`.
    pub x: f64,
    pub y: f64,
    pub r: f64,
    ox: f64,
    oy: f64,
    or: f64,
    nx: f64,
    ny: f64,
    nr: f64,
    /// Timestamp (ms) of the last network update.
    updated: f64,
}

impl Entity {
    fn from_update(u: &EntityUpdate, now: f64) -> Self {
        Self {
            id: u.id,
            kind: u.kind,
            color: u.color,
            name: u.name.clone(),
            x: u.x,
            y: u.y,
            r: u.r,
            ox: u.x,
            oy: u.y,
            or: u.r,
            nx: u.x,
            ny: u.y,
            nr: u.r,
            updated: now,
        }
    }

    fn retarget(&mut self, u: &EntityUpdate, now: f64) {
        self.update(now);
        self.ox = self.x;
        self.oy = self.y;
        self.or = self.r;
        self.nx = u.x;
        self.ny = u.y;
        self.nr = u.r;
        self.kind = u.kind;
        self.color = u.color;
        if u.name.is_some() {
            self.name = u.name.clone();
        }
        self.updated = now;
    }

    /// Advance the interpolation to `now` (ms).
    pub fn update(&mut self, now: f64) {
        let t = ((now - self.updated) / INTERPOLATION_MS).clamp(0.0, 1.0);
        self.x = self.ox + (self.nx - self.ox) * t;
        self.y = self.oy + (self.ny - self.oy) * t;
        self.r = self.or + (self.nr - self.or) * t;
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Entity set plus the ids the local player controls.
///
/// Owned ids may name entities that do not exist (yet, or any more); readers
/// skip those.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub entities: HashMap<u32, Entity>,
    pub owned: Vec<u32>,
    pub border: Border,
}

impl World {
    pub fn new(border: Border) -> Self {
        Self {
            border,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, u: &EntityUpdate, now: f64) {
        match self.entities.get_mut(&u.id) {
            Some(e) => e.retarget(u, now),
            None => {
                self.entities.insert(u.id, Entity::from_update(u, now));
            }
        }
    }

    pub fn remove(&mut self, id: u32) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn add_owned(&mut self, id: u32) {
        if !self.owned.contains(&id) {
            self.owned.push(id);
        }
    }

    pub fn remove_owned(&mut self, id: u32) {
        self.owned.retain(|o| *o != id);
    }

    /// Drops every entity and owned id.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.owned.clear();
    }

    pub fn update_all(&mut self, now: f64) {
        for e in self.entities.values_mut() {
            e.update(now);
        }
    }

    /// Owned ids resolved to live entities; stale ids are skipped.
    pub fn owned_entities(&self) -> impl Iterator<Item = &Entity> {
        self.owned.iter().filter_map(|id| self.entities.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upd(id: u32, x: f64, y: f64, r: f64) -> EntityUpdate {
        EntityUpdate {
            id,
            kind: EntityKind::Cell,
            x,
            y,
            r,
            color: Rgb { r: 10, g: 20, b: 30 },
            name: None,
        }
    }

    #[test]
    fn entity_interpolates_over_window() {
        let mut w = World::default();
        w.apply(&upd(1, 0.0, 0.0, 10.0), 0.0);
        w.apply(&upd(1, 120.0, -60.0, 20.0), 0.0);
        w.update_all(60.0);
        let e = &w.entities[&1];
        assert!((e.x - 60.0).abs() < 1e-9);
        assert!((e.y + 30.0).abs() < 1e-9);
        assert!((e.r - 15.0).abs() < 1e-9);
        w.update_all(10_000.0);
        let e = &w.entities[&1];
        assert_eq!((e.x, e.y, e.r), (120.0, -60.0, 20.0));
    }

    #[test]
    fn retarget_starts_from_current_state() {
        let mut w = World::default();
        w.apply(&upd(1, 0.0, 0.0, 10.0), 0.0);
        w.apply(&upd(1, 100.0, 0.0, 10.0), 0.0);
        // halfway, then a new destination arrives
        w.apply(&upd(1, 100.0, 100.0, 10.0), 60.0);
        let e = &w.entities[&1];
        assert!((e.x - 50.0).abs() < 1e-9);
        assert_eq!(e.y, 0.0);
    }

    #[test]
    fn stale_owned_ids_are_skipped() {
        let mut w = World::default();
        w.add_owned(7);
        w.add_owned(7);
        w.add_owned(8);
        w.apply(&upd(8, 1.0, 2.0, 3.0), 0.0);
        assert_eq!(w.owned.len(), 2);
        let ids: Vec<u32> = w.owned_entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![8]);
    }

    #[test]
    fn clear_empties_entities_and_owned() {
        let mut w = World::new(Size::new(100.0, 100.0));
        w.apply(&upd(1, 0.0, 0.0, 1.0), 0.0);
        w.add_owned(1);
        w.clear();
        assert!(w.entities.is_empty());
        assert!(w.owned.is_empty());
        assert_eq!(w.border, Size::new(100.0, 100.0));
    }

    #[test]
    fn update_deserializes_without_name() {
        let u: EntityUpdate = serde_json::from_str(
            r#"{"id":3,"kind":"virus","x":1.0,"y":2.0,"r":100.0,"color":{"r":0,"g":255,"b":0}}"#,
        )
        .unwrap();
        assert_eq!(u.kind, EntityKind::Virus);
        assert!(u.name.is_none());
    }
}
