use std::f64::consts::PI;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::model::{Border, Entity, EntityKind, Vec2};
use crate::state::{ClientState, Renderer, ViewTransform};

const MINIMAP_SIZE: f64 = 200.0;
const SECTOR_ROWS: u32 = 5;
const SECTOR_COLS: u32 = 5;
const GRID_STEP: f64 = 100.0;
const STAR_POINTS: u32 = 30;

/// Draws the whole scene into a 2D canvas context.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn draw_scene(&self, s: &ClientState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let surface = s.surface();
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str("#111111");
        ctx.fill_rect(0.0, 0.0, surface.width, surface.height);

        let view = s.camera.transform(surface);
        let [a, b, c, d, e, f] = view.matrix();
        ctx.set_transform(a, b, c, d, e, f)?;
        self.draw_decorations(s, &view)?;
        self.draw_entities(s)?;

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        if s.settings.minimap {
            self.draw_minimap(s)?;
        }
        self.draw_buttons(s)?;
        self.draw_joystick(s)?;
        Ok(())
    }

    fn draw_decorations(&self, s: &ClientState, view: &ViewTransform) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let border = s.world.border;
        let (left, top) = (-border.width / 2.0, -border.height / 2.0);

        if s.settings.background {
            ctx.set_fill_style_str("#222222");
            ctx.fill_rect(left, top, border.width, border.height);
        }
        if s.settings.grid {
            // keep grid lines about one pixel wide on screen
            ctx.set_line_width((1.0 / view.scale.max(0.01)).min(10.0));
            ctx.set_stroke_style_str("#333333");
            ctx.begin_path();
            let mut x = left;
            while x <= -left {
                ctx.move_to(x, top);
                ctx.line_to(x, -top);
                x += GRID_STEP;
            }
            let mut y = top;
            while y <= -top {
                ctx.move_to(left, y);
                ctx.line_to(-left, y);
                y += GRID_STEP;
            }
            ctx.stroke();
        }
        if s.settings.sectors {
            self.draw_sectors(border)?;
        }
        if s.settings.rainbow_border {
            let (w, h) = (border.width * 1.043, border.height * 1.043);
            ctx.set_line_width(border.width * 0.0215);
            ctx.set_stroke_style_str(&format!("hsl({}, 100%, 50%)", s.hue.degree));
            ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
        }
        if s.settings.border {
            ctx.set_line_width(50.0);
            ctx.set_stroke_style_str("#ffffff");
            ctx.stroke_rect(left, top, border.width, border.height);
        }
        Ok(())
    }

    fn draw_sectors(&self, border: Border) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let size = border.width / SECTOR_COLS as f64;
        let origin = Vec2::new(-size * SECTOR_COLS as f64 / 2.0, -size * SECTOR_ROWS as f64 / 2.0);
        ctx.set_stroke_style_str("#444444");
        ctx.set_fill_style_str("#444444");
        ctx.set_line_width(100.0);
        ctx.set_font(&format!("{}px Arial", (size * 0.4).round()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for row in 0..SECTOR_ROWS {
            for col in 0..SECTOR_COLS {
                let x = origin.x + col as f64 * size;
                let y = origin.y + row as f64 * size;
                ctx.stroke_rect(x, y, size, size);
                ctx.fill_text(&sector_label(row, col), x + size / 2.0, y + size / 2.0)?;
            }
        }
        Ok(())
    }

    fn draw_entities(&self, s: &ClientState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let mut order: Vec<&Entity> = s.world.entities.values().collect();
        // small under large; id breaks ties so the order is stable between frames
        order.sort_by(|a, b| a.r.total_cmp(&b.r).then(a.id.cmp(&b.id)));
        for e in order {
            ctx.set_fill_style_str(&e.color.css());
            ctx.begin_path();
            match e.kind {
                EntityKind::Virus => {
                    star_path(ctx, e.position(), e.r, e.r * 220.0 / 256.0);
                    ctx.fill();
                    ctx.set_line_width(e.r * 10.0 / 256.0);
                    ctx.set_stroke_style_str("#777777");
                    ctx.stroke();
                }
                _ => {
                    ctx.arc(e.x, e.y, e.r.max(0.0), 0.0, PI * 2.0)?;
                    ctx.fill();
                }
            }
            if let Some(name) = &e.name {
                let px = (e.r * 0.4).max(8.0);
                ctx.set_font(&format!("bold {px}px Nunito, sans-serif"));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_line_width(px / 6.0);
                ctx.set_stroke_style_str("#000000");
                ctx.set_fill_style_str("#ffffff");
                ctx.stroke_text(name, e.x, e.y)?;
                ctx.fill_text(name, e.x, e.y)?;
            }
        }
        Ok(())
    }

    fn draw_minimap(&self, s: &ClientState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let origin = s.layout.minimap - Vec2::new(MINIMAP_SIZE / 2.0, MINIMAP_SIZE / 2.0);
        ctx.set_global_alpha(0.4);
        ctx.set_fill_style_str("#000000");
        rounded_rect_path(ctx, origin, MINIMAP_SIZE, MINIMAP_SIZE, 20.0)?;
        ctx.fill();
        ctx.set_global_alpha(1.0);
        let marker = origin + minimap_offset(s.camera.position(), s.world.border);
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_rect(marker.x - 5.0, marker.y - 5.0, 10.0, 10.0);
        Ok(())
    }

    fn draw_buttons(&self, s: &ClientState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for button in [&s.split, &s.eject] {
            ctx.set_global_alpha(0.5);
            ctx.set_fill_style_str(&button.tint_css());
            ctx.begin_path();
            ctx.arc(button.position.x, button.position.y, button.radius, 0.0, PI * 2.0)?;
            ctx.fill();
            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("#000000");
            ctx.set_font("20px Courier");
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(button.caption, button.position.x, button.position.y)?;
        }
        Ok(())
    }

    fn draw_joystick(&self, s: &ClientState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let j = &s.joystick;
        ctx.set_fill_style_str("#000000");
        ctx.set_global_alpha(0.5);
        ctx.begin_path();
        ctx.arc(j.position.x, j.position.y, j.base_radius, 0.0, PI * 2.0)?;
        ctx.fill();

        if let Some(dir) = j.last_direction {
            let (dx, dy) = dir.step();
            let n = Vec2::new(dx as f64, dy as f64);
            let tip = j.position + n / n.length() * j.base_radius * 0.9;
            ctx.set_global_alpha(0.8);
            ctx.set_fill_style_str("#ffffff");
            ctx.begin_path();
            ctx.arc(tip.x, tip.y, 5.0, 0.0, PI * 2.0)?;
            ctx.fill();
            ctx.set_fill_style_str("#000000");
        }

        let handle = j.position + j.handle;
        ctx.set_global_alpha(j.handle_alpha);
        ctx.begin_path();
        ctx.arc(handle.x, handle.y, j.handle_radius, 0.0, PI * 2.0)?;
        ctx.fill();
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, state: &ClientState) {
        if let Err(e) = self.draw_scene(state) {
            debug!("draw failed: {e:?}");
        }
    }
}

/// "A1" .. "E5", rows lettered top to bottom.
pub fn sector_label(row: u32, col: u32) -> String {
    format!("{}{}", char::from(b'A' + row as u8), col + 1)
}

/// Camera position mapped into minimap panel coordinates, clamped to the panel.
pub fn minimap_offset(camera: Vec2, border: Border) -> Vec2 {
    if border.width <= 0.0 || border.height <= 0.0 {
        return Vec2::new(MINIMAP_SIZE / 2.0, MINIMAP_SIZE / 2.0);
    }
    let fx = (camera.x / border.width + 0.5).clamp(0.0, 1.0);
    let fy = (camera.y / border.height + 0.5).clamp(0.0, 1.0);
    Vec2::new(fx * MINIMAP_SIZE, fy * MINIMAP_SIZE)
}

/// Vertices of a star with `STAR_POINTS` spikes, first spike straight up.
pub fn star_points(center: Vec2, radius: f64, inner_radius: f64) -> Vec<Vec2> {
    let len = STAR_POINTS * 2;
    let delta = PI * 2.0 / len as f64;
    let start = -PI / 2.0;
    (0..len)
        .map(|i| {
            let r = if i % 2 == 1 { inner_radius } else { radius };
            let angle = i as f64 * delta + start;
            Vec2::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}

fn star_path(ctx: &CanvasRenderingContext2d, center: Vec2, radius: f64, inner_radius: f64) {
    let pts = star_points(center, radius, inner_radius);
    if let Some(first) = pts.first() {
        ctx.move_to(first.x, first.y);
    }
    for p in pts.iter().skip(1) {
        ctx.line_to(p.x, p.y);
    }
    ctx.close_path();
}

fn rounded_rect_path(
    ctx: &CanvasRenderingContext2d,
    origin: Vec2,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    let (x, y) = (origin.x, origin.y);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Size;

    #[test]
    fn sector_labels() {
        assert_eq!(sector_label(0, 0), "A1");
        assert_eq!(sector_label(4, 4), "E5");
        assert_eq!(sector_label(2, 3), "C4");
    }

    #[test]
    fn minimap_maps_world_to_panel() {
        let b = Size::new(1000.0, 500.0);
        assert_eq!(minimap_offset(Vec2::ZERO, b), Vec2::new(100.0, 100.0));
        assert_eq!(minimap_offset(Vec2::new(500.0, -250.0), b), Vec2::new(200.0, 0.0));
        assert_eq!(minimap_offset(Vec2::new(9e9, 0.0), b), Vec2::new(200.0, 100.0));
        assert_eq!(minimap_offset(Vec2::new(1.0, 1.0), Size::default()), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn star_alternates_radii_starting_at_top() {
        let pts = star_points(Vec2::ZERO, 100.0, 80.0);
        assert_eq!(pts.len(), 60);
        assert!(pts[0].x.abs() < 1e-9 && (pts[0].y + 100.0).abs() < 1e-9);
        assert!((pts[1].length() - 80.0).abs() < 1e-9);
        assert!((pts[2].length() - 100.0).abs() < 1e-9);
    }
}
