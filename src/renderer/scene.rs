//! Frame builder
//!
//! Turns a [`World`] into a flat triangle list in CSS pixels. Draw order:
//! star field, bullets, enemies, player, damage flash.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Entity, EntityKind, World};

const ENEMY_SEGMENTS: u32 = 24;

/// Star field positions for a given session time.
///
/// Purely decorative; star `i` depends only on `i`, `elapsed` and the bounds.
pub fn star_positions(elapsed: f32, bounds: Vec2) -> impl Iterator<Item = Vec2> {
    let (w, h) = (bounds.x, bounds.y);
    (0..STAR_COUNT).map(move |i| {
        let i = i as f32;
        let x = (i * 73.0 + (elapsed * 40.0) % w) % w;
        let y = (i * 127.0 + elapsed * 80.0) % h;
        Vec2::new(x, (y + h) % h)
    })
}

/// Overlay color for the current flash intensity, if any
pub fn flash_color(flash: f32) -> Option<[f32; 4]> {
    (flash > 0.0).then(|| {
        let mut color = colors::FLASH;
        color[3] = flash * FLASH_MAX_ALPHA;
        color
    })
}

/// Build the vertex list for one frame
pub fn build_frame(world: &World) -> Vec<Vertex> {
    let bounds = world.bounds;
    let mut out = Vec::with_capacity(
        STAR_COUNT as usize * 6
            + world.bullets.len() * 6
            + world.enemies.len() * (ENEMY_SEGMENTS as usize * 3 + 6)
            + 18,
    );

    if bounds.x > 0.0 && bounds.y > 0.0 {
        for star in star_positions(world.elapsed, bounds) {
            out.extend(shapes::rect(star.x, star.y, STAR_SIZE, STAR_SIZE, colors::STAR));
        }
    }

    for entity in world.bullets.iter().chain(&world.enemies) {
        draw_entity(entity, &mut out);
    }
    draw_entity(&world.player, &mut out);

    if let Some(color) = flash_color(world.flash) {
        out.extend(shapes::rect(0.0, 0.0, bounds.x, bounds.y, color));
    }

    out
}

/// Per-kind visuals; dead entities draw nothing
pub fn draw_entity(entity: &Entity, out: &mut Vec<Vertex>) {
    if !entity.is_alive() {
        return;
    }
    let r = entity.rect();
    let cx = r.center().x;
    match entity.kind {
        EntityKind::Player(_) => {
            out.extend(shapes::triangle(
                Vec2::new(cx, r.y),
                Vec2::new(r.right(), r.bottom()),
                Vec2::new(r.x, r.bottom()),
                colors::PLAYER,
            ));
            out.extend(shapes::rect(cx - 6.0, r.y + 12.0, 12.0, 14.0, colors::COCKPIT));
        }
        EntityKind::Bullet => {
            out.extend(shapes::rect(r.x, r.y, r.w, r.h, colors::BULLET));
        }
        EntityKind::Enemy(_) => {
            out.extend(shapes::circle(
                r.center(),
                r.w / 2.0,
                colors::ENEMY,
                ENEMY_SEGMENTS,
            ));
            out.extend(shapes::rect(cx - 6.0, r.y + 10.0, 12.0, 6.0, colors::ENEMY_VISOR));
        }
    }
}
