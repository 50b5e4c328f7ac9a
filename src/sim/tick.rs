//! Frame step
//!
//! `advance` is the whole per-frame update. The host calls it once per display
//! refresh with the clamped delta; tests call it with synthetic steps.

use glam::Vec2;

use super::entity::Frame;
use super::state::World;
use crate::consts::*;

/// Input sampled for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Keyboard direction, each axis in {-1, 0, 1}
    pub move_dir: Vec2,
    /// Pointer position in CSS pixels (mouse or first touch)
    pub pointer: Option<Vec2>,
    /// Fire key held or pointer pressed
    pub fire: bool,
    /// Attract mode - the ship flies itself
    pub autopilot: bool,
}

/// Advance the session by `dt` seconds. Does nothing unless running.
pub fn advance(world: &mut World, input: &TickInput, dt: f32) {
    if !world.is_running() {
        return;
    }

    world.elapsed += dt;
    world.flash = (world.flash - dt * FLASH_DECAY).max(0.0);

    let input = if input.autopilot {
        autopilot_input(world)
    } else {
        input.clone()
    };
    let frame = Frame {
        dt,
        bounds: world.bounds,
        input: &input,
    };

    if let Some(bullet) = world.player.update(&frame) {
        world.bullets.push(bullet);
    }
    for bullet in &mut world.bullets {
        bullet.update(&frame);
    }
    for enemy in &mut world.enemies {
        enemy.update(&frame);
    }

    resolve_bullet_hits(world);
    resolve_player_hits(world);
    world.cull();

    if world.is_running() {
        world.tick_spawner(dt);
    }
}

/// Bullet vs enemy: each live bullet hits at most one live enemy
fn resolve_bullet_hits(world: &mut World) {
    let mut kills = 0;
    for bullet in world.bullets.iter_mut().filter(|b| b.is_alive()) {
        let rect = bullet.rect();
        if let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.rect().intersects(&rect))
        {
            bullet.kill();
            if enemy.damage() {
                kills += 1;
            }
        }
    }
    for _ in 0..kills {
        world.add_kill();
    }
}

/// Enemy vs player: each touching enemy dies and costs one life
fn resolve_player_hits(world: &mut World) {
    let player = world.player.rect();
    for i in 0..world.enemies.len() {
        if !world.is_running() {
            break;
        }
        let enemy = &mut world.enemies[i];
        if enemy.is_alive() && enemy.rect().intersects(&player) {
            enemy.kill();
            world.damage();
        }
    }
}

/// Chase the lowest enemy horizontally and keep firing
fn autopilot_input(world: &World) -> TickInput {
    let ship = world.player.body.center();
    let target_x = world
        .enemies
        .iter()
        .filter(|e| e.is_alive())
        .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
        .map(|e| e.rect().center().x)
        .unwrap_or(world.bounds.x / 2.0);

    TickInput {
        move_dir: Vec2::ZERO,
        pointer: Some(Vec2::new(target_x, ship.y)),
        fire: true,
        autopilot: true,
    }
}
