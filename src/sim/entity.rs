//! Entity model: a shared movable rectangle plus a kind tag
//!
//! Player, bullet and enemy behavior is dispatched with a `match` on
//! [`EntityKind`] rather than trait objects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tick::TickInput;
use crate::consts::*;

/// Movable rectangle shared by every entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in CSS pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity in px/s
    pub vel: Vec2,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            alive: true,
        }
    }

    /// Integrate velocity into position
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Player-only state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    /// Movement speed (px/s), also the pointer-assist cap per axis
    pub speed: f32,
    /// Minimum time between accepted shots
    pub fire_interval: f32,
    /// Time left before the next shot is accepted
    pub cooldown: f32,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            fire_interval: FIRE_INTERVAL,
            cooldown: 0.0,
        }
    }
}

/// Enemy-only state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyData {
    pub hp: u32,
    /// Angular accumulator driving lateral drift
    pub wobble_phase: f32,
}

/// Entity kind tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerData),
    Bullet,
    Enemy(EnemyData),
}

/// Per-frame context handed to [`Entity::update`]
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub dt: f32,
    /// Playfield size in CSS pixels
    pub bounds: Vec2,
    pub input: &'a TickInput,
}

/// A game object: body + kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    /// Player at its initial spawn point
    pub fn player(bounds: Vec2) -> Self {
        let pos = Vec2::new(PLAYER_START_X, bounds.y - PLAYER_BOTTOM_OFFSET);
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            kind: EntityKind::Player(PlayerData::default()),
        }
    }

    /// Bullet whose nose sits at `(x, y)`
    pub fn bullet(x: f32, y: f32) -> Self {
        let mut body = Body::new(
            Vec2::new(x - BULLET_WIDTH / 2.0, y - BULLET_HEIGHT),
            Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        );
        body.vel = Vec2::new(0.0, -BULLET_SPEED);
        Self {
            body,
            kind: EntityKind::Bullet,
        }
    }

    /// Enemy horizontally centered on `x`, falling at `speed`
    pub fn enemy(x: f32, y: f32, speed: f32, wobble_phase: f32) -> Self {
        let mut body = Body::new(
            Vec2::new(x - ENEMY_SIZE / 2.0, y),
            Vec2::splat(ENEMY_SIZE),
        );
        body.vel = Vec2::new(0.0, speed);
        Self {
            body,
            kind: EntityKind::Enemy(EnemyData {
                hp: ENEMY_HP,
                wobble_phase,
            }),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    pub fn kill(&mut self) {
        self.body.alive = false;
    }

    /// Apply one point of damage. Returns true if the entity died from it.
    pub fn damage(&mut self) -> bool {
        match &mut self.kind {
            EntityKind::Enemy(enemy) => {
                enemy.hp = enemy.hp.saturating_sub(1);
                if enemy.hp == 0 {
                    self.body.alive = false;
                }
                !self.body.alive
            }
            _ => {
                self.body.alive = false;
                true
            }
        }
    }

    /// Advance one frame. Returns a newly fired bullet, if any.
    pub fn update(&mut self, frame: &Frame) -> Option<Entity> {
        match &mut self.kind {
            EntityKind::Player(player) => update_player(&mut self.body, player, frame),
            EntityKind::Bullet => {
                self.body.integrate(frame.dt);
                if self.body.rect().bottom() < 0.0 {
                    self.body.alive = false;
                }
                None
            }
            EntityKind::Enemy(enemy) => {
                enemy.wobble_phase += frame.dt * ENEMY_WOBBLE_RATE;
                self.body.pos.x += enemy.wobble_phase.sin() * ENEMY_WOBBLE_AMPLITUDE * frame.dt;
                self.body.integrate(frame.dt);
                if self.body.pos.y > frame.bounds.y {
                    self.body.alive = false;
                }
                None
            }
        }
    }

    /// Player state, if this is the player
    pub fn as_player(&self) -> Option<&PlayerData> {
        match &self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    /// Enemy state, if this is an enemy
    pub fn as_enemy(&self) -> Option<&EnemyData> {
        match &self.kind {
            EntityKind::Enemy(e) => Some(e),
            _ => None,
        }
    }
}

fn update_player(body: &mut Body, player: &mut PlayerData, frame: &Frame) -> Option<Entity> {
    let dt = frame.dt;
    let step = player.speed * dt;

    // Pointer assist: close in on the pointer, at most `step` per axis
    if let Some(pointer) = frame.input.pointer {
        let delta = pointer - body.center();
        body.pos.x += delta.x.clamp(-step, step);
        body.pos.y += delta.y.clamp(-step, step);
    }

    // Keyboard movement stacks on top of pointer assist
    body.pos += frame.input.move_dir * step;
    body.integrate(dt);

    // Keep the whole ship on screen; a playfield narrower than the ship pins it at 0
    let max = frame.bounds - body.size;
    body.pos.x = body.pos.x.min(max.x).max(0.0);
    body.pos.y = body.pos.y.min(max.y).max(0.0);

    player.cooldown = (player.cooldown - dt).max(0.0);
    if frame.input.fire {
        return try_fire(body, player);
    }
    None
}

/// Fire-rate limiter: requests inside the cooldown window are dropped
fn try_fire(body: &Body, player: &mut PlayerData) -> Option<Entity> {
    if player.cooldown > 0.0 {
        return None;
    }
    player.cooldown = player.fire_interval;
    Some(Entity::bullet(body.center().x, body.pos.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn frame(dt: f32, input: &TickInput) -> Frame<'_> {
        Frame {
            dt,
            bounds: BOUNDS,
            input,
        }
    }

    #[test]
    fn test_enemy_falls_at_spawn_speed() {
        let input = TickInput::default();
        let mut enemy = Entity::enemy(100.0, -40.0, 90.0, 0.0);
        enemy.update(&frame(1.0, &input));
        assert!((enemy.body.pos.y - 50.0).abs() < 1e-4);
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_enemy_dies_below_playfield() {
        let input = TickInput::default();
        let mut enemy = Entity::enemy(100.0, 590.0, 90.0, 0.0);
        enemy.update(&frame(0.5, &input));
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_enemy_wobble_advances_phase() {
        let input = TickInput::default();
        let mut enemy = Entity::enemy(100.0, 0.0, 90.0, 0.0);
        enemy.update(&frame(0.25, &input));
        let phase = enemy.as_enemy().unwrap().wobble_phase;
        assert!((phase - 0.5).abs() < 1e-6);
        // sin(0.5) > 0, so the enemy drifted right
        assert!(enemy.body.pos.x > 100.0 - ENEMY_SIZE / 2.0);
    }

    #[test]
    fn test_bullet_dies_above_playfield() {
        let input = TickInput::default();
        let mut bullet = Entity::bullet(200.0, 510.0);
        assert_eq!(bullet.body.pos.y, 500.0);
        bullet.update(&frame(1.0, &input));
        assert!((bullet.body.pos.y - (-100.0)).abs() < 1e-3);
        assert!(!bullet.is_alive());
    }

    #[test]
    fn test_bullet_partially_visible_survives() {
        let input = TickInput::default();
        let mut bullet = Entity::bullet(200.0, 10.0);
        bullet.update(&frame(0.001, &input));
        assert!(bullet.is_alive());
    }

    #[test]
    fn test_enemy_damage_kills_at_zero_hp() {
        let mut enemy = Entity::enemy(100.0, 0.0, 90.0, 0.0);
        assert!(enemy.damage());
        assert!(!enemy.is_alive());
        assert_eq!(enemy.as_enemy().unwrap().hp, 0);
    }

    #[test]
    fn test_player_keyboard_movement_and_clamp() {
        let mut player = Entity::player(BOUNDS);
        let input = TickInput {
            move_dir: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        // 300 px/s for 1s from x=100 would be -200; clamped to 0
        player.update(&frame(1.0, &input));
        assert_eq!(player.body.pos.x, 0.0);

        let input = TickInput {
            move_dir: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        for _ in 0..10 {
            player.update(&frame(1.0, &input));
        }
        assert_eq!(player.body.pos.x, BOUNDS.x - PLAYER_WIDTH);
        assert_eq!(player.body.pos.y, BOUNDS.y - PLAYER_HEIGHT);
    }

    #[test]
    fn test_pointer_assist_is_capped_per_axis() {
        let mut player = Entity::player(BOUNDS);
        let start = player.body.pos;
        let input = TickInput {
            pointer: Some(Vec2::new(700.0, 0.0)),
            ..Default::default()
        };
        player.update(&frame(0.1, &input));
        // At most speed * dt = 30 px per axis
        assert!((player.body.pos.x - (start.x + 30.0)).abs() < 1e-3);
        assert!((player.body.pos.y - (start.y - 30.0)).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_assist_does_not_overshoot() {
        let mut player = Entity::player(BOUNDS);
        let center = player.body.center();
        let target = center + Vec2::new(5.0, -2.0);
        let input = TickInput {
            pointer: Some(target),
            ..Default::default()
        };
        player.update(&frame(1.0, &input));
        assert!((player.body.center() - target).length() < 1e-3);
    }

    #[test]
    fn test_fire_cooldown_boundary() {
        let mut player = Entity::player(BOUNDS);
        if let EntityKind::Player(p) = &mut player.kind {
            p.fire_interval = 0.125;
        }
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let shots: Vec<bool> = (0..5)
            .map(|_| player.update(&frame(0.0625, &input)).is_some())
            .collect();
        // Exactly one interval between accepted shots
        assert_eq!(shots, vec![true, false, true, false, true]);
    }

    #[test]
    fn test_bullet_spawns_at_ship_nose() {
        let mut player = Entity::player(BOUNDS);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let bullet = player.update(&frame(NOMINAL_DT, &input)).unwrap();
        let nose_x = player.body.center().x;
        assert_eq!(bullet.rect().center().x, nose_x);
        assert_eq!(bullet.rect().bottom(), player.body.pos.y);
        assert_eq!(bullet.body.vel.y, -BULLET_SPEED);
    }
}
