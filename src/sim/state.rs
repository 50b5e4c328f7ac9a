//! Session state and core simulation types
//!
//! Everything the frame step reads or writes lives in [`World`], so a test can
//! drive a whole session without a canvas.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, PlayerData};
use super::spawner::Spawner;
use crate::consts::*;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start; nothing updates
    Idle,
    /// Update and draw every display refresh
    Running,
    /// Session ended; waits for restart
    GameOver,
}

/// Things that happened during a step, drained by the host for logging/HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    EnemySpawned,
    EnemyDestroyed { score: u64 },
    PlayerHit { lives: u32 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Seconds since session start
    pub elapsed: f32,
    /// Damage flash intensity (0-1)
    pub flash: f32,
    /// Playfield size in CSS pixels
    pub bounds: Vec2,
    /// The single player ship (kind is always `Player`)
    pub player: Entity,
    pub bullets: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub spawner: Spawner,
    events: Vec<GameEvent>,
}

impl World {
    /// Create an idle world for a playfield of `bounds` CSS pixels
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            lives: START_LIVES,
            elapsed: 0.0,
            flash: 0.0,
            bounds,
            player: Entity::player(bounds),
            bullets: Vec::new(),
            enemies: Vec::new(),
            spawner: Spawner::new(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start (from Idle) or restart (from GameOver) a session.
    ///
    /// Returns false and changes nothing if a session is already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.reset();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Session started ({}x{})", self.bounds.x, self.bounds.y);
        true
    }

    /// Full session reset; the player is repositioned, not recreated
    fn reset(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.elapsed = 0.0;
        self.flash = 0.0;
        self.bullets.clear();
        self.enemies.clear();
        self.spawner.reset();

        let body = &mut self.player.body;
        body.pos = Vec2::new(
            self.bounds.x / 2.0 - body.size.x / 2.0,
            self.bounds.y - PLAYER_BOTTOM_OFFSET,
        );
        body.vel = Vec2::ZERO;
        body.alive = true;
        if let EntityKind::Player(player) = &mut self.player.kind {
            player.cooldown = 0.0;
        }
    }

    /// Apply one damage event. Ends the session when lives run out.
    pub fn damage(&mut self) {
        if !self.is_running() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.flash = 1.0;
        self.events.push(GameEvent::PlayerHit { lives: self.lives });
        if self.lives == 0 {
            self.end();
        }
    }

    fn end(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over - final score {}", self.score);
    }

    /// Credit one destroyed enemy
    pub fn add_kill(&mut self) {
        self.score += KILL_SCORE;
        self.events.push(GameEvent::EnemyDestroyed { score: self.score });
    }

    /// Playfield was resized; the ship is pulled back inside
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        let body = &mut self.player.body;
        body.pos = body.pos.min(bounds - body.size).max(Vec2::ZERO);
    }

    pub fn player_data(&self) -> Option<&PlayerData> {
        self.player.as_player()
    }

    /// Advance the spawn countdown, adding an enemy when it elapses
    pub fn tick_spawner(&mut self, dt: f32) {
        if let Some(enemy) = self
            .spawner
            .tick(dt, self.elapsed, self.bounds.x, &mut self.rng)
        {
            self.enemies.push(enemy);
            self.events.push(GameEvent::EnemySpawned);
        }
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every entity flagged dead this frame
    pub fn cull(&mut self) {
        self.bullets.retain(Entity::is_alive);
        self.enemies.retain(Entity::is_alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_new_world_is_idle() {
        let world = World::new(1, BOUNDS);
        assert_eq!(world.phase, GamePhase::Idle);
        assert_eq!(world.lives, START_LIVES);
        assert_eq!(world.player.body.pos, Vec2::new(PLAYER_START_X, 480.0));
        assert!(world.player_data().is_some());
    }

    #[test]
    fn test_start_centers_player() {
        let mut world = World::new(1, BOUNDS);
        assert!(world.start());
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.player.body.pos, Vec2::new(379.0, 480.0));
        assert_eq!(world.take_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut world = World::new(1, BOUNDS);
        world.start();
        world.score = 50;
        assert!(!world.start());
        assert_eq!(world.score, 50);
    }

    #[test]
    fn test_damage_until_game_over() {
        let mut world = World::new(1, BOUNDS);
        world.start();
        world.damage();
        assert_eq!(world.lives, 2);
        assert_eq!(world.flash, 1.0);
        world.damage();
        world.damage();
        assert_eq!(world.lives, 0);
        assert_eq!(world.phase, GamePhase::GameOver);

        // No further damage once the session is over
        world.damage();
        assert_eq!(world.lives, 0);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut world = World::new(1, BOUNDS);
        world.start();
        world.add_kill();
        world.elapsed = 12.0;
        world.enemies.push(Entity::enemy(100.0, 0.0, 90.0, 0.0));
        world.bullets.push(Entity::bullet(100.0, 100.0));
        for _ in 0..3 {
            world.damage();
        }
        assert_eq!(world.phase, GamePhase::GameOver);

        assert!(world.start());
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, 3);
        assert_eq!(world.elapsed, 0.0);
        assert_eq!(world.flash, 0.0);
        assert!(world.bullets.is_empty());
        assert!(world.enemies.is_empty());
        assert_eq!(world.spawner.timer, 0.0);
    }

    #[test]
    fn test_resize_keeps_player_on_screen() {
        let mut world = World::new(1, BOUNDS);
        world.start();
        world.resize(Vec2::new(300.0, 200.0));
        assert_eq!(world.bounds, Vec2::new(300.0, 200.0));
        assert_eq!(
            world.player.body.pos,
            Vec2::new(300.0 - PLAYER_WIDTH, 200.0 - PLAYER_HEIGHT)
        );

        // Smaller than the ship pins it to the origin
        world.resize(Vec2::new(10.0, 10.0));
        assert_eq!(world.player.body.pos, Vec2::ZERO);

        // Growing leaves the ship where it was
        world.resize(BOUNDS);
        assert_eq!(world.player.body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_cull_removes_dead() {
        let mut world = World::new(1, BOUNDS);
        let mut dead = Entity::bullet(10.0, 10.0);
        dead.kill();
        world.bullets.push(dead);
        world.bullets.push(Entity::bullet(20.0, 20.0));
        world.cull();
        assert_eq!(world.bullets.len(), 1);
        assert!(world.bullets[0].is_alive());
    }
}
