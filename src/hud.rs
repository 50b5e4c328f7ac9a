//! HUD and overlay controller
//!
//! Mirrors score/lives and overlay visibility from the session state. The
//! controller derives everything from [`World`]; the only thing it remembers
//! is what it last pushed, so unchanged fields are not rewritten.

use crate::sim::{GamePhase, World};

/// Where HUD updates land (the DOM in the browser, a recorder in tests)
pub trait HudSink {
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: u32);
    fn set_start_overlay(&mut self, visible: bool);
    /// `Some(final_score)` shows the game-over overlay, `None` hides it
    fn set_game_over(&mut self, final_score: Option<u64>);
}

/// Everything the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u32,
    pub start_visible: bool,
    pub game_over: Option<u64>,
}

impl HudSnapshot {
    pub fn from_world(world: &World) -> Self {
        Self {
            score: world.score,
            lives: world.lives,
            start_visible: world.phase == GamePhase::Idle,
            game_over: (world.phase == GamePhase::GameOver).then_some(world.score),
        }
    }
}

/// Pushes snapshot changes into a [`HudSink`]
#[derive(Debug, Default)]
pub struct HudController {
    shown: Option<HudSnapshot>,
}

impl HudController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflect the world into the sink, touching only fields that changed
    pub fn sync(&mut self, world: &World, sink: &mut impl HudSink) {
        let next = HudSnapshot::from_world(world);
        let prev = self.shown;
        if prev == Some(next) {
            return;
        }

        if prev.map(|p| p.score) != Some(next.score) {
            sink.set_score(next.score);
        }
        if prev.map(|p| p.lives) != Some(next.lives) {
            sink.set_lives(next.lives);
        }
        if prev.map(|p| p.start_visible) != Some(next.start_visible) {
            sink.set_start_overlay(next.start_visible);
        }
        if prev.map(|p| p.game_over) != Some(next.game_over) {
            sink.set_game_over(next.game_over);
        }
        self.shown = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Debug, PartialEq)]
    enum Call {
        Score(u64),
        Lives(u32),
        Start(bool),
        GameOver(Option<u64>),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl HudSink for Recorder {
        fn set_score(&mut self, score: u64) {
            self.0.push(Call::Score(score));
        }
        fn set_lives(&mut self, lives: u32) {
            self.0.push(Call::Lives(lives));
        }
        fn set_start_overlay(&mut self, visible: bool) {
            self.0.push(Call::Start(visible));
        }
        fn set_game_over(&mut self, final_score: Option<u64>) {
            self.0.push(Call::GameOver(final_score));
        }
    }

    fn world() -> World {
        World::new(1, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_first_sync_pushes_everything() {
        let mut hud = HudController::new();
        let mut rec = Recorder::default();
        hud.sync(&world(), &mut rec);
        assert_eq!(
            rec.0,
            vec![
                Call::Score(0),
                Call::Lives(3),
                Call::Start(true),
                Call::GameOver(None)
            ]
        );
    }

    #[test]
    fn test_unchanged_state_pushes_nothing() {
        let mut hud = HudController::new();
        let w = world();
        hud.sync(&w, &mut Recorder::default());
        let mut rec = Recorder::default();
        hud.sync(&w, &mut rec);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn test_start_hides_overlay_and_score_updates() {
        let mut hud = HudController::new();
        let mut w = world();
        hud.sync(&w, &mut Recorder::default());

        w.start();
        let mut rec = Recorder::default();
        hud.sync(&w, &mut rec);
        assert_eq!(rec.0, vec![Call::Start(false)]);

        w.add_kill();
        let mut rec = Recorder::default();
        hud.sync(&w, &mut rec);
        assert_eq!(rec.0, vec![Call::Score(10)]);
    }

    #[test]
    fn test_game_over_shows_final_score() {
        let mut hud = HudController::new();
        let mut w = world();
        w.start();
        w.add_kill();
        w.add_kill();
        hud.sync(&w, &mut Recorder::default());

        for _ in 0..3 {
            w.damage();
        }
        let mut rec = Recorder::default();
        hud.sync(&w, &mut rec);
        assert_eq!(rec.0, vec![Call::Lives(0), Call::GameOver(Some(20))]);

        // Restart hides the game-over overlay again
        w.start();
        let mut rec = Recorder::default();
        hud.sync(&w, &mut rec);
        assert_eq!(
            rec.0,
            vec![Call::Score(0), Call::Lives(3), Call::GameOver(None)]
        );
    }
}
