//! Input sampling
//!
//! Accumulates held keys and the latest pointer state between frames. No
//! validation: any key name or coordinate is accepted.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

const LEFT_KEYS: [&str; 3] = ["ArrowLeft", "a", "A"];
const RIGHT_KEYS: [&str; 3] = ["ArrowRight", "d", "D"];
const UP_KEYS: [&str; 3] = ["ArrowUp", "w", "W"];
const DOWN_KEYS: [&str; 3] = ["ArrowDown", "s", "S"];
const FIRE_KEY: &str = " ";

/// Keys whose default browser action (page scrolling) is suppressed
const SCROLL_KEYS: [&str; 5] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", FIRE_KEY];

/// One-shot actions bound to keys, handled by the host rather than the sim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Start or restart a session
    Start,
    /// Toggle attract mode
    ToggleAutopilot,
}

pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "Enter" => Some(KeyCommand::Start),
        "i" | "I" => Some(KeyCommand::ToggleAutopilot),
        _ => None,
    }
}

/// Touch and mouse are unified: the first active touch wins
pub fn pointer_position(first_touch: Option<Vec2>, mouse: Vec2) -> Vec2 {
    first_touch.unwrap_or(mouse)
}

/// Held keys plus latest pointer state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<String>,
    pointer: Option<Vec2>,
    pointer_down: bool,
    /// A press landed since the last consumed sample
    tapped: bool,
    autopilot: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the browser default should be suppressed.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string());
        SCROLL_KEYS.contains(&key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.pointer_down = true;
        self.tapped = true;
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn pointer_up(&mut self) {
        self.pointer_down = false;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        self.autopilot
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.keys.contains(*k))
    }

    /// 8-directional movement vector from held keys
    pub fn move_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.any_held(&LEFT_KEYS) {
            dir.x -= 1.0;
        }
        if self.any_held(&RIGHT_KEYS) {
            dir.x += 1.0;
        }
        if self.any_held(&UP_KEYS) {
            dir.y -= 1.0;
        }
        if self.any_held(&DOWN_KEYS) {
            dir.y += 1.0;
        }
        dir
    }

    /// Snapshot for the next simulation step
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_dir: self.move_dir(),
            pointer: self.pointer,
            fire: self.is_held(FIRE_KEY) || self.pointer_down || self.tapped,
            autopilot: self.autopilot,
        }
    }

    /// Snapshot for a frame that is about to run; clears the tap latch so a
    /// press released between frames still fires exactly once
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = self.tick_input();
        self.tapped = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_set_tracks_press_and_release() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        assert!(input.is_held("ArrowLeft"));
        input.key_up("ArrowLeft");
        assert!(!input.is_held("ArrowLeft"));
    }

    #[test]
    fn test_scroll_keys_suppress_default() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowDown"));
        assert!(input.key_down(" "));
        assert!(!input.key_down("a"));
        assert!(!input.key_down("Enter"));
    }

    #[test]
    fn test_move_dir_eight_way() {
        let mut input = InputState::new();
        input.key_down("a");
        input.key_down("W");
        assert_eq!(input.move_dir(), Vec2::new(-1.0, -1.0));

        // Opposites cancel
        input.key_down("ArrowRight");
        assert_eq!(input.move_dir(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_pointer_press_fires() {
        let mut input = InputState::new();
        assert!(!input.tick_input().fire);
        input.pointer_down(Vec2::new(10.0, 20.0));
        let tick = input.take_tick_input();
        assert!(tick.fire);
        assert_eq!(tick.pointer, Some(Vec2::new(10.0, 20.0)));

        input.pointer_move(Vec2::new(30.0, 40.0));
        input.pointer_up();
        let tick = input.tick_input();
        assert!(!tick.fire);
        // Pointer position is kept after release
        assert_eq!(tick.pointer, Some(Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_tap_between_frames_fires_once() {
        let mut input = InputState::new();
        input.pointer_down(Vec2::new(400.0, 500.0));
        input.pointer_up();

        assert!(input.take_tick_input().fire);
        assert!(!input.take_tick_input().fire);
    }

    #[test]
    fn test_tap_spawns_a_bullet() {
        use crate::sim::{World, advance};

        let mut world = World::new(1, Vec2::new(800.0, 600.0));
        world.start();
        world.spawner.timer = 1.0e6;

        let mut input = InputState::new();
        input.pointer_down(Vec2::new(400.0, 500.0));
        input.pointer_up();
        advance(&mut world, &input.take_tick_input(), 0.016);
        assert_eq!(world.bullets.len(), 1);

        // The latch is spent; nothing more fires once the cooldown ends
        for _ in 0..20 {
            advance(&mut world, &input.take_tick_input(), 0.016);
        }
        assert_eq!(world.bullets.len(), 1);
    }

    #[test]
    fn test_space_fires() {
        let mut input = InputState::new();
        input.key_down(" ");
        assert!(input.tick_input().fire);
    }

    #[test]
    fn test_first_touch_wins() {
        let mouse = Vec2::new(1.0, 1.0);
        let touch = Vec2::new(5.0, 6.0);
        assert_eq!(pointer_position(Some(touch), mouse), touch);
        assert_eq!(pointer_position(None, mouse), mouse);
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(key_command("Enter"), Some(KeyCommand::Start));
        assert_eq!(key_command("I"), Some(KeyCommand::ToggleAutopilot));
        assert_eq!(key_command("x"), None);
    }

    #[test]
    fn test_autopilot_toggle_reaches_tick_input() {
        let mut input = InputState::new();
        assert!(input.toggle_autopilot());
        assert!(input.tick_input().autopilot);
        assert!(!input.toggle_autopilot());
    }
}
