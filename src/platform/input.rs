//! Browser input to tick commands
//!
//! DOM listeners write raw key and pointer state in here; the game loop takes
//! a [`TickInput`] snapshot each frame and clears one-shots once a substep has
//! consumed them.

use glam::Vec2;

use crate::sim::TickInput;

/// Logical meaning of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    /// Start / jump / restart from the dialog
    Action,
    Duck,
    Restart,
    Menu,
    Mute,
    ToggleHitboxes,
}

/// Map a `KeyboardEvent.key` value
pub fn map_key(key: &str) -> Option<KeyAction> {
    let action = match key {
        "ArrowLeft" | "a" | "A" => KeyAction::Left,
        "ArrowRight" | "d" | "D" => KeyAction::Right,
        " " | "Spacebar" | "ArrowUp" | "w" | "W" => KeyAction::Action,
        "ArrowDown" | "s" | "S" => KeyAction::Duck,
        "r" | "R" => KeyAction::Restart,
        "Escape" => KeyAction::Menu,
        "m" | "M" => KeyAction::Mute,
        "h" | "H" => KeyAction::ToggleHitboxes,
        _ => return None,
    };
    Some(action)
}

/// Accumulated raw input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    duck: bool,
    pointer_held: bool,
    pointer_pressed: Option<Vec2>,
    action: bool,
    restart: bool,
    to_menu: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat only refreshes held keys.
    ///
    /// Returns the mapped action so the host can handle the ones that live
    /// outside the simulation (mute, hitbox overlay).
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<KeyAction> {
        let action = map_key(key)?;
        match action {
            KeyAction::Left => self.left = true,
            KeyAction::Right => self.right = true,
            KeyAction::Duck => self.duck = true,
            _ if repeat => return None,
            KeyAction::Action => self.action = true,
            KeyAction::Restart => self.restart = true,
            KeyAction::Menu => self.to_menu = true,
            KeyAction::Mute | KeyAction::ToggleHitboxes => {}
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) {
        match map_key(key) {
            Some(KeyAction::Left) => self.left = false,
            Some(KeyAction::Right) => self.right = false,
            Some(KeyAction::Duck) => self.duck = false,
            _ => {}
        }
    }

    /// Pointer went down at `world`
    pub fn pointer_down(&mut self, world: Vec2) {
        self.pointer_held = true;
        self.pointer_pressed = Some(world);
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
    }

    /// Dialog "play again" button
    pub fn request_restart(&mut self) {
        self.restart = true;
    }

    /// Dialog "menu" button
    pub fn request_menu(&mut self) {
        self.to_menu = true;
    }

    /// Drop all held state (focus lost, scene change)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> TickInput {
        let axis = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        TickInput {
            axis,
            pointer_pressed: self.pointer_pressed,
            pointer_held: self.pointer_held,
            action: self.action,
            duck: self.duck,
            restart: self.restart,
            to_menu: self.to_menu,
        }
    }

    pub fn clear_one_shots(&mut self) {
        self.pointer_pressed = None;
        self.action = false;
        self.restart = false;
        self.to_menu = false;
    }
}
