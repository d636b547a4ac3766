//! Static entity type descriptors
//!
//! Each scene picks from a small fixed catalog. Hitboxes are independent of
//! the glyph's visual bounds.

use glam::Vec2;

/// Read-only description of a spawnable entity type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityKind {
    pub glyph: &'static str,
    /// Label drawn under the glyph (inbox)
    pub label: &'static str,
    pub hitbox: Vec2,
    /// Height of the hitbox bottom above the ground (runner)
    pub elevation: f32,
    /// Game-over text when this entity ends the run
    pub message: &'static str,
    /// Priority entities expire faster and wobble
    pub priority: bool,
}

impl EntityKind {
    const fn new(glyph: &'static str, hitbox: Vec2) -> Self {
        Self {
            glyph,
            label: "",
            hitbox,
            elevation: 0.0,
            message: "",
            priority: false,
        }
    }

    const fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    const fn message(mut self, message: &'static str) -> Self {
        self.message = message;
        self
    }

    const fn elevated(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    const fn priority(mut self) -> Self {
        self.priority = true;
        self
    }
}

/// Falling cake (catcher)
pub const CAKE: EntityKind = EntityKind::new("🍰", Vec2::new(48.0, 48.0));

/// Runner obstacles
pub const OBSTACLES: &[EntityKind] = &[
    EntityKind::new("⏰", Vec2::new(34.0, 34.0)).message("You slept through the alarm."),
    EntityKind::new("🧾", Vec2::new(28.0, 36.0)).message("Bills and paperwork buried you alive."),
    EntityKind::new("⏳", Vec2::new(36.0, 36.0)).message("Your deadlines caught up with you."),
    // Floats at head height: duck under it
    EntityKind::new("💸", Vec2::new(40.0, 26.0))
        .elevated(44.0)
        .message("Your money flew away and took you with it."),
];

/// Inbox emails
pub const EMAILS: &[EntityKind] = &[
    EntityKind::new("📧", EMAIL_HITBOX).label("Unread email"),
    EntityKind::new("📎", EMAIL_HITBOX).label("See attached"),
    EntityKind::new("📆", EMAIL_HITBOX).label("Meeting moved"),
    EntityKind::new("💬", EMAIL_HITBOX).label("Quick question"),
    EntityKind::new("⚠️", EMAIL_HITBOX).label("URGENT").priority(),
];

/// Clickable area of an email
pub const EMAIL_HITBOX: Vec2 = Vec2::new(160.0, 140.0);
