//! Menu screen: game list, mute toggle and the message dialog

use glam::Vec2;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::context::ArcadeContext;
use crate::renderer::{DrawList, colors};
use crate::router::Route;
use crate::sim::{GameEvent, Rect, SoundCue, TickInput};

pub const TITLE: &str = "🎂 ARCADE 🎂";
const TITLE_CENTER: Vec2 = Vec2::new(WORLD_WIDTH / 2.0, 160.0);
const TITLE_SIZE: Vec2 = Vec2::new(900.0, 100.0);
/// Center of the first entry; later entries stack below
const ENTRY_TOP: Vec2 = Vec2::new(WORLD_WIDTH / 2.0, 380.0);
const ENTRY_SPACING: f32 = 100.0;
const ENTRY_SIZE: Vec2 = Vec2::new(760.0, 80.0);
const MUTE_CENTER: Vec2 = Vec2::new(WORLD_WIDTH - 60.0, 60.0);
const MUTE_SIZE: Vec2 = Vec2::new(90.0, 90.0);
const LISTEN_CENTER: Vec2 = Vec2::new(140.0, 60.0);
const LISTEN_SIZE: Vec2 = Vec2::new(220.0, 80.0);

const ENTRY_LABELS: [&str; 3] = [
    "▶ Responsibility Runner",
    "▶ Cake Catcher",
    "▶ Inbox Invasion",
];

pub const MESSAGE: &str = "Thanks for stopping by the arcade!\n\n\
    Pick a game, chase a high score,\n\
    and tap anywhere to close this note.";
/// Length of the voice message track in seconds
pub const MESSAGE_TRACK_SECONDS: f32 = 8.0;

/// State of the message dialog opened from the title
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDialog {
    /// Voice message playing (music ducked)
    pub listening: bool,
    /// Seconds left in the track
    pub remaining: f32,
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self {
            listening: false,
            remaining: MESSAGE_TRACK_SECONDS,
        }
    }
}

/// Menu screen state
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    pub dialog: Option<MessageDialog>,
    /// The dialog opens at most once per menu visit
    message_shown: bool,
    events: Vec<GameEvent>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit area of each game entry, in `Route::GAMES` order
    pub fn entry_rects() -> [(Route, Rect); 3] {
        let mut rects = [(Route::Menu, Rect::new(Vec2::ZERO, Vec2::ZERO)); 3];
        for (i, route) in Route::GAMES.iter().enumerate() {
            let center = ENTRY_TOP + Vec2::new(0.0, i as f32 * ENTRY_SPACING);
            rects[i] = (*route, Rect::from_center(center, ENTRY_SIZE));
        }
        rects
    }

    pub fn title_rect() -> Rect {
        Rect::from_center(TITLE_CENTER, TITLE_SIZE)
    }

    pub fn mute_rect() -> Rect {
        Rect::from_center(MUTE_CENTER, MUTE_SIZE)
    }

    pub fn listen_rect() -> Rect {
        Rect::from_center(LISTEN_CENTER, LISTEN_SIZE)
    }

    /// Advance the voice track by `dt`, then handle input
    pub fn tick(&mut self, ctx: &mut ArcadeContext, input: &TickInput, dt: f32) -> Option<Route> {
        if let Some(dialog) = self.dialog.as_mut().filter(|d| d.listening) {
            dialog.remaining -= dt;
            if dialog.remaining <= 0.0 {
                log::debug!("Voice message finished");
                *dialog = MessageDialog::default();
                ctx.music_ducked = false;
                self.events.push(GameEvent::VoiceMessage { playing: false });
            }
        }
        self.handle(ctx, input)
    }

    /// Handle one tick of input. Returns the game to open, if one was chosen.
    pub fn handle(&mut self, ctx: &mut ArcadeContext, input: &TickInput) -> Option<Route> {
        let point = input.pointer_pressed?;

        if let Some(dialog) = &mut self.dialog {
            if Self::listen_rect().contains(point) {
                // Pausing rewinds; the next listen plays from the top
                *dialog = MessageDialog {
                    listening: !dialog.listening,
                    ..MessageDialog::default()
                };
                ctx.music_ducked = dialog.listening;
                self.events.push(GameEvent::VoiceMessage {
                    playing: dialog.listening,
                });
            } else {
                self.close_message(ctx);
            }
            return None;
        }

        if Self::mute_rect().contains(point) {
            ctx.toggle_mute();
            return None;
        }

        if Self::title_rect().contains(point) {
            self.open_message();
            return None;
        }

        let route = Self::entry_rects()
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(route, _)| route)?;
        self.events.push(GameEvent::Sound(SoundCue::MenuSelect));
        Some(route)
    }

    /// Open the message dialog. Returns false if it was already shown.
    pub fn open_message(&mut self) -> bool {
        if self.message_shown {
            return false;
        }
        self.message_shown = true;
        self.dialog = Some(MessageDialog::default());
        true
    }

    /// Close the dialog, restore the music mix and reset the menu
    pub fn close_message(&mut self, ctx: &mut ArcadeContext) {
        ctx.music_ducked = false;
        let mut events = std::mem::take(&mut self.events);
        events.extend(self.teardown());
        *self = Self {
            events,
            ..Self::default()
        };
    }

    /// Stop event for a voice track still playing when the menu goes away
    pub fn teardown(&mut self) -> Option<GameEvent> {
        let dialog = self.dialog.as_mut().filter(|d| d.listening)?;
        dialog.listening = false;
        Some(GameEvent::VoiceMessage { playing: false })
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn draw(&self, list: &mut DrawList, muted: bool) {
        list.text(if muted { "🔇" } else { "🔊" }, MUTE_CENTER, 40.0, colors::TEXT);
        list.text(TITLE, TITLE_CENTER, 72.0, colors::TEXT);
        for ((_, rect), label) in Self::entry_rects().iter().zip(ENTRY_LABELS) {
            list.text(label, rect.center(), 64.0, colors::ACCENT);
        }

        if let Some(dialog) = &self.dialog {
            list.fill(
                Rect::new(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
                "rgba(0,0,0,0.9)",
            );
            let listen = if dialog.listening { "Pause ⏸️" } else { "Listen 🔉" };
            list.text(listen, LISTEN_CENTER, 40.0, colors::TEXT);
            list.text(MESSAGE, TITLE_CENTER + Vec2::new(0.0, 290.0), 38.0, colors::TEXT);
        }
    }
}
