//! Top-level driver: router, shared context and the active screen
//!
//! The host feeds frame deltas and input snapshots into [`Arcade::update`],
//! which runs the fixed-step loop. Everything the host must react to (sounds,
//! shake, game over, address changes) is pulled back out afterwards.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT, WORLD_HEIGHT, WORLD_WIDTH};
use crate::context::ArcadeContext;
use crate::menu::MenuState;
use crate::renderer::{DrawList, colors};
use crate::router::{Route, Router};
use crate::sim::{
    CatcherScene, GameEvent, GameOverReport, InboxScene, RunnerScene, Scene, ScenePhase,
    TickInput,
};

/// What is currently on screen
enum Screen {
    Menu(MenuState),
    Game(Box<dyn Scene>),
}

/// HUD snapshot for the DOM overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub route: Route,
    pub score: Option<String>,
    /// Remaining lives as hearts, spent ones as black hearts
    pub lives: Option<String>,
    pub best: Option<String>,
    /// Intro overlay, shown until the first press
    pub intro: Option<&'static str>,
    pub game_over: Option<GameOverReport>,
    pub muted: bool,
}

pub struct Arcade {
    pub ctx: ArcadeContext,
    router: Router,
    screen: Screen,
    seed: u64,
    /// Scenes built so far, mixed into each scene's seed
    runs: u64,
    /// Bumped whenever the screen is rebuilt
    generation: u64,
    accumulator: f32,
    pending_route: Option<Route>,
    events: Vec<GameEvent>,
}

impl Arcade {
    /// Start on the menu
    pub fn new(ctx: ArcadeContext, seed: u64) -> Self {
        let mut router = Router::new();
        router.switch(Route::Menu);
        Self {
            ctx,
            router,
            screen: Screen::Menu(MenuState::new()),
            seed,
            runs: 0,
            generation: 0,
            accumulator: 0.0,
            pending_route: None,
            events: Vec::new(),
        }
    }

    pub fn current_route(&self) -> Route {
        self.router.current().unwrap_or(Route::Menu)
    }

    pub fn phase(&self) -> Option<ScenePhase> {
        match &self.screen {
            Screen::Menu(_) => None,
            Screen::Game(scene) => Some(scene.phase()),
        }
    }

    pub fn menu(&self) -> Option<&MenuState> {
        match &self.screen {
            Screen::Menu(menu) => Some(menu),
            Screen::Game(_) => None,
        }
    }

    pub fn scene(&self) -> Option<&dyn Scene> {
        match &self.screen {
            Screen::Game(scene) => Some(scene.as_ref()),
            Screen::Menu(_) => None,
        }
    }

    /// Switch to the route named by an address token.
    ///
    /// Returns false when the route is already active.
    pub fn navigate(&mut self, token: &str) -> bool {
        match self.router.navigate(token) {
            Some(route) => {
                self.open(route);
                true
            }
            None => false,
        }
    }

    fn go_to(&mut self, route: Route) {
        if self.router.switch(route).is_some() {
            self.open(route);
            self.pending_route = Some(route);
        }
    }

    /// Tear down the current screen and build `route` from scratch
    fn open(&mut self, route: Route) {
        if let Screen::Menu(menu) = &mut self.screen {
            self.events.extend(menu.teardown());
        }
        self.ctx.reset_for_scene();
        self.accumulator = 0.0;
        self.generation += 1;
        self.screen = self.build_screen(route);
    }

    fn build_screen(&mut self, route: Route) -> Screen {
        let build: fn(&ArcadeContext, u64) -> Box<dyn Scene> = match route {
            Route::Menu => return Screen::Menu(MenuState::new()),
            Route::Runner => |ctx, seed| Box::new(RunnerScene::new(ctx, seed)),
            Route::Catcher => |ctx, seed| Box::new(CatcherScene::new(ctx, seed)),
            Route::Inbox => |ctx, seed| Box::new(InboxScene::new(ctx, seed)),
        };
        self.runs += 1;
        let seed = self.seed ^ self.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        log::debug!("Building {} with seed {}", route.token(), seed);
        Screen::Game(build(&self.ctx, seed))
    }

    pub fn restart(&mut self) {
        let route = self.current_route();
        if route == Route::Menu {
            return;
        }
        log::info!("Restarting {}", route.token());
        self.open(route);
    }

    /// Run the fixed-step loop for a frame of `dt` seconds.
    ///
    /// One-shot inputs only reach the first substep. A screen change ends the
    /// frame; the new screen starts from an empty accumulator. Returns the
    /// number of substeps run; when it is zero the host should keep its
    /// one-shots for the next frame.
    pub fn update(&mut self, input: &TickInput, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let generation = self.generation;
            if substeps == 0 {
                self.step(input);
            } else {
                self.step(&input.held_only());
            }
            substeps += 1;
            if self.generation != generation {
                break;
            }
            self.accumulator -= SIM_DT;
        }
        substeps
    }

    fn step(&mut self, input: &TickInput) {
        if input.to_menu && self.current_route() != Route::Menu {
            self.go_to(Route::Menu);
            return;
        }

        match &mut self.screen {
            Screen::Menu(menu) => {
                let chosen = menu.tick(&mut self.ctx, input, SIM_DT);
                self.events.extend(menu.drain_events());
                if let Some(route) = chosen {
                    self.go_to(route);
                }
            }
            Screen::Game(scene) => {
                if scene.phase() == ScenePhase::GameOver {
                    if input.restart || input.action {
                        self.restart();
                    }
                    return;
                }
                scene.tick(&mut self.ctx, input, SIM_DT);
                self.events.extend(scene.drain_events());
            }
        }
    }

    /// Route change the host should mirror in the address bar
    pub fn take_pending_route(&mut self) -> Option<Route> {
        self.pending_route.take()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.ctx.toggle_mute()
    }

    pub fn hud(&self) -> Hud {
        let route = self.current_route();
        let muted = self.ctx.settings.muted;
        let Screen::Game(scene) = &self.screen else {
            return Hud {
                route,
                score: None,
                lives: None,
                best: None,
                intro: None,
                game_over: None,
                muted,
            };
        };

        let session = scene.session();
        let spent = session.max_lives.saturating_sub(session.lives);
        Hud {
            route,
            score: Some(scene.score_label()),
            lives: Some("❤️".repeat(session.lives as usize) + &"🖤".repeat(spent as usize)),
            best: Some(match scene.best() {
                Some(best) => format!("Best: {best}"),
                None => "Best: -".to_string(),
            }),
            intro: (session.phase == ScenePhase::Intro).then(|| scene.intro()),
            game_over: session.report().cloned(),
            muted,
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        list.clear();
        match &self.screen {
            Screen::Menu(menu) => menu.draw(list, self.ctx.settings.muted),
            Screen::Game(scene) => {
                scene.draw(list, self.ctx.settings.debug_hitboxes);
                if let Some(report) = scene.session().report() {
                    let (text, color) = if report.new_high_score {
                        ("NEW BEST!", colors::GOLD)
                    } else {
                        ("GAME OVER", colors::ACCENT)
                    };
                    list.text(
                        text,
                        Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 3.0),
                        96.0,
                        color,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::renderer::DrawCmd;
    use crate::sim::SoundCue;

    fn arcade() -> Arcade {
        Arcade::new(ArcadeContext::new(Box::new(MemoryStore::new())), 7)
    }

    fn press() -> TickInput {
        TickInput {
            action: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_on_menu() {
        let arcade = arcade();
        assert_eq!(arcade.current_route(), Route::Menu);
        assert!(arcade.menu().is_some());
        assert!(arcade.hud().score.is_none());
    }

    #[test]
    fn test_navigate_builds_scene_and_ignores_repeat() {
        let mut arcade = arcade();
        assert!(arcade.navigate("#catcher"));
        assert_eq!(arcade.phase(), Some(ScenePhase::Intro));
        assert!(!arcade.navigate("catcher"));
        assert!(arcade.navigate("bogus"));
        assert_eq!(arcade.current_route(), Route::Menu);
    }

    #[test]
    fn test_navigation_resets_ducking() {
        let mut arcade = arcade();
        arcade.ctx.music_ducked = true;
        arcade.navigate("inbox");
        assert!(!arcade.ctx.music_ducked);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut arcade = arcade();
        arcade.navigate("runner");
        assert_eq!(arcade.update(&press(), SIM_DT * 0.5), 0);
        assert_eq!(arcade.phase(), Some(ScenePhase::Intro));
        assert_eq!(arcade.update(&press(), SIM_DT * 0.6), 1);
        assert_eq!(arcade.phase(), Some(ScenePhase::Playing));
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut arcade = arcade();
        assert!(arcade.update(&TickInput::default(), 5.0) <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_menu_click_opens_game_and_requests_route() {
        let mut arcade = arcade();
        let (route, rect) = MenuState::entry_rects()[1];
        let click = TickInput {
            pointer_pressed: Some(rect.center()),
            ..Default::default()
        };
        arcade.update(&click, SIM_DT);
        assert_eq!(arcade.current_route(), route);
        assert_eq!(arcade.take_pending_route(), Some(route));
        assert_eq!(arcade.take_pending_route(), None);
        assert!(
            arcade
                .drain_events()
                .contains(&GameEvent::Sound(SoundCue::MenuSelect))
        );
    }

    #[test]
    fn test_switch_does_not_swallow_next_frame() {
        let mut arcade = arcade();
        let (route, rect) = MenuState::entry_rects()[0];
        let click = TickInput {
            pointer_pressed: Some(rect.center()),
            ..Default::default()
        };
        assert_eq!(arcade.update(&click, SIM_DT), 1);
        assert_eq!(arcade.current_route(), route);

        // The fresh scene gets the whole next frame
        assert_eq!(arcade.update(&press(), SIM_DT), 1);
        assert_eq!(arcade.phase(), Some(ScenePhase::Playing));
    }

    #[test]
    fn test_switch_ends_the_frame() {
        let mut arcade = arcade();
        let (_, rect) = MenuState::entry_rects()[2];
        let click = TickInput {
            pointer_pressed: Some(rect.center()),
            action: true,
            ..Default::default()
        };
        // A long frame stops at the switch instead of ticking the new scene
        assert_eq!(arcade.update(&click, SIM_DT * 4.0), 1);
        assert_eq!(arcade.phase(), Some(ScenePhase::Intro));
    }

    #[test]
    fn test_leaving_menu_stops_voice_message() {
        let mut arcade = arcade();
        for rect in [MenuState::title_rect(), MenuState::listen_rect()] {
            let click = TickInput {
                pointer_pressed: Some(rect.center()),
                ..Default::default()
            };
            arcade.update(&click, SIM_DT);
        }
        assert!(arcade.ctx.music_ducked);
        assert!(
            arcade
                .drain_events()
                .contains(&GameEvent::VoiceMessage { playing: true })
        );

        arcade.navigate("runner");
        assert!(!arcade.ctx.music_ducked);
        assert_eq!(
            arcade.drain_events(),
            vec![GameEvent::VoiceMessage { playing: false }]
        );
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut arcade = arcade();
        arcade.navigate("catcher");
        let escape = TickInput {
            to_menu: true,
            ..Default::default()
        };
        arcade.update(&escape, SIM_DT);
        assert_eq!(arcade.current_route(), Route::Menu);
        assert_eq!(arcade.take_pending_route(), Some(Route::Menu));
    }

    #[test]
    fn test_hud_shows_intro_and_lives() {
        let mut arcade = arcade();
        arcade.navigate("catcher");
        let hud = arcade.hud();
        assert!(hud.intro.is_some());
        assert_eq!(hud.lives.as_deref(), Some("❤️❤️❤️"));
        assert_eq!(hud.best.as_deref(), Some("Best: -"));
        assert_eq!(hud.score.as_deref(), Some("Score: 0"));
    }

    #[test]
    fn test_draw_menu_and_scene() {
        let mut arcade = arcade();
        let mut list = DrawList::new();
        arcade.draw(&mut list);
        assert!(!list.is_empty());
        arcade.navigate("runner");
        arcade.draw(&mut list);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_first_record_draws_gold_banner() {
        let mut arcade = arcade();
        arcade.navigate("runner");
        arcade.update(&press(), SIM_DT);
        for _ in 0..(20.0 / SIM_DT) as usize {
            arcade.update(&TickInput::default(), SIM_DT);
        }
        let report = arcade.hud().game_over.expect("runner ended");
        assert!(report.new_high_score);

        let mut list = DrawList::new();
        arcade.draw(&mut list);
        assert!(list.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Text { text: "NEW BEST!", color, .. } if *color == colors::GOLD
        )));
    }
}
