//! End-to-end runs through the arcade driver

use arcade_hub::consts::SIM_DT;
use arcade_hub::menu::MenuState;
use arcade_hub::sim::{GameEvent, GameOverReport, ScenePhase, TickInput};
use arcade_hub::{Arcade, ArcadeContext, MemoryStore, Route};

fn arcade_with(store: MemoryStore) -> Arcade {
    Arcade::new(ArcadeContext::new(Box::new(store)), 1234)
}

fn press() -> TickInput {
    TickInput {
        action: true,
        ..Default::default()
    }
}

/// Step `seconds` of play, collecting every game-over report
fn play(arcade: &mut Arcade, input: &TickInput, seconds: f32) -> Vec<GameOverReport> {
    let mut reports = Vec::new();
    let steps = (seconds / SIM_DT) as usize;
    for _ in 0..steps {
        arcade.update(input, SIM_DT);
        for event in arcade.drain_events() {
            if let GameEvent::GameOver(report) = event {
                reports.push(report);
            }
        }
    }
    reports
}

#[test]
fn unknown_token_shows_menu() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.navigate("catcher");
    assert!(arcade.navigate("#pinball"));
    assert_eq!(arcade.current_route(), Route::Menu);
    assert!(arcade.menu().is_some());
}

#[test]
fn catcher_three_drops_against_stored_zero() {
    let mut arcade = arcade_with(MemoryStore::new().with("highScore_catcher", "0"));
    arcade.navigate("catcher");
    arcade.update(&press(), SIM_DT);
    assert_eq!(arcade.phase(), Some(ScenePhase::Playing));

    // Park the plate at the left edge, out of reach of every cake
    let hold_left = TickInput {
        axis: -1.0,
        ..Default::default()
    };
    let reports = play(&mut arcade, &hold_left, 30.0);

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.route, Route::Catcher);
    assert_eq!(report.score, 0);
    assert_eq!(report.previous_best, Some(0));
    assert!(!report.new_high_score);
    assert_eq!(report.message, "You dropped too much cake, better get cleaning!");

    let scene = arcade.scene().expect("catcher scene");
    assert_eq!(scene.entity_count(), 0);
    assert_eq!(scene.session().lives, 0);
    assert_eq!(arcade.ctx.high_scores.load("highScore_catcher"), Some(0));
    assert_eq!(arcade.hud().game_over.as_ref(), Some(report));
}

#[test]
fn first_run_sets_a_record() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.navigate("runner");
    arcade.update(&press(), SIM_DT);

    // Standing still, the first obstacle ends the run
    let reports = play(&mut arcade, &TickInput::default(), 20.0);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].new_high_score);
    assert_eq!(reports[0].previous_best, None);
    assert!(reports[0].score >= 18);
    assert_eq!(
        arcade.ctx.high_scores.load("highScore_runner"),
        Some(reports[0].score)
    );
}

#[test]
fn inbox_overflows_when_ignored() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.navigate("inbox");
    arcade.update(&press(), SIM_DT);

    let reports = play(&mut arcade, &TickInput::default(), 30.0);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].message, "Your inbox spiraled out of control.");
    assert_eq!(arcade.hud().score.as_deref(), Some("Cleared: 0"));
}

#[test]
fn restart_builds_a_fresh_session() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.navigate("inbox");
    arcade.update(&press(), SIM_DT);
    play(&mut arcade, &TickInput::default(), 30.0);
    assert_eq!(arcade.phase(), Some(ScenePhase::GameOver));

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    arcade.update(&restart, SIM_DT);
    assert_eq!(arcade.current_route(), Route::Inbox);
    assert_eq!(arcade.phase(), Some(ScenePhase::Intro));
    let hud = arcade.hud();
    assert!(hud.game_over.is_none());
    assert!(hud.intro.is_some());
    assert_eq!(hud.best.as_deref(), Some("Best: 0"));
}

#[test]
fn menu_to_game_and_back() {
    let mut arcade = arcade_with(MemoryStore::new());
    let (route, rect) = MenuState::entry_rects()[0];
    let click = TickInput {
        pointer_pressed: Some(rect.center()),
        ..Default::default()
    };
    arcade.update(&click, SIM_DT);
    assert_eq!(arcade.current_route(), route);
    assert_eq!(arcade.take_pending_route(), Some(route));

    // Address bar echo of our own change is a no-op
    assert!(!arcade.navigate(route.token()));

    let escape = TickInput {
        to_menu: true,
        ..Default::default()
    };
    arcade.update(&escape, SIM_DT);
    assert_eq!(arcade.current_route(), Route::Menu);
    assert_eq!(arcade.take_pending_route(), Some(Route::Menu));
    assert!(arcade.hud().score.is_none());
}

#[test]
fn broken_storage_does_not_stop_play() {
    let mut arcade = arcade_with(MemoryStore::unavailable());
    arcade.navigate("catcher");
    arcade.update(&press(), SIM_DT);
    let hold_left = TickInput {
        axis: -1.0,
        ..Default::default()
    };
    let reports = play(&mut arcade, &hold_left, 30.0);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].previous_best, None);
    assert_eq!(arcade.ctx.high_scores.load("highScore_catcher"), None);
}

#[test]
fn mute_survives_a_reload() {
    let mut arcade = arcade_with(MemoryStore::new());
    assert!(arcade.toggle_mute());
    let settings = arcade
        .ctx
        .high_scores
        .store()
        .get("arcade_settings")
        .expect("readable store");
    let store = MemoryStore::new().with("arcade_settings", &settings.expect("settings saved"));

    let reloaded = arcade_with(store);
    assert!(reloaded.hud().muted);
}
