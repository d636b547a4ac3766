//! Arcade Hub entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use arcade_hub::audio::AudioManager;
    use arcade_hub::consts::*;
    use arcade_hub::platform::dom::{self, EventSubscription};
    use arcade_hub::platform::storage::LocalStorage;
    use arcade_hub::platform::{InputState, KeyAction};
    use arcade_hub::renderer::{CanvasPainter, DrawList};
    use arcade_hub::sim::GameEvent;
    use arcade_hub::{Arcade, ArcadeContext, Route};

    /// Game instance holding all state
    struct Game {
        arcade: Arcade,
        input: InputState,
        audio: AudioManager,
        painter: CanvasPainter,
        draw_list: DrawList,
        canvas: HtmlCanvasElement,
        document: Document,
        last_time: f64,
        /// Route the scene listeners were set up for
        listeners_route: Option<Route>,
        /// Inbox: right clicks must not open the browser menu
        context_menu_guard: Option<EventSubscription>,
    }

    impl Game {
        /// One animation frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;
            let dt = dt.min(MAX_FRAME_DT);

            let input = self.input.snapshot();
            if self.arcade.update(&input, dt) > 0 {
                self.input.clear_one_shots();
            }

            for event in self.arcade.drain_events() {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::Shake {
                        duration,
                        intensity,
                    } => self.painter.shake(duration, intensity),
                    GameEvent::GameOver(report) => log::info!(
                        "{} over: score {} (new best: {})",
                        report.route.title(),
                        report.score,
                        report.new_high_score
                    ),
                    GameEvent::VoiceMessage { playing: true } => self.audio.play_message(),
                    GameEvent::VoiceMessage { playing: false } => self.audio.stop_message(),
                }
            }

            if let Some(route) = self.arcade.take_pending_route() {
                set_hash(route);
            }
            self.sync_scene_listeners();
            self.audio.sync(&self.arcade.ctx);

            self.arcade.draw(&mut self.draw_list);
            self.painter.paint(&self.draw_list, dt);
            self.update_hud();
        }

        /// Swap scene-scoped listeners when the route changes
        fn sync_scene_listeners(&mut self) {
            let route = self.arcade.current_route();
            if self.listeners_route == Some(route) {
                return;
            }
            self.listeners_route = Some(route);
            self.input.release_all();
            self.context_menu_guard = None;

            if route == Route::Inbox {
                match EventSubscription::new(&self.canvas, "contextmenu", |event: Event| {
                    event.prevent_default();
                }) {
                    Ok(guard) => self.context_menu_guard = Some(guard),
                    Err(err) => log::warn!("contextmenu listener failed: {:?}", err),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = &self.document;
            let hud = self.arcade.hud();
            let in_game = hud.route != Route::Menu;

            dom::set_visible_by_id(document, "hud", in_game);
            if in_game {
                dom::set_text(document, "#hud-score .hud-value", hud.score.as_deref().unwrap_or(""));
                dom::set_text(document, "#hud-lives .hud-value", hud.lives.as_deref().unwrap_or(""));
                dom::set_text(document, "#hud-best .hud-value", hud.best.as_deref().unwrap_or(""));
            }

            dom::set_visible_by_id(document, "intro", hud.intro.is_some());
            if let Some(intro) = hud.intro {
                dom::set_text(document, "#intro .intro-text", intro);
            }

            dom::set_visible_by_id(document, "game-over", hud.game_over.is_some());
            if let Some(report) = &hud.game_over {
                dom::set_text(document, "#final-message", &report.message);
                dom::set_text(document, "#final-score", &report.score.to_string());
                let best = report
                    .previous_best
                    .map_or_else(|| "-".to_string(), |b| b.to_string());
                dom::set_text(document, "#final-best", &best);
                dom::set_visible_by_id(document, "new-high-score", report.new_high_score);
            }
        }
    }

    fn set_hash(route: Route) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_hash(route.token()) {
                log::warn!("Failed to set location hash: {:?}", err);
            }
        }
    }

    fn current_hash() -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Arcade Hub starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        dom::set_visible_by_id(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let painter = CanvasPainter::new(canvas.clone(), seed)?;
        let ctx = ArcadeContext::new(Box::new(LocalStorage::new()));
        let mut arcade = Arcade::new(ctx, seed);
        arcade.navigate(&current_hash());
        // Unknown or empty hashes land on the menu; say so in the address bar
        set_hash(arcade.current_route());
        log::info!("Arcade initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            arcade,
            input: InputState::new(),
            audio: AudioManager::new(),
            painter,
            draw_list: DrawList::new(),
            canvas: canvas.clone(),
            document: document.clone(),
            last_time: 0.0,
            listeners_route: None,
            context_menu_guard: None,
        }));

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());

        // Follow the address bar
        {
            let game = game.clone();
            dom::listen(&window, "hashchange", move |_event: Event| {
                let hash = current_hash();
                game.borrow_mut().arcade.navigate(&hash);
            });
        }

        // Keep the backing store in step with the element size
        {
            let game = game.clone();
            dom::listen(&window, "resize", move |_event: Event| {
                game.borrow_mut().painter.resize();
            });
        }

        request_animation_frame(game);

        log::info!("Arcade Hub running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            dom::listen(window, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.audio.resume();
                match g.input.key_down(&event.key(), event.repeat()) {
                    Some(KeyAction::Mute) => {
                        g.arcade.toggle_mute();
                    }
                    Some(KeyAction::ToggleHitboxes) => {
                        g.arcade.ctx.toggle_debug_hitboxes();
                    }
                    // Keep space and arrows from scrolling the page
                    Some(_) => event.prevent_default(),
                    None => {}
                }
            });
        }
        {
            let game = game.clone();
            dom::listen(window, "keyup", move |event: Event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    game.borrow_mut().input.key_up(&event.key());
                }
            });
        }

        // Pointer down on the canvas, up anywhere
        {
            let game = game.clone();
            dom::listen(canvas, "pointerdown", move |event: Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let world = g
                    .painter
                    .client_to_world(event.client_x() as f32, event.client_y() as f32);
                g.input.pointer_down(world);
            });
        }
        {
            let game = game.clone();
            dom::listen(window, "pointerup", move |_event: Event| {
                game.borrow_mut().input.pointer_up();
            });
        }

        // Focus lost: nothing stays held
        dom::listen(window, "blur", move |_event: Event| {
            game.borrow_mut().input.release_all();
        });
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            dom::on_click(document, "restart-btn", move |_event: Event| {
                game.borrow_mut().input.request_restart();
            });
        }
        dom::on_click(document, "menu-btn", move |_event: Event| {
            game.borrow_mut().input.request_menu();
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arcade Hub (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    for route in arcade_hub::Route::GAMES {
        demo(route);
    }
}

/// Play one game with idle input until it ends (or a minute passes)
#[cfg(not(target_arch = "wasm32"))]
fn demo(route: arcade_hub::Route) {
    use arcade_hub::consts::SIM_DT;
    use arcade_hub::sim::{GameEvent, TickInput};
    use arcade_hub::{Arcade, ArcadeContext, MemoryStore};

    let mut arcade = Arcade::new(ArcadeContext::new(Box::new(MemoryStore::new())), 42);
    arcade.navigate(route.token());
    arcade.update(
        &TickInput {
            action: true,
            ..Default::default()
        },
        SIM_DT,
    );

    let idle = TickInput::default();
    let mut elapsed = 0.0;
    while elapsed < 60.0 {
        arcade.update(&idle, SIM_DT);
        elapsed += SIM_DT;
        let over = arcade.drain_events().into_iter().find_map(|e| match e {
            GameEvent::GameOver(report) => Some(report),
            _ => None,
        });
        if let Some(report) = over {
            println!(
                "{:<22} over after {:>5.1}s: {} | {}",
                route.title(),
                elapsed,
                arcade.hud().score.unwrap_or_default(),
                report.message
            );
            return;
        }
    }
    println!("{:<22} still running after 60s", route.title());
}
