//! Hash-based navigation between the menu and the games

use serde::{Deserialize, Serialize};

/// A navigable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Menu,
    Runner,
    Catcher,
    Inbox,
}

impl Route {
    /// Games listed on the menu, in display order
    pub const GAMES: [Route; 3] = [Route::Runner, Route::Catcher, Route::Inbox];

    /// Address token (`#token`)
    pub fn token(&self) -> &'static str {
        match self {
            Route::Menu => "menu",
            Route::Runner => "runner",
            Route::Catcher => "catcher",
            Route::Inbox => "inbox",
        }
    }

    /// Parse an address token; unknown tokens fall back to the menu
    pub fn from_token(token: &str) -> Self {
        let token = token.trim().trim_start_matches('#');
        match token.to_ascii_lowercase().as_str() {
            "runner" => Route::Runner,
            "catcher" => Route::Catcher,
            "inbox" => Route::Inbox,
            _ => Route::Menu,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Menu => "Menu",
            Route::Runner => "Responsibility Runner",
            Route::Catcher => "Cake Catcher",
            Route::Inbox => "Inbox Invasion",
        }
    }

    /// Storage key of the route's best score
    pub fn high_score_key(&self) -> Option<&'static str> {
        match self {
            Route::Menu => None,
            Route::Runner => Some("highScore_runner"),
            Route::Catcher => Some("highScore_catcher"),
            Route::Inbox => Some("highScore_inbox"),
        }
    }
}

/// Tracks the active route and filters out no-op transitions
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Option<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.current
    }

    /// Resolve `token` and switch to it. Returns the new route, or `None` when
    /// it is already active.
    pub fn navigate(&mut self, token: &str) -> Option<Route> {
        self.switch(Route::from_token(token))
    }

    pub fn switch(&mut self, route: Route) -> Option<Route> {
        if self.current == Some(route) {
            return None;
        }
        log::info!(
            "Route {} -> {}",
            self.current.map(|r| r.token()).unwrap_or("(none)"),
            route.token()
        );
        self.current = Some(route);
        Some(route)
    }
}
