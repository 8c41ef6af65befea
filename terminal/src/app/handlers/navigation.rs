//! # Navigation Handlers
//!
//! Screen changes with the authentication guard.

use crate::app::state::{AppState, Screen};
use parking_lot::RwLock;
use std::sync::Arc;

/// Resolve which screen to show for a navigation request.
///
/// Auth-gated screens redirect to Login when signed out; Login and Register
/// redirect to the Dashboard when signed in.
pub fn resolve_screen(requested: Screen, authenticated: bool) -> Screen {
    if requested.requires_auth() && !authenticated {
        Screen::Login
    } else if authenticated && matches!(requested, Screen::Login | Screen::Register) {
        Screen::Dashboard
    } else {
        requested
    }
}

/// Handle screen change with authentication guard
///
/// Returns the screen actually entered.
///
/// Internal handler function - use [`crate::app::App::handle_screen_change`] instead.
pub(crate) fn handle_screen_change(state: Arc<RwLock<AppState>>, screen: Screen) -> Screen {
    let mut state = state.write();
    let target = resolve_screen(screen, state.is_authenticated());
    if target != screen {
        tracing::info!(
            requested = screen.title(),
            redirected = target.title(),
            "Navigation redirected"
        );
    }
    state.screen = target;
    target
}

/// Navigate to next screen in navigation bar order
///
/// Internal handler function - use [`crate::app::App::next_screen`] instead.
pub(crate) fn next_screen(current: Screen) -> Screen {
    let screens = Screen::all();
    let idx = screens.iter().position(|&s| s == current);
    match idx {
        Some(i) => screens[(i + 1) % screens.len()],
        None => screens[0],
    }
}

/// Navigate to previous screen in navigation bar order
///
/// Internal handler function - use [`crate::app::App::previous_screen`] instead.
pub(crate) fn previous_screen(current: Screen) -> Screen {
    let screens = Screen::all();
    let idx = screens.iter().position(|&s| s == current);
    match idx {
        Some(0) | None => screens[screens.len() - 1],
        Some(i) => screens[i - 1],
    }
}

/// Open a docs article, or return to the list with `None`.
pub(crate) fn handle_select_doc(state: Arc<RwLock<AppState>>, slug: Option<String>) {
    let mut state = state.write();
    if let Some(slug) = &slug {
        if crate::services::docs::find_doc_by_slug(slug).is_none() {
            tracing::warn!(slug = %slug, "Unknown docs article");
            state.docs.selected_slug = None;
            return;
        }
    }
    state.docs.selected_slug = slug;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_redirects() {
        assert_eq!(resolve_screen(Screen::Wallet, false), Screen::Login);
        assert_eq!(resolve_screen(Screen::Docs, false), Screen::Docs);
        assert_eq!(resolve_screen(Screen::Register, false), Screen::Register);
        assert_eq!(resolve_screen(Screen::Login, true), Screen::Dashboard);
        assert_eq!(resolve_screen(Screen::Profile, true), Screen::Profile);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(next_screen(Screen::Docs), Screen::Dashboard);
        assert_eq!(previous_screen(Screen::Dashboard), Screen::Docs);
        assert_eq!(next_screen(Screen::Login), Screen::Dashboard);
    }

    #[test]
    fn unknown_doc_is_rejected() {
        let state = Arc::new(RwLock::new(AppState::default()));
        handle_select_doc(state.clone(), Some("no-such-article".to_string()));
        assert_eq!(state.read().docs.selected_slug, None);

        handle_select_doc(state.clone(), Some("crypto-trading-basics".to_string()));
        assert_eq!(state.read().docs.selected_slug.as_deref(), Some("crypto-trading-basics"));
    }
}
