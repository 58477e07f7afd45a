//! Navigation
//!
//! Screens, the history stack, and the [`Navigator`] handle that lets
//! non-UI code request navigation. The navigator sends paths over a
//! channel the root component drains, so a response hook running on a
//! background task can redirect without touching UI state.

use std::fmt;
use tokio::sync::mpsc;

/// Path the client navigates to when the server rejects its credentials
pub const LOGIN_PATH: &str = "/login";

/// Screens the application can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Configurations,
    /// Editor for a single configuration
    Configuration(i64),
    /// Report of one run, `(configuration id, run id)`
    Run(i64, i64),
    Settings,
}

impl Screen {
    /// Path form of this screen, usable with [`Navigator::replace`]
    pub fn path(&self) -> String {
        match self {
            Screen::Login => LOGIN_PATH.to_string(),
            Screen::Configurations => "/configurations".to_string(),
            Screen::Configuration(id) => format!("/configurations/{}", id),
            Screen::Run(id, run_id) => format!("/configurations/{}/runs/{}", id, run_id),
            Screen::Settings => "/settings".to_string(),
        }
    }

    /// Parse a path back into a screen
    pub fn from_path(path: &str) -> Option<Screen> {
        match path {
            LOGIN_PATH => return Some(Screen::Login),
            "/configurations" => return Some(Screen::Configurations),
            "/settings" => return Some(Screen::Settings),
            _ => {}
        }

        let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match parts.as_slice() {
            ["configurations", id] => id.parse().ok().map(Screen::Configuration),
            ["configurations", id, "runs", run_id] => {
                let id = id.parse().ok()?;
                let run_id = run_id.parse().ok()?;
                Some(Screen::Run(id, run_id))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Browser-style history of visited screens
///
/// There is always a current screen. `replace` swaps it out without
/// growing the stack, so the replaced screen is unreachable via `back`.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<Screen>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: vec![Screen::Configurations],
        }
    }

    pub fn current(&self) -> &Screen {
        self.entries.last().unwrap_or(&Screen::Configurations)
    }

    /// Navigate forward, keeping the current screen reachable via `back`
    pub fn push(&mut self, screen: Screen) {
        self.entries.push(screen);
    }

    /// Swap the current screen out of history
    pub fn replace(&mut self, screen: Screen) {
        match self.entries.last_mut() {
            Some(last) => *last = screen,
            None => self.entries.push(screen),
        }
    }

    /// Return to the previous screen, if there is one
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for requesting navigation from outside the UI tree
///
/// Cloneable and sendable, so it can be captured by response hooks and
/// background tasks.
#[derive(Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<String>,
}

impl Navigator {
    /// Create a navigator and the receiver the root component drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Request that the current screen be replaced with the one at `path`
    pub fn replace(&self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!("Navigation replace requested: {}", path);

        if self.tx.send(path).is_err() {
            tracing::warn!("Navigation requested after the UI shut down");
        }
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_path_roundtrip() {
        let screens = [
            Screen::Login,
            Screen::Configurations,
            Screen::Configuration(12),
            Screen::Run(12, 7),
            Screen::Settings,
        ];

        for screen in screens {
            assert_eq!(Screen::from_path(&screen.path()), Some(screen));
        }
    }

    #[test]
    fn test_from_path_rejects_unknown() {
        assert_eq!(Screen::from_path("/nope"), None);
        assert_eq!(Screen::from_path("/configurations/abc"), None);
        assert_eq!(Screen::from_path("/configurations/1/runs/x"), None);
        assert_eq!(Screen::from_path(""), None);
    }

    #[test]
    fn test_history_starts_at_configurations() {
        let history = History::new();
        assert_eq!(*history.current(), Screen::Configurations);
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_push_and_back() {
        let mut history = History::new();
        history.push(Screen::Configuration(3));
        assert_eq!(*history.current(), Screen::Configuration(3));
        assert!(history.can_go_back());

        assert!(history.back());
        assert_eq!(*history.current(), Screen::Configurations);
        assert!(!history.back());
    }

    #[test]
    fn test_replace_drops_current_entry() {
        let mut history = History::new();
        history.push(Screen::Configuration(3));
        history.replace(Screen::Login);

        assert_eq!(*history.current(), Screen::Login);

        // Back skips the replaced screen entirely
        assert!(history.back());
        assert_eq!(*history.current(), Screen::Configurations);
    }

    #[test]
    fn test_replace_on_single_entry_keeps_depth() {
        let mut history = History::new();
        history.replace(Screen::Login);

        assert_eq!(*history.current(), Screen::Login);
        assert!(!history.can_go_back());
    }

    #[tokio::test]
    async fn test_navigator_delivers_paths() {
        let (navigator, mut rx) = Navigator::channel();

        navigator.replace(LOGIN_PATH);
        navigator.replace("/configurations/5");

        assert_eq!(rx.recv().await.as_deref(), Some(LOGIN_PATH));
        assert_eq!(rx.recv().await.as_deref(), Some("/configurations/5"));
    }

    #[test]
    fn test_navigator_survives_closed_receiver() {
        let (navigator, rx) = Navigator::channel();
        drop(rx);

        // Must not panic; the send failure is only logged
        navigator.replace(LOGIN_PATH);
    }
}
