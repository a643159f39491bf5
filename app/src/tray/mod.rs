//! System tray surface.
//!
//! The tray is the only UI: an icon whose context menu has a single "Exit"
//! item. [`Tray::run`] returns once the user exits (or the window is asked to
//! close), and `main` then removes the mouse hook before anything else.
//!
//! Logoff and shutdown never return from the message loop: the process is
//! terminated right after `WM_ENDSESSION`. The [`SessionEndAction`] given to
//! [`Tray::create`] runs from that message instead.
//!
//! Platform implementations:
//! - Windows: Shell_NotifyIcon on a hidden owner window (`windows.rs`)
//! - Others: unavailable

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use self::windows::{show_fatal_error, show_warning, Tray};

#[cfg(not(windows))]
mod fallback {
    /// Placeholder tray; creation always fails off Windows.
    pub struct Tray;

    impl Tray {
        pub fn create(
            tip: &str,
            on_session_end: super::SessionEndAction,
        ) -> anyhow::Result<Self> {
            let _ = (tip, on_session_end);
            anyhow::bail!("the tray icon is only available on Windows")
        }

        pub fn run(&self) {}
    }

    /// No native dialog off Windows; the error is already logged.
    pub fn show_fatal_error(message: &str) {
        let _ = message;
    }

    pub fn show_warning(message: &str) {
        let _ = message;
    }
}

#[cfg(not(windows))]
pub use fallback::{show_fatal_error, show_warning, Tray};

/// Cleanup to run, at most once, when the user session ends.
pub struct SessionEndAction(Option<Box<dyn FnOnce()>>);

impl SessionEndAction {
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(action)))
    }

    /// Handle `WM_ENDSESSION`. `ending` is false when the end was cancelled.
    ///
    /// Returns whether the action ran.
    pub fn on_end_session(&mut self, ending: bool) -> bool {
        if !ending {
            return false;
        }
        match self.0.take() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

/// Tooltip text, e.g. "wheelsize: Ctrl+wheel width, Alt+wheel height".
pub fn tooltip(config: &wheelsize_core::ResizeConfig) -> String {
    format!(
        "wheelsize: {}+wheel width, {}+wheel height",
        config.width_key, config.height_key
    )
}
