//! Window API for the resize target.
//!
//! Provides functionality for:
//! - Resolving the foreground window and its maximized state
//! - Reading the window rectangle and the work area of its monitor
//! - Applying a new rectangle without touching z-order
//!
//! Nothing here caches window state; every call goes to the OS.
//!
//! Platform implementations:
//! - Windows: Uses Win32 API (`windows.rs`)
//! - Others: no foreground window, every query unsupported

use wheelsize_core::{Rect, WindowError};

#[cfg(windows)]
mod windows;

/// Opaque handle of a top-level window (`HWND` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub usize);

/// Get the currently focused foreground window.
pub fn foreground_window() -> Option<WindowHandle> {
    #[cfg(windows)]
    {
        windows::foreground_window()
    }
    #[cfg(not(windows))]
    {
        None
    }
}

/// Whether the window is in the native maximized state.
pub fn is_maximized(window: WindowHandle) -> bool {
    #[cfg(windows)]
    {
        windows::is_maximized(window)
    }
    #[cfg(not(windows))]
    {
        let _ = window;
        false
    }
}

/// Get the rectangle of a window in screen coordinates.
pub fn window_rect(window: WindowHandle) -> Result<Rect, WindowError> {
    #[cfg(windows)]
    {
        windows::window_rect(window)
    }
    #[cfg(not(windows))]
    {
        let _ = window;
        Err(WindowError::Unsupported)
    }
}

/// Get the work area of the monitor nearest to the window.
pub fn work_area(window: WindowHandle) -> Result<Rect, WindowError> {
    #[cfg(windows)]
    {
        windows::work_area(window)
    }
    #[cfg(not(windows))]
    {
        let _ = window;
        Err(WindowError::Unsupported)
    }
}

/// Move and size a window, keeping its z-order and activation.
pub fn set_window_rect(window: WindowHandle, rect: Rect) -> Result<(), WindowError> {
    #[cfg(windows)]
    {
        windows::set_window_rect(window, rect)
    }
    #[cfg(not(windows))]
    {
        let _ = (window, rect);
        Err(WindowError::Unsupported)
    }
}
