//! The engine's [`WindowPlatform`] backed by the real OS.

use crate::{dpi, keyboard, window};
use crate::window::WindowHandle;
use wheelsize_core::{KeyCode, Rect, WindowError, WindowPlatform};

/// Live OS queries for the resize engine. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl WindowPlatform for NativePlatform {
    type Window = WindowHandle;

    fn is_key_down(&self, key: KeyCode) -> bool {
        keyboard::is_key_down(key)
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        window::foreground_window()
    }

    fn is_maximized(&self, window: WindowHandle) -> bool {
        window::is_maximized(window)
    }

    fn window_rect(&self, window: WindowHandle) -> Result<Rect, WindowError> {
        window::window_rect(window)
    }

    fn work_area(&self, window: WindowHandle) -> Result<Rect, WindowError> {
        window::work_area(window)
    }

    fn dpi_scale(&self, window: WindowHandle) -> f64 {
        dpi::window_scale_factor(window)
    }

    fn set_window_rect(&self, window: WindowHandle, rect: Rect) -> Result<(), WindowError> {
        window::set_window_rect(window, rect)
    }
}
