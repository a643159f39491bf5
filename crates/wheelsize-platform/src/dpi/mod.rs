//! DPI scaling utilities for high-resolution display support.
//!
//! The resize increment is configured in 96-DPI pixels and scaled by the
//! factor of the display showing the target window, so a wheel tick feels the
//! same on every screen.
//!
//! Platform implementations:
//! - Windows: Per-Monitor V2 awareness and per-window DPI (`windows.rs`)
//! - Others: fixed scale of 1.0

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::{set_dpi_aware, window_scale_factor};

/// DPI that corresponds to a scale factor of 1.0.
pub const BASE_DPI: u32 = 96;

#[cfg(not(windows))]
mod fallback {
    use crate::window::WindowHandle;

    /// Set DPI awareness (no-op on unsupported platforms).
    pub fn set_dpi_aware() {}

    /// Scale factor for a window's display.
    pub fn window_scale_factor(window: WindowHandle) -> f64 {
        let _ = window;
        1.0
    }
}

#[cfg(not(windows))]
pub use fallback::{set_dpi_aware, window_scale_factor};

/// Convert a raw DPI value into a scale factor, treating 0 as unknown.
pub(crate) fn scale_from_dpi(dpi: u32) -> Option<f64> {
    (dpi != 0).then(|| f64::from(dpi) / f64::from(BASE_DPI))
}
