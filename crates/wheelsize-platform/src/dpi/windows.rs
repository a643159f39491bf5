//! Windows DPI awareness and per-window scale.

use super::scale_from_dpi;
use crate::window::WindowHandle;
use std::sync::Once;
use tracing::{info, trace, warn};
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::Graphics::Gdi::{GetDC, GetDeviceCaps, ReleaseDC, HDC, LOGPIXELSX};
use windows_sys::Win32::UI::HiDpi::{
    GetDpiForWindow, SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};

static INIT: Once = Once::new();

/// Set the process DPI awareness to Per-Monitor V2.
/// This ensures window rectangles are reported in physical (unscaled) pixels.
///
/// Must be called early in the application lifecycle, before any window is created.
pub fn set_dpi_aware() {
    INIT.call_once(|| {
        let result =
            unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) };
        if result != 0 {
            info!("Set Per-Monitor V2 DPI awareness");
        } else {
            warn!("Failed to set Per-Monitor V2 DPI awareness, coordinates may be scaled");
        }
    });
}

/// Scale factor (DPI / 96) of the display showing `window`.
///
/// Falls back to the horizontal DPI of the window's device context, and to 1.0
/// if the window has gone away.
pub fn window_scale_factor(window: WindowHandle) -> f64 {
    let hwnd = window.0 as HWND;

    let dpi = unsafe { GetDpiForWindow(hwnd) };
    if let Some(scale) = scale_from_dpi(dpi) {
        return scale;
    }

    let Some(dc) = WindowDc::acquire(hwnd) else {
        trace!(?window, "No device context, assuming 96 DPI");
        return 1.0;
    };
    let dpi = unsafe { GetDeviceCaps(dc.hdc, LOGPIXELSX as _) };
    scale_from_dpi(u32::try_from(dpi).unwrap_or(0)).unwrap_or(1.0)
}

/// A window device context, released on drop.
struct WindowDc {
    hwnd: HWND,
    hdc: HDC,
}

impl WindowDc {
    fn acquire(hwnd: HWND) -> Option<Self> {
        let hdc = unsafe { GetDC(hwnd) };
        if hdc.is_null() {
            return None;
        }
        Some(Self { hwnd, hdc })
    }
}

impl Drop for WindowDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(self.hwnd, self.hdc);
        }
    }
}
