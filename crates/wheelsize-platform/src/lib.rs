//! wheelsize-platform: platform-specific I/O boundary for wheelsize.
//!
//! This crate provides:
//! - The global low-level mouse hook that feeds wheel events to the engine
//! - Modifier key state queries
//! - Foreground window, window rectangle, work area and geometry commands
//! - DPI awareness and per-window scale factors
//!
//! ## Module Structure
//!
//! Each functional area is organized as a submodule with platform-specific implementations:
//!
//! - `error` - Common error types
//! - `input_hook` - Hook lifecycle (install, message loop, uninstall)
//! - `keyboard` - Key state
//! - `window` - Window queries and the geometry command
//! - `dpi` - DPI scaling utilities
//! - `native` - `WindowPlatform` implementation over the above

mod dpi;
mod error;
mod input_hook;
mod keyboard;
mod native;
mod window;

// Re-export error types
pub use error::{PlatformError, PlatformResult};

// Re-export DPI utilities
pub use dpi::{set_dpi_aware, window_scale_factor, BASE_DPI};

// Re-export input hook
pub use input_hook::{start_wheel_hook, WheelHookHandle};

// Re-export key state
pub use keyboard::is_key_down;

// Re-export window API
pub use window::{
    foreground_window, is_maximized, set_window_rect, window_rect, work_area, WindowHandle,
};

pub use native::NativePlatform;
