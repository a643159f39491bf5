//! Modifier key state.
//!
//! Reads the physical key state asynchronously, so the answer does not depend
//! on which thread or window has keyboard focus. Cheap enough to call from the
//! mouse hook on every wheel event.

use wheelsize_core::KeyCode;

/// Whether `key` is held down right now.
#[cfg(windows)]
pub fn is_key_down(key: KeyCode) -> bool {
    use windows_sys::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

    // High bit set means the key is down.
    let state = unsafe { GetAsyncKeyState(i32::from(key.code())) };
    (state as u16 & 0x8000) != 0
}

/// Whether `key` is held down right now (always false on unsupported platforms).
#[cfg(not(windows))]
pub fn is_key_down(key: KeyCode) -> bool {
    let _ = key;
    false
}
