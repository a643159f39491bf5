//! Windows implementation of the window API using Win32.

use super::WindowHandle;
use tracing::debug;
use wheelsize_core::{Rect, WindowError};
use windows_sys::Win32::Foundation::{GetLastError, HWND, RECT};
use windows_sys::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowRect as WinGetWindowRect, IsZoomed, SetWindowPos,
    SystemParametersInfoW, SPI_GETWORKAREA, SWP_NOACTIVATE, SWP_NOZORDER,
};

pub fn foreground_window() -> Option<WindowHandle> {
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_null() {
        return None;
    }
    Some(WindowHandle(hwnd as usize))
}

pub fn is_maximized(window: WindowHandle) -> bool {
    unsafe { IsZoomed(window.0 as HWND) != 0 }
}

pub fn window_rect(window: WindowHandle) -> Result<Rect, WindowError> {
    let mut rect: RECT = unsafe { std::mem::zeroed() };
    if unsafe { WinGetWindowRect(window.0 as HWND, &mut rect) } == 0 {
        return Err(last_error("GetWindowRect"));
    }
    Ok(from_win_rect(rect))
}

pub fn work_area(window: WindowHandle) -> Result<Rect, WindowError> {
    unsafe {
        let monitor = MonitorFromWindow(window.0 as HWND, MONITOR_DEFAULTTONEAREST);
        if !monitor.is_null() {
            let mut info: MONITORINFO = std::mem::zeroed();
            info.cbSize = std::mem::size_of::<MONITORINFO>() as u32;
            if GetMonitorInfoW(monitor, &mut info) != 0 {
                return Ok(from_win_rect(info.rcWork));
            }
        }

        debug!(?window, "Monitor work area unavailable, using primary work area");
        let mut rect: RECT = std::mem::zeroed();
        if SystemParametersInfoW(SPI_GETWORKAREA, 0, &mut rect as *mut RECT as *mut _, 0) == 0 {
            return Err(last_error("SystemParametersInfoW"));
        }
        Ok(from_win_rect(rect))
    }
}

pub fn set_window_rect(window: WindowHandle, rect: Rect) -> Result<(), WindowError> {
    let ok = unsafe {
        SetWindowPos(
            window.0 as HWND,
            std::ptr::null_mut(),
            rect.left,
            rect.top,
            rect.width(),
            rect.height(),
            SWP_NOZORDER | SWP_NOACTIVATE,
        )
    };
    if ok == 0 {
        return Err(last_error("SetWindowPos"));
    }
    Ok(())
}

fn from_win_rect(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

fn last_error(call: &'static str) -> WindowError {
    let code = unsafe { GetLastError() };
    WindowError::Os { call, code }
}
