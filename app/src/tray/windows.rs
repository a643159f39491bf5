//! Windows tray icon using Shell_NotifyIconW.

use super::SessionEndAction;
use anyhow::{bail, Context, Result};
use std::cell::RefCell;
use tracing::{debug, info, warn};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyMenu, DestroyWindow,
    DispatchMessageW, GetCursorPos, GetMessageW, LoadIconW, MessageBoxW, PostQuitMessage,
    RegisterClassW, SetForegroundWindow, TrackPopupMenu, TranslateMessage, CW_USEDEFAULT,
    IDI_APPLICATION, MB_ICONERROR, MB_ICONWARNING, MB_OK, MF_STRING, MSG, TPM_BOTTOMALIGN,
    TPM_LEFTALIGN, TPM_RIGHTBUTTON, WINDOW_EX_STYLE, WM_APP, WM_CLOSE, WM_COMMAND,
    WM_CONTEXTMENU, WM_ENDSESSION, WM_RBUTTONUP, WNDCLASSW, WS_OVERLAPPEDWINDOW,
};

const WM_TRAYICON: u32 = WM_APP + 1;
const TRAY_UID: u32 = 1;
const IDM_TRAY_EXIT: usize = 1;
const CLASS_NAME: PCWSTR = w!("WheelsizeTrayWindow");

// Owned by the thread that created the tray; only `tray_wnd_proc` runs it.
thread_local! {
    static SESSION_END: RefCell<Option<SessionEndAction>> = const { RefCell::new(None) };
}

/// Tray icon plus the hidden window that receives its messages.
///
/// Dropping removes the icon and destroys the window.
pub struct Tray {
    hwnd: HWND,
}

impl Tray {
    pub fn create(tip: &str, on_session_end: SessionEndAction) -> Result<Self> {
        let hwnd = unsafe {
            let instance = GetModuleHandleW(None).context("GetModuleHandleW failed")?;

            let wc = WNDCLASSW {
                lpfnWndProc: Some(tray_wnd_proc),
                hInstance: instance.into(),
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                bail!("RegisterClassW failed");
            }

            // Never shown; it only owns the icon and the popup menu.
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                CLASS_NAME,
                w!("wheelsize"),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                None,
                None,
                Some(instance.into()),
                None,
            )
            .context("CreateWindowExW failed")?
        };

        let tray = Self { hwnd };
        tray.add_icon(tip)?;
        SESSION_END.with(|slot| *slot.borrow_mut() = Some(on_session_end));
        info!("Tray icon added");
        Ok(tray)
    }

    /// Pump messages until the user picks "Exit".
    pub fn run(&self) {
        let mut msg = MSG::default();
        loop {
            let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            if ret.0 <= 0 {
                // WM_QUIT or error
                break;
            }
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        debug!("Tray message loop finished");
    }

    fn notify_data(&self) -> NOTIFYICONDATAW {
        let mut nid: NOTIFYICONDATAW = unsafe { std::mem::zeroed() };
        nid.cbSize = std::mem::size_of::<NOTIFYICONDATAW>() as u32;
        nid.hWnd = self.hwnd;
        nid.uID = TRAY_UID;
        nid
    }

    fn add_icon(&self, tip: &str) -> Result<()> {
        let mut nid = self.notify_data();
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = WM_TRAYICON;
        nid.hIcon = unsafe { LoadIconW(None, IDI_APPLICATION) }.context("LoadIconW failed")?;

        // Leave room for the terminating NUL.
        let max = nid.szTip.len() - 1;
        for (slot, c) in nid.szTip.iter_mut().zip(tip.encode_utf16().take(max)) {
            *slot = c;
        }

        if !unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
            bail!("Shell_NotifyIconW(NIM_ADD) failed");
        }
        Ok(())
    }
}

impl Drop for Tray {
    fn drop(&mut self) {
        SESSION_END.with(|slot| slot.borrow_mut().take());
        let nid = self.notify_data();
        unsafe {
            if !Shell_NotifyIconW(NIM_DELETE, &nid).as_bool() {
                debug!("Tray icon was already gone");
            }
            if let Err(e) = DestroyWindow(self.hwnd) {
                warn!(error = %e, "DestroyWindow failed for tray window");
            }
        }
        info!("Tray icon removed");
    }
}

/// Show a blocking error dialog (used for fatal startup errors).
pub fn show_fatal_error(message: &str) {
    let text: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        MessageBoxW(None, PCWSTR(text.as_ptr()), w!("wheelsize"), MB_OK | MB_ICONERROR);
    }
}

/// Show a non-fatal warning dialog.
pub fn show_warning(message: &str) {
    let text: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        MessageBoxW(None, PCWSTR(text.as_ptr()), w!("wheelsize"), MB_OK | MB_ICONWARNING);
    }
}

unsafe extern "system" fn tray_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_TRAYICON => {
            let event = (lparam.0 as u32) & 0xFFFF;
            if event == WM_RBUTTONUP || event == WM_CONTEXTMENU {
                show_tray_menu(hwnd);
            }
            LRESULT(0)
        }
        WM_COMMAND => {
            if wparam.0 & 0xFFFF == IDM_TRAY_EXIT {
                info!("Exit requested from tray");
                PostQuitMessage(0);
            }
            LRESULT(0)
        }
        WM_ENDSESSION => {
            let ending = wparam.0 != 0;
            let ran = SESSION_END.with(|slot| {
                slot.try_borrow_mut()
                    .ok()
                    .and_then(|mut action| action.as_mut().map(|a| a.on_end_session(ending)))
                    .unwrap_or(false)
            });
            if ran {
                info!("Session ending, cleanup done");
            }
            LRESULT(0)
        }
        WM_CLOSE => {
            info!("Tray window asked to close");
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Show the context menu for the tray icon at the current cursor location.
unsafe fn show_tray_menu(hwnd: HWND) {
    let menu = match CreatePopupMenu() {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "CreatePopupMenu failed");
            return;
        }
    };

    if AppendMenuW(menu, MF_STRING, IDM_TRAY_EXIT, w!("Exit")).is_ok() {
        let mut pt = POINT::default();
        if GetCursorPos(&mut pt).is_ok() {
            // The menu only dismisses on outside clicks if our window is foreground.
            let _ = SetForegroundWindow(hwnd);
            let _ = TrackPopupMenu(
                menu,
                TPM_LEFTALIGN | TPM_BOTTOMALIGN | TPM_RIGHTBUTTON,
                pt.x,
                pt.y,
                Some(0),
                hwnd,
                None::<*const RECT>,
            );
        }
    }

    let _ = DestroyMenu(menu);
}
