//! Windows native implementation of the wheel hook.
//!
//! Uses WH_MOUSE_LL. The callback runs on the installing thread, so that
//! thread keeps the handler in thread-local storage and pumps messages until
//! it receives WM_QUIT.

use crate::error::{PlatformError, PlatformResult};
use crossbeam_channel::Sender;
use std::cell::RefCell;
use tracing::{debug, info, warn};
use wheelsize_core::{HookDecision, PointerEvent, PointerHandler};
use windows_sys::Win32::Foundation::{GetLastError, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::System::Threading::GetCurrentThreadId;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, HC_ACTION, MSG, MSLLHOOKSTRUCT,
    PM_NOREMOVE, WH_MOUSE_LL, WM_MOUSEWHEEL, WM_QUIT, WM_USER,
};

// Handler owned by the hook thread; only the hook callback touches it.
thread_local! {
    static HANDLER: RefCell<Option<Box<dyn PointerHandler>>> = const { RefCell::new(None) };
}

/// Install the hook on the current thread and pump messages until WM_QUIT.
///
/// Sends the thread id on success (needed to post WM_QUIT later) or the
/// install error, then returns only after the hook has been removed.
pub fn run_hook(handler: Box<dyn PointerHandler>, ready_tx: Sender<PlatformResult<u32>>) {
    let thread_id = unsafe { GetCurrentThreadId() };
    HANDLER.with(|slot| *slot.borrow_mut() = Some(handler));

    // Create the thread's message queue before anyone can post WM_QUIT to it.
    let mut msg: MSG = unsafe { std::mem::zeroed() };
    unsafe { PeekMessageW(&mut msg, std::ptr::null_mut(), WM_USER, WM_USER, PM_NOREMOVE) };

    let hook = unsafe {
        SetWindowsHookExW(
            WH_MOUSE_LL,
            Some(mouse_hook_proc),
            GetModuleHandleW(std::ptr::null()),
            0,
        )
    };
    if hook.is_null() {
        let code = unsafe { GetLastError() };
        HANDLER.with(|slot| slot.borrow_mut().take());
        let _ = ready_tx.send(Err(PlatformError::HookInstall(code)));
        return;
    }
    info!(thread_id, "Mouse hook installed");
    let _ = ready_tx.send(Ok(thread_id));

    loop {
        let ret = unsafe { GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) };
        if ret <= 0 {
            // WM_QUIT or error
            break;
        }
        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    if unsafe { UnhookWindowsHookEx(hook) } == 0 {
        let code = unsafe { GetLastError() };
        warn!(code, "UnhookWindowsHookEx failed");
    } else {
        info!("Mouse hook removed");
    }
    HANDLER.with(|slot| slot.borrow_mut().take());
}

/// Ask the hook thread to leave its message loop.
pub fn request_quit(thread_id: u32) {
    if unsafe { PostThreadMessageW(thread_id, WM_QUIT, 0, 0) } == 0 {
        let code = unsafe { GetLastError() };
        warn!(thread_id, code, "Failed to post WM_QUIT to hook thread");
    }
}

/// Low-level mouse hook procedure.
unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        let event = match wparam as u32 {
            WM_MOUSEWHEEL => {
                let ms = &*(lparam as *const MSLLHOOKSTRUCT);
                // Wheel delta is the signed high word of mouseData.
                let delta = i32::from((ms.mouseData >> 16) as u16 as i16);
                PointerEvent::Wheel { delta }
            }
            _ => PointerEvent::Other,
        };

        if dispatch(event) == HookDecision::Consumed {
            return 1;
        }
    }

    CallNextHookEx(std::ptr::null_mut(), code, wparam, lparam)
}

fn dispatch(event: PointerEvent) -> HookDecision {
    HANDLER.with(|slot| {
        // A re-entrant call (a nested message loop inside the handler) forwards.
        let Ok(mut handler) = slot.try_borrow_mut() else {
            debug!("Mouse hook re-entered, forwarding");
            return HookDecision::Forwarded;
        };
        match handler.as_mut() {
            Some(handler) => handler.handle_pointer(event),
            None => HookDecision::Forwarded,
        }
    })
}
