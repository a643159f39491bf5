//! Global mouse hook lifecycle.
//!
//! The hook lives on its own thread, which owns the event handler for the
//! whole lifetime of the hook and pumps the message loop the OS needs to
//! deliver low-level mouse events. Every event is answered synchronously with
//! a [`HookDecision`](wheelsize_core::HookDecision).
//!
//! Platform implementations:
//! - Windows: `WH_MOUSE_LL` via SetWindowsHookEx (`windows_native.rs`)
//! - Others: not supported, [`start_wheel_hook`] fails

use crate::error::{PlatformError, PlatformResult};
use std::thread::JoinHandle;
use tracing::{error, info};
use wheelsize_core::PointerHandler;

#[cfg(target_os = "windows")]
mod windows_native;

/// Handle to the running hook thread.
///
/// Stopping removes the hook. `stop` is idempotent and also runs on drop, so
/// the hook never outlives the handle.
pub struct WheelHookHandle {
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    thread_id: u32,
    thread: Option<JoinHandle<()>>,
}

impl WheelHookHandle {
    /// Remove the hook and wait for the hook thread to exit.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        info!("Stopping mouse hook");
        #[cfg(target_os = "windows")]
        windows_native::request_quit(self.thread_id);

        if thread.join().is_err() {
            error!("Mouse hook thread panicked");
        }
    }
}

impl Drop for WheelHookHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Install the global mouse hook and route events to `handler`.
///
/// Blocks until the hook thread reports whether installation succeeded, so an
/// `Ok` means events are already flowing.
pub fn start_wheel_hook<H>(handler: H) -> PlatformResult<WheelHookHandle>
where
    H: PointerHandler + Send + 'static,
{
    #[cfg(target_os = "windows")]
    {
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
        let thread = std::thread::Builder::new()
            .name("wheelsize-hook".into())
            .spawn(move || windows_native::run_hook(Box::new(handler), ready_tx))
            .map_err(|e| PlatformError::HookThread(e.to_string()))?;

        let reported = ready_rx.recv();
        match reported {
            Ok(Ok(thread_id)) => Ok(WheelHookHandle {
                thread_id,
                thread: Some(thread),
            }),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(PlatformError::HookThread(
                    "hook thread exited before reporting".into(),
                ))
            }
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = handler;
        Err(PlatformError::Unsupported)
    }
}

#[cfg(all(test, not(target_os = "windows")))]
mod tests {
    use super::*;
    use wheelsize_core::{HookDecision, PointerEvent};

    struct PassThrough;

    impl PointerHandler for PassThrough {
        fn handle_pointer(&mut self, _event: PointerEvent) -> HookDecision {
            HookDecision::Forwarded
        }
    }

    #[test]
    fn test_hook_unsupported_off_windows() {
        assert!(matches!(
            start_wheel_hook(PassThrough),
            Err(PlatformError::Unsupported)
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut handle = WheelHookHandle {
            thread_id: 0,
            thread: Some(std::thread::spawn(|| {})),
        };
        handle.stop();
        assert!(handle.thread.is_none());
        handle.stop();
    }
}
