#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod logging;
mod tray;

use anyhow::Context;
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::{error, info};
use wheelsize_core::{default_config_path, load_or_create, ResizeEngine};
use wheelsize_platform::{set_dpi_aware, start_wheel_hook, NativePlatform};

fn main() -> ExitCode {
    let _log_guards = logging::init(!cfg!(debug_assertions));

    match run() {
        Ok(()) => {
            info!("wheelsize exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal: {e:#}");
            tray::show_fatal_error(&format!("wheelsize could not start:\n\n{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    // Before any window or DPI query, so per-window DPI is reported.
    set_dpi_aware();

    let config_path = default_config_path();
    let loaded = load_or_create(&config_path);
    if let Some(e) = &loaded.recovered {
        tray::show_warning(&format!(
            "Failed to load {}:\n{e}\n\nThe file was renamed to .bak and the default settings are used.",
            config_path.display()
        ));
    }
    let config = loaded.config;
    let tip = tray::tooltip(&config);

    let engine = ResizeEngine::new(config, NativePlatform::new());
    let hook = start_wheel_hook(engine).context("failed to install the mouse hook")?;
    let hook = Rc::new(RefCell::new(hook));

    let on_session_end = {
        let hook = Rc::clone(&hook);
        tray::SessionEndAction::new(move || hook.borrow_mut().stop())
    };
    let tray = match tray::Tray::create(&tip, on_session_end) {
        Ok(tray) => tray,
        Err(e) => {
            hook.borrow_mut().stop();
            return Err(e.context("failed to create the tray icon"));
        }
    };
    info!("wheelsize running");

    tray.run();

    // The hook goes first so no event is handled while shutting down.
    hook.borrow_mut().stop();
    drop(tray);
    Ok(())
}
