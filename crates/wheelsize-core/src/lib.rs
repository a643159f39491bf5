//! wheelsize-core: resize decisions for wheel-driven window sizing.
//!
//! Design goal: keep this crate platform-agnostic so the decision logic can be
//! tested anywhere. Platform specific I/O (hook, key state, window geometry)
//! lives in `wheelsize-platform`.

mod accumulator;
mod config;
mod engine;
mod error;
mod geometry;
mod keys;

pub use accumulator::{AccumulatorState, WheelAccumulator, WHEEL_DELTA};
pub use config::{
    config_dir, default_config_path, load_config, load_or_create, log_dir, save_config,
    LoadedConfig, ResizeConfig, CONFIG_PATH_ENV,
};
pub use engine::{
    scaled_increment, HookDecision, PointerEvent, PointerHandler, ResizeEngine, WindowPlatform,
};
pub use error::{ConfigError, ConfigResult, WindowError};
pub use geometry::{resize_axis, resize_rect, Axis, Rect, Span, MIN_EXTENT};
pub use keys::KeyCode;
