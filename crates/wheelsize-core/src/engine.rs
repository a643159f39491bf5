//! Resize decision engine.
//!
//! Runs inside the global mouse hook callback, so every path must return
//! quickly and never block. OS access goes through [`WindowPlatform`], which
//! keeps the decision logic testable without a real event pipeline.

use crate::accumulator::{AccumulatorState, WheelAccumulator};
use crate::config::ResizeConfig;
use crate::error::WindowError;
use crate::geometry::{resize_rect, Axis, Rect};
use crate::keys::KeyCode;
use tracing::{debug, trace, warn};

/// A pointer notification delivered by the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Vertical wheel rotation, signed delta units (120 per notch).
    Wheel { delta: i32 },
    /// Any other mouse notification.
    Other,
}

/// What the hook should do with an event after the engine has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookDecision {
    /// Swallow the event; no other application sees it.
    Consumed,
    /// Pass the event on unchanged.
    Forwarded,
}

/// OS queries and commands the engine needs.
///
/// Every query is made fresh per event; implementations must not cache window
/// state.
pub trait WindowPlatform {
    /// Opaque handle to a top-level window.
    type Window: Copy + std::fmt::Debug;

    /// Instantaneous down state of `key`, independent of focus.
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// The current foreground window, if any.
    fn foreground_window(&self) -> Option<Self::Window>;

    fn is_maximized(&self, window: Self::Window) -> bool;

    fn window_rect(&self, window: Self::Window) -> Result<Rect, WindowError>;

    /// Usable area of the display showing `window`.
    fn work_area(&self, window: Self::Window) -> Result<Rect, WindowError>;

    /// Display DPI / 96 for `window`; 1.0 when it cannot be determined.
    fn dpi_scale(&self, window: Self::Window) -> f64;

    /// Move and size `window` without changing its z-order.
    fn set_window_rect(&self, window: Self::Window, rect: Rect) -> Result<(), WindowError>;
}

/// Anything that can decide the fate of a pointer event.
///
/// The hook thread owns one handler for its whole lifetime.
pub trait PointerHandler {
    fn handle_pointer(&mut self, event: PointerEvent) -> HookDecision;
}

/// Turns modifier-held wheel events into window resizes.
pub struct ResizeEngine<P: WindowPlatform> {
    config: ResizeConfig,
    platform: P,
    accumulator: WheelAccumulator,
}

impl<P: WindowPlatform> ResizeEngine<P> {
    pub fn new(config: ResizeConfig, platform: P) -> Self {
        Self {
            config,
            platform,
            accumulator: WheelAccumulator::new(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Wheel delta buffered towards the next tick.
    pub fn pending_delta(&self) -> i32 {
        self.accumulator.pending()
    }

    pub fn state(&self) -> AccumulatorState {
        self.accumulator.state()
    }

    /// Decide what to do with one pointer event, resizing the foreground
    /// window when a full wheel tick has accumulated.
    pub fn handle_event(&mut self, event: PointerEvent) -> HookDecision {
        let PointerEvent::Wheel { delta } = event else {
            return HookDecision::Forwarded;
        };
        let Some(axis) = self.selected_axis() else {
            return HookDecision::Forwarded;
        };
        let Some(window) = self.platform.foreground_window() else {
            trace!("No foreground window");
            return HookDecision::Forwarded;
        };
        if self.platform.is_maximized(window) {
            trace!(?window, "Foreground window is maximized");
            return HookDecision::Forwarded;
        }

        let Some(ticks) = self.accumulator.accumulate(delta) else {
            trace!(
                delta,
                pending = self.accumulator.pending(),
                state = ?self.accumulator.state(),
                "Partial wheel tick"
            );
            return HookDecision::Consumed;
        };

        match self.resize(window, axis, ticks) {
            Ok(Some(rect)) => debug!(?window, ?axis, ticks, ?rect, "Resized window"),
            Ok(None) => trace!(?window, ?axis, ticks, "Resize was a no-op"),
            Err(e) => warn!(?window, ?axis, error = %e, "Resize failed"),
        }
        HookDecision::Consumed
    }

    /// Width wins when both modifiers (or one shared key) are held.
    fn selected_axis(&self) -> Option<Axis> {
        if self.platform.is_key_down(self.config.width_key) {
            Some(Axis::Horizontal)
        } else if self.platform.is_key_down(self.config.height_key) {
            Some(Axis::Vertical)
        } else {
            None
        }
    }

    fn resize(
        &self,
        window: P::Window,
        axis: Axis,
        ticks: i32,
    ) -> Result<Option<Rect>, WindowError> {
        let scale = self.platform.dpi_scale(window);
        let increment = scaled_increment(ticks, self.config.increment_for(axis), scale);
        if increment == 0 {
            return Ok(None);
        }

        let current = self.platform.window_rect(window)?;
        let work_area = self.platform.work_area(window)?;
        let target = resize_rect(current, axis, increment, work_area);
        if target == current {
            return Ok(None);
        }

        self.platform.set_window_rect(window, target)?;
        Ok(Some(target))
    }
}

impl<P: WindowPlatform> PointerHandler for ResizeEngine<P> {
    fn handle_pointer(&mut self, event: PointerEvent) -> HookDecision {
        self.handle_event(event)
    }
}

/// `ticks * base * scale`, truncated toward zero.
///
/// A non-finite or non-positive scale is treated as 1.0.
pub fn scaled_increment(ticks: i32, base: i32, scale: f64) -> i32 {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    (f64::from(ticks) * f64::from(base) * scale).trunc() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);
    const START: Rect = Rect::new(100, 100, 500, 400);

    struct FakePlatform {
        keys_down: Vec<KeyCode>,
        foreground: Option<u32>,
        maximized: bool,
        rect: Cell<Rect>,
        scale: f64,
        fail_rect: bool,
        fail_work_area: bool,
        fail_command: bool,
        commands: RefCell<Vec<(u32, Rect)>>,
    }

    impl FakePlatform {
        fn holding(keys: &[KeyCode]) -> Self {
            Self {
                keys_down: keys.to_vec(),
                foreground: Some(7),
                maximized: false,
                rect: Cell::new(START),
                scale: 1.0,
                fail_rect: false,
                fail_work_area: false,
                fail_command: false,
                commands: RefCell::new(Vec::new()),
            }
        }
    }

    impl WindowPlatform for FakePlatform {
        type Window = u32;

        fn is_key_down(&self, key: KeyCode) -> bool {
            self.keys_down.contains(&key)
        }

        fn foreground_window(&self) -> Option<u32> {
            self.foreground
        }

        fn is_maximized(&self, _window: u32) -> bool {
            self.maximized
        }

        fn window_rect(&self, _window: u32) -> Result<Rect, WindowError> {
            if self.fail_rect {
                return Err(WindowError::Os {
                    call: "GetWindowRect",
                    code: 1400,
                });
            }
            Ok(self.rect.get())
        }

        fn work_area(&self, _window: u32) -> Result<Rect, WindowError> {
            if self.fail_work_area {
                return Err(WindowError::Os {
                    call: "GetMonitorInfoW",
                    code: 1461,
                });
            }
            Ok(SCREEN)
        }

        fn dpi_scale(&self, _window: u32) -> f64 {
            self.scale
        }

        fn set_window_rect(&self, window: u32, rect: Rect) -> Result<(), WindowError> {
            if self.fail_command {
                // Access denied, e.g. an elevated target window.
                return Err(WindowError::Os {
                    call: "SetWindowPos",
                    code: 5,
                });
            }
            self.rect.set(rect);
            self.commands.borrow_mut().push((window, rect));
            Ok(())
        }
    }

    fn engine(platform: FakePlatform) -> ResizeEngine<FakePlatform> {
        ResizeEngine::new(ResizeConfig::default(), platform)
    }

    fn wheel(delta: i32) -> PointerEvent {
        PointerEvent::Wheel { delta }
    }

    fn command_count(engine: &ResizeEngine<FakePlatform>) -> usize {
        engine.platform().commands.borrow().len()
    }

    #[test]
    fn test_non_wheel_events_pass_through() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::CONTROL]));
        assert_eq!(engine.handle_event(PointerEvent::Other), HookDecision::Forwarded);
        assert_eq!(command_count(&engine), 0);
    }

    #[test]
    fn test_wheel_without_modifier_passes_through() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::SHIFT]));
        assert_eq!(engine.handle_event(wheel(120)), HookDecision::Forwarded);
        assert_eq!(engine.pending_delta(), 0);
        assert_eq!(command_count(&engine), 0);
    }

    #[test]
    fn test_missing_or_maximized_window_passes_through() {
        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.foreground = None;
        let mut no_window = engine(platform);
        assert_eq!(no_window.handle_event(wheel(120)), HookDecision::Forwarded);

        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.maximized = true;
        let mut maximized = engine(platform);
        assert_eq!(maximized.handle_event(wheel(120)), HookDecision::Forwarded);
        assert_eq!(maximized.pending_delta(), 0);
        assert_eq!(command_count(&maximized), 0);
    }

    #[test]
    fn test_partial_ticks_are_consumed_without_resizing() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::CONTROL]));
        for delta in [30, 40, 45] {
            assert_eq!(engine.handle_event(wheel(delta)), HookDecision::Consumed);
        }
        assert_eq!(engine.pending_delta(), 115);
        assert_eq!(engine.state(), AccumulatorState::Accumulating);
        assert_eq!(command_count(&engine), 0);

        let mut engine = self::engine(FakePlatform::holding(&[KeyCode::ALT]));
        engine.handle_event(wheel(-50));
        engine.handle_event(wheel(-30));
        assert_eq!(engine.pending_delta(), -80);
        assert_eq!(command_count(&engine), 0);
    }

    #[test]
    fn test_full_notch_resizes_width_once() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::CONTROL]));
        assert_eq!(engine.handle_event(wheel(120)), HookDecision::Consumed);
        assert_eq!(engine.pending_delta(), 0);
        assert_eq!(engine.state(), AccumulatorState::Idle);

        let commands = engine.platform().commands.borrow();
        assert_eq!(commands.as_slice(), &[(7, Rect::new(95, 100, 505, 400))]);
    }

    #[test]
    fn test_height_key_resizes_height() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::ALT]));
        engine.handle_event(wheel(-120));
        let commands = engine.platform().commands.borrow();
        assert_eq!(commands.as_slice(), &[(7, Rect::new(100, 105, 500, 395))]);
    }

    #[test]
    fn test_width_wins_when_both_keys_held() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::CONTROL, KeyCode::ALT]));
        engine.handle_event(wheel(120));
        assert_eq!(engine.platform().rect.get(), Rect::new(95, 100, 505, 400));
    }

    #[test]
    fn test_shared_key_resizes_width() {
        let config = ResizeConfig {
            height_key: KeyCode::CONTROL,
            ..ResizeConfig::default()
        };
        let mut engine = ResizeEngine::new(config, FakePlatform::holding(&[KeyCode::CONTROL]));
        engine.handle_event(wheel(120));
        assert_eq!(engine.platform().rect.get(), Rect::new(95, 100, 505, 400));
    }

    #[test]
    fn test_increment_scales_with_dpi_and_ticks() {
        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.scale = 1.5;
        let mut engine = engine(platform);
        // 2 ticks * 10px * 1.5 = 30px
        engine.handle_event(wheel(240));
        assert_eq!(engine.platform().rect.get(), Rect::new(85, 100, 515, 400));
    }

    #[test]
    fn test_opposite_ticks_restore_geometry() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::CONTROL]));
        engine.handle_event(wheel(120));
        engine.handle_event(wheel(-120));
        assert_eq!(command_count(&engine), 2);
        assert_eq!(engine.platform().rect.get(), START);
    }

    #[test]
    fn test_query_failure_still_consumes() {
        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.fail_rect = true;
        let mut engine = engine(platform);
        assert_eq!(engine.handle_event(wheel(120)), HookDecision::Consumed);
        assert_eq!(command_count(&engine), 0);
        assert_eq!(engine.pending_delta(), 0);
    }

    #[test]
    fn test_work_area_failure_still_consumes() {
        let mut platform = FakePlatform::holding(&[KeyCode::ALT]);
        platform.fail_work_area = true;
        let mut engine = engine(platform);
        assert_eq!(engine.handle_event(wheel(-120)), HookDecision::Consumed);
        assert_eq!(command_count(&engine), 0);
        assert_eq!(engine.pending_delta(), 0);
        assert_eq!(engine.platform().rect.get(), START);
    }

    #[test]
    fn test_rejected_command_still_consumes() {
        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.fail_command = true;
        let mut engine = engine(platform);
        for _ in 0..3 {
            assert_eq!(engine.handle_event(wheel(120)), HookDecision::Consumed);
        }
        assert_eq!(command_count(&engine), 0);
        assert_eq!(engine.pending_delta(), 0);
        assert_eq!(engine.state(), AccumulatorState::Idle);
        assert_eq!(engine.platform().rect.get(), START);
    }

    #[test]
    fn test_remainder_carries_into_next_tick() {
        let mut engine = engine(FakePlatform::holding(&[KeyCode::CONTROL]));
        // Totals 200, 180, 160, 140 each complete a tick; 20 is left over.
        for _ in 0..5 {
            assert_eq!(engine.handle_event(wheel(100)), HookDecision::Consumed);
        }
        assert_eq!(command_count(&engine), 4);
        assert_eq!(engine.pending_delta(), 20);
    }

    #[test]
    fn test_no_command_when_geometry_unchanged() {
        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.rect.set(Rect::new(0, 0, 100, 100));
        let mut engine = engine(platform);
        // Shrinking a 100px window would go below the minimum.
        assert_eq!(engine.handle_event(wheel(-120)), HookDecision::Consumed);
        assert_eq!(command_count(&engine), 0);
    }

    #[test]
    fn test_scaled_increment_rounding() {
        assert_eq!(scaled_increment(1, 10, 1.0), 10);
        assert_eq!(scaled_increment(-1, 10, 1.25), -12);
        assert_eq!(scaled_increment(1, 10, 1.75), 17);
        assert_eq!(scaled_increment(1, 1, 0.5), 0);
        assert_eq!(scaled_increment(3, 10, f64::NAN), 30);
        assert_eq!(scaled_increment(1, 10, 0.0), 10);
    }

    #[test]
    fn test_zero_increment_skips_resize() {
        let config = ResizeConfig {
            width_increment: 1,
            ..ResizeConfig::default()
        };
        let mut platform = FakePlatform::holding(&[KeyCode::CONTROL]);
        platform.scale = 0.5;
        platform.rect.set(Rect::new(-50, 0, 250, 300));
        let mut engine = ResizeEngine::new(config, platform);
        assert_eq!(engine.handle_event(wheel(120)), HookDecision::Consumed);
        assert_eq!(command_count(&engine), 0);
    }
}
