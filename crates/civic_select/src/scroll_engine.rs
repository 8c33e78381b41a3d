//! Auto-scroll engine
//!
//! Scrolls the menu in fixed steps at a fixed interval while the pointer
//! rests on (or a finger holds) a scroll button. There is no background
//! timer: the host advances the engine with the time elapsed since the
//! previous frame, and every interval that has fully elapsed produces one
//! tick. A session ends when it is stopped, when another session starts,
//! or on its own as soon as a tick leaves the list at the boundary it was
//! scrolling toward.
//!
//! ```
//! use std::time::Duration;
//! use civic_platform::Point;
//! use civic_select::{ListViewport, ScrollDirection, ScrollEngine};
//!
//! let mut viewport = ListViewport::uniform(Point::ZERO, 100.0, 20, 20.0, 100.0, 16.0);
//! let mut engine = ScrollEngine::default();
//!
//! engine.start(ScrollDirection::Down);
//! engine.advance(Duration::from_millis(30), &mut viewport);
//! assert_eq!(viewport.scroll_top(), 15.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::scroll::ScrollDirection;
use crate::viewport::ListViewport;

/// Auto-scroll step and cadence
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollEngineConfig {
    /// Pixels scrolled per tick
    pub step: f32,
    /// Time between ticks
    #[serde(with = "millis")]
    pub interval: Duration,
}

impl Default for ScrollEngineConfig {
    fn default() -> Self {
        Self {
            step: 5.0,
            interval: Duration::from_millis(10),
        }
    }
}

impl ScrollEngineConfig {
    /// Reject a zero step or interval
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::InvalidScrollEngine("step"));
        }
        if self.interval.is_zero() {
            return Err(ConfigError::InvalidScrollEngine("interval"));
        }
        Ok(())
    }
}

/// Durations are written as whole milliseconds in configuration
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// One run of the auto-scroll task
#[derive(Clone, Copy, Debug)]
struct ScrollSession {
    id: u64,
    direction: ScrollDirection,
    /// Time accumulated toward the next tick
    pending: Duration,
}

/// Why a call to [`ScrollEngine::advance`] returned
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Number of ticks executed
    pub ticks: u32,
    /// The session ended itself by reaching its boundary
    pub finished: bool,
}

/// Runs at most one auto-scroll session at a time
#[derive(Debug, Default)]
pub struct ScrollEngine {
    config: ScrollEngineConfig,
    session: Option<ScrollSession>,
    next_id: u64,
}

impl ScrollEngine {
    /// Create an engine with a custom step and interval
    pub fn new(config: ScrollEngineConfig) -> Self {
        Self {
            config,
            session: None,
            next_id: 0,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &ScrollEngineConfig {
        &self.config
    }

    /// Whether a session is running
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Direction of the running session
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.session.map(|s| s.direction)
    }

    /// Start scrolling in `direction`, replacing any running session
    pub fn start(&mut self, direction: ScrollDirection) {
        self.stop();
        self.next_id += 1;
        self.session = Some(ScrollSession {
            id: self.next_id,
            direction,
            pending: Duration::ZERO,
        });
        tracing::debug!(session = self.next_id, ?direction, "scroll session started");
    }

    /// Cancel the running session; a no-op when idle
    ///
    /// Returns true if a session was cancelled.
    pub fn stop(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::debug!(session = session.id, "scroll session stopped");
                true
            }
            None => false,
        }
    }

    /// Let `dt` of time pass, scrolling `viewport` once per elapsed interval
    pub fn advance(&mut self, dt: Duration, viewport: &mut ListViewport) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();
        let Some(session) = self.session.as_mut() else {
            return outcome;
        };

        session.pending += dt;
        while session.pending >= self.config.interval {
            session.pending -= self.config.interval;
            outcome.ticks += 1;

            viewport.scroll_by(session.direction.sign() * self.config.step);
            tracing::trace!(
                session = session.id,
                scroll_top = viewport.scroll_top(),
                "scroll tick"
            );

            if session.direction.reached_boundary(&viewport.metrics()) {
                tracing::debug!(
                    session = session.id,
                    direction = ?session.direction,
                    "scroll session reached boundary"
                );
                outcome.finished = true;
                break;
            }
        }

        if outcome.finished {
            self.session = None;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_platform::Point;

    const TICK: Duration = Duration::from_millis(10);

    /// 20 rows of 20px in a 100px window: 300px of scroll range
    fn viewport() -> ListViewport {
        ListViewport::uniform(Point::ZERO, 100.0, 20, 20.0, 100.0, 16.0)
    }

    #[test]
    fn test_idle_engine_does_nothing() {
        let mut engine = ScrollEngine::default();
        let mut vp = viewport();
        assert_eq!(engine.advance(TICK * 5, &mut vp), AdvanceOutcome::default());
        assert_eq!(vp.scroll_top(), 0.0);
        assert!(!engine.stop());
    }

    #[test]
    fn test_ticks_accumulate_partial_intervals() {
        let mut engine = ScrollEngine::default();
        let mut vp = viewport();
        engine.start(ScrollDirection::Down);

        let outcome = engine.advance(Duration::from_millis(6), &mut vp);
        assert_eq!(outcome.ticks, 0);
        let outcome = engine.advance(Duration::from_millis(6), &mut vp);
        assert_eq!(outcome.ticks, 1);
        assert_eq!(vp.scroll_top(), 5.0);
        assert!(engine.is_active());
    }

    #[test]
    fn test_self_terminates_at_bottom() {
        let mut engine = ScrollEngine::default();
        let mut vp = viewport();
        vp.scroll_to(290.0);
        engine.start(ScrollDirection::Down);

        let outcome = engine.advance(TICK * 10, &mut vp);
        assert_eq!(outcome.ticks, 2);
        assert!(outcome.finished);
        assert!(!engine.is_active());
        assert!(vp.metrics().is_at_bottom());
    }

    #[test]
    fn test_already_at_boundary_ends_after_first_tick() {
        let mut engine = ScrollEngine::default();
        let mut vp = viewport();
        engine.start(ScrollDirection::Up);

        let outcome = engine.advance(TICK, &mut vp);
        assert_eq!(
            outcome,
            AdvanceOutcome {
                ticks: 1,
                finished: true
            }
        );
        assert!(!engine.is_active());
        assert_eq!(vp.scroll_top(), 0.0);
    }

    #[test]
    fn test_start_replaces_running_session() {
        let mut engine = ScrollEngine::default();
        let mut vp = viewport();
        vp.scroll_to(100.0);

        engine.start(ScrollDirection::Down);
        engine.advance(TICK * 2, &mut vp);
        assert_eq!(vp.scroll_top(), 110.0);

        engine.start(ScrollDirection::Up);
        assert_eq!(engine.direction(), Some(ScrollDirection::Up));
        engine.advance(TICK * 3, &mut vp);
        assert_eq!(vp.scroll_top(), 95.0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut engine = ScrollEngine::default();
        let mut vp = viewport();
        engine.start(ScrollDirection::Down);
        assert!(engine.stop());
        assert!(!engine.stop());
        engine.advance(TICK * 4, &mut vp);
        assert_eq!(vp.scroll_top(), 0.0);
    }

    #[test]
    fn test_custom_config() {
        let config = ScrollEngineConfig {
            step: 12.0,
            interval: Duration::from_millis(20),
        };
        assert!(config.validate().is_ok());
        let mut engine = ScrollEngine::new(config);
        let mut vp = viewport();
        engine.start(ScrollDirection::Down);
        engine.advance(Duration::from_millis(40), &mut vp);
        assert_eq!(vp.scroll_top(), 24.0);
    }

    #[test]
    fn test_config_validation() {
        let zero_step = ScrollEngineConfig {
            step: 0.0,
            ..Default::default()
        };
        assert_eq!(
            zero_step.validate(),
            Err(ConfigError::InvalidScrollEngine("step"))
        );
        let zero_interval = ScrollEngineConfig {
            interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(
            zero_interval.validate(),
            Err(ConfigError::InvalidScrollEngine("interval"))
        );
    }

    #[test]
    fn test_config_interval_in_millis() {
        let config: ScrollEngineConfig = serde_json::from_str(r#"{"interval": 25}"#).unwrap();
        assert_eq!(config.interval, Duration::from_millis(25));
        assert_eq!(config.step, 5.0);
    }
}
