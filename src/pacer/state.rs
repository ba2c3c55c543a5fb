use std::time::Duration;

use crate::config::PacerConfig;

/// Longest gap between ticks; slower settings are clamped to it.
pub const MAX_INTERVAL: Duration = Duration::from_secs(3_600);

/// Auto-scroll driver state. The timer itself is owned by [`super::PacerDriver`];
/// this type decides intervals and whether a tick is still current.
#[derive(Debug, Clone)]
pub struct PacerTimer {
    speed: f64,
    min_speed: f64,
    step: f64,
    wait_time: Duration,
    armed: bool,
    generation: u64,
}

impl PacerTimer {
    pub fn new(config: &PacerConfig) -> Self {
        let min_speed = if config.min_speed.is_finite() && config.min_speed > 0.0 {
            config.min_speed
        } else {
            PacerConfig::default().min_speed
        };
        let mut timer = Self {
            speed: min_speed,
            min_speed,
            step: config.step.max(f64::EPSILON),
            wait_time: config.wait_time(),
            armed: false,
            generation: 0,
        };
        timer.set_speed(config.speed);
        timer
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time between ticks: one `step` at the current speed, at most [`MAX_INTERVAL`].
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.step / self.speed)
            .map_or(MAX_INTERVAL, |interval| interval.min(MAX_INTERVAL))
    }

    /// Flips the armed flag and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.armed = !self.armed;
        self.generation = self.generation.wrapping_add(1);
        self.armed
    }

    pub fn disarm(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.toggle();
        true
    }

    /// Clamps to the positive minimum; non-finite input leaves the speed alone.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() {
            return false;
        }
        let clamped = speed.max(self.min_speed);
        if (clamped - self.speed).abs() <= f64::EPSILON {
            return false;
        }
        self.speed = clamped;
        true
    }

    /// Ticks from an earlier arm cycle are stale.
    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.armed && generation == self.generation
    }
}
