//! Rainbow cycle pattern
//!
//! Spreads the full hue wheel over the strip and rotates it over time.

use embassy_time::{Duration, Instant};

use super::PatternRenderer;
use crate::color::{Rgb, wheel};

const DEFAULT_CYCLE_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct RainbowCyclePattern {
    /// Duration of one full rotation of the wheel
    cycle_duration: Duration,
    /// Brightness value (0-255)
    value: u8,
}

impl Default for RainbowCyclePattern {
    fn default() -> Self {
        Self {
            cycle_duration: Duration::from_millis(DEFAULT_CYCLE_MS),
            value: 255,
        }
    }
}

impl RainbowCyclePattern {
    #[must_use]
    pub fn with_cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }
}

impl PatternRenderer for RainbowCyclePattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let cycle_ms = self.cycle_duration.as_millis().max(1);
        let progress_ms = now.as_millis() % cycle_ms;
        let base_hue = ((progress_ms * 256) / cycle_ms) as u8;
        let count = leds.len();

        for (i, led) in leds.iter_mut().enumerate() {
            let offset = ((i * 256) / count) as u8;
            *led = wheel(base_hue.wrapping_add(offset), self.value);
        }
    }
}
