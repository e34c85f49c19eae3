//! Theater chase pattern
//!
//! Every third pixel is lit and the lit set marches one pixel per step.

use embassy_time::Instant;

use super::{PatternRenderer, steps_at};
use crate::color::{BLACK, Rgb, rgb_from_u32};

const DEFAULT_STEP_MS: u64 = 100;
const SPACING: usize = 3;

#[derive(Debug, Clone)]
pub struct TheaterChasePattern {
    step_ms: u64,
    on: Rgb,
    off: Rgb,
}

impl Default for TheaterChasePattern {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            on: rgb_from_u32(0x00_7F_7F),
            off: BLACK,
        }
    }
}

impl TheaterChasePattern {
    #[must_use]
    pub fn with_colors(mut self, on: Rgb, off: Rgb) -> Self {
        self.on = on;
        self.off = off;
        self
    }
}

impl PatternRenderer for TheaterChasePattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let phase = (steps_at(now, self.step_ms) % SPACING as u64) as usize;

        for (i, led) in leds.iter_mut().enumerate() {
            *led = if i % SPACING == phase { self.on } else { self.off };
        }
    }
}
