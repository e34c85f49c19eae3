//! Color wipe pattern
//!
//! Fills the strip one pixel per step, then moves on to the next color.

use embassy_time::Instant;

use super::{PatternRenderer, steps_at};
use crate::color::{Rgb, rgb_from_u32};

const DEFAULT_STEP_MS: u64 = 50;

const WIPE_COLORS: [Rgb; 3] = [
    rgb_from_u32(0x64_00_00),
    rgb_from_u32(0x00_64_00),
    rgb_from_u32(0x00_00_64),
];

#[derive(Debug, Clone)]
pub struct ColorWipePattern {
    step_ms: u64,
}

impl Default for ColorWipePattern {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

impl PatternRenderer for ColorWipePattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let count = leds.len() as u64;
        let step = steps_at(now, self.step_ms);
        let round = (step / count) as usize;
        let filled = (step % count) as usize + 1;

        let color = WIPE_COLORS[round % WIPE_COLORS.len()];
        let previous = WIPE_COLORS[(round + WIPE_COLORS.len() - 1) % WIPE_COLORS.len()];

        let (head, tail) = leds.split_at_mut(filled);
        head.fill(color);
        tail.fill(previous);
    }
}
