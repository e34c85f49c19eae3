//! Scanner pattern
//!
//! A single pixel bounces between the strip ends and leaves a fading tail.

use embassy_time::Instant;

use super::{PatternRenderer, steps_at};
use crate::color::{BLACK, Rgb, rgb_from_u32, scale_color};

const DEFAULT_STEP_MS: u64 = 20;
const TAIL_SCALE: u8 = 128;

#[derive(Debug, Clone)]
pub struct ScannerPattern {
    step_ms: u64,
    color: Rgb,
    tail: usize,
}

impl Default for ScannerPattern {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            color: rgb_from_u32(0xFF_00_00),
            tail: 4,
        }
    }
}

impl ScannerPattern {
    /// Position of the lit pixel after `step` steps on a strip of `count`
    #[allow(clippy::cast_possible_truncation)]
    pub fn position(step: u64, count: usize) -> usize {
        if count < 2 {
            return 0;
        }
        let period = 2 * (count as u64 - 1);
        let phase = (step % period) as usize;
        if phase < count { phase } else { period as usize - phase }
    }
}

impl PatternRenderer for ScannerPattern {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let position = Self::position(steps_at(now, self.step_ms), leds.len());
        leds.fill(BLACK);

        let mut color = self.color;
        for distance in 0..=self.tail {
            if distance > 0 {
                color = scale_color(color, TAIL_SCALE);
            }
            if let Some(led) = position.checked_sub(distance).and_then(|i| leds.get_mut(i)) {
                *led = color;
            }
            if let Some(led) = leds.get_mut(position + distance) {
                *led = color;
            }
        }
    }
}
