//! Fade pattern
//!
//! The whole strip breathes between two colors along a sine curve.

use embassy_time::{Duration, Instant};

use super::PatternRenderer;
use crate::color::{Rgb, blend_colors, rgb_from_u32};

const DEFAULT_PERIOD_MS: u64 = 4_000;

#[derive(Debug, Clone)]
pub struct FadePattern {
    period: Duration,
    from: Rgb,
    to: Rgb,
}

impl Default for FadePattern {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(DEFAULT_PERIOD_MS),
            from: rgb_from_u32(0x00_00_00),
            to: rgb_from_u32(0xFF_FF_FF),
        }
    }
}

impl FadePattern {
    /// Blend amount at `now`: 0 at the start of a period, 255 half way
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn amount_at(&self, now: Instant) -> u8 {
        let period_ms = self.period.as_millis().max(1);
        let phase = (now.as_millis() % period_ms) as f32 / period_ms as f32;
        let level = (1.0 - libm::cosf(phase * 2.0 * core::f32::consts::PI)) / 2.0;
        libm::roundf(level * 255.0) as u8
    }
}

impl PatternRenderer for FadePattern {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let color = blend_colors(self.from, self.to, self.amount_at(now));
        leds.fill(color);
    }
}
