//! Test pattern generator.
//!
//! Owns the pixel engine while a test pattern is selected, so bridge data
//! can never reach the pixel hardware at the same time. Frames are paced
//! without blocking: a tick before the next deadline, or while the strip is
//! still shifting out the previous frame, returns immediately.

use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb};
use crate::output::PixelStrip;
use crate::pattern::{Pattern, PatternSlot};
use crate::scheduler::Service;

/// Default target frame rate (50 FPS).
pub const DEFAULT_FPS: u32 = 50;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Drives one pattern on every active pixel port
///
/// `MAX_PIXELS` bounds the frame buffer; longer strips only get their first
/// `MAX_PIXELS` pixels painted.
pub struct TestPatternGenerator<P: PixelStrip, const MAX_PIXELS: usize> {
    strip: P,
    pattern: PatternSlot,
    active_ports: u32,
    frame_buffer: [Rgb; MAX_PIXELS],
    next_frame: Instant,
    frame_duration: Duration,
    frames: u32,
}

impl<P: PixelStrip, const MAX_PIXELS: usize> TestPatternGenerator<P, MAX_PIXELS> {
    /// Create a generator, `None` if the pattern is [`Pattern::None`]
    ///
    /// The strip is handed back in the error case so the caller can route it
    /// to live output instead.
    pub fn new(pattern: Pattern, strip: P, active_ports: u32) -> Result<Self, P> {
        Self::with_frame_duration(pattern, strip, active_ports, DEFAULT_FRAME_DURATION)
    }

    /// Create a generator with custom frame duration
    pub fn with_frame_duration(
        pattern: Pattern,
        strip: P,
        active_ports: u32,
        frame_duration: Duration,
    ) -> Result<Self, P> {
        let Some(pattern) = pattern.to_slot() else {
            return Err(strip);
        };
        Ok(Self {
            strip,
            pattern,
            active_ports,
            frame_buffer: [BLACK; MAX_PIXELS],
            next_frame: Instant::from_millis(0),
            frame_duration,
            frames: 0,
        })
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern.id()
    }

    pub fn active_ports(&self) -> u32 {
        self.active_ports
    }

    /// Number of frames sent to the strip
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn strip(&self) -> &P {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut P {
        &mut self.strip
    }

    pub fn into_strip(self) -> P {
        self.strip
    }

    /// Render and send a frame if one is due
    ///
    /// Returns true if a frame was sent.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next_frame || self.strip.is_updating() {
            return false;
        }

        // After a stall, skip the backlog instead of catching up
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let pixels = (self.strip.pixel_count() as usize).min(MAX_PIXELS);
        let frame = &mut self.frame_buffer[..pixels];
        self.pattern.render(now, frame);

        let ports = self.active_ports.min(self.strip.active_ports());
        for port in 0..ports {
            for (index, color) in (0u32..).zip(frame.iter()) {
                self.strip.set_pixel(port, index, *color);
            }
        }
        self.strip.update();

        self.next_frame += self.frame_duration;
        self.frames = self.frames.wrapping_add(1);
        true
    }
}

impl<P: PixelStrip, const MAX_PIXELS: usize> Service for TestPatternGenerator<P, MAX_PIXELS> {
    fn run(&mut self, now: Instant) {
        self.tick(now);
    }

    fn on_reboot(&mut self) {
        self.strip.blank();
    }
}
