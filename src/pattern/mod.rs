//! Pixel test patterns
//!
//! All patterns are stored in an enum to avoid heap allocations.
//! Each pattern is a pure function of time, so restarting the generator
//! never needs saved state.

mod color_wipe;
mod fade;
mod rainbow;
mod scanner;
mod theater_chase;

use embassy_time::Instant;
pub use color_wipe::ColorWipePattern;
pub use fade::FadePattern;
pub use rainbow::RainbowCyclePattern;
pub use scanner::ScannerPattern;
pub use theater_chase::TheaterChasePattern;

use crate::color::Rgb;

const PATTERN_NAME_NONE: &str = "none";
const PATTERN_NAME_RAINBOW_CYCLE: &str = "rainbow_cycle";
const PATTERN_NAME_THEATER_CHASE: &str = "theater_chase";
const PATTERN_NAME_COLOR_WIPE: &str = "color_wipe";
const PATTERN_NAME_SCANNER: &str = "scanner";
const PATTERN_NAME_FADE: &str = "fade";

const PATTERN_ID_NONE: u8 = 0;
const PATTERN_ID_RAINBOW_CYCLE: u8 = 1;
const PATTERN_ID_THEATER_CHASE: u8 = 2;
const PATTERN_ID_COLOR_WIPE: u8 = 3;
const PATTERN_ID_SCANNER: u8 = 4;
const PATTERN_ID_FADE: u8 = 5;

pub trait PatternRenderer {
    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);
}

/// Test pattern selected at startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Pattern {
    #[default]
    None = PATTERN_ID_NONE,
    RainbowCycle = PATTERN_ID_RAINBOW_CYCLE,
    TheaterChase = PATTERN_ID_THEATER_CHASE,
    ColorWipe = PATTERN_ID_COLOR_WIPE,
    Scanner = PATTERN_ID_SCANNER,
    Fade = PATTERN_ID_FADE,
}

impl Pattern {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_NONE => Self::None,
            PATTERN_ID_RAINBOW_CYCLE => Self::RainbowCycle,
            PATTERN_ID_THEATER_CHASE => Self::TheaterChase,
            PATTERN_ID_COLOR_WIPE => Self::ColorWipe,
            PATTERN_ID_SCANNER => Self::Scanner,
            PATTERN_ID_FADE => Self::Fade,
            _ => return None,
        })
    }

    /// Returns true for every pattern except [`Pattern::None`]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Build the renderer for this pattern, `None` for [`Pattern::None`]
    pub fn to_slot(self) -> Option<PatternSlot> {
        Some(match self {
            Self::None => return None,
            Self::RainbowCycle => PatternSlot::RainbowCycle(RainbowCyclePattern::default()),
            Self::TheaterChase => PatternSlot::TheaterChase(TheaterChasePattern::default()),
            Self::ColorWipe => PatternSlot::ColorWipe(ColorWipePattern::default()),
            Self::Scanner => PatternSlot::Scanner(ScannerPattern::default()),
            Self::Fade => PatternSlot::Fade(FadePattern::default()),
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => PATTERN_NAME_NONE,
            Self::RainbowCycle => PATTERN_NAME_RAINBOW_CYCLE,
            Self::TheaterChase => PATTERN_NAME_THEATER_CHASE,
            Self::ColorWipe => PATTERN_NAME_COLOR_WIPE,
            Self::Scanner => PATTERN_NAME_SCANNER,
            Self::Fade => PATTERN_NAME_FADE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_NONE => Some(Self::None),
            PATTERN_NAME_RAINBOW_CYCLE => Some(Self::RainbowCycle),
            PATTERN_NAME_THEATER_CHASE => Some(Self::TheaterChase),
            PATTERN_NAME_COLOR_WIPE => Some(Self::ColorWipe),
            PATTERN_NAME_SCANNER => Some(Self::Scanner),
            PATTERN_NAME_FADE => Some(Self::Fade),
            _ => None,
        }
    }
}

/// Pattern slot - enum containing all renderable patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    RainbowCycle(RainbowCyclePattern),
    TheaterChase(TheaterChasePattern),
    ColorWipe(ColorWipePattern),
    Scanner(ScannerPattern),
    Fade(FadePattern),
}

impl PatternSlot {
    /// Render the current pattern
    pub fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        match self {
            Self::RainbowCycle(pattern) => pattern.render(now, leds),
            Self::TheaterChase(pattern) => pattern.render(now, leds),
            Self::ColorWipe(pattern) => pattern.render(now, leds),
            Self::Scanner(pattern) => pattern.render(now, leds),
            Self::Fade(pattern) => pattern.render(now, leds),
        }
    }

    /// Get the pattern id for external observation
    pub fn id(&self) -> Pattern {
        match self {
            Self::RainbowCycle(_) => Pattern::RainbowCycle,
            Self::TheaterChase(_) => Pattern::TheaterChase,
            Self::ColorWipe(_) => Pattern::ColorWipe,
            Self::Scanner(_) => Pattern::Scanner,
            Self::Fade(_) => Pattern::Fade,
        }
    }
}

/// Number of whole `step_ms` periods elapsed at `now`
pub(crate) fn steps_at(now: Instant, step_ms: u64) -> u64 {
    now.as_millis() / step_ms.max(1)
}
