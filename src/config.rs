//! Startup parameters and addressing limits.
//!
//! Parameters are loaded once by the persistent store collaborator and are
//! read-only afterwards. An `Option<u16>` universe is the "is set" flag:
//! `None` means the slot was never configured and accepts no data.

use crate::error::ConfigError;
use crate::pattern::Pattern;

/// Maximum number of pixel ports the mapper addresses.
pub const MAX_PIXEL_PORTS: usize = 16;

/// Maximum number of universes one pixel port spans.
pub const MAX_UNIVERSES_PER_PORT: usize = 4;

/// First global port index used by the DMX engine.
pub const DMX_PORT_OFFSET: u32 = 64;

/// Number of DMX universes the node can bind.
pub const DMX_MAX_PORTS: usize = 2;

/// Capacity of a universe map: the full pixel range plus the DMX ports.
pub const MAX_BINDINGS: usize = MAX_PIXEL_PORTS * MAX_UNIVERSES_PER_PORT + DMX_MAX_PORTS;

/// Lowest valid E1.31 universe.
pub const UNIVERSE_MIN: u16 = 1;

/// Highest valid E1.31 universe.
pub const UNIVERSE_MAX: u16 = 63_999;

// The pixel range must end before the DMX offset or universes get mis-routed.
const _: () = assert!(MAX_PIXEL_PORTS * MAX_UNIVERSES_PER_PORT <= DMX_PORT_OFFSET as usize);

/// Pixel output parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelParams {
    start_universes: [Option<u16>; MAX_PIXEL_PORTS],
    /// Test pattern selected at startup
    pub test_pattern: Pattern,
}

impl Default for PixelParams {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelParams {
    pub const fn new() -> Self {
        Self {
            start_universes: [None; MAX_PIXEL_PORTS],
            test_pattern: Pattern::None,
        }
    }

    /// Set the first universe of a pixel port
    ///
    /// Ports outside `0..MAX_PIXEL_PORTS` are ignored.
    #[must_use]
    pub fn with_start_universe(mut self, port: usize, universe: u16) -> Self {
        if let Some(slot) = self.start_universes.get_mut(port) {
            *slot = Some(universe);
        }
        self
    }

    /// Select the test pattern
    #[must_use]
    pub fn with_test_pattern(mut self, pattern: Pattern) -> Self {
        self.test_pattern = pattern;
        self
    }

    /// Get the start universe of a pixel port, `None` if not set
    pub fn start_universe(&self, port: usize) -> Option<u16> {
        self.start_universes.get(port).copied().flatten()
    }

    /// Check the configured universes against the counts reported by the
    /// pixel engine.
    pub fn validate(&self, ports: u32, universes_per_port: u32) -> Result<(), ConfigError> {
        validate_counts(ports, universes_per_port)?;

        let mut port_index = 0;
        for port in 0..ports as usize {
            let Some(start) = self.start_universe(port) else {
                port_index += universes_per_port;
                continue;
            };
            for slot in 0..universes_per_port {
                #[allow(clippy::cast_possible_truncation)]
                let universe = start.wrapping_add(slot as u16);
                if !is_valid_universe(universe) {
                    return Err(ConfigError::UniverseOutOfRange {
                        port_index,
                        universe,
                    });
                }
                port_index += 1;
            }
        }
        Ok(())
    }
}

/// DMX output parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DmxParams {
    universes: [Option<u16>; DMX_MAX_PORTS],
}

impl DmxParams {
    pub const fn new() -> Self {
        Self {
            universes: [None; DMX_MAX_PORTS],
        }
    }

    /// Set the universe of a DMX port
    ///
    /// Ports outside `0..DMX_MAX_PORTS` are ignored.
    #[must_use]
    pub fn with_universe(mut self, port: usize, universe: u16) -> Self {
        if let Some(slot) = self.universes.get_mut(port) {
            *slot = Some(universe);
        }
        self
    }

    /// Get the universe of a DMX port, `None` if not set
    pub fn universe(&self, port: usize) -> Option<u16> {
        self.universes.get(port).copied().flatten()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (port, universe) in (0u32..).zip(self.universes.iter()) {
            if let Some(universe) = *universe {
                if !is_valid_universe(universe) {
                    return Err(ConfigError::UniverseOutOfRange {
                        port_index: DMX_PORT_OFFSET + port,
                        universe,
                    });
                }
            }
        }
        Ok(())
    }
}

/// All parameters needed to wire the node outputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeParams {
    pub pixel: PixelParams,
    pub dmx: DmxParams,
}

/// Check the port and universe counts reported by the pixel engine
pub fn validate_counts(ports: u32, universes_per_port: u32) -> Result<(), ConfigError> {
    if ports as usize > MAX_PIXEL_PORTS {
        return Err(ConfigError::TooManyPixelPorts(ports));
    }
    if universes_per_port == 0 || universes_per_port as usize > MAX_UNIVERSES_PER_PORT {
        return Err(ConfigError::UniversesPerPortOutOfRange(universes_per_port));
    }
    Ok(())
}

pub const fn is_valid_universe(universe: u16) -> bool {
    universe >= UNIVERSE_MIN && universe <= UNIVERSE_MAX
}
