//! Error types for node configuration

use core::fmt;

/// Problems found while validating startup parameters
///
/// None of these stop the node. They are logged and reported through
/// [`NodeStatus`](crate::node::NodeStatus), and the affected outputs stay
/// inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Pixel engine reports more ports than the mapper can address
    TooManyPixelPorts(u32),
    /// Universes per pixel port is zero or above the supported maximum
    UniversesPerPortOutOfRange(u32),
    /// A configured start universe is outside `1..=63999`
    UniverseOutOfRange {
        /// Global port index the universe was meant for
        port_index: u32,
        /// Offending universe number
        universe: u16,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooManyPixelPorts(ports) => {
                write!(f, "Too many pixel ports: {}", ports)
            }
            ConfigError::UniversesPerPortOutOfRange(universes) => {
                write!(f, "Universes per port out of range: {}", universes)
            }
            ConfigError::UniverseOutOfRange {
                port_index,
                universe,
            } => write!(
                f,
                "Universe {} out of range for port index {}",
                universe, port_index
            ),
        }
    }
}
