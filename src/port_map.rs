//! Universe to port-index mapping.
//!
//! The protocol bridge binds universes to a flat, zero based port index
//! space. Pixel ports are laid out in fixed blocks of `universes_per_port`
//! indices, so global index `k` always belongs to pixel port
//! `k / universes_per_port`. A port without a start universe keeps its block
//! but gets no bindings. DMX ports sit at [`DMX_PORT_OFFSET`] and the index
//! after it, independent of the pixel layout.

use heapless::Vec;

use crate::config::{
    DMX_MAX_PORTS, DMX_PORT_OFFSET, DmxParams, MAX_BINDINGS, MAX_PIXEL_PORTS,
    MAX_UNIVERSES_PER_PORT, PixelParams,
};

/// Direction of a bridge port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDir {
    Input,
    Output,
}

/// Output engine that owns a logical port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Pixel,
    Dmx,
}

/// Physically addressable port of one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalPort {
    /// Zero based index within the engine
    pub index: u32,
    pub kind: EngineKind,
}

/// One universe bound to a global port index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniverseBinding {
    pub port_index: u32,
    pub direction: PortDir,
    pub universe: u16,
}

/// Receiver of universe bindings, implemented by the protocol bridge
pub trait UniverseBinder {
    /// Bind `universe` to the global port index
    fn bind_universe(&mut self, port_index: u32, direction: PortDir, universe: u16);
}

/// Result of mapping the startup parameters onto the port index space
#[derive(Debug, Clone, Default)]
pub struct UniverseMap {
    bindings: Vec<UniverseBinding, MAX_BINDINGS>,
    pixel_slots: u32,
    universes_per_port: u32,
    dmx_universes: u8,
}

impl UniverseMap {
    /// All bindings in the order they were produced
    pub fn bindings(&self) -> &[UniverseBinding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the universe bound to a global port index
    pub fn universe_at(&self, port_index: u32) -> Option<u16> {
        self.bindings
            .iter()
            .find(|binding| binding.port_index == port_index)
            .map(|binding| binding.universe)
    }

    /// Number of global indices reserved for pixel ports, bound or not
    pub fn pixel_slots(&self) -> u32 {
        self.pixel_slots
    }

    pub fn universes_per_port(&self) -> u32 {
        self.universes_per_port
    }

    /// Number of DMX universes that were bound
    pub fn dmx_universe_count(&self) -> u8 {
        self.dmx_universes
    }

    /// Get the logical port that owns a global port index
    ///
    /// Returns `None` for indices outside both the pixel and DMX ranges.
    pub fn owner_of(&self, port_index: u32) -> Option<LogicalPort> {
        if port_index < self.pixel_slots {
            return Some(LogicalPort {
                index: port_index / self.universes_per_port,
                kind: EngineKind::Pixel,
            });
        }
        dmx_port_of(port_index).map(|index| LogicalPort {
            index,
            kind: EngineKind::Dmx,
        })
    }

    /// Write every binding to the bridge
    pub fn apply<B: UniverseBinder + ?Sized>(&self, bridge: &mut B) {
        for binding in &self.bindings {
            bridge.bind_universe(binding.port_index, binding.direction, binding.universe);
        }
    }

    fn bind(&mut self, port_index: u32, universe: u16) {
        // Capacity covers every index the mapper can produce
        let _ = self.bindings.push(UniverseBinding {
            port_index,
            direction: PortDir::Output,
            universe,
        });
    }
}

/// Local DMX port for a global index, if it falls in the DMX range
pub(crate) fn dmx_port_of(port_index: u32) -> Option<u32> {
    let local = port_index.checked_sub(DMX_PORT_OFFSET)?;
    (local < DMX_MAX_PORTS as u32).then_some(local)
}

/// Builds the universe map from startup parameters
pub struct PortMapper;

impl PortMapper {
    /// Map pixel and DMX universes onto global port indices
    ///
    /// Out of range counts produce no pixel slots at all. Callers are
    /// expected to validate counts first.
    pub fn map(
        pixel_ports: u32,
        universes_per_port: u32,
        pixel: &PixelParams,
        dmx: &DmxParams,
    ) -> UniverseMap {
        let mut map = UniverseMap::default();

        if Self::counts_in_range(pixel_ports, universes_per_port) {
            map.universes_per_port = universes_per_port;

            let mut port_index = 0;
            for port in 0..pixel_ports as usize {
                let start = pixel.start_universe(port);
                for slot in 0..universes_per_port {
                    if let Some(start) = start {
                        #[allow(clippy::cast_possible_truncation)]
                        let universe = start.wrapping_add(slot as u16);
                        map.bind(port_index, universe);
                    }
                    port_index += 1;
                }
            }
            map.pixel_slots = port_index;
        }

        for (port_index, port) in (DMX_PORT_OFFSET..).zip(0..DMX_MAX_PORTS) {
            if let Some(universe) = dmx.universe(port) {
                map.bind(port_index, universe);
                map.dmx_universes += 1;
            }
        }

        map
    }

    fn counts_in_range(pixel_ports: u32, universes_per_port: u32) -> bool {
        pixel_ports as usize <= MAX_PIXEL_PORTS
            && universes_per_port >= 1
            && universes_per_port as usize <= MAX_UNIVERSES_PER_PORT
    }
}
