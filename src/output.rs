//! Output engines and the multiplexer the bridge writes to.
//!
//! The bridge addresses global port indices. [`OutputMux`] owns whichever
//! engines take part in live output and forwards each write to the right
//! engine and local port. An engine left out of the mux never sees bridge
//! data, which is how the test pattern and live pixel data are kept apart.

use crate::color::Rgb;
use crate::config::DMX_PORT_OFFSET;
use crate::port_map::dmx_port_of;

/// Abstract output engine
///
/// Implement this trait for the pixel and DMX transmit drivers. Every method
/// must return without waiting on hardware.
pub trait OutputDriver {
    /// Number of ports this engine drives
    fn active_ports(&self) -> u32;

    /// Number of universes each port spans
    fn universe_group_size(&self) -> u32;

    /// Write channel data for a local port
    ///
    /// `update` is false while the bridge waits for a synchronization packet.
    fn write(&mut self, port_index: u32, data: &[u8], update: bool);

    /// Put every port into a safe blank state
    fn blank(&mut self);

    /// Data stream started on a local port
    fn start(&mut self, _port_index: u32) {}

    /// Data stream stopped on a local port
    fn stop(&mut self, _port_index: u32) {}

    /// Output all data written without update
    fn sync(&mut self) {}
}

/// Pixel engine operations used by the test pattern generator
pub trait PixelStrip: OutputDriver {
    /// Pixels on each port
    fn pixel_count(&self) -> u32;

    fn set_pixel(&mut self, port: u32, index: u32, color: Rgb);

    /// True while the previous frame is still being shifted out
    fn is_updating(&self) -> bool {
        false
    }

    /// Start shifting out the pixels set since the last update
    fn update(&mut self);
}

/// Output the protocol bridge writes to, addressed by global port index
pub trait OutputSink {
    fn start(&mut self, port_index: u32);

    fn stop(&mut self, port_index: u32);

    fn write(&mut self, port_index: u32, data: &[u8], update: bool);

    fn sync(&mut self);

    /// Blank the pixel outputs before a reset
    fn blackout(&mut self);

    /// Ports of all engines taking part in this sink
    fn active_ports(&self) -> u32;
}

/// Destination of a global port index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Pixel engine, local universe slot
    Pixel(u32),
    /// DMX engine, local port
    Dmx(u32),
}

/// Composition of the output engines, selected once at startup
#[derive(Debug)]
pub enum OutputMux<P, D> {
    /// No engine, every write is discarded
    Empty,
    Pixel(P),
    Dmx(D),
    Composed { pixel: P, dmx: D },
}

impl<P: OutputDriver, D: OutputDriver> OutputMux<P, D> {
    /// Select the variant for the engines that take part
    pub fn compose(pixel: Option<P>, dmx: Option<D>) -> Self {
        match (pixel, dmx) {
            (Some(pixel), Some(dmx)) => Self::Composed { pixel, dmx },
            (Some(pixel), None) => Self::Pixel(pixel),
            (None, Some(dmx)) => Self::Dmx(dmx),
            (None, None) => Self::Empty,
        }
    }

    pub fn has_pixel(&self) -> bool {
        matches!(self, Self::Pixel(_) | Self::Composed { .. })
    }

    pub fn has_dmx(&self) -> bool {
        matches!(self, Self::Dmx(_) | Self::Composed { .. })
    }

    pub fn pixel_mut(&mut self) -> Option<&mut P> {
        match self {
            Self::Pixel(pixel) | Self::Composed { pixel, .. } => Some(pixel),
            Self::Empty | Self::Dmx(_) => None,
        }
    }

    pub fn dmx_mut(&mut self) -> Option<&mut D> {
        match self {
            Self::Dmx(dmx) | Self::Composed { dmx, .. } => Some(dmx),
            Self::Empty | Self::Pixel(_) => None,
        }
    }

    /// Resolve a global port index against the engines present
    pub fn route(&self, port_index: u32) -> Option<Route> {
        if port_index < DMX_PORT_OFFSET {
            return self.has_pixel().then_some(Route::Pixel(port_index));
        }
        let local = dmx_port_of(port_index)?;
        self.has_dmx().then_some(Route::Dmx(local))
    }

    fn engine_for(&mut self, port_index: u32) -> Option<(&mut dyn OutputDriver, u32)> {
        match self.route(port_index)? {
            Route::Pixel(local) => self
                .pixel_mut()
                .map(|pixel| (pixel as &mut dyn OutputDriver, local)),
            Route::Dmx(local) => self
                .dmx_mut()
                .map(|dmx| (dmx as &mut dyn OutputDriver, local)),
        }
    }
}

impl<P: OutputDriver, D: OutputDriver> OutputSink for OutputMux<P, D> {
    fn start(&mut self, port_index: u32) {
        if let Some((engine, local)) = self.engine_for(port_index) {
            engine.start(local);
        }
    }

    fn stop(&mut self, port_index: u32) {
        if let Some((engine, local)) = self.engine_for(port_index) {
            engine.stop(local);
        }
    }

    fn write(&mut self, port_index: u32, data: &[u8], update: bool) {
        if let Some((engine, local)) = self.engine_for(port_index) {
            engine.write(local, data, update);
        }
    }

    fn sync(&mut self) {
        if let Some(pixel) = self.pixel_mut() {
            pixel.sync();
        }
        if let Some(dmx) = self.dmx_mut() {
            dmx.sync();
        }
    }

    fn blackout(&mut self) {
        if let Some(pixel) = self.pixel_mut() {
            pixel.blank();
        }
    }

    fn active_ports(&self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Pixel(pixel) => pixel.active_ports(),
            Self::Dmx(dmx) => dmx.active_ports(),
            Self::Composed { pixel, dmx } => pixel.active_ports() + dmx.active_ports(),
        }
    }
}
