//! Startup wiring.
//!
//! Runs once, before the run loop: maps universes onto the bridge, decides
//! which engines feed live output and hands the composed sink to the bridge.
//! Nothing here is revisited while the node runs.

use core::fmt::Write;

use heapless::String;

use crate::bridge::ProtocolBridge;
use crate::config::NodeParams;
use crate::error::ConfigError;
use crate::output::{OutputDriver, OutputMux, PixelStrip};
use crate::pattern::Pattern;
use crate::port_map::{PortMapper, UniverseMap};
use crate::test_pattern::TestPatternGenerator;

/// Summary of the wired node for the status surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub pixel_ports: u32,
    pub universes_per_port: u32,
    pub pixel_count: u32,
    pub dmx_universes: u8,
    pub pattern: Pattern,
    /// Output ports with a bound universe, as reported by the bridge
    pub active_output_ports: u32,
    /// First configuration problem found, if any
    pub config_error: Option<ConfigError>,
}

impl NodeStatus {
    /// Display title, e.g. `sACN Pixel 8:4x170` for 4 ports of 170 pixels
    pub fn title(&self) -> String<32> {
        let mut title = String::new();
        let _ = write!(
            title,
            "sACN Pixel 8:{}x{}",
            self.pixel_ports, self.pixel_count
        );
        title
    }

    /// Status line shown in place of the DMX info while a pattern runs
    pub fn pattern_line(&self) -> Option<String<32>> {
        if !self.pattern.is_active() {
            return None;
        }
        let mut line = String::new();
        let _ = write!(line, "{}:{}", self.pattern.as_str(), self.pattern as u8);
        Some(line)
    }
}

/// Everything the run loop needs from startup wiring
pub struct Wiring<P: PixelStrip, C, const MAX_PIXELS: usize> {
    /// Present only when a test pattern was selected
    pub test_pattern: Option<TestPatternGenerator<P, MAX_PIXELS>>,
    /// Present only when at least one DMX universe was bound
    pub dmx_config: Option<C>,
    pub universes: UniverseMap,
    pub status: NodeStatus,
}

/// Wire the output engines to the bridge
///
/// The bridge receives its output sink exactly once. With a test pattern
/// selected the pixel engine moves into the generator and never joins the
/// sink. The DMX engine joins only if a DMX universe is bound, and
/// `make_dmx_config` is only called in that case.
pub fn wire<B, P, D, C, const MAX_PIXELS: usize>(
    params: &NodeParams,
    bridge: &mut B,
    pixel: P,
    dmx: D,
    make_dmx_config: impl FnOnce() -> C,
) -> Wiring<P, C, MAX_PIXELS>
where
    B: ProtocolBridge<Output = OutputMux<P, D>>,
    P: PixelStrip,
    D: OutputDriver,
{
    let pixel_ports = pixel.active_ports();
    let universes_per_port = pixel.universe_group_size();
    let pixel_count = pixel.pixel_count();

    let config_error = params
        .pixel
        .validate(pixel_ports, universes_per_port)
        .and_then(|()| params.dmx.validate())
        .err();
    if let Some(err) = config_error {
        log::warn!("{}", err);
    }

    let universes = PortMapper::map(pixel_ports, universes_per_port, &params.pixel, &params.dmx);
    universes.apply(bridge);
    log::debug!(
        "pixel ports: {}, universes per port: {}, bindings: {}",
        pixel_ports,
        universes_per_port,
        universes.bindings().len()
    );

    let dmx_universes = universes.dmx_universe_count();
    let dmx = (dmx_universes != 0).then_some(dmx);

    let pattern = params.pixel.test_pattern;
    let generator = TestPatternGenerator::<P, MAX_PIXELS>::new(pattern, pixel, pixel_ports);
    let (test_pattern, live_pixel) = match generator {
        Ok(generator) => (Some(generator), None),
        Err(pixel) => (None, Some(pixel)),
    };

    let output = OutputMux::compose(live_pixel, dmx);
    log::info!(
        "output: pixel {}, dmx {}, pattern {}",
        output.has_pixel(),
        output.has_dmx(),
        pattern.as_str()
    );
    bridge.set_output(output);

    let dmx_config = (dmx_universes != 0).then(make_dmx_config);

    let status = NodeStatus {
        pixel_ports,
        universes_per_port,
        pixel_count,
        dmx_universes,
        pattern,
        active_output_ports: bridge.active_output_ports(),
        config_error,
    };

    Wiring {
        test_pattern,
        dmx_config,
        universes,
        status,
    }
}
