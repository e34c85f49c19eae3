//! Protocol bridge boundary.
//!
//! Packet parsing, merging and data-loss timeouts live in the bridge
//! implementation. The node only binds universes, hands over the output
//! sink once and pumps the bridge from the run loop.

use embassy_time::Instant;

use crate::output::OutputSink;
use crate::port_map::UniverseBinder;
use crate::scheduler::Service;

/// Streaming protocol bridge (sACN E1.31)
pub trait ProtocolBridge: UniverseBinder {
    type Output: OutputSink;

    /// Attach the output sink. Called once during startup.
    fn set_output(&mut self, output: Self::Output);

    fn output_mut(&mut self) -> Option<&mut Self::Output>;

    /// Start receiving
    fn start(&mut self);

    /// Handle received packets and forward new data to the output sink
    ///
    /// Must not block.
    fn pump(&mut self);

    /// Stop receiving and release the outputs
    fn stop(&mut self);

    /// Number of port indices with a bound output universe
    fn active_output_ports(&self) -> u32;
}

/// Run loop stage that drives a protocol bridge
pub struct BridgeStage<B> {
    bridge: B,
}

impl<B: ProtocolBridge> BridgeStage<B> {
    pub const fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn into_inner(self) -> B {
        self.bridge
    }
}

impl<B: ProtocolBridge> Service for BridgeStage<B> {
    fn start(&mut self) {
        self.bridge.start();
    }

    fn run(&mut self, _now: Instant) {
        self.bridge.pump();
    }

    /// Blank the pixel outputs, then stop the bridge
    fn on_reboot(&mut self) {
        if let Some(output) = self.bridge.output_mut() {
            output.blackout();
        }
        self.bridge.stop();
    }
}
