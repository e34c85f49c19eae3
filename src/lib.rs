#![no_std]

pub mod bridge;
pub mod color;
pub mod config;
pub mod error;
pub mod node;
pub mod output;
pub mod pattern;
pub mod port_map;
pub mod scheduler;
pub mod test_pattern;

pub use bridge::{BridgeStage, ProtocolBridge};
pub use config::{DmxParams, NodeParams, PixelParams};
pub use error::ConfigError;
pub use node::{NodeStatus, Wiring, wire};
pub use output::{OutputDriver, OutputMux, OutputSink, PixelStrip, Route};
pub use pattern::{Pattern, PatternSlot};
pub use port_map::{
    EngineKind, LogicalPort, PortDir, PortMapper, UniverseBinder, UniverseBinding, UniverseMap,
};
pub use scheduler::{ConfigStore, RebootRequest, RunLoop, RunLoopBuilder, Service, Stage, Tick, Watchdog};
pub use test_pattern::TestPatternGenerator;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
