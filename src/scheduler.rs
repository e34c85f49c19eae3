//! Cooperative run loop.
//!
//! The node has one thread of control and no OS scheduler. Every subsystem
//! implements [`Service`] and is serviced exactly once per iteration, in
//! the fixed [`Stage`] order. A service must poll for work and return; a
//! blocking service starves the watchdog and the node gets reset by
//! hardware.
//!
//! # Usage
//!
//! ```ignore
//! let run_loop = RunLoop::builder(&mut watchdog)
//!     .network(&mut network)
//!     .bridge(&mut bridge_stage)
//!     .config_store(&mut store)
//!     .display(&mut display)
//!     .reboot_on(&REBOOT)
//!     .build();
//!
//! run_loop.run(|| hardware_reset());
//! ```

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Instant;

/// A subsystem serviced by the run loop
///
/// `run` is called once per iteration and must return after a small,
/// bounded amount of work.
pub trait Service {
    /// Called once before the first iteration
    fn start(&mut self) {}

    /// Poll for work and return
    fn run(&mut self, now: Instant);

    /// Bring outputs into a safe state before a reset
    fn on_reboot(&mut self) {}
}

/// Hardware watchdog
pub trait Watchdog {
    fn start(&mut self);

    fn feed(&mut self);
}

/// Persistent configuration store with deferred writes
pub trait ConfigStore {
    /// Write out a bounded part of the pending changes
    ///
    /// Returns true while more work is pending.
    fn flush(&mut self) -> bool;

    /// Flush until nothing is pending
    fn drain(&mut self) {
        while self.flush() {}
    }
}

/// Run loop stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stage {
    Watchdog,
    Network,
    Bridge,
    RemoteConfig,
    ConfigStore,
    TestPattern,
    DmxConfig,
    Discovery,
    Llrp,
    Http,
    Display,
    StatusLed,
}

impl Stage {
    pub const COUNT: usize = 12;

    pub const ALL: [Stage; Self::COUNT] = [
        Stage::Watchdog,
        Stage::Network,
        Stage::Bridge,
        Stage::RemoteConfig,
        Stage::ConfigStore,
        Stage::TestPattern,
        Stage::DmxConfig,
        Stage::Discovery,
        Stage::Llrp,
        Stage::Http,
        Stage::Display,
        Stage::StatusLed,
    ];

    /// Stages notified on reboot: pixel outputs first, then the bridge
    const TEARDOWN: [Stage; 2] = [Stage::TestPattern, Stage::Bridge];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of one run loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// A reboot was requested during the iteration
    Reboot,
}

/// Reboot request latch
///
/// Safe to set from interrupt context or from any service.
pub struct RebootRequest {
    requested: Mutex<Cell<bool>>,
}

impl RebootRequest {
    pub const fn new() -> Self {
        Self {
            requested: Mutex::new(Cell::new(false)),
        }
    }

    pub fn request(&self) {
        critical_section::with(|cs| self.requested.borrow(cs).set(true));
    }

    pub fn is_requested(&self) -> bool {
        critical_section::with(|cs| self.requested.borrow(cs).get())
    }

    /// Clear the request, returning whether it was set
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.requested.borrow(cs).replace(false))
    }
}

impl Default for RebootRequest {
    fn default() -> Self {
        Self::new()
    }
}

enum Slot<'a> {
    Watchdog(&'a mut dyn Watchdog),
    Store(&'a mut dyn ConfigStore),
    Service(&'a mut dyn Service),
}

impl Slot<'_> {
    fn service(&mut self, now: Instant) {
        match self {
            Slot::Watchdog(watchdog) => watchdog.feed(),
            Slot::Store(store) => {
                store.flush();
            }
            Slot::Service(service) => service.run(now),
        }
    }
}

/// Collects the node subsystems into a [`RunLoop`]
///
/// Registration order does not matter; the loop always runs in
/// [`Stage`] order. Subsystems that are not configured are simply not
/// registered.
pub struct RunLoopBuilder<'a> {
    slots: [Option<Slot<'a>>; Stage::COUNT],
    reboot: Option<&'a RebootRequest>,
}

impl<'a> RunLoopBuilder<'a> {
    fn service(mut self, stage: Stage, service: &'a mut dyn Service) -> Self {
        self.slots[stage.index()] = Some(Slot::Service(service));
        self
    }

    #[must_use]
    pub fn network(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::Network, service)
    }

    #[must_use]
    pub fn bridge(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::Bridge, service)
    }

    #[must_use]
    pub fn remote_config(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::RemoteConfig, service)
    }

    #[must_use]
    pub fn config_store(mut self, store: &'a mut dyn ConfigStore) -> Self {
        self.slots[Stage::ConfigStore.index()] = Some(Slot::Store(store));
        self
    }

    /// Register the test pattern generator, only when a pattern is active
    #[must_use]
    pub fn test_pattern(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::TestPattern, service)
    }

    /// Register the DMX configuration responder, only when DMX universes
    /// are bound
    #[must_use]
    pub fn dmx_config(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::DmxConfig, service)
    }

    #[must_use]
    pub fn discovery(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::Discovery, service)
    }

    #[must_use]
    pub fn llrp(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::Llrp, service)
    }

    #[must_use]
    pub fn http(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::Http, service)
    }

    #[must_use]
    pub fn display(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::Display, service)
    }

    #[must_use]
    pub fn status_led(self, service: &'a mut dyn Service) -> Self {
        self.service(Stage::StatusLed, service)
    }

    /// Check this latch at the end of every iteration
    #[must_use]
    pub fn reboot_on(mut self, request: &'a RebootRequest) -> Self {
        self.reboot = Some(request);
        self
    }

    pub fn build(self) -> RunLoop<'a> {
        RunLoop {
            slots: self.slots,
            reboot: self.reboot,
            iterations: 0,
        }
    }
}

/// The node main loop
pub struct RunLoop<'a> {
    slots: [Option<Slot<'a>>; Stage::COUNT],
    reboot: Option<&'a RebootRequest>,
    iterations: u32,
}

impl<'a> RunLoop<'a> {
    /// Start building a run loop. The watchdog is the only mandatory stage.
    pub fn builder(watchdog: &'a mut dyn Watchdog) -> RunLoopBuilder<'a> {
        let mut slots = [const { None }; Stage::COUNT];
        slots[Stage::Watchdog.index()] = Some(Slot::Watchdog(watchdog));
        RunLoopBuilder {
            slots,
            reboot: None,
        }
    }

    /// Check whether a stage has a registered subsystem
    pub fn has_stage(&self, stage: Stage) -> bool {
        self.slots[stage.index()].is_some()
    }

    /// Completed iterations, wrapping
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Prepare for the first iteration
    ///
    /// Drains the config store, starts every service in stage order and
    /// starts the watchdog last.
    pub fn start(&mut self) {
        if let Some(Slot::Store(store)) = &mut self.slots[Stage::ConfigStore.index()] {
            store.drain();
        }
        for slot in self.slots.iter_mut().flatten() {
            if let Slot::Service(service) = slot {
                service.start();
            }
        }
        if let Some(Slot::Watchdog(watchdog)) = &mut self.slots[Stage::Watchdog.index()] {
            watchdog.start();
        }
    }

    /// Service every registered stage once
    pub fn run_once(&mut self, now: Instant) -> Tick {
        for slot in self.slots.iter_mut().flatten() {
            slot.service(now);
        }
        self.iterations = self.iterations.wrapping_add(1);

        match self.reboot {
            Some(request) if request.is_requested() => Tick::Reboot,
            _ => Tick::Continue,
        }
    }

    /// Put outputs in a safe state: blank pixels, then stop the bridge
    pub fn teardown(&mut self) {
        for stage in Stage::TEARDOWN {
            if let Some(Slot::Service(service)) = &mut self.slots[stage.index()] {
                service.on_reboot();
            }
        }
    }

    /// Run forever
    ///
    /// The only way out is a reboot request, which tears the outputs down
    /// and hands over to `reset`.
    pub fn run(mut self, reset: fn() -> !) -> ! {
        self.start();
        loop {
            if self.run_once(Instant::now()) == Tick::Reboot {
                log::info!("reboot requested");
                self.teardown();
                reset();
            }
        }
    }
}
