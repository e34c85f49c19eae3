mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use myrtio_pixel_node::config::DMX_PORT_OFFSET;
    use myrtio_pixel_node::{OutputDriver, OutputMux, OutputSink, Route};

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingEngine {
        name: &'static str,
        ports: u32,
        log: Log,
    }

    impl RecordingEngine {
        fn new(name: &'static str, ports: u32, log: &Log) -> Self {
            Self {
                name,
                ports,
                log: Rc::clone(log),
            }
        }

        fn record(&self, event: String) {
            self.log.borrow_mut().push(format!("{} {}", self.name, event));
        }
    }

    impl OutputDriver for RecordingEngine {
        fn active_ports(&self) -> u32 {
            self.ports
        }

        fn universe_group_size(&self) -> u32 {
            1
        }

        fn write(&mut self, port_index: u32, data: &[u8], update: bool) {
            self.record(format!("write {} {:?} {}", port_index, data, update));
        }

        fn blank(&mut self) {
            self.record("blank".into());
        }

        fn start(&mut self, port_index: u32) {
            self.record(format!("start {}", port_index));
        }

        fn stop(&mut self, port_index: u32) {
            self.record(format!("stop {}", port_index));
        }

        fn sync(&mut self) {
            self.record("sync".into());
        }
    }

    type Mux = OutputMux<RecordingEngine, RecordingEngine>;

    fn composed(log: &Log) -> Mux {
        OutputMux::compose(
            Some(RecordingEngine::new("pixel", 4, log)),
            Some(RecordingEngine::new("dmx", 2, log)),
        )
    }

    #[test]
    fn test_compose_variants() {
        let log = Log::default();
        let pixel = || Some(RecordingEngine::new("pixel", 4, &log));
        let dmx = || Some(RecordingEngine::new("dmx", 2, &log));

        assert!(matches!(Mux::compose(pixel(), dmx()), OutputMux::Composed { .. }));
        assert!(matches!(Mux::compose(pixel(), None), OutputMux::Pixel(_)));
        assert!(matches!(Mux::compose(None, dmx()), OutputMux::Dmx(_)));
        assert!(matches!(Mux::compose(None, None), OutputMux::Empty));
    }

    #[test]
    fn test_route_composed() {
        let log = Log::default();
        let mux = composed(&log);

        assert_eq!(mux.route(0), Some(Route::Pixel(0)));
        assert_eq!(mux.route(DMX_PORT_OFFSET - 1), Some(Route::Pixel(DMX_PORT_OFFSET - 1)));
        assert_eq!(mux.route(DMX_PORT_OFFSET), Some(Route::Dmx(0)));
        assert_eq!(mux.route(DMX_PORT_OFFSET + 1), Some(Route::Dmx(1)));
        assert_eq!(mux.route(DMX_PORT_OFFSET + 2), None);
    }

    #[test]
    fn test_writes_reach_local_ports() {
        let log = Log::default();
        let mut mux = composed(&log);

        mux.write(5, &[1, 2], true);
        mux.write(DMX_PORT_OFFSET + 1, &[9], false);
        mux.write(DMX_PORT_OFFSET + 7, &[3], true);

        assert_eq!(
            *log.borrow(),
            vec!["pixel write 5 [1, 2] true", "dmx write 1 [9] false"]
        );
    }

    #[test]
    fn test_start_stop_follow_route() {
        let log = Log::default();
        let mut mux = composed(&log);

        mux.start(3);
        mux.stop(DMX_PORT_OFFSET);

        assert_eq!(*log.borrow(), vec!["pixel start 3", "dmx stop 0"]);
    }

    #[test]
    fn test_pixel_range_dropped_without_pixel_engine() {
        let log = Log::default();
        let mut mux = Mux::compose(None, Some(RecordingEngine::new("dmx", 2, &log)));

        for port_index in 0..DMX_PORT_OFFSET {
            mux.write(port_index, &[255], true);
        }
        mux.write(DMX_PORT_OFFSET, &[1], true);

        assert_eq!(*log.borrow(), vec!["dmx write 0 [1] true"]);
        assert!(!mux.has_pixel());
    }

    #[test]
    fn test_dmx_range_dropped_without_dmx_engine() {
        let log = Log::default();
        let mut mux = Mux::compose(Some(RecordingEngine::new("pixel", 4, &log)), None);

        mux.write(DMX_PORT_OFFSET, &[1], true);
        mux.write(DMX_PORT_OFFSET + 1, &[1], true);

        assert!(log.borrow().is_empty());
        assert_eq!(mux.route(DMX_PORT_OFFSET), None);
    }

    #[test]
    fn test_empty_discards_everything() {
        let mut mux = Mux::compose(None, None);

        mux.write(0, &[1], true);
        mux.write(DMX_PORT_OFFSET, &[1], true);
        mux.sync();
        mux.blackout();

        assert_eq!(mux.active_ports(), 0);
        assert_eq!(mux.route(0), None);
    }

    #[test]
    fn test_blackout_blanks_pixel_only() {
        let log = Log::default();
        let mut mux = composed(&log);

        mux.blackout();

        assert_eq!(*log.borrow(), vec!["pixel blank"]);
    }

    #[test]
    fn test_sync_and_active_ports() {
        let log = Log::default();
        let mut mux = composed(&log);

        mux.sync();

        assert_eq!(*log.borrow(), vec!["pixel sync", "dmx sync"]);
        assert_eq!(mux.active_ports(), 6);
    }
}
