mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_pixel_node::color::{Rgb, rgb_from_u32, wheel};
    use myrtio_pixel_node::pattern::{
        ColorWipePattern, FadePattern, PatternRenderer, RainbowCyclePattern, ScannerPattern,
        TheaterChasePattern,
    };
    use myrtio_pixel_node::{OutputDriver, Pattern, PixelStrip, Service, TestPatternGenerator};

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[derive(Debug, Default)]
    struct FakeStrip {
        ports: u32,
        pixels: u32,
        busy: bool,
        set_calls: Vec<(u32, u32)>,
        updates: u32,
        blanks: u32,
        writes: u32,
    }

    impl FakeStrip {
        fn new(ports: u32, pixels: u32) -> Self {
            Self {
                ports,
                pixels,
                ..Self::default()
            }
        }
    }

    impl OutputDriver for FakeStrip {
        fn active_ports(&self) -> u32 {
            self.ports
        }

        fn universe_group_size(&self) -> u32 {
            1
        }

        fn write(&mut self, _port_index: u32, _data: &[u8], _update: bool) {
            self.writes += 1;
        }

        fn blank(&mut self) {
            self.blanks += 1;
        }
    }

    impl PixelStrip for FakeStrip {
        fn pixel_count(&self) -> u32 {
            self.pixels
        }

        fn set_pixel(&mut self, port: u32, index: u32, _color: Rgb) {
            self.set_calls.push((port, index));
        }

        fn is_updating(&self) -> bool {
            self.busy
        }

        fn update(&mut self) {
            self.updates += 1;
        }
    }

    #[test]
    fn test_pattern_ids() {
        assert_eq!(Pattern::from_raw(0), Some(Pattern::None));
        assert_eq!(Pattern::from_raw(4), Some(Pattern::Scanner));
        assert_eq!(Pattern::from_raw(6), None);
        assert_eq!(Pattern::Fade.as_str(), "fade");
        assert_eq!(
            Pattern::parse_from_str("theater_chase"),
            Some(Pattern::TheaterChase)
        );
        assert_eq!(Pattern::parse_from_str("strobe"), None);
    }

    #[test]
    fn test_none_is_inactive() {
        assert!(!Pattern::None.is_active());
        assert!(Pattern::None.to_slot().is_none());
        assert!(Pattern::ColorWipe.is_active());
        assert_eq!(
            Pattern::ColorWipe.to_slot().map(|slot| slot.id()),
            Some(Pattern::ColorWipe)
        );
    }

    #[test]
    fn test_rainbow_starts_at_red() {
        let mut leds = [BLACK; 8];
        RainbowCyclePattern::default().render(Instant::from_millis(0), &mut leds);
        assert_eq!(leds[0], wheel(0, 255));
        assert_eq!(wheel(0, 255), Rgb { r: 255, g: 0, b: 0 });
        assert_ne!(leds[0], leds[4]);
    }

    #[test]
    fn test_rainbow_value_dims_wheel() {
        let mut leds = [BLACK; 4];
        RainbowCyclePattern::default()
            .with_value(0)
            .render(Instant::from_millis(0), &mut leds);
        assert_eq!(leds, [BLACK; 4]);
    }

    #[test]
    fn test_rainbow_rotates() {
        let mut pattern = RainbowCyclePattern::default().with_cycle_duration(Duration::from_millis(1000));
        let mut first = [BLACK; 4];
        let mut later = [BLACK; 4];
        pattern.render(Instant::from_millis(0), &mut first);
        pattern.render(Instant::from_millis(250), &mut later);
        assert_eq!(later[0], first[1]);
    }

    #[test]
    fn test_theater_chase_marches() {
        let on = rgb_from_u32(0x00_7F_7F);
        let mut leds = [BLACK; 6];
        let mut pattern = TheaterChasePattern::default();

        pattern.render(Instant::from_millis(0), &mut leds);
        assert_eq!(leds, [on, BLACK, BLACK, on, BLACK, BLACK]);

        pattern.render(Instant::from_millis(100), &mut leds);
        assert_eq!(leds, [BLACK, on, BLACK, BLACK, on, BLACK]);
    }

    #[test]
    fn test_color_wipe_fills_then_switches_color() {
        let red = rgb_from_u32(0x64_00_00);
        let green = rgb_from_u32(0x00_64_00);
        let blue = rgb_from_u32(0x00_00_64);
        let mut leds = [BLACK; 4];
        let mut pattern = ColorWipePattern::default();

        pattern.render(Instant::from_millis(0), &mut leds);
        assert_eq!(leds, [red, blue, blue, blue]);

        pattern.render(Instant::from_millis(150), &mut leds);
        assert_eq!(leds, [red; 4]);

        pattern.render(Instant::from_millis(200), &mut leds);
        assert_eq!(leds, [green, red, red, red]);
    }

    #[test]
    fn test_scanner_bounces() {
        let positions: Vec<usize> = (0..8).map(|step| ScannerPattern::position(step, 4)).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 2, 1, 0, 1]);
        assert_eq!(ScannerPattern::position(5, 1), 0);
    }

    #[test]
    fn test_scanner_tail_fades() {
        let mut leds = [BLACK; 10];
        ScannerPattern::default().render(Instant::from_millis(0), &mut leds);
        assert_eq!(leds[0], Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(leds[1], Rgb { r: 127, g: 0, b: 0 });
        assert_eq!(leds[9], BLACK);
    }

    #[test]
    fn test_fade_breathes() {
        let pattern = FadePattern::default();
        assert_eq!(pattern.amount_at(Instant::from_millis(0)), 0);
        assert_eq!(pattern.amount_at(Instant::from_millis(2_000)), 255);
        assert_eq!(pattern.amount_at(Instant::from_millis(4_000)), 0);
    }

    #[test]
    fn test_generator_rejects_none() {
        let strip = FakeStrip::new(2, 8);
        let result = TestPatternGenerator::<_, 8>::new(Pattern::None, strip, 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_generator_paces_frames() {
        let strip = FakeStrip::new(2, 8);
        let mut generator =
            TestPatternGenerator::<_, 8>::new(Pattern::RainbowCycle, strip, 2).unwrap();

        assert!(generator.tick(Instant::from_millis(1_000)));
        assert_eq!(generator.strip().set_calls.len(), 16);
        assert_eq!(generator.strip().updates, 1);

        assert!(!generator.tick(Instant::from_millis(1_005)));
        assert!(generator.tick(Instant::from_millis(1_020)));
        assert_eq!(generator.frames(), 2);
        assert_eq!(generator.strip().writes, 0);
    }

    #[test]
    fn test_generator_waits_for_busy_strip() {
        let mut strip = FakeStrip::new(1, 4);
        strip.busy = true;
        let mut generator =
            TestPatternGenerator::<_, 4>::new(Pattern::Fade, strip, 1).unwrap();

        assert!(!generator.tick(Instant::from_millis(1_000)));
        generator.strip_mut().busy = false;
        assert!(generator.tick(Instant::from_millis(1_001)));
    }

    #[test]
    fn test_generator_limits_ports_and_pixels() {
        let strip = FakeStrip::new(4, 10);
        let mut generator =
            TestPatternGenerator::<_, 4>::new(Pattern::Scanner, strip, 1).unwrap();

        generator.tick(Instant::from_millis(0));

        assert_eq!(
            generator.strip().set_calls,
            vec![(0, 0), (0, 1), (0, 2), (0, 3)]
        );
    }

    #[test]
    fn test_generator_blanks_on_reboot() {
        let strip = FakeStrip::new(1, 4);
        let mut generator =
            TestPatternGenerator::<_, 4>::new(Pattern::TheaterChase, strip, 1).unwrap();

        generator.on_reboot();

        assert_eq!(generator.into_strip().blanks, 1);
    }

    #[test]
    fn test_generator_runs_as_service() {
        let strip = FakeStrip::new(1, 4);
        let mut generator =
            TestPatternGenerator::<_, 4>::new(Pattern::ColorWipe, strip, 1).unwrap();

        generator.run(Instant::from_millis(500));

        assert_eq!(generator.pattern(), Pattern::ColorWipe);
        assert_eq!(generator.strip().updates, 1);
    }
}
