//! Unit tests for pdp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ModelId, ObjectId};

    #[test]
    fn index_roundtrip() {
        let id = ObjectId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ObjectId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ObjectId(0) < ObjectId(1));
        assert!(ModelId(3) > ModelId(2));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ObjectId::INVALID.0, u32::MAX);
        assert_eq!(ModelId::INVALID.0, u16::MAX);
        assert!(!ObjectId::INVALID.is_valid());
        assert!(ObjectId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(ObjectId(7).to_string(), "ObjectId(7)");
        assert_eq!(ModelId(1).to_string(), "ModelId(1)");
    }
}

#[cfg(test)]
mod geo {
    use std::collections::HashSet;

    use crate::Point;

    #[test]
    fn distance_pythagoras() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_2(b), 25.0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, -4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, -2.0));
    }

    #[test]
    fn negative_zero_equals_zero() {
        let a = Point::new(0.0, -0.0);
        let b = Point::new(-0.0, 0.0);
        assert_eq!(a, b);
        let set: HashSet<Point> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1, "-0.0 and 0.0 must hash identically");
    }

    #[test]
    fn usable_as_map_key() {
        let mut set = HashSet::new();
        set.insert(Point::new(1.0, 2.0));
        assert!(set.contains(&Point::from((1.0, 2.0))));
        assert!(!set.contains(&Point::new(2.0, 1.0)));
    }
}

#[cfg(test)]
mod kind {
    use crate::ObjectKind;

    #[test]
    fn containers() {
        assert!(ObjectKind::Vehicle.is_container());
        assert!(ObjectKind::Depot.is_container());
        assert!(!ObjectKind::Parcel.is_container());
        assert!(!ObjectKind::Agent.is_container());
    }

    #[test]
    fn display() {
        assert_eq!(ObjectKind::Parcel.to_string(), "parcel");
        assert_eq!(ObjectKind::ALL.len(), 4);
    }
}

#[cfg(test)]
mod time_lapse {
    use crate::{CoreError, TimeLapse};

    #[test]
    fn rejects_empty_interval() {
        assert!(matches!(TimeLapse::new(5, 5), Err(CoreError::InvalidTimeLapse { .. })));
        assert!(TimeLapse::new(6, 5).is_err());
    }

    #[test]
    fn consume_tracks_current_time() {
        let mut t = TimeLapse::new(100, 200).unwrap();
        assert_eq!(t.tick_length(), 100);
        assert_eq!(t.time(), 100);
        t.consume(30).unwrap();
        assert_eq!(t.time_left(), 70);
        assert_eq!(t.time(), 130);
        assert_eq!(t.time_consumed(), 30);
        assert!(t.has_time_left());
    }

    #[test]
    fn consume_too_much_leaves_lapse_unchanged() {
        let mut t = TimeLapse::new(0, 10).unwrap();
        t.consume(4).unwrap();
        let err = t.consume(7).unwrap_err();
        assert_eq!(err, CoreError::InsufficientTime { requested: 7, left: 6 });
        assert_eq!(t.time_left(), 6);
    }

    #[test]
    fn consume_all_and_renew() {
        let mut t = TimeLapse::new(0, 10).unwrap();
        t.consume_all();
        assert!(!t.has_time_left());
        assert_eq!(t.time(), 10);
        let fresh = t.renewed();
        assert_eq!(fresh.time_left(), 10);
        assert_eq!(fresh.start(), 0);
    }

    #[test]
    fn is_in_half_open() {
        let t = TimeLapse::new(10, 20).unwrap();
        assert!(t.is_in(10));
        assert!(t.is_in(19));
        assert!(!t.is_in(20));
        assert!(!t.is_in(9));
    }
}

#[cfg(test)]
mod time_window {
    use crate::TimeWindow;

    #[test]
    fn half_open_membership() {
        let tw = TimeWindow::new(100, 200).unwrap();
        assert!(!tw.is_in(99));
        assert!(tw.is_in(100));
        assert!(tw.is_in(199));
        assert!(!tw.is_in(200));
        assert!(tw.is_before_start(99));
        assert!(tw.is_after_start(250));
        assert!(tw.is_after_end(200));
        assert_eq!(tw.length(), 100);
    }

    #[test]
    fn rejects_reversed() {
        assert!(TimeWindow::new(10, 5).is_err());
        assert!(TimeWindow::new(10, 10).is_ok());
    }

    #[test]
    fn always_is_default() {
        assert_eq!(TimeWindow::default(), TimeWindow::ALWAYS);
        assert!(TimeWindow::ALWAYS.is_in(0));
        assert!(TimeWindow::ALWAYS.is_in(u64::MAX - 1));
    }
}

#[cfg(test)]
mod clock {
    use crate::{SimClock, SimConfig, MS_PER_HOUR};

    #[test]
    fn advance_and_lapse() {
        let mut clock = SimClock::new(0, 1_000);
        let lapse = clock.lapse().unwrap();
        assert_eq!((lapse.start(), lapse.end()), (0, 1_000));
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_time, 2_000);
        assert_eq!(clock.ticks_elapsed(), 2);
        assert_eq!(clock.lapse().unwrap().start(), 2_000);
    }

    #[test]
    fn zero_tick_length_has_no_lapse() {
        let clock = SimClock::new(0, 0);
        assert!(clock.lapse().is_err());
        assert_eq!(clock.ticks_elapsed(), 0);
    }

    #[test]
    fn config_end_time_and_validation() {
        let cfg = SimConfig {
            start_time:            500,
            tick_length:           100,
            total_ticks:           10,
            time_units_per_hour:   MS_PER_HOUR,
            output_interval_ticks: 1,
        };
        assert_eq!(cfg.end_time(), 1_500);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.make_clock().current_time, 500);

        let bad = SimConfig { tick_length: 0, ..cfg.clone() };
        assert!(bad.validate().is_err());
        let bad_units = SimConfig { time_units_per_hour: 0.0, ..cfg };
        assert!(bad_units.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }
}
