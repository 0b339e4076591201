//! Integration tests for pdp-output.

#[cfg(test)]
mod csv_tests {
    use pdp_model::{PdpEventType, VehicleState};
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, EVENTS_FILE, SNAPSHOTS_FILE, SUMMARIES_FILE};
    use crate::row::{EventRow, TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(EVENTS_FILE).exists());
        assert!(dir.path().join(SNAPSHOTS_FILE).exists());
        assert!(dir.path().join(SUMMARIES_FILE).exists());
    }

    #[test]
    fn missing_output_dir_is_created() {
        let dir = tmp();
        let nested = dir.path().join("run-1");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join(EVENTS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir, EVENTS_FILE), ["time", "event", "issuer", "parcel", "vehicle"]);
        assert_eq!(
            headers(&dir, SNAPSHOTS_FILE),
            ["vehicle", "time", "x", "y", "state", "load", "capacity", "parcels"]
        );
        assert_eq!(headers(&dir, SUMMARIES_FILE), ["tick", "start", "events", "pickups", "unloads"]);
    }

    #[test]
    fn absent_ids_are_empty_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[
            EventRow { time: 0, event_type: PdpEventType::NewVehicle, issuer: 0, parcel: None, vehicle: Some(1) },
            EventRow { time: 5, event_type: PdpEventType::EndPickup, issuer: 2, parcel: Some(10), vehicle: Some(1) },
        ])
        .unwrap();
        w.finish().unwrap();

        let rows = read(&dir, EVENTS_FILE);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "NEW_VEHICLE");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][4], "1");
        assert_eq!(&rows[1][0], "5");
        assert_eq!(&rows[1][2], "2");
        assert_eq!(&rows[1][3], "10");
    }

    #[test]
    fn snapshot_row_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[VehicleSnapshotRow {
            vehicle:  3,
            time:     900,
            x:        2.5,
            y:        0.0,
            state:    VehicleState::PickingUp,
            load:     1.5,
            capacity: 4.0,
            parcels:  2,
        }])
        .unwrap();
        w.finish().unwrap();

        let rows = read(&dir, SNAPSHOTS_FILE);
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["3", "900", "2.5", "0", "picking_up", "1.5", "4", "2"]);
    }

    #[test]
    fn tick_summary_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 3, start: 2700, events: 4, pickups: 1, unloads: 2 })
            .unwrap();
        w.finish().unwrap();

        let rows = read(&dir, SUMMARIES_FILE);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["3", "2700", "4", "1", "2"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use pdp_core::{MS_PER_HOUR, ModelId, ObjectId, Point, SimConfig, TimeLapse};
    use pdp_graph::Graph;
    use pdp_model::{DefaultPdpModel, Parcel, PdpEvent, PdpEventType, PdpModel, PdpObject, Vehicle};
    use pdp_road::{GraphRoadModel, RoadModel};
    use pdp_sim::{SimBuilder, SimObserver, SimResult, VehicleContext};
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, EVENTS_FILE, SNAPSHOTS_FILE, SUMMARIES_FILE};
    use crate::observer::{SimOutputObserver, vehicle_rows};
    use crate::row::{EventRow, TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    const A: Point = Point::new(0.0, 0.0);
    const B: Point = Point::new(10.0, 0.0);
    const V: ObjectId = ObjectId(1);
    const P: ObjectId = ObjectId(10);
    const T: u64 = (MS_PER_HOUR / 4.0) as u64;

    fn road() -> GraphRoadModel {
        let mut g = Graph::new();
        g.add_road(A, B, None).unwrap();
        GraphRoadModel::new(g)
    }

    fn objects() -> Vec<PdpObject> {
        vec![
            Vehicle::new(V, A, 10.0, 3.0).into(),
            Parcel::builder(P, A, B).build().unwrap().into(),
        ]
    }

    /// Pick the parcel up where it stands, carry it to B, deliver.
    fn shuttle(v: ObjectId, ctx: &mut VehicleContext<'_>) -> SimResult<()> {
        if ctx.pdp.container_contains(v, P)? {
            if ctx.road.position(v)? == B {
                ctx.deliver(v, P)?;
            } else {
                ctx.move_to(v, B)?;
            }
        } else if ctx.road.contains_object(P) {
            ctx.pickup(v, P)?;
        }
        Ok(())
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            start_time:            0,
            tick_length:           T,
            total_ticks:           8,
            time_units_per_hour:   MS_PER_HOUR,
            output_interval_ticks: 2,
        };
        let mut sim = SimBuilder::new(config, road(), DefaultPdpModel::default())
            .controller(shuttle)
            .objects(objects())
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let events = read(&dir, EVENTS_FILE);
        let kinds: Vec<&str> = events.iter().map(|r| r.get(1).unwrap()).collect();
        assert_eq!(
            kinds,
            ["NEW_VEHICLE", "NEW_PARCEL", "START_PICKUP", "END_PICKUP", "START_DELIVERY", "END_DELIVERY"]
        );

        // output_interval = 2 → snapshots at ticks 0, 2, 4, 6 for one vehicle.
        let snaps = read(&dir, SNAPSHOTS_FILE);
        assert_eq!(snaps.len(), 4);
        assert_eq!(&snaps[0][2], "0");
        assert_eq!(&snaps[0][7], "1", "parcel on board after tick 0");
        assert_eq!(&snaps[1][2], "5");

        let summaries = read(&dir, SUMMARIES_FILE);
        assert_eq!(summaries.len(), 8);
        let total = |col: usize| summaries.iter().map(|r| r[col].parse::<u64>().unwrap()).sum::<u64>();
        assert_eq!(total(2), 6);
        assert_eq!(total(3), 1);
        assert_eq!(total(4), 1);
    }

    fn read(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn vehicle_rows_reflect_models() {
        let mut road = road();
        let mut pdp = DefaultPdpModel::default();
        for mut object in objects() {
            road.register(&mut object).unwrap();
            road.add_object_at(object.id(), object.initial_position()).unwrap();
            pdp.register(object).unwrap();
        }
        let rows = vehicle_rows(42, &road, &pdp).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vehicle, 1);
        assert_eq!(rows[0].time, 42);
        assert_eq!((rows[0].x, rows[0].y), (0.0, 0.0));
        assert_eq!(rows[0].capacity, 3.0);
        assert_eq!(rows[0].parcels, 0);
    }

    #[test]
    fn vehicle_rows_fail_for_unplaced_vehicle() {
        let road = road();
        let mut pdp = DefaultPdpModel::default();
        pdp.register(Vehicle::new(V, A, 10.0, 3.0).into()).unwrap();
        let err = vehicle_rows(0, &road, &pdp).unwrap_err();
        assert!(matches!(err, OutputError::Road(_)), "{err}");
    }

    /// Fails every write; counts how often it was asked.
    #[derive(Default)]
    struct Broken {
        calls: usize,
    }

    impl OutputWriter for Broken {
        fn write_events(&mut self, _rows: &[EventRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(std::io::Error::other("disk full").into())
        }

        fn write_snapshots(&mut self, _rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            self.calls += 1;
            Err(std::io::Error::other("disk full").into())
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.calls += 1;
            Err(std::io::Error::other("summary lost").into())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept_once() {
        let mut obs = SimOutputObserver::new(Broken::default());
        let lapse = TimeLapse::new(0, T).unwrap();
        obs.on_event(&PdpEvent {
            event_type: PdpEventType::NewParcel,
            issuer:     ModelId(0),
            time:       0,
            parcel:     Some(P),
            vehicle:    None,
        });
        obs.on_tick_end(&lapse, 1);
        obs.on_tick_end(&lapse, 0);

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk full"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 2);
    }
}
