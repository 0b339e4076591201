//! ring: smallest end-to-end example for the pdp simulation kernel.
//!
//! Two vans serve eight parcels on a four-junction ring road.  A greedy
//! dispatcher decides where each van goes; every PDP event, a periodic van
//! snapshot, and a per-tick summary are written as CSV.
//!
//! Set `RUST_LOG=debug` to follow every pickup and delivery, or
//! `RUST_LOG=pdp_road=trace` to watch individual path steps.

mod dispatch;
mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pdp_core::{MS_PER_HOUR, ModelId, ObjectId, SimConfig, TimeLapse, TimeWindow};
use pdp_model::{
    DefaultPdpModel, Depot, Parcel, ParcelState, PdpEvent, PdpEventType, PdpModel, PdpObject,
    TimeWindowPolicies, Vehicle,
};
use pdp_output::{CsvWriter, OutputWriter, SimOutputObserver};
use pdp_road::{CachedGraphRoadModel, RoadModel};
use pdp_sim::{SimBuilder, SimObserver};

use dispatch::Greedy;
use network::{EAST, NORTH, SOUTH, WEST, build_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const MINUTE:                u64 = 60_000;
const HOUR:                  u64 = MS_PER_HOUR as u64;
const TICK_LENGTH:           u64 = MINUTE;
const SIM_HOURS:             u64 = 4;
const OUTPUT_INTERVAL_TICKS: u64 = 10; // snapshot every 10 simulated minutes
const VAN_SPEED:             f64 = 40.0; // km/h
const VAN_CAPACITY:          f64 = 3.0;
const OUTPUT_DIR:            &str = "output/ring";

// ── Scenario ──────────────────────────────────────────────────────────────────

fn window(from_min: u64, to_min: u64) -> Result<TimeWindow> {
    Ok(TimeWindow::new(from_min * MINUTE, to_min * MINUTE)?)
}

fn scenario() -> Result<Vec<PdpObject>> {
    let mut objects: Vec<PdpObject> = vec![
        Depot::new(ObjectId(1), WEST, f64::INFINITY).into(),
        Vehicle::new(ObjectId(10), WEST, VAN_SPEED, VAN_CAPACITY).into(),
        Vehicle::new(ObjectId(11), EAST, VAN_SPEED, VAN_CAPACITY).into(),
    ];

    // (id, origin, destination, magnitude, service minutes, pickup window)
    let parcels = [
        (100, NORTH, SOUTH, 1.0, 2, None),
        (101, EAST,  WEST,  2.0, 3, None),
        (102, SOUTH, NORTH, 1.0, 1, None),
        (103, WEST,  EAST,  1.0, 2, Some((30, 90))),
        (104, NORTH, EAST,  1.5, 5, Some((60, 120))),
        (105, SOUTH, WEST,  1.0, 2, Some((45, 240))),
        (106, EAST,  NORTH, 3.0, 4, Some((90, 180))),
        (107, WEST,  SOUTH, 0.5, 1, Some((120, 200))),
    ];
    for (id, from, to, magnitude, minutes, pickup) in parcels {
        let mut builder = Parcel::builder(ObjectId(id), from, to)
            .magnitude(magnitude)
            .service_duration(minutes * MINUTE)
            .delivery_time_window(window(0, SIM_HOURS * 60)?);
        if let Some((a, b)) = pickup {
            builder = builder.pickup_time_window(window(a, b)?);
        }
        objects.push(builder.build()?.into());
    }
    Ok(objects)
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:      SimOutputObserver<W>,
    events:     usize,
    deliveries: usize,
    snapshots:  usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, events: 0, deliveries: 0, snapshots: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_event(&mut self, event: &PdpEvent) {
        self.events += 1;
        if event.event_type == PdpEventType::EndDelivery {
            self.deliveries += 1;
        }
        self.inner.on_event(event);
    }

    fn on_tick_end(&mut self, time: &TimeLapse, events: usize) {
        self.inner.on_tick_end(time, events);
    }

    fn on_snapshot(&mut self, time: u64, road: &dyn RoadModel, pdp: &dyn PdpModel) {
        self.snapshots += pdp.vehicles().len();
        self.inner.on_snapshot(time, road, pdp);
    }

    fn on_sim_end(&mut self, final_time: u64) {
        self.inner.on_sim_end(final_time);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Road network and models.
    let graph = build_network()?;
    info!(nodes = graph.node_count(), connections = graph.connection_count(), "road network built");
    let road = CachedGraphRoadModel::new(graph);
    let pdp = DefaultPdpModel::new(ModelId(0), TimeWindowPolicies::TardyAllowed);

    // 2. Sim config.
    let config = SimConfig {
        start_time:            0,
        tick_length:           TICK_LENGTH,
        total_ticks:           SIM_HOURS * HOUR / TICK_LENGTH,
        time_units_per_hour:   MS_PER_HOUR,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    };

    // 3. Build sim; objects are placed and registered here.
    let mut sim = SimBuilder::new(config, road, pdp)
        .controller(Greedy::default())
        .objects(scenario()?)
        .build()?;

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  pdp_events.csv        : {} rows", obs.events);
    println!("  vehicle_snapshots.csv : {} rows", obs.snapshots);
    println!("  deliveries            : {}", obs.deliveries);
    println!("  cached paths          : {}", sim.road.path_table().len());
    println!();

    println!("{:<8} {:<12}", "Parcel", "State");
    println!("{}", "-".repeat(20));
    for p in sim.pdp.parcels(&ParcelState::ALL) {
        println!("{:<8} {:<12}", p.0, sim.pdp.parcel_state(p)?.as_str());
    }
    println!();

    println!("{:<8} {:<16} {:<6}", "Van", "Position", "Load");
    println!("{}", "-".repeat(30));
    for v in sim.pdp.vehicles() {
        let at = sim.road.position(v)?;
        println!("{:<8} {:<16} {:<6}", v.0, format!("({:.2}, {:.2})", at.x, at.y), sim.pdp.content_size(v)?);
    }

    Ok(())
}
