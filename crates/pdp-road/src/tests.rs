//! Unit tests for pdp-road.

#[cfg(test)]
mod helpers {
    use pdp_core::{MS_PER_HOUR, ObjectId, ObjectKind, Point, TimeLapse};
    use pdp_graph::Graph;

    use crate::{RoadModel, RoadUser};

    pub const SW: Point = Point::new(0.0, 0.0);
    pub const SE: Point = Point::new(10.0, 0.0);
    pub const NE: Point = Point::new(10.0, 10.0);
    pub const NW: Point = Point::new(0.0, 10.0);

    pub const HOUR: u64 = MS_PER_HOUR as u64;

    /// One-way ring `SW → SE → NE → NW → SW`, every connection 10 long.
    pub fn ring() -> Graph {
        let mut g = Graph::new();
        g.add_connection(SW, SE).unwrap();
        g.add_connection(SE, NE).unwrap();
        g.add_connection(NE, NW).unwrap();
        g.add_connection(NW, SW).unwrap();
        g
    }

    pub fn hours(h: u64) -> TimeLapse {
        TimeLapse::new(0, h * HOUR).unwrap()
    }

    /// Road user with an arbitrary kind.
    pub struct Thing {
        pub id:    ObjectId,
        pub kind:  ObjectKind,
        pub speed: Option<f64>,
        pub nodes_seen: Option<usize>,
        pub model_size: Option<usize>,
    }

    impl Thing {
        pub fn new(id: u32, kind: ObjectKind, speed: Option<f64>) -> Self {
            Self { id: ObjectId(id), kind, speed, nodes_seen: None, model_size: None }
        }
    }

    impl RoadUser for Thing {
        fn id(&self) -> ObjectId {
            self.id
        }
        fn kind(&self) -> ObjectKind {
            self.kind
        }
        fn speed(&self) -> Option<f64> {
            self.speed
        }
        fn on_road_registered(&mut self, road: &dyn RoadModel) {
            self.nodes_seen = Some(road.graph().node_count());
            self.model_size = Some(std::mem::size_of_val(road));
        }
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod location {
    use pdp_core::Point;
    use super::helpers::*;
    use crate::{Location, RoadError};

    #[test]
    fn on_edge_collapses_at_both_ends() {
        let g = ring();
        assert_eq!(Location::on_edge(&g, SW, SE, 10.0).unwrap(), Location::AtNode(SE));
        assert_eq!(Location::on_edge(&g, SW, SE, 0.0).unwrap(), Location::AtNode(SW));
        let mid = Location::on_edge(&g, SW, SE, 2.5).unwrap();
        assert!(mid.is_on_edge());
        assert_eq!(mid.point(&g).unwrap(), Point::new(2.5, 0.0));
        assert_eq!(mid.next_node(), SE);
    }

    #[test]
    fn on_edge_rejects_out_of_range() {
        let g = ring();
        assert!(matches!(
            Location::on_edge(&g, SW, SE, 10.5),
            Err(RoadError::InvalidLocation(_))
        ));
        assert!(Location::on_edge(&g, SW, SE, -1.0).is_err());
        assert!(Location::on_edge(&g, SW, SE, f64::NAN).is_err());
        // Reverse direction is not a connection.
        assert!(matches!(Location::on_edge(&g, SE, SW, 1.0), Err(RoadError::Graph(_))));
    }
}

// ── Registration & placement ──────────────────────────────────────────────────

#[cfg(test)]
mod placement {
    use pdp_core::{ErrorClass, ObjectId, ObjectKind, Point};
    use super::helpers::*;
    use crate::{Agent, GraphRoadModel, Location, RoadError, RoadModel};

    #[test]
    fn registration_calls_back_once() {
        let mut road = GraphRoadModel::new(ring());
        let mut t = Thing::new(1, ObjectKind::Vehicle, Some(5.0));
        road.register(&mut t).unwrap();
        assert_eq!(t.nodes_seen, Some(4));
        assert_eq!(t.model_size, Some(std::mem::size_of::<GraphRoadModel>()));
        assert!(road.is_registered(t.id));
        assert!(!road.contains_object(t.id), "registration gives no location");

        let err = road.register(&mut t).unwrap_err();
        assert_eq!(err, RoadError::AlreadyRegistered(t.id));
        assert_eq!(err.class(), ErrorClass::InvalidState);
    }

    #[test]
    fn invalid_speed_rejected() {
        let mut road = GraphRoadModel::new(ring());
        let mut a = Agent::moving(ObjectId(1), 0.0);
        assert!(matches!(road.register(&mut a), Err(RoadError::InvalidSpeed { .. })));
        assert!(!road.is_registered(ObjectId(1)));
    }

    #[test]
    fn add_requires_registration_and_node() {
        let mut road = GraphRoadModel::new(ring());
        let id = ObjectId(1);
        assert_eq!(road.add_object_at(id, SW), Err(RoadError::NotRegistered(id)));

        road.register(&mut Agent::stationary(id)).unwrap();
        assert!(matches!(
            road.add_object_at(id, Point::new(5.0, 5.0)),
            Err(RoadError::InvalidLocation(_))
        ));
        road.add_object_at(id, SW).unwrap();
        assert_eq!(road.add_object_at(id, SE), Err(RoadError::AlreadyPlaced(id)));
        assert_eq!(road.position(id).unwrap(), SW);
        assert_eq!(road.location(id).unwrap(), Location::AtNode(SW));
    }

    #[test]
    fn remove_keeps_registration() {
        let mut road = GraphRoadModel::new(ring());
        let id = ObjectId(3);
        road.register(&mut Agent::stationary(id)).unwrap();
        road.add_object_at(id, NE).unwrap();
        road.remove_object(id).unwrap();
        assert!(!road.contains_object(id));
        assert!(road.is_registered(id));
        assert_eq!(road.remove_object(id), Err(RoadError::NotPlaced(id)));
        road.add_object_at(id, NW).unwrap();
        assert!(road.contains_object_at(id, NW));
    }

    #[test]
    fn same_position_and_objects_at() {
        let mut road = GraphRoadModel::new(ring());
        let mut v = Thing::new(1, ObjectKind::Vehicle, Some(5.0));
        let mut p = Thing::new(2, ObjectKind::Parcel, None);
        let mut q = Thing::new(3, ObjectKind::Parcel, None);
        road.register(&mut v).unwrap();
        road.register(&mut p).unwrap();
        road.register(&mut q).unwrap();

        road.add_object_at(v.id, SE).unwrap();
        road.add_object_at_same_position(p.id, v.id).unwrap();
        road.add_object_at(q.id, NE).unwrap();

        assert!(road.equal_position(v.id, p.id).unwrap());
        assert!(!road.equal_position(v.id, q.id).unwrap());
        assert_eq!(road.objects_at(v.id, None).unwrap(), vec![p.id]);
        assert!(road.objects_at(v.id, Some(ObjectKind::Vehicle)).unwrap().is_empty());
        assert_eq!(road.objects_of_kind(ObjectKind::Parcel), vec![p.id, q.id]);
        assert_eq!(road.objects(), vec![v.id, p.id, q.id]);
        assert_eq!(
            road.objects_and_positions(),
            vec![(v.id, SE), (p.id, SE), (q.id, NE)]
        );
    }

    #[test]
    fn unregister_and_clear() {
        let mut road = GraphRoadModel::new(ring());
        for i in 0..3 {
            road.register(&mut Agent::stationary(ObjectId(i))).unwrap();
            road.add_object_at(ObjectId(i), SW).unwrap();
        }
        road.unregister(ObjectId(0)).unwrap();
        assert!(!road.contains_object(ObjectId(0)));
        assert_eq!(road.unregister(ObjectId(0)), Err(RoadError::NotRegistered(ObjectId(0))));

        road.clear();
        assert!(road.objects().is_empty());
        assert!(road.is_registered(ObjectId(1)));
    }

    #[test]
    fn units_per_hour_validated() {
        assert!(GraphRoadModel::new(ring()).with_time_units_per_hour(0.0).is_err());
        let road = GraphRoadModel::new(ring()).with_time_units_per_hour(60.0).unwrap();
        assert_eq!(road.time_units_per_hour(), 60.0);
    }
}

// ── follow_path ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod follow_path {
    use std::collections::VecDeque;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use pdp_core::{ErrorClass, ObjectId, Point, TimeLapse};
    use pdp_graph::ConnectionData;
    use super::helpers::*;
    use crate::{Agent, GraphRoadModel, Location, RoadError, RoadModel};

    const AGENT: ObjectId = ObjectId(1);

    fn road_with_agent(speed: f64) -> GraphRoadModel {
        let mut road = GraphRoadModel::new(ring());
        road.register(&mut Agent::moving(AGENT, speed)).unwrap();
        road.add_object_at(AGENT, SW).unwrap();
        road
    }

    fn nodes(points: &[Point]) -> VecDeque<Location> {
        points.iter().copied().map(Location::AtNode).collect()
    }

    #[test]
    fn two_edges_in_four_hours() {
        let mut road = road_with_agent(5.0);
        let mut path = nodes(&[SW, SE, NE]);
        let mut time = hours(4);

        let progress = road.follow_path(AGENT, &mut path, &mut time).unwrap();

        assert_eq!(progress.distance, 20.0);
        assert_eq!(progress.time, 4 * HOUR);
        assert_eq!(progress.travelled, vec![SW, SE, NE]);
        assert!(path.is_empty());
        assert_eq!(road.position(AGENT).unwrap(), NE);
        assert!(!time.has_time_left());
    }

    #[test]
    fn stops_mid_edge_and_consumes_budget() {
        let mut road = road_with_agent(5.0);
        let mut path = nodes(&[SW, SE, NE]);
        let mut time = hours(1);

        let progress = road.follow_path(AGENT, &mut path, &mut time).unwrap();

        assert_eq!(progress.distance, 5.0);
        assert_eq!(progress.travelled, vec![SW]);
        assert_eq!(path, nodes(&[SE, NE]));
        assert_eq!(time.time_left(), 0);
        assert_eq!(road.location(AGENT).unwrap(), Location::OnEdge { from: SW, to: SE, offset: 5.0 });
        assert_eq!(road.position(AGENT).unwrap(), Point::new(5.0, 0.0));
    }

    #[test]
    fn leftover_budget_stays_in_lapse() {
        let mut road = road_with_agent(5.0);
        let mut path = nodes(&[SE]);
        let mut time = hours(3);
        road.follow_path(AGENT, &mut path, &mut time).unwrap();
        assert_eq!(time.time_left(), HOUR);
        assert_eq!(time.time(), 2 * HOUR);
    }

    #[test]
    fn max_speed_caps_travel() {
        let mut road = road_with_agent(5.0);
        road.graph_mut()
            .set_connection_data(SW, SE, Some(ConnectionData::with_max_speed(2.0)))
            .unwrap();
        let mut path = nodes(&[SE]);
        let mut time = hours(1);
        let progress = road.follow_path(AGENT, &mut path, &mut time).unwrap();
        assert_eq!(progress.distance, 2.0);
        assert_eq!(road.position(AGENT).unwrap(), Point::new(2.0, 0.0));
    }

    #[test]
    fn on_edge_waypoint() {
        let mut road = road_with_agent(5.0);
        let halfway = Location::on_edge(road.graph(), SE, NE, 5.0).unwrap();
        let mut path: VecDeque<Location> = [Location::AtNode(SE), halfway].into_iter().collect();
        let mut time = hours(10);
        let progress = road.follow_path(AGENT, &mut path, &mut time).unwrap();
        assert_eq!(progress.distance, 15.0);
        assert_eq!(road.location(AGENT).unwrap(), halfway);
        assert_eq!(time.time_left(), 7 * HOUR);
    }

    #[test]
    fn backward_motion_forbidden() {
        let mut road = road_with_agent(5.0);
        road.follow_path(AGENT, &mut nodes(&[SE]), &mut hours(1)).unwrap();
        let before = road.location(AGENT).unwrap();

        let back_on_edge = Location::OnEdge { from: SW, to: SE, offset: 2.0 };
        let mut path: VecDeque<Location> = [back_on_edge].into_iter().collect();
        let err = road.follow_path(AGENT, &mut path, &mut hours(1)).unwrap_err();
        assert!(matches!(err, RoadError::IllegalMove { .. }));
        assert_eq!(err.class(), ErrorClass::InvalidArgument);

        assert!(road.follow_path(AGENT, &mut nodes(&[SW]), &mut hours(1)).is_err());
        assert_eq!(road.location(AGENT).unwrap(), before);
    }

    #[test]
    fn only_outgoing_connections_are_legal() {
        let mut road = road_with_agent(5.0);
        // NW → SW exists, SW → NW does not.
        assert!(matches!(
            road.follow_path(AGENT, &mut nodes(&[NW]), &mut hours(10)),
            Err(RoadError::IllegalMove { .. })
        ));
        assert!(road.follow_path(AGENT, &mut nodes(&[NE]), &mut hours(10)).is_err());
    }

    #[test]
    fn failure_changes_nothing() {
        let mut road = road_with_agent(5.0);
        // Second hop SE → SW is illegal; discovered after the first hop.
        let mut path = nodes(&[SE, SW]);
        let mut time = hours(10);
        assert!(road.follow_path(AGENT, &mut path, &mut time).is_err());
        assert_eq!(road.position(AGENT).unwrap(), SW);
        assert_eq!(path.len(), 2);
        assert_eq!(time.time_left(), 10 * HOUR);
    }

    #[test]
    fn precondition_errors() {
        let mut road = road_with_agent(5.0);
        assert_eq!(
            road.follow_path(AGENT, &mut VecDeque::new(), &mut hours(1)),
            Err(RoadError::EmptyPath)
        );
        let mut spent = hours(1);
        spent.consume_all();
        assert_eq!(
            road.follow_path(AGENT, &mut nodes(&[SE]), &mut spent),
            Err(RoadError::NoTimeLeft)
        );
        assert_eq!(
            road.follow_path(ObjectId(9), &mut nodes(&[SE]), &mut hours(1)),
            Err(RoadError::NotRegistered(ObjectId(9)))
        );

        let still = ObjectId(2);
        road.register(&mut Agent::stationary(still)).unwrap();
        road.add_object_at(still, SW).unwrap();
        assert_eq!(
            road.follow_path(still, &mut nodes(&[SE]), &mut hours(1)),
            Err(RoadError::NotMoving(still))
        );
    }

    #[test]
    fn split_budget_reaches_same_point() {
        let mut rng = SmallRng::seed_from_u64(42);
        let full_loop = [SE, NE, NW, SW];

        for _ in 0..200 {
            // Stay short of the full 8 h loop so the path never runs out.
            let total: u64 = rng.gen_range(2..28_000_000);
            let first: u64 = rng.gen_range(1..total);

            let mut once = road_with_agent(5.0);
            let mut path = nodes(&full_loop);
            once.follow_path(AGENT, &mut path, &mut TimeLapse::new(0, total).unwrap()).unwrap();

            let mut split = road_with_agent(5.0);
            let mut path = nodes(&full_loop);
            split.follow_path(AGENT, &mut path, &mut TimeLapse::new(0, first).unwrap()).unwrap();
            split.follow_path(AGENT, &mut path, &mut TimeLapse::new(first, total).unwrap()).unwrap();

            let a = once.position(AGENT).unwrap();
            let b = split.position(AGENT).unwrap();
            assert!(a.distance(b) < 1e-4, "total={total} first={first}: {a} vs {b}");
        }
    }

    #[test]
    fn move_to_uses_shortest_path() {
        let mut road = road_with_agent(5.0);
        let progress = road.move_to(AGENT, NW, &mut hours(10)).unwrap();
        assert_eq!(progress.distance, 30.0);
        assert_eq!(progress.travelled, vec![SW, SE, NE, NW]);
        assert_eq!(road.position(AGENT).unwrap(), NW);
    }

    #[test]
    fn shortest_path_from_edge_starts_at_edge_end() {
        let mut road = road_with_agent(5.0);
        road.follow_path(AGENT, &mut nodes(&[SE]), &mut hours(1)).unwrap();
        assert_eq!(road.shortest_path_from(AGENT, NE).unwrap(), vec![SE, NE]);

        let progress = road.move_to(AGENT, NE, &mut hours(10)).unwrap();
        assert_eq!(progress.distance, 15.0);
        assert_eq!(road.position(AGENT).unwrap(), NE);
    }

    #[test]
    fn disconnected_shortest_path_is_argument_error() {
        let mut road = road_with_agent(5.0);
        road.graph_mut().add_node(Point::new(50.0, 50.0));
        let err = road.shortest_path(SW, Point::new(50.0, 50.0)).unwrap_err();
        assert!(matches!(err, RoadError::Graph(_)));
        assert_eq!(err.class(), ErrorClass::InvalidArgument);
    }
}

// ── CachedGraphRoadModel ──────────────────────────────────────────────────────

#[cfg(test)]
mod cached {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pdp_core::{ObjectId, ObjectKind, Point};
    use pdp_graph::{Dijkstra, Graph, GraphResult, ShortestPath};
    use super::helpers::*;
    use crate::{Agent, CachedGraphRoadModel, GraphRoadModel, PathTable, RoadModel};

    /// Dijkstra that counts how often it is asked.
    struct Counting(Arc<AtomicUsize>);

    impl ShortestPath for Counting {
        fn shortest_path(&self, graph: &Graph, from: Point, to: Point) -> GraphResult<Vec<Point>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Dijkstra.shortest_path(graph, from, to)
        }
    }

    fn counting_model() -> (CachedGraphRoadModel<Counting>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = GraphRoadModel::with_path_finder(ring(), Counting(calls.clone()));
        (CachedGraphRoadModel::from_model(inner), calls)
    }

    #[test]
    fn preloaded_entry_is_returned_verbatim() {
        let (mut road, calls) = counting_model();
        let mut table = PathTable::default();
        table.insert((SW, NE), vec![SW, NE]);
        road.set_path_table(table);

        assert_eq!(road.shortest_path(SW, NE).unwrap(), vec![SW, NE]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn miss_computes_once_then_hits() {
        let (mut road, calls) = counting_model();
        let first = road.shortest_path(SW, NW).unwrap();
        let second = road.shortest_path(SW, NW).unwrap();
        assert_eq!(first, vec![SW, SE, NE, NW]);
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(road.path_table().len(), 1);

        road.clear_path_table();
        road.shortest_path(SW, NW).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn move_to_goes_through_table() {
        let (mut road, calls) = counting_model();
        let id = ObjectId(1);
        road.register(&mut Agent::moving(id, 5.0)).unwrap();
        road.add_object_at(id, SW).unwrap();
        road.path_table_mut().insert((SW, SE), vec![SW, SE]);
        road.move_to(id, SE, &mut hours(10)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(road.position(id).unwrap(), SE);
    }

    #[test]
    fn registration_calls_back_with_the_cached_model() {
        let mut road = CachedGraphRoadModel::new(ring());
        let mut t = Thing::new(1, ObjectKind::Vehicle, Some(5.0));
        road.register(&mut t).unwrap();
        assert_eq!(t.nodes_seen, Some(4));
        assert_eq!(t.model_size, Some(std::mem::size_of::<CachedGraphRoadModel>()));
        assert_ne!(t.model_size, Some(std::mem::size_of::<GraphRoadModel>()));
        assert!(road.is_registered(t.id));

        let mut again = Thing::new(1, ObjectKind::Parcel, None);
        assert!(road.register(&mut again).is_err());
        assert_eq!(again.model_size, None, "no callback on refusal");
    }

    #[test]
    fn kind_index_tracks_placement() {
        let mut road = CachedGraphRoadModel::new(ring());
        let mut v = Thing::new(1, ObjectKind::Vehicle, Some(5.0));
        let mut p = Thing::new(2, ObjectKind::Parcel, None);
        let mut q = Thing::new(3, ObjectKind::Parcel, None);
        for t in [&mut v, &mut p, &mut q] {
            road.register(t).unwrap();
        }

        road.add_object_at(v.id, SW).unwrap();
        road.add_object_at(p.id, SE).unwrap();
        road.add_object_at_same_position(q.id, v.id).unwrap();
        assert_eq!(road.objects_of_kind(ObjectKind::Parcel), vec![p.id, q.id]);
        assert_eq!(road.objects_of_kind(ObjectKind::Vehicle), vec![v.id]);
        assert!(road.objects_of_kind(ObjectKind::Depot).is_empty());

        road.remove_object(p.id).unwrap();
        assert_eq!(road.objects_of_kind(ObjectKind::Parcel), vec![q.id]);

        road.unregister(q.id).unwrap();
        assert!(road.objects_of_kind(ObjectKind::Parcel).is_empty());

        road.clear();
        assert!(road.objects_of_kind(ObjectKind::Vehicle).is_empty());
    }

    #[test]
    fn failed_update_leaves_index_alone() {
        let mut road = CachedGraphRoadModel::new(ring());
        let mut p = Thing::new(2, ObjectKind::Parcel, None);
        road.register(&mut p).unwrap();
        road.add_object_at(p.id, SW).unwrap();
        assert!(road.add_object_at(p.id, SE).is_err());
        assert!(road.add_object_at(ObjectId(99), SE).is_err());
        assert_eq!(road.objects_of_kind(ObjectKind::Parcel), vec![p.id]);
        assert_eq!(road.objects(), vec![p.id]);
    }

    #[test]
    fn index_matches_plain_model() {
        let mut plain = GraphRoadModel::new(ring());
        for i in 0..6 {
            let kind = if i % 2 == 0 { ObjectKind::Parcel } else { ObjectKind::Depot };
            plain.register(&mut Thing::new(i, kind, None)).unwrap();
            plain.add_object_at(ObjectId(i), SW).unwrap();
        }
        let expected = plain.objects_of_kind(ObjectKind::Parcel);
        let cached = CachedGraphRoadModel::from_model(plain);
        assert_eq!(cached.objects_of_kind(ObjectKind::Parcel), expected);
    }
}
