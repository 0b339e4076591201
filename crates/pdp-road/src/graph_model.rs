//! `GraphRoadModel`: the plain road model over a directed graph.

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashMap;
use tracing::trace;

use pdp_core::{CoreError, MS_PER_HOUR, ObjectId, ObjectKind, Point, TimeLapse};
use pdp_graph::{Dijkstra, Graph, ShortestPath};

use crate::{Location, PathProgress, RoadError, RoadModel, RoadResult, RoadUser};

/// What the model remembers about a registered object.
#[derive(Copy, Clone, Debug)]
struct Registration {
    kind:  ObjectKind,
    speed: Option<f64>,
}

/// One legal step along a single connection, from `start` to `end` offset.
///
/// A stay at the current node is represented with `start == end`.
struct Hop {
    start:     f64,
    end:       f64,
    max_speed: Option<f64>,
    from:      Point,
    to:        Point,
}

/// Road model backed by a [`Graph`] and a pluggable [`ShortestPath`].
///
/// # Type parameter
///
/// `P` is the path search, [`Dijkstra`] by default.  Swap it at compile time
/// for a different algorithm with no runtime overhead.
pub struct GraphRoadModel<P: ShortestPath = Dijkstra> {
    graph:               Graph,
    path_finder:         P,
    time_units_per_hour: f64,
    registry:            FxHashMap<ObjectId, Registration>,
    locations:           BTreeMap<ObjectId, Location>,
}

impl GraphRoadModel<Dijkstra> {
    pub fn new(graph: Graph) -> Self {
        Self::with_path_finder(graph, Dijkstra)
    }
}

impl<P: ShortestPath> GraphRoadModel<P> {
    /// Create a model using `path_finder` for shortest-path queries.
    /// Speeds are interpreted per [`MS_PER_HOUR`] time units.
    pub fn with_path_finder(graph: Graph, path_finder: P) -> Self {
        Self {
            graph,
            path_finder,
            time_units_per_hour: MS_PER_HOUR,
            registry:            FxHashMap::default(),
            locations:           BTreeMap::new(),
        }
    }

    /// Override how many time units make up one hour.
    ///
    /// # Errors
    /// [`CoreError::Config`] unless `units` is finite and positive.
    pub fn with_time_units_per_hour(mut self, units: f64) -> RoadResult<Self> {
        if !(units.is_finite() && units > 0.0) {
            return Err(CoreError::Config(format!("time_units_per_hour must be positive, got {units}")).into());
        }
        self.time_units_per_hour = units;
        Ok(self)
    }

    /// Mutable access to the graph.
    ///
    /// Removing a connection that an object currently sits on leaves that
    /// object's location dangling; `position` will then report an error.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn path_finder(&self) -> &P {
        &self.path_finder
    }

    /// Kind of a registered object.
    pub fn kind_of(&self, id: ObjectId) -> Option<ObjectKind> {
        self.registry.get(&id).map(|r| r.kind)
    }

    fn placed(&self, id: ObjectId) -> RoadResult<Location> {
        if !self.registry.contains_key(&id) {
            return Err(RoadError::NotRegistered(id));
        }
        self.locations.get(&id).copied().ok_or(RoadError::NotPlaced(id))
    }

    /// Record `user` in the registry without calling it back.  Decorators
    /// call this and then hand the user themselves as the owning model.
    pub(crate) fn insert_registration(&mut self, user: &dyn RoadUser) -> RoadResult<()> {
        let id = user.id();
        if self.registry.contains_key(&id) {
            return Err(RoadError::AlreadyRegistered(id));
        }
        let speed = user.speed();
        if let Some(speed) = speed {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(RoadError::InvalidSpeed { id, speed });
            }
        }
        self.registry.insert(id, Registration { kind: user.kind(), speed });
        trace!(object = %id, kind = %user.kind(), "registered with road model");
        Ok(())
    }

    fn ensure_placeable(&self, id: ObjectId) -> RoadResult<()> {
        if !self.registry.contains_key(&id) {
            return Err(RoadError::NotRegistered(id));
        }
        if self.locations.contains_key(&id) {
            return Err(RoadError::AlreadyPlaced(id));
        }
        Ok(())
    }

    /// The single-connection step from `current` to `target`, if legal.
    ///
    /// Both locations must already be canonical.
    fn hop(&self, id: ObjectId, current: Location, target: Location) -> RoadResult<Hop> {
        let illegal = || RoadError::IllegalMove { id, from: current, to: target };
        match (current, target) {
            (Location::AtNode(a), Location::AtNode(b)) if a == b => {
                Ok(Hop { start: 0.0, end: 0.0, max_speed: None, from: a, to: a })
            }
            (Location::AtNode(a), Location::AtNode(b)) => {
                let conn = self.graph.connection(a, b).map_err(|_| illegal())?;
                Ok(Hop { start: 0.0, end: conn.length(), max_speed: conn.max_speed(), from: a, to: b })
            }
            (Location::AtNode(a), Location::OnEdge { from, to, offset }) if a == from => {
                let conn = self.graph.connection(from, to)?;
                Ok(Hop { start: 0.0, end: offset, max_speed: conn.max_speed(), from, to })
            }
            (Location::OnEdge { from, to, offset }, Location::AtNode(b)) if b == to => {
                let conn = self.graph.connection(from, to)?;
                Ok(Hop { start: offset, end: conn.length(), max_speed: conn.max_speed(), from, to })
            }
            (
                Location::OnEdge { from, to, offset },
                Location::OnEdge { from: f2, to: t2, offset: o2 },
            ) if from == f2 && to == t2 && o2 >= offset => {
                let conn = self.graph.connection(from, to)?;
                Ok(Hop { start: offset, end: o2, max_speed: conn.max_speed(), from, to })
            }
            _ => Err(illegal()),
        }
    }
}

impl<P: ShortestPath> RoadModel for GraphRoadModel<P> {
    fn graph(&self) -> &Graph {
        &self.graph
    }

    fn time_units_per_hour(&self) -> f64 {
        self.time_units_per_hour
    }

    fn register(&mut self, user: &mut dyn RoadUser) -> RoadResult<()> {
        self.insert_registration(user)?;
        user.on_road_registered(self);
        Ok(())
    }

    fn unregister(&mut self, id: ObjectId) -> RoadResult<()> {
        self.registry.remove(&id).ok_or(RoadError::NotRegistered(id))?;
        self.locations.remove(&id);
        Ok(())
    }

    fn is_registered(&self, id: ObjectId) -> bool {
        self.registry.contains_key(&id)
    }

    fn add_object_at(&mut self, id: ObjectId, pos: Point) -> RoadResult<()> {
        self.ensure_placeable(id)?;
        let loc = Location::AtNode(pos).canonical(&self.graph)?;
        self.locations.insert(id, loc);
        Ok(())
    }

    fn add_object_at_same_position(&mut self, id: ObjectId, existing: ObjectId) -> RoadResult<()> {
        self.ensure_placeable(id)?;
        let loc = self.placed(existing)?;
        self.locations.insert(id, loc);
        Ok(())
    }

    fn remove_object(&mut self, id: ObjectId) -> RoadResult<()> {
        self.placed(id)?;
        self.locations.remove(&id);
        Ok(())
    }

    fn clear(&mut self) {
        self.locations.clear();
    }

    fn contains_object(&self, id: ObjectId) -> bool {
        self.locations.contains_key(&id)
    }

    fn contains_object_at(&self, id: ObjectId, pos: Point) -> bool {
        self.locations
            .get(&id)
            .and_then(|loc| loc.point(&self.graph).ok())
            .is_some_and(|p| p == pos)
    }

    fn location(&self, id: ObjectId) -> RoadResult<Location> {
        self.placed(id)
    }

    fn position(&self, id: ObjectId) -> RoadResult<Point> {
        self.placed(id)?.point(&self.graph)
    }

    fn equal_position(&self, a: ObjectId, b: ObjectId) -> RoadResult<bool> {
        Ok(self.position(a)? == self.position(b)?)
    }

    fn objects(&self) -> Vec<ObjectId> {
        self.locations.keys().copied().collect()
    }

    fn objects_of_kind(&self, kind: ObjectKind) -> Vec<ObjectId> {
        self.locations
            .keys()
            .copied()
            .filter(|id| self.kind_of(*id) == Some(kind))
            .collect()
    }

    fn objects_at(&self, reference: ObjectId, kind: Option<ObjectKind>) -> RoadResult<Vec<ObjectId>> {
        let pos = self.position(reference)?;
        Ok(self
            .locations
            .iter()
            .filter(|&(&id, _)| id != reference)
            .filter(|&(&id, _)| kind.is_none() || self.kind_of(id) == kind)
            .filter(|&(_, loc)| loc.point(&self.graph).is_ok_and(|p| p == pos))
            .map(|(&id, _)| id)
            .collect())
    }

    fn objects_and_positions(&self) -> Vec<(ObjectId, Point)> {
        self.locations
            .iter()
            .filter_map(|(&id, loc)| loc.point(&self.graph).ok().map(|p| (id, p)))
            .collect()
    }

    fn follow_path(
        &mut self,
        id:   ObjectId,
        path: &mut VecDeque<Location>,
        time: &mut TimeLapse,
    ) -> RoadResult<PathProgress> {
        let reg = *self.registry.get(&id).ok_or(RoadError::NotRegistered(id))?;
        let speed = reg.speed.ok_or(RoadError::NotMoving(id))?;
        if path.is_empty() {
            return Err(RoadError::EmptyPath);
        }
        if !time.has_time_left() {
            return Err(RoadError::NoTimeLeft);
        }
        let mut current = self.placed(id)?;

        // Dry run on local copies; committed only once the whole move is known.
        let mut lapse = time.clone();
        let mut progress = PathProgress::default();
        let mut reached = 0;

        while reached < path.len() && lapse.has_time_left() {
            let target = path[reached].canonical(&self.graph)?;
            let hop = self.hop(id, current, target)?;
            let distance = hop.end - hop.start;

            if distance <= 0.0 {
                current = target;
                progress.travelled.push(target.point(&self.graph)?);
                reached += 1;
                continue;
            }

            let speed = hop.max_speed.map_or(speed, |max| speed.min(max));
            let reachable = speed * lapse.time_left() as f64 / self.time_units_per_hour;

            if reachable >= distance {
                let spent = ((distance / speed) * self.time_units_per_hour).round() as u64;
                let spent = spent.min(lapse.time_left());
                lapse.consume(spent)?;
                progress.distance += distance;
                progress.time += spent;
                progress.travelled.push(target.point(&self.graph)?);
                current = target;
                reached += 1;
                trace!(object = %id, to = %target, distance, spent, "reached waypoint");
            } else {
                let offset = hop.start + reachable;
                let stop = Location::on_edge(&self.graph, hop.from, hop.to, offset)?;
                progress.distance += reachable;
                progress.time += lapse.time_left();
                lapse.consume_all();
                current = stop;
                trace!(object = %id, at = %stop, "stopped between waypoints");
            }
        }

        self.locations.insert(id, current);
        path.drain(..reached);
        *time = lapse;
        Ok(progress)
    }

    fn move_to(&mut self, id: ObjectId, destination: Point, time: &mut TimeLapse) -> RoadResult<PathProgress> {
        let nodes = self.shortest_path_from(id, destination)?;
        let mut path: VecDeque<Location> = nodes.into_iter().map(Location::AtNode).collect();
        self.follow_path(id, &mut path, time)
    }

    fn shortest_path(&mut self, from: Point, to: Point) -> RoadResult<Vec<Point>> {
        Ok(self.path_finder.shortest_path(&self.graph, from, to)?)
    }
}
