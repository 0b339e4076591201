//! `CachedGraphRoadModel`: a road model with a shortest-path memo table and
//! a per-kind object index.
//!
//! # Path table
//!
//! Shortest-path queries check the table first and insert on a miss.  The
//! table is never invalidated automatically: after mutating the graph, call
//! [`clear_path_table`](CachedGraphRoadModel::clear_path_table) or install a
//! fresh table.
//!
//! # Kind index
//!
//! The index maps each [`ObjectKind`] to the placed objects of that kind.
//! It is only updated after the wrapped model has accepted the change, inside
//! the same `&mut self` call, so it can never disagree with the location map.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashMap;
use tracing::trace;

use pdp_core::{ObjectId, ObjectKind, Point, TimeLapse};
use pdp_graph::{Dijkstra, Graph, ShortestPath};

use crate::{GraphRoadModel, Location, PathProgress, RoadModel, RoadResult, RoadUser};

/// Memoised shortest paths keyed by `(from, to)`.
pub type PathTable = FxHashMap<(Point, Point), Vec<Point>>;

pub struct CachedGraphRoadModel<P: ShortestPath = Dijkstra> {
    inner:      GraphRoadModel<P>,
    path_table: PathTable,
    kind_index: FxHashMap<ObjectKind, BTreeSet<ObjectId>>,
}

impl CachedGraphRoadModel<Dijkstra> {
    pub fn new(graph: Graph) -> Self {
        Self::from_model(GraphRoadModel::new(graph))
    }
}

impl<P: ShortestPath> CachedGraphRoadModel<P> {
    /// Wrap an existing model.  The kind index is rebuilt from whatever the
    /// model already has placed.
    pub fn from_model(inner: GraphRoadModel<P>) -> Self {
        let mut kind_index: FxHashMap<ObjectKind, BTreeSet<ObjectId>> = FxHashMap::default();
        for id in inner.objects() {
            if let Some(kind) = inner.kind_of(id) {
                kind_index.entry(kind).or_default().insert(id);
            }
        }
        Self { inner, path_table: PathTable::default(), kind_index }
    }

    pub fn inner(&self) -> &GraphRoadModel<P> {
        &self.inner
    }

    /// Mutable access to the graph.  The path table is left untouched.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.inner.graph_mut()
    }

    pub fn path_table(&self) -> &PathTable {
        &self.path_table
    }

    pub fn path_table_mut(&mut self) -> &mut PathTable {
        &mut self.path_table
    }

    /// Replace the path table, returning the old one.
    pub fn set_path_table(&mut self, table: PathTable) -> PathTable {
        std::mem::replace(&mut self.path_table, table)
    }

    pub fn clear_path_table(&mut self) {
        self.path_table.clear();
    }

    fn index_insert(&mut self, id: ObjectId) {
        if let Some(kind) = self.inner.kind_of(id) {
            self.kind_index.entry(kind).or_default().insert(id);
        }
    }

    fn index_remove(&mut self, id: ObjectId, kind: Option<ObjectKind>) {
        if let Some(set) = kind.and_then(|k| self.kind_index.get_mut(&k)) {
            set.remove(&id);
        }
    }
}

impl<P: ShortestPath> RoadModel for CachedGraphRoadModel<P> {
    fn graph(&self) -> &Graph {
        self.inner.graph()
    }

    fn time_units_per_hour(&self) -> f64 {
        self.inner.time_units_per_hour()
    }

    fn register(&mut self, user: &mut dyn RoadUser) -> RoadResult<()> {
        self.inner.insert_registration(user)?;
        user.on_road_registered(self);
        Ok(())
    }

    fn unregister(&mut self, id: ObjectId) -> RoadResult<()> {
        let kind = self.inner.kind_of(id);
        self.inner.unregister(id)?;
        self.index_remove(id, kind);
        Ok(())
    }

    fn is_registered(&self, id: ObjectId) -> bool {
        self.inner.is_registered(id)
    }

    fn add_object_at(&mut self, id: ObjectId, pos: Point) -> RoadResult<()> {
        self.inner.add_object_at(id, pos)?;
        self.index_insert(id);
        Ok(())
    }

    fn add_object_at_same_position(&mut self, id: ObjectId, existing: ObjectId) -> RoadResult<()> {
        self.inner.add_object_at_same_position(id, existing)?;
        self.index_insert(id);
        Ok(())
    }

    fn remove_object(&mut self, id: ObjectId) -> RoadResult<()> {
        self.inner.remove_object(id)?;
        let kind = self.inner.kind_of(id);
        self.index_remove(id, kind);
        Ok(())
    }

    fn clear(&mut self) {
        self.inner.clear();
        self.kind_index.clear();
    }

    fn contains_object(&self, id: ObjectId) -> bool {
        self.inner.contains_object(id)
    }

    fn contains_object_at(&self, id: ObjectId, pos: Point) -> bool {
        self.inner.contains_object_at(id, pos)
    }

    fn location(&self, id: ObjectId) -> RoadResult<Location> {
        self.inner.location(id)
    }

    fn position(&self, id: ObjectId) -> RoadResult<Point> {
        self.inner.position(id)
    }

    fn equal_position(&self, a: ObjectId, b: ObjectId) -> RoadResult<bool> {
        self.inner.equal_position(a, b)
    }

    fn objects(&self) -> Vec<ObjectId> {
        self.inner.objects()
    }

    fn objects_of_kind(&self, kind: ObjectKind) -> Vec<ObjectId> {
        self.kind_index
            .get(&kind)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn objects_at(&self, reference: ObjectId, kind: Option<ObjectKind>) -> RoadResult<Vec<ObjectId>> {
        self.inner.objects_at(reference, kind)
    }

    fn objects_and_positions(&self) -> Vec<(ObjectId, Point)> {
        self.inner.objects_and_positions()
    }

    fn follow_path(
        &mut self,
        id:   ObjectId,
        path: &mut VecDeque<Location>,
        time: &mut TimeLapse,
    ) -> RoadResult<PathProgress> {
        self.inner.follow_path(id, path, time)
    }

    fn move_to(&mut self, id: ObjectId, destination: Point, time: &mut TimeLapse) -> RoadResult<PathProgress> {
        let nodes = self.shortest_path_from(id, destination)?;
        let mut path: VecDeque<Location> = nodes.into_iter().map(Location::AtNode).collect();
        self.inner.follow_path(id, &mut path, time)
    }

    fn shortest_path(&mut self, from: Point, to: Point) -> RoadResult<Vec<Point>> {
        if let Some(path) = self.path_table.get(&(from, to)) {
            trace!(%from, %to, "path table hit");
            return Ok(path.clone());
        }
        trace!(%from, %to, "path table miss");
        let path = self.inner.shortest_path(from, to)?;
        self.path_table.insert((from, to), path.clone());
        Ok(path)
    }
}
