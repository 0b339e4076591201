//! The `RoadModel` trait: the authoritative position of every placed object.

use std::collections::VecDeque;

use pdp_core::{ObjectId, ObjectKind, Point, TimeLapse};
use pdp_graph::Graph;

use crate::{Location, PathProgress, RoadResult, RoadUser};

/// Spatial model over a [`Graph`].
///
/// Registration and placement are separate: a registered object has no
/// location until [`add_object_at`](Self::add_object_at) (or
/// [`add_object_at_same_position`](Self::add_object_at_same_position)) puts
/// it on the road, and [`remove_object`](Self::remove_object) takes it off
/// again without forgetting the registration.
///
/// Every query returns an owned copy.  Listing operations return objects in
/// ascending id order.
///
/// The trait is object-safe; the PDP model and vehicle controllers receive it
/// as `&mut dyn RoadModel`.
pub trait RoadModel {
    fn graph(&self) -> &Graph;

    /// Time units per hour used to convert speeds into travel times.
    fn time_units_per_hour(&self) -> f64;

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `user`.  Calls [`RoadUser::on_road_registered`] on success.
    fn register(&mut self, user: &mut dyn RoadUser) -> RoadResult<()>;

    /// Forget `id`, removing it from the road if it was placed.
    fn unregister(&mut self, id: ObjectId) -> RoadResult<()>;

    fn is_registered(&self, id: ObjectId) -> bool;

    // ── Placement ─────────────────────────────────────────────────────────

    /// Place `id` at the node `pos`.
    fn add_object_at(&mut self, id: ObjectId, pos: Point) -> RoadResult<()>;

    /// Place `id` at the exact location of the placed object `existing`.
    fn add_object_at_same_position(&mut self, id: ObjectId, existing: ObjectId) -> RoadResult<()>;

    fn remove_object(&mut self, id: ObjectId) -> RoadResult<()>;

    /// Remove every object from the road.  Registrations are kept.
    fn clear(&mut self);

    // ── Queries ───────────────────────────────────────────────────────────

    fn contains_object(&self, id: ObjectId) -> bool;

    /// `true` if `id` is placed and its position equals `pos`.
    fn contains_object_at(&self, id: ObjectId, pos: Point) -> bool;

    fn location(&self, id: ObjectId) -> RoadResult<Location>;

    fn position(&self, id: ObjectId) -> RoadResult<Point>;

    /// `true` if both objects are placed at the same position.
    fn equal_position(&self, a: ObjectId, b: ObjectId) -> RoadResult<bool>;

    /// All placed objects.
    fn objects(&self) -> Vec<ObjectId>;

    fn objects_of_kind(&self, kind: ObjectKind) -> Vec<ObjectId>;

    /// Placed objects sharing the position of `reference` (excluding it),
    /// optionally restricted to `kind`.
    fn objects_at(&self, reference: ObjectId, kind: Option<ObjectKind>) -> RoadResult<Vec<ObjectId>>;

    fn objects_and_positions(&self) -> Vec<(ObjectId, Point)>;

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move `id` along `path` within the budget of `time`.
    ///
    /// Reached waypoints are popped off the front of `path` and the time
    /// spent is consumed from `time`.  If the budget runs out between two
    /// waypoints the object stops on the connection and the whole remaining
    /// budget is consumed.
    ///
    /// The move is computed in full before anything is committed: on error
    /// neither the object, `path`, nor `time` is changed.
    fn follow_path(
        &mut self,
        id:   ObjectId,
        path: &mut VecDeque<Location>,
        time: &mut TimeLapse,
    ) -> RoadResult<PathProgress>;

    /// Follow the shortest path from the current location of `id` to the node
    /// `destination`.
    fn move_to(&mut self, id: ObjectId, destination: Point, time: &mut TimeLapse) -> RoadResult<PathProgress>;

    /// Shortest path between two nodes, both endpoints included.
    fn shortest_path(&mut self, from: Point, to: Point) -> RoadResult<Vec<Point>>;

    /// Shortest path from the current location of `id` to `to`.
    ///
    /// For an object on a connection the path starts at the connection's end
    /// node, the only node it can reach without turning around.
    fn shortest_path_from(&mut self, id: ObjectId, to: Point) -> RoadResult<Vec<Point>> {
        let start = self.location(id)?.next_node();
        self.shortest_path(start, to)
    }
}
