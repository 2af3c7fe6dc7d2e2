//! C1: Road Classifier.
//!
//! Ranks one incident edge at a node against its siblings. The rank drives both the
//! `IntersectionView`'s ordering-independent bookkeeping (C2) and the turn classifier's fork/
//! end-of-road/important-turn decisions (C3, C5 rule R7).

use std::cmp::Ordering;

use crate::edge::Edge;
use crate::graph::RouteGraph;
use crate::ids::{EdgeId, NodeId};

/// A lexicographic rank: lower is "more major". Two priorities compare equal only when every
/// component ties, in which case the caller breaks the tie by bearing deviation from straight
/// (see [break_tie_by_bearing]).
///
/// Component order, per `SPEC_FULL.md` §4.1: highway class, link status, name/ref identity with
/// the arrival edge, lane count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoadPriority {
    highway_rank: u8,
    is_link: bool,
    /// `true` when this edge's name/ref differs from the arrival edge's -- i.e. worse.
    differs_from_arrival: bool,
    lanes: u32,
}

impl PartialOrd for RoadPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoadPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.highway_rank
            .cmp(&other.highway_rank)
            .then(self.is_link.cmp(&other.is_link))
            .then(self.differs_from_arrival.cmp(&other.differs_from_arrival))
            // More lanes is better, so reverse the natural ordering of this one component.
            .then(other.lanes.cmp(&self.lanes))
    }
}

impl RoadPriority {
    /// `true` if `self` outranks `other` (`self` is strictly more major).
    pub fn beats(&self, other: &RoadPriority) -> bool {
        self.cmp(other) == Ordering::Less
    }

    pub fn ties_with(&self, other: &RoadPriority) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Classified attributes of one incident edge, relative to the edge a traveller arrived on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeClass {
    pub priority: RoadPriority,
    pub is_link: bool,
    pub is_named: bool,
    pub name_id: u64,
    pub mode_id: u8,
}

/// Classify `candidate`, ranking it against `arrival`. No errors: missing attributes degrade to
/// the conservative defaults already baked into `Edge`'s `Default` derivations (empty name,
/// `HighwayClass::Other`).
pub fn classify_edge(candidate: &Edge, arrival: &Edge) -> EdgeClass {
    let differs_from_arrival = !same_road_identity(candidate, arrival);
    let priority = RoadPriority {
        highway_rank: candidate.highway_class.rank(),
        is_link: candidate.is_link(),
        differs_from_arrival,
        lanes: candidate.lanes,
    };
    EdgeClass {
        priority,
        is_link: candidate.is_link(),
        is_named: candidate.is_named(),
        name_id: name_hash_str(&candidate.name),
        mode_id: mode_id(candidate),
    }
}

/// Two edges are "the same road" for classification purposes if they share a non-empty name, or
/// failing that a non-empty ref. Two unnamed, unreffed edges are never considered the same road.
pub fn same_road_identity(a: &Edge, b: &Edge) -> bool {
    if a.is_named() || b.is_named() {
        return a.is_named() && b.is_named() && a.name == b.name;
    }
    if !a.r#ref.is_empty() || !b.r#ref.is_empty() {
        return a.r#ref == b.r#ref;
    }
    false
}

/// Hashes a road name for cheap equality checks against an [`EdgeClass::name_id`] -- used both
/// by `classify_edge` itself and by C5 rules (R1) that need to test whether a name observed in a
/// `Step` matches a name recorded in an `IntersectionView` built earlier.
pub(crate) fn name_hash_str(name: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

fn mode_id(edge: &Edge) -> u8 {
    edge.travel_mode as u8
}

/// Absolute angular deviation from straight-ahead (`0`), in the `[0, 180]` range, used to break
/// priority ties per `SPEC_FULL.md` §4.1.
pub fn break_tie_by_bearing(bearing_delta: f64) -> f64 {
    bearing_delta.abs().min(360.0 - bearing_delta.abs())
}

/// Convenience used by C2/C3: classify every edge incident to `node` except `arrival` itself.
pub fn classify_incident_edges(
    graph: &dyn RouteGraph,
    node: NodeId,
    arrival: EdgeId,
) -> Vec<(EdgeId, EdgeClass)> {
    let arrival_edge = graph.edge(arrival);
    graph
        .incident_edges(node)
        .into_iter()
        .filter(|&e| e != arrival)
        .map(|e| (e, classify_edge(graph.edge(e), arrival_edge)))
        .collect()
}
