//! C2: Intersection View Builder.

use crate::classify::{classify_edge, EdgeClass};
use crate::graph::RouteGraph;
use crate::ids::{EdgeId, NodeId};

/// One incident road at a traversed intersection, already classified against the arrival edge
/// and placed in clockwise order.
#[derive(Clone, Copy, Debug)]
pub struct IncidentRoad {
    pub edge: EdgeId,
    /// Clockwise degrees from the reverse of the arrival edge's bearing. Always `0` for the
    /// u-turn candidate, strictly increasing afterwards.
    pub angle_from_reverse: f64,
    pub entry_allowed: bool,
    pub class: EdgeClass,
}

impl IncidentRoad {
    /// Signed bearing delta from straight-ahead, in `(-180, 180]`, derived from
    /// `angle_from_reverse` (which is measured from the opposite baseline). Positive is
    /// clockwise (to the right).
    pub fn angle_from_reverse_to_delta(&self) -> f64 {
        let raw = self.angle_from_reverse - 180.0;
        let mut delta = raw % 360.0;
        if delta <= -180.0 {
            delta += 360.0;
        } else if delta > 180.0 {
            delta -= 360.0;
        }
        delta
    }
}

/// The ordered set of incident roads at one traversed node, built fresh for each traversal (an
/// `IntersectionView` is never cached or reused across a different arrival edge).
#[derive(Clone, Debug)]
pub struct IntersectionView {
    pub node: NodeId,
    pub arrival: EdgeId,
    /// Clockwise from the reverse of `arrival`. `roads[0]` is the u-turn candidate whenever the
    /// network has one; otherwise it's simply whichever edge is closest to straight-back.
    pub roads: Vec<IncidentRoad>,
}

impl IntersectionView {
    pub fn degree(&self) -> usize {
        self.roads.len()
    }

    pub fn find(&self, edge: EdgeId) -> Option<&IncidentRoad> {
        self.roads.iter().find(|r| r.edge == edge)
    }

    pub fn allowed(&self) -> impl Iterator<Item = &IncidentRoad> {
        self.roads.iter().filter(|r| r.entry_allowed)
    }

    /// All allowed exits other than `out` and the u-turn candidate (`roads[0]`). Used by the
    /// fork/end-of-road/important-turn logic in C3 and R7.
    pub fn other_allowed_non_uturn(&self, out: EdgeId) -> impl Iterator<Item = &IncidentRoad> {
        self.roads
            .iter()
            .enumerate()
            .filter(move |(i, r)| *i != 0 && r.edge != out && r.entry_allowed)
            .map(|(_, r)| r)
    }
}

fn normalize_degrees(x: f64) -> f64 {
    let y = x % 360.0;
    if y < 0.0 {
        y + 360.0
    } else {
        y
    }
}

/// Builds the `IntersectionView` for `node`, having arrived on `arrival`. `out` is the edge the
/// traveller actually takes; it's only used to assert the view is well-formed (the chosen exit
/// must be present and allowed), matching the invariant in `SPEC_FULL.md` §4.2.
pub fn build_intersection_view(
    graph: &dyn RouteGraph,
    node: NodeId,
    arrival: EdgeId,
    out: EdgeId,
) -> IntersectionView {
    let arrival_edge = graph.edge(arrival);
    // The bearing you were travelling just before reaching `node`; its reverse is the baseline
    // clockwise angles are measured from.
    let arrival_bearing = graph.bearing(arrival, node);
    let baseline = normalize_degrees(arrival_bearing + 180.0);

    let allowed: Vec<EdgeId> = graph.allowed_out_edges(arrival, node);

    let mut roads: Vec<IncidentRoad> = graph
        .incident_edges(node)
        .into_iter()
        .filter(|&e| e != arrival)
        .map(|e| {
            let class = classify_edge(graph.edge(e), arrival_edge);
            let bearing = graph.bearing(e, node);
            IncidentRoad {
                edge: e,
                angle_from_reverse: normalize_degrees(bearing - baseline),
                entry_allowed: allowed.contains(&e),
                class,
            }
        })
        .collect();

    roads.sort_by(|a, b| {
        a.angle_from_reverse
            .partial_cmp(&b.angle_from_reverse)
            .unwrap()
    });

    debug_assert!(
        roads.iter().any(|r| r.edge == out && r.entry_allowed),
        "chosen exit {out} from node {node} is missing or not allowed in its own intersection view"
    );

    IntersectionView {
        node,
        arrival,
        roads,
    }
}

/// Builds a degenerate view for a route's very first node, where there is no arrival edge to
/// measure turns against. `out` is used as its own baseline (reversed), purely so the view's
/// roads come out in a stable clockwise order; C3 never classifies a turn here, and `view.arrival`
/// on the result is `out` itself as a sentinel, not a real traversed edge.
pub fn build_depart_view(graph: &dyn RouteGraph, node: NodeId, out: EdgeId) -> IntersectionView {
    let out_edge = graph.edge(out);
    let baseline = normalize_degrees(graph.bearing(out, node) + 180.0);
    let allowed: Vec<EdgeId> = graph.allowed_out_edges(out, node);

    let mut roads: Vec<IncidentRoad> = graph
        .incident_edges(node)
        .into_iter()
        .map(|e| {
            let class = classify_edge(graph.edge(e), out_edge);
            let bearing = graph.bearing(e, node);
            IncidentRoad {
                edge: e,
                angle_from_reverse: normalize_degrees(bearing - baseline),
                entry_allowed: allowed.contains(&e),
                class,
            }
        })
        .collect();

    roads.sort_by(|a, b| {
        a.angle_from_reverse
            .partial_cmp(&b.angle_from_reverse)
            .unwrap()
    });

    IntersectionView {
        node,
        arrival: out,
        roads,
    }
}
