//! C4: Step Builder.
//!
//! Walks a raw routed edge sequence node by node, classifying the turn at each internal node
//! (C2 + C3) and opening a new `Step` whenever that classification is anything other than
//! `NoTurn`. This is the last stage that ever looks at the edge sequence directly -- everything
//! downstream (C5, C6) operates purely on the `Step` list.

use crate::config::GuidanceConfig;
use crate::edge::{Edge, TravelMode};
use crate::error::InvalidRouteInput;
use crate::graph::RouteGraph;
use crate::ids::{EdgeId, NodeId};
use crate::intersection_view::{build_depart_view, build_intersection_view, IntersectionView};
use crate::turn::{ManeuverType, Modifier, TurnInstruction};

/// One leg of the route between two maneuver points, per the data model in `SPEC_FULL.md` §3.
/// `edges` holds every routed edge folded into this step, in travel order; a fresh `Step` never
/// starts life with more than one, but the collapsing engine (C5) merges runs of them together.
#[derive(Clone, Debug)]
pub struct Step {
    /// Node this step's own maneuver happens at -- where the traveller turned onto `edges[0]`.
    pub location: NodeId,
    /// Node shared with the next step's `location`, i.e. the far end of `edges.last()`. Equal to
    /// `location` only for a length-zero step, which never occurs.
    pub end_location: NodeId,
    pub edges: Vec<EdgeId>,
    pub name: String,
    pub r#ref: String,
    pub mode: TravelMode,
    pub distance: f64,
    pub duration: f64,
    /// The instruction that opened this step -- i.e. the maneuver taken at `location` to start
    /// travelling along `edges[0]`.
    pub instruction: TurnInstruction,
    /// The intersection view at `location`, kept around for C5 rules that need to re-examine the
    /// junction a step originated from (sliproads, segregated pairs, fork collapsing).
    pub view: IntersectionView,
    pub is_sliproad: bool,
    pub is_link: bool,
    pub lane_description_changed: bool,
}

impl Step {
    fn starting(
        location: NodeId,
        end_location: NodeId,
        edge: EdgeId,
        attrs: &Edge,
        distance: f64,
        duration: f64,
        instruction: TurnInstruction,
        view: IntersectionView,
        lane_description_changed: bool,
    ) -> Self {
        Self {
            location,
            end_location,
            edges: vec![edge],
            name: attrs.name.clone(),
            r#ref: attrs.r#ref.clone(),
            mode: attrs.travel_mode,
            distance,
            duration,
            instruction,
            is_sliproad: false,
            is_link: attrs.is_link(),
            lane_description_changed,
            view,
        }
    }

    fn extend(&mut self, end_location: NodeId, edge: EdgeId, distance: f64, duration: f64) {
        self.edges.push(edge);
        self.end_location = end_location;
        self.distance += distance;
        self.duration += duration;
    }

    /// Absorbs `other` into `self` as a single merged maneuver: concatenates edges, sums
    /// distance/duration, and relabels with a new `instruction`/`name` -- the shape every C5
    /// rule that *relabels* the survivor (R1/R2, R3, R9) needs.
    pub fn merge_in(&mut self, other: &Step, instruction: TurnInstruction, name: String) {
        self.edges.extend(other.edges.iter().copied());
        self.end_location = other.end_location;
        self.distance += other.distance;
        self.duration += other.duration;
        self.instruction = instruction;
        self.name = name;
        self.lane_description_changed = false;
    }

    /// Plain concatenation that keeps `self`'s own instruction and name -- used by rules that
    /// drop an intervening step rather than relabeling the survivor (R4, R5, R6).
    pub fn absorb(&mut self, other: &Step) {
        self.edges.extend(other.edges.iter().copied());
        self.end_location = other.end_location;
        self.distance += other.distance;
        self.duration += other.duration;
    }
}

/// Builds the step list for one routed path. `path` must be a contiguous, non-empty sequence of
/// edges, each connecting to the next via a shared endpoint -- the contract the (excluded)
/// pathfinding stage is responsible for upholding; this function validates it rather than trusts
/// it, per the error-handling stance in `SPEC_FULL.md` §7.
pub fn build_steps(
    graph: &dyn RouteGraph,
    config: &GuidanceConfig,
    path: &[EdgeId],
) -> Result<Vec<Step>, InvalidRouteInput> {
    if path.is_empty() {
        return Err(InvalidRouteInput::EmptyRoute);
    }

    let nodes = node_sequence(graph, path)?;

    let first_edge = graph.edge(path[0]);
    let mut steps = vec![Step::starting(
        nodes[0],
        nodes[1],
        path[0],
        first_edge,
        graph.distance(path[0]),
        graph.duration(path[0]),
        TurnInstruction::new(ManeuverType::Depart, Modifier::Straight),
        build_depart_view(graph, nodes[0], path[0]),
        false,
    )];

    for i in 1..path.len() {
        let node = nodes[i];
        let in_edge_id = path[i - 1];
        let out_edge_id = path[i];
        let in_edge = graph.edge(in_edge_id);
        let out_edge = graph.edge(out_edge_id);

        let view = build_intersection_view(graph, node, in_edge_id, out_edge_id);
        let arrival_bearing = graph.bearing(in_edge_id, node);
        let out_bearing = graph.bearing(out_edge_id, node);
        let classification = crate::turn::classify_turn(
            config,
            &view,
            in_edge,
            out_edge,
            arrival_bearing,
            out_bearing,
        );

        let distance = graph.distance(out_edge_id);
        let duration = graph.duration(out_edge_id);
        let end_location = nodes[i + 1];

        if classification.instruction.ty == ManeuverType::NoTurn {
            let last = steps.last_mut().expect("steps is never empty");
            last.extend(end_location, out_edge_id, distance, duration);
            continue;
        }

        steps.push(Step::starting(
            node,
            end_location,
            out_edge_id,
            out_edge,
            distance,
            duration,
            classification.instruction,
            view,
            classification.lane_description_changed,
        ));
    }

    Ok(steps)
}

/// Recovers the `path.len() + 1` node sequence a routed edge chain passes through, validating
/// contiguity as it goes (invariant I2 and the `DisconnectedStep` error).
fn node_sequence(
    graph: &dyn RouteGraph,
    path: &[EdgeId],
) -> Result<Vec<NodeId>, InvalidRouteInput> {
    let (first_src, first_dst) = graph.endpoints(path[0]);
    let mut nodes = Vec::with_capacity(path.len() + 1);
    nodes.push(first_src);
    nodes.push(first_dst);

    for &edge in &path[1..] {
        let (src, dst) = graph.endpoints(edge);
        let prev_end = *nodes.last().expect("nodes is never empty");
        if src == prev_end {
            nodes.push(dst);
        } else if dst == prev_end {
            // The map models the opposite direction as the same physical edge id reused, which
            // this crate treats as a contiguity violation: every `EdgeId` in `path` is expected
            // to already carry the travel direction the router chose.
            return Err(InvalidRouteInput::DisconnectedStep(edge, prev_end));
        } else {
            return Err(InvalidRouteInput::DisconnectedStep(edge, prev_end));
        }
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::HighwayClass;
    use geom::{PolyLine, Pt2D};
    use std::collections::HashMap;

    struct FixtureGraph {
        edges: HashMap<EdgeId, Edge>,
        endpoints: HashMap<EdgeId, (NodeId, NodeId)>,
        incident: HashMap<NodeId, Vec<EdgeId>>,
        bearings: HashMap<(EdgeId, NodeId), f64>,
    }

    impl RouteGraph for FixtureGraph {
        fn incident_edges(&self, node: NodeId) -> Vec<EdgeId> {
            self.incident.get(&node).cloned().unwrap_or_default()
        }

        fn edge(&self, id: EdgeId) -> &Edge {
            &self.edges[&id]
        }

        fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
            self.endpoints[&edge]
        }

        fn bearing(&self, edge: EdgeId, at_node: NodeId) -> f64 {
            self.bearings[&(edge, at_node)]
        }

        fn allowed_out_edges(&self, _from_edge: EdgeId, via_node: NodeId) -> Vec<EdgeId> {
            self.incident_edges(via_node)
        }

        fn distance(&self, _edge: EdgeId) -> f64 {
            100.0
        }

        fn duration(&self, _edge: EdgeId) -> f64 {
            10.0
        }
    }

    fn straight_edge(id: u64, name: &str) -> Edge {
        Edge {
            id: EdgeId(id),
            name: name.to_string(),
            r#ref: String::new(),
            highway_class: HighwayClass::Residential,
            travel_mode: TravelMode::Driving,
            lanes: 1,
            turn_lanes: vec![],
            oneway: false,
            bridge: false,
            tunnel: false,
            geometry: PolyLine::must_new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(0.0, 100.0)]),
        }
    }

    /// A two-edge straight-through path should collapse into a single step: the junction between
    /// the two edges classifies as `NoTurn` (same name, ~0 delta), so C4 folds it rather than
    /// opening a second step -- C5 never even needs to see it.
    #[test]
    fn straight_through_stays_one_step() {
        let a = EdgeId(1);
        let b = EdgeId(2);
        let n0 = NodeId(10);
        let n1 = NodeId(11);
        let n2 = NodeId(12);

        let mut edges = HashMap::new();
        edges.insert(a, straight_edge(1, "Main St"));
        edges.insert(b, straight_edge(2, "Main St"));

        let mut endpoints = HashMap::new();
        endpoints.insert(a, (n0, n1));
        endpoints.insert(b, (n1, n2));

        let mut incident = HashMap::new();
        incident.insert(n1, vec![b]);

        let mut bearings = HashMap::new();
        bearings.insert((a, n0), 0.0);
        bearings.insert((a, n1), 0.0);
        bearings.insert((b, n1), 0.0);

        let graph = FixtureGraph {
            edges,
            endpoints,
            incident,
            bearings,
        };
        let config = GuidanceConfig::default();
        let steps = build_steps(&graph, &config, &[a, b]).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].edges, vec![a, b]);
        assert_eq!(steps[0].location, n0);
        assert_eq!(steps[0].end_location, n2);
    }

    #[test]
    fn empty_path_is_rejected() {
        let graph = FixtureGraph {
            edges: HashMap::new(),
            endpoints: HashMap::new(),
            incident: HashMap::new(),
            bearings: HashMap::new(),
        };
        let config = GuidanceConfig::default();
        assert_eq!(
            build_steps(&graph, &config, &[]),
            Err(InvalidRouteInput::EmptyRoute)
        );
    }
}
