//! C6: Maneuver Assembler.

use serde::{Deserialize, Serialize};

use crate::config::GuidanceConfig;
use crate::edge::TravelMode;
use crate::error::InvalidRouteInput;
use crate::graph::RouteGraph;
use crate::ids::{EdgeId, NodeId};
use crate::step::build_steps;
use crate::transform::collapse;
use crate::turn::{ManeuverType, Modifier};

/// One driver-facing instruction, per the data model in `SPEC_FULL.md` §3. `edges` is the full
/// span of routed edges this maneuver covers, in travel order -- the renderer concatenates their
/// geometry itself rather than this crate doing it, since polyline simplification for display is
/// explicitly out of scope (§1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    pub location: NodeId,
    pub maneuver_type: ManeuverType,
    pub modifier: Modifier,
    /// The name of the road being *entered* by this maneuver. Empty when that road is unnamed;
    /// the structural maneuver is still emitted (§4.6).
    pub name: String,
    pub mode: TravelMode,
    pub edges: Vec<EdgeId>,
    pub distance: f64,
    pub duration: f64,
}

/// The top-level entry point: collapses a raw routed edge sequence into the final maneuver list.
/// Total for any well-formed, non-empty `path` -- the result always has at least two maneuvers,
/// `Depart` followed eventually by `Arrive` (§7).
pub fn build_maneuvers(
    graph: &dyn RouteGraph,
    config: &GuidanceConfig,
    path: &[EdgeId],
) -> Result<Vec<Maneuver>, InvalidRouteInput> {
    let steps = build_steps(graph, config, path)?;
    let steps = collapse(steps, config);
    Ok(assemble(&steps))
}

/// Maps the (already collapsed) step list to the final `Maneuver` list: `Depart` at the first
/// step's own location, one maneuver per retained step boundary carrying the name of the road it
/// enters, and `Arrive` at the last step's end location.
fn assemble(steps: &[crate::step::Step]) -> Vec<Maneuver> {
    let mut maneuvers = Vec::with_capacity(steps.len() + 1);

    let first = &steps[0];
    maneuvers.push(Maneuver {
        location: first.location,
        maneuver_type: ManeuverType::Depart,
        modifier: Modifier::Straight,
        name: first.name.clone(),
        mode: first.mode,
        edges: first.edges.clone(),
        distance: first.distance,
        duration: first.duration,
    });

    for window in steps.windows(2) {
        let entered = &window[1];
        maneuvers.push(Maneuver {
            location: entered.location,
            maneuver_type: entered.instruction.ty,
            modifier: entered.instruction.modifier,
            name: entered.name.clone(),
            mode: entered.mode,
            edges: entered.edges.clone(),
            distance: entered.distance,
            duration: entered.duration,
        });
    }

    let last = steps.last().expect("build_steps never returns an empty list");
    maneuvers.push(Maneuver {
        location: last.end_location,
        maneuver_type: ManeuverType::Arrive,
        // The destination's lateral offset from the final edge is a map-matching/waypoint
        // concern (explicitly excluded, §1); without it, straight ahead is the only side this
        // crate can report without guessing.
        modifier: Modifier::Straight,
        name: String::new(),
        mode: last.mode,
        edges: vec![],
        distance: 0.0,
        duration: 0.0,
    });

    maneuvers
}
