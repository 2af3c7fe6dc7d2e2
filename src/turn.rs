//! C3: Turn Classifier.

use serde::{Deserialize, Serialize};

use crate::classify::same_road_identity;
use crate::config::GuidanceConfig;
use crate::edge::Edge;
use crate::intersection_view::IntersectionView;

/// The finite closed set of structural maneuver types a `Step` boundary can carry. Never
/// overload this with free-form strings; the renderer localizes prose from `(type, modifier)`
/// plus the entered road's name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ManeuverType {
    Depart,
    Arrive,
    NoTurn,
    NewName,
    Continue,
    Turn,
    Merge,
    OnRamp,
    OffRamp,
    Fork,
    EndOfRoad,
    Notification,
    Roundabout,
    UseLane,
    Suppressed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    UTurn,
    SharpRight,
    Right,
    SlightRight,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
}

impl Modifier {
    /// `true` for the four "turning right" modifiers, used by rule R8 (two adjacent sharp-ish
    /// turns are never silently collapsed).
    pub fn is_right_of_straight(self) -> bool {
        matches!(
            self,
            Modifier::SlightRight | Modifier::Right | Modifier::SharpRight
        )
    }

    pub fn is_left_of_straight(self) -> bool {
        matches!(
            self,
            Modifier::SlightLeft | Modifier::Left | Modifier::SharpLeft
        )
    }

    /// `true` for `Right`/`SharpRight`/`Left`/`SharpLeft` -- i.e. "at least as sharp as a plain
    /// Right/Left", which is what rule R8 means by "|modifier| >= Right".
    pub fn at_least_right_or_left(self) -> bool {
        matches!(
            self,
            Modifier::Right | Modifier::SharpRight | Modifier::Left | Modifier::SharpLeft
        )
    }
}

/// A structural maneuver: `(type, modifier)`. `Depart`/`Arrive` carry no meaningful modifier
/// beyond which side of the road the location is on (see [crate::maneuver]).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnInstruction {
    pub ty: ManeuverType,
    pub modifier: Modifier,
}

impl TurnInstruction {
    pub fn new(ty: ManeuverType, modifier: Modifier) -> Self {
        Self { ty, modifier }
    }
}

/// The turn classifier's full output for one traversed node: the instruction plus the one piece
/// of lane bookkeeping (§4.3 rule 6) that belongs with it but isn't part of the closed
/// `(type, modifier)` pair.
#[derive(Clone, Copy, Debug)]
pub struct TurnClassification {
    pub instruction: TurnInstruction,
    pub lane_description_changed: bool,
}

/// Representative signed bearing delta for a modifier -- the rough inverse of
/// `modifier_from_delta`. The collapsing engine (C5) works purely off already-classified `Step`s
/// and never sees the original graph's raw bearings, so R1's net-direction recomputation has to
/// start from this approximation rather than true angles.
pub fn modifier_degrees(modifier: Modifier) -> f64 {
    match modifier {
        Modifier::Straight => 0.0,
        Modifier::SlightRight => 25.0,
        Modifier::Right => 90.0,
        Modifier::SharpRight => 155.0,
        Modifier::UTurn => 180.0,
        Modifier::SlightLeft => -25.0,
        Modifier::Left => -90.0,
        Modifier::SharpLeft => -155.0,
    }
}

/// Signed clockwise bearing delta from `from` to `to`, normalized to `(-180, 180]`.
pub fn signed_bearing_delta(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % 360.0;
    if delta <= -180.0 {
        delta += 360.0;
    } else if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}


/// Bins a signed bearing delta into a `Modifier` per §4.3 rule 5's thresholds.
pub fn modifier_from_delta(delta: f64, config: &GuidanceConfig) -> Modifier {
    let mag = delta.abs();
    if mag >= config.uturn_deg {
        return Modifier::UTurn;
    }
    if mag >= config.sharp_deg {
        return if delta > 0.0 {
            Modifier::SharpRight
        } else {
            Modifier::SharpLeft
        };
    }
    if mag >= config.slight_deg {
        return if delta > 0.0 {
            Modifier::Right
        } else {
            Modifier::Left
        };
    }
    if mag >= config.straight_deg {
        return if delta > 0.0 {
            Modifier::SlightRight
        } else {
            Modifier::SlightLeft
        };
    }
    Modifier::Straight
}

/// Classifies the maneuver at one traversed node, given the already-built `IntersectionView`,
/// the chosen `out` edge, and the bearings at play. `arrival_bearing`/`out_bearing` are the
/// travel bearings of `in`/`out` at `node` (the same values used to build `view`).
#[allow(clippy::too_many_arguments)]
pub fn classify_turn(
    config: &GuidanceConfig,
    view: &IntersectionView,
    in_edge: &Edge,
    out_edge: &Edge,
    arrival_bearing: f64,
    out_bearing: f64,
) -> TurnClassification {
    let delta = signed_bearing_delta(arrival_bearing, out_bearing);

    // Mode boundaries take priority over everything else: per invariant I5, a mode change is
    // never silently folded into an ordinary turn.
    if in_edge.travel_mode != out_edge.travel_mode {
        return TurnClassification {
            instruction: TurnInstruction::new(
                ManeuverType::Notification,
                modifier_from_delta(delta, config),
            ),
            lane_description_changed: false,
        };
    }

    let out = view
        .find(out_edge.id)
        .expect("out edge must be present in its own intersection view");
    let others_excluding_out = view
        .other_allowed_non_uturn(out.edge)
        .collect::<Vec<_>>();
    let total_other_than_arrival = view.degree();

    let base = if total_other_than_arrival <= 1 {
        // Degree-1: the road you're on terminates here. There's nothing to choose from besides
        // (possibly) turning back the way you came.
        if others_excluding_out.is_empty() && out.entry_allowed {
            TurnInstruction::new(ManeuverType::EndOfRoad, modifier_from_delta(delta, config))
        } else {
            TurnInstruction::new(ManeuverType::Turn, modifier_from_delta(delta, config))
        }
    } else if total_other_than_arrival == 2 && others_excluding_out.is_empty() {
        // Degree-2: one real onward road plus the u-turn candidate -- a plain "pass-through"
        // node, the kind the collapsing engine is expected to erase entirely.
        let same_name = same_road_identity(in_edge, out_edge);
        if same_name && delta.abs() <= 15.0 {
            TurnInstruction::new(ManeuverType::NoTurn, Modifier::Straight)
        } else if delta.abs() <= 35.0 {
            TurnInstruction::new(ManeuverType::NewName, modifier_from_delta(delta, config))
        } else {
            TurnInstruction::new(ManeuverType::Turn, modifier_from_delta(delta, config))
        }
    } else if let Some(other) = find_fork_partner(config, &others_excluding_out, out, delta) {
        let side = if delta < other.delta {
            Modifier::SlightLeft
        } else {
            Modifier::SlightRight
        };
        TurnInstruction::new(ManeuverType::Fork, side)
    } else if out_edge.is_link() && !in_edge.is_link() {
        TurnInstruction::new(ManeuverType::OffRamp, modifier_from_delta(delta, config))
    } else if in_edge.is_link()
        && !out_edge.is_link()
        && others_excluding_out.iter().any(|r| !r.class.is_link)
    {
        TurnInstruction::new(ManeuverType::Merge, modifier_from_delta(delta, config))
    } else if in_edge.is_link() && out_edge.is_link() && same_road_identity(in_edge, out_edge) {
        TurnInstruction::new(ManeuverType::OnRamp, modifier_from_delta(delta, config))
    } else {
        TurnInstruction::new(ManeuverType::Turn, modifier_from_delta(delta, config))
    };

    apply_use_lane(config, base, in_edge, out_edge)
}

struct ForkPartner {
    delta: f64,
}

fn find_fork_partner(
    config: &GuidanceConfig,
    others: &[&crate::intersection_view::IncidentRoad],
    out: &crate::intersection_view::IncidentRoad,
    out_delta: f64,
) -> Option<ForkPartner> {
    if out_delta.abs() > config.fork_max_deg {
        return None;
    }
    others
        .iter()
        .find(|r| {
            let other_delta = r.angle_from_reverse_to_delta();
            r.class.priority.ties_with(&out.class.priority)
                && other_delta.abs() <= config.fork_max_deg
                && (other_delta > 0.0) != (out_delta > 0.0)
        })
        .map(|r| ForkPartner {
            delta: r.angle_from_reverse_to_delta(),
        })
}

fn apply_use_lane(
    config: &GuidanceConfig,
    base: TurnInstruction,
    in_edge: &Edge,
    out_edge: &Edge,
) -> TurnClassification {
    let _ = config;
    let underlying_is_straight_or_no_turn = matches!(
        (base.ty, base.modifier),
        (ManeuverType::NoTurn, _) | (ManeuverType::Turn, Modifier::Straight)
    );
    if underlying_is_straight_or_no_turn
        && !in_edge.turn_lanes.is_empty()
        && !out_edge.turn_lanes.is_empty()
    {
        let changed = in_edge.turn_lanes != out_edge.turn_lanes;
        return TurnClassification {
            instruction: TurnInstruction::new(ManeuverType::UseLane, Modifier::Straight),
            lane_description_changed: changed,
        };
    }
    TurnClassification {
        instruction: base,
        lane_description_changed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::TravelMode;
    use geom::{PolyLine, Pt2D};

    #[test]
    fn modifier_bins_follow_config_thresholds() {
        let config = GuidanceConfig::default();
        assert_eq!(modifier_from_delta(5.0, &config), Modifier::Straight);
        assert_eq!(modifier_from_delta(30.0, &config), Modifier::SlightRight);
        assert_eq!(modifier_from_delta(-30.0, &config), Modifier::SlightLeft);
        assert_eq!(modifier_from_delta(90.0, &config), Modifier::Right);
        assert_eq!(modifier_from_delta(-90.0, &config), Modifier::Left);
        assert_eq!(modifier_from_delta(150.0, &config), Modifier::SharpRight);
        assert_eq!(modifier_from_delta(179.0, &config), Modifier::UTurn);
    }

    fn bare_edge(name: &str, turn_lanes: Vec<enumset::EnumSet<crate::edge::LaneIndication>>) -> Edge {
        Edge {
            id: crate::ids::EdgeId(0),
            name: name.to_string(),
            r#ref: String::new(),
            highway_class: crate::edge::HighwayClass::Residential,
            travel_mode: TravelMode::Driving,
            lanes: 1,
            turn_lanes,
            oneway: false,
            bridge: false,
            tunnel: false,
            geometry: PolyLine::must_new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(0.0, 1.0)]),
        }
    }

    #[test]
    fn use_lane_only_fires_on_a_straight_pass_through() {
        let config = GuidanceConfig::default();
        let base = TurnInstruction::new(ManeuverType::Turn, Modifier::Right);
        let in_edge = bare_edge("Main St", vec![enumset::EnumSet::only(crate::edge::LaneIndication::Through)]);
        let out_edge = bare_edge("Main St", vec![enumset::EnumSet::only(crate::edge::LaneIndication::Right)]);
        let result = apply_use_lane(&config, base, &in_edge, &out_edge);
        // A real right turn is never relabeled into a lane notification, regardless of tagging.
        assert_eq!(result.instruction.ty, ManeuverType::Turn);
        assert!(!result.lane_description_changed);
    }

    #[test]
    fn use_lane_flags_a_changed_lane_description() {
        let config = GuidanceConfig::default();
        let base = TurnInstruction::new(ManeuverType::NoTurn, Modifier::Straight);
        let in_edge = bare_edge("Main St", vec![enumset::EnumSet::only(crate::edge::LaneIndication::Through)]);
        let out_edge = bare_edge("Main St", vec![enumset::EnumSet::only(crate::edge::LaneIndication::Right)]);
        let result = apply_use_lane(&config, base, &in_edge, &out_edge);
        assert_eq!(result.instruction.ty, ManeuverType::UseLane);
        assert!(result.lane_description_changed);
    }

    #[test]
    fn use_lane_ignores_missing_tagging() {
        let config = GuidanceConfig::default();
        let base = TurnInstruction::new(ManeuverType::NoTurn, Modifier::Straight);
        let in_edge = bare_edge("Main St", vec![]);
        let out_edge = bare_edge("Main St", vec![enumset::EnumSet::only(crate::edge::LaneIndication::Right)]);
        let result = apply_use_lane(&config, base, &in_edge, &out_edge);
        assert_eq!(result.instruction.ty, ManeuverType::NoTurn);
    }
}
