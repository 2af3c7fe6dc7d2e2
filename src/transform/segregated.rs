//! R1 (segregated pair merge) and R2 (forced u-turn preservation).

use anyhow::{bail, Result};

use crate::classify::name_hash_str;
use crate::config::GuidanceConfig;
use crate::step::Step;
use crate::turn::{modifier_degrees, modifier_from_delta, signed_bearing_delta, ManeuverType, Modifier, TurnInstruction};

use super::{close_turn, mode_boundary};

/// Recognizes a dual-carriageway crossing: `Sₖ` turns off the near carriageway, `Sₖ₊₁` is a
/// short hop rotating the same direction again that lands on the far carriageway, and the pair
/// reads to a driver as one event ("turn right" rather than "turn right, then immediately turn
/// right again").
pub fn try_merge(
    steps: &[Step],
    i: usize,
    config: &GuidanceConfig,
) -> Option<(usize, Vec<Step>)> {
    let a = steps.get(i)?;
    let b = steps.get(i + 1)?;

    if mode_boundary::blocks_merge(a, b) {
        return None;
    }
    if !matches!(
        a.instruction.ty,
        ManeuverType::Turn | ManeuverType::Fork | ManeuverType::EndOfRoad | ManeuverType::NewName
    ) {
        return None;
    }
    if !matches!(b.instruction.ty, ManeuverType::Turn | ManeuverType::NewName) {
        return None;
    }
    if b.distance >= config.segregated_pair_max_distance.inner_meters() {
        return None;
    }

    // A segregated crossing compounds two turns in the *same* rotational direction (e.g. two
    // rights, crossing over and continuing on the far carriageway); that's what makes the net
    // bearing change add up to a near-reversal instead of cancelling out.
    let same_rotation = (a.instruction.modifier.is_right_of_straight()
        && b.instruction.modifier.is_right_of_straight())
        || (a.instruction.modifier.is_left_of_straight() && b.instruction.modifier.is_left_of_straight());
    if !same_rotation {
        return None;
    }
    // Everything structural lines up -- short, same-rotation, right maneuver types. At this
    // point an unnamed crossing is unusual enough to be worth a log line rather than a silent
    // skip: it's the shape of a segregated pair with none of the naming data that would confirm
    // it's actually one of the recognized named cross-street crossings.
    if let Err(e) = check_cross_street_named(b) {
        warn!("skipped segregated merge at step: {e}");
        return None;
    }
    // R1 requires *both* halves of the crossing to recognize each other: the near-side junction
    // must also see the far carriageway's name nearby, and the far-side junction must also see
    // the cross street's name nearby. Two unrelated same-direction turns (a double-right around a
    // block) have the same short/same-rotation shape but never share cross-road names at both
    // nodes, which is exactly the case R8 exists to keep standing as two maneuvers.
    if !shares_cross_road_names(a, b) {
        if close_turn::blocks_merge(a, b) {
            debug!("R8: leaving close turns standing, cross streets don't match at both nodes");
        }
        return None;
    }

    let net_delta = net_bearing_delta(a, b);
    // `b` is itself the step that resumes travel on the far carriageway, so its own name is what
    // the traveller ends up on -- not whatever road comes after it.
    let destination_name = b.name.clone();
    // The name of the road travelled just before the crossing -- R2 fires when the crossing
    // drops the traveller back onto this same road, not merely onto any named continuation.
    let approach_name = if i > 0 {
        steps[i - 1].name.clone()
    } else {
        String::new()
    };

    let merged_instruction = if net_delta.abs() >= config.uturn_deg
        && !approach_name.is_empty()
        && approach_name == destination_name
    {
        // R2: the crossing lands back on the *same* named road at a near-reversal bearing --
        // this is a forced u-turn across a median, not an ordinary turn, and must not be
        // silently renamed away.
        TurnInstruction::new(ManeuverType::Continue, Modifier::UTurn)
    } else {
        TurnInstruction::new(ManeuverType::Turn, modifier_from_delta(net_delta, config))
    };

    let mut merged = a.clone();
    merged.merge_in(b, merged_instruction, destination_name);
    Some((2, vec![merged]))
}

/// `true` when each junction of the candidate crossing can also see the *other* junction's road
/// name nearby: the near-side junction (`a.view`) has some other incident road named like `b`'s
/// destination, and the far-side junction (`b.view`) has some other incident road named like
/// `a`'s cross street. A real segregated dual-carriageway crossing has this property because both
/// carriageways and the cross street that joins them are visible from both halves of the
/// intersection; two turns onto unrelated streets around an ordinary block do not.
fn shares_cross_road_names(a: &Step, b: &Step) -> bool {
    let a_taken = match a.edges.last() {
        Some(&e) => e,
        None => return false,
    };
    let b_taken = match b.edges.first() {
        Some(&e) => e,
        None => return false,
    };

    let b_destination_hash = name_hash_str(&b.name);
    let a_cross_street_hash = name_hash_str(&a.name);

    let a_sees_destination = a
        .view
        .roads
        .iter()
        .any(|r| r.edge != a_taken && r.class.is_named && r.class.name_id == b_destination_hash);
    let b_sees_cross_street = b
        .view
        .roads
        .iter()
        .any(|r| r.edge != b_taken && r.class.is_named && r.class.name_id == a_cross_street_hash);

    a_sees_destination && b_sees_cross_street
}

fn net_bearing_delta(a: &Step, b: &Step) -> f64 {
    let raw = modifier_degrees(a.instruction.modifier) + modifier_degrees(b.instruction.modifier);
    signed_bearing_delta(0.0, raw)
}

fn check_cross_street_named(b: &Step) -> Result<()> {
    if b.name.is_empty() {
        bail!("crossing edge has no name to identify the cross street by");
    }
    Ok(())
}
