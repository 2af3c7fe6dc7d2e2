//! R3: sliproad collapse.

use crate::config::GuidanceConfig;
use crate::step::Step;
use crate::turn::{ManeuverType, TurnInstruction};

use super::mode_boundary;

/// A short link-road hop that only exists to physically connect two roads without a proper
/// intersection (a classic on/off ramp sliproad). Collapses `(Sₖ, Sₖ₊₁)` into a single `Turn`
/// reading as the mainline-to-mainline direction, rather than surfacing the sliproad itself as a
/// maneuver.
pub fn try_collapse(
    steps: &[Step],
    i: usize,
    config: &GuidanceConfig,
) -> Option<(usize, Vec<Step>)> {
    let a = steps.get(i)?;
    let b = steps.get(i + 1)?;

    if mode_boundary::blocks_merge(a, b) {
        return None;
    }
    if !a.is_link {
        return None;
    }
    if a.distance >= config.sliproad_max_distance().inner_meters() {
        return None;
    }
    // The step after the sliproad must rejoin a proper mainline; if it's still a link, this is
    // an ordinary ramp chain (R9's job), not a sliproad.
    if b.is_link {
        return None;
    }

    let instruction = TurnInstruction::new(ManeuverType::Turn, b.instruction.modifier);
    let name = b.name.clone();
    let mut merged = a.clone();
    merged.merge_in(b, instruction, name);
    merged.is_sliproad = true;
    Some((2, vec![merged]))
}
