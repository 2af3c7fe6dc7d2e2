//! R9: ramp chain collapse.

use crate::config::GuidanceConfig;
use crate::step::Step;
use crate::turn::ManeuverType;

use super::mode_boundary;

/// `OnRamp` immediately followed by `Merge` onto the mainline, with no intervening junction, is
/// one continuous event from behind the wheel. Keeps the `Merge` maneuver -- what the driver
/// actually has to execute -- and folds the on-ramp geometry into it.
pub fn try_collapse(
    steps: &[Step],
    i: usize,
    _config: &GuidanceConfig,
) -> Option<(usize, Vec<Step>)> {
    let a = steps.get(i)?;
    let b = steps.get(i + 1)?;

    if mode_boundary::blocks_merge(a, b) {
        return None;
    }
    if a.instruction.ty != ManeuverType::OnRamp || b.instruction.ty != ManeuverType::Merge {
        return None;
    }

    let instruction = b.instruction;
    let name = b.name.clone();
    let mut merged = a.clone();
    merged.merge_in(b, instruction, name);
    Some((2, vec![merged]))
}
