//! R6: `UseLane` suppression.

use crate::config::GuidanceConfig;
use crate::step::Step;
use crate::turn::ManeuverType;

/// A `UseLane` step is only worth surfacing when the lane tagging actually changed (C3 rule 6);
/// otherwise it carries no instruction a driver needs and merges quietly into its predecessor.
pub fn try_suppress(
    steps: &[Step],
    i: usize,
    _config: &GuidanceConfig,
) -> Option<(usize, Vec<Step>)> {
    let a = steps.get(i)?;
    let b = steps.get(i + 1)?;
    if b.instruction.ty != ManeuverType::UseLane || b.lane_description_changed {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);
    Some((2, vec![merged]))
}
