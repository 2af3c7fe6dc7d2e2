//! R8: close-turn non-collapse guard.

use crate::step::Step;
use crate::turn::ManeuverType;

/// `true` when two adjacent `Turn` steps are both at least a plain Right/Left (sharper than
/// slight). R1 consults this when its own shared-cross-road-name check fails, purely to log that
/// the pair it just declined to merge is the specific shape R8 names -- two real turns, close
/// together, correctly left standing rather than folded into a u-turn.
pub fn blocks_merge(a: &Step, b: &Step) -> bool {
    a.instruction.ty == ManeuverType::Turn
        && b.instruction.ty == ManeuverType::Turn
        && a.instruction.modifier.at_least_right_or_left()
        && b.instruction.modifier.at_least_right_or_left()
}
