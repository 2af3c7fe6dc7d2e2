//! R7: important-turn preservation.

use crate::step::Step;

/// `true` when `step`'s intersection view contains another allowed exit whose priority is at
/// least as major as the one actually chosen -- i.e. this was a real decision at a real
/// crossroads, not a no-op fork in an otherwise single road. R4/R5 must not suppress a step this
/// returns `true` for, even if it otherwise qualifies (same name, straight-ish bearing).
pub fn is_important(step: &Step) -> bool {
    let chosen_edge = match step.edges.first() {
        Some(&e) => e,
        None => return false,
    };
    let chosen = match step.view.find(chosen_edge) {
        Some(r) => r,
        None => return false,
    };
    step.view
        .allowed()
        .any(|r| r.edge != chosen_edge && !chosen.class.priority.beats(&r.class.priority))
}
