//! R4 (name-change suppression across an unnamed segment) and R5 (silent name change).

use crate::config::GuidanceConfig;
use crate::step::Step;
use crate::turn::{ManeuverType, Modifier};

use super::importance;
use super::mode_boundary;

/// Window `(Sₖ, Sₖ₊₁, Sₖ₊₂)`: a short, straight-ish interruption sandwiched between two steps of
/// the same name (the classic case is an unnamed connector, but a short differently-named bridge
/// or tunnel segment reads the same way to a driver) contributes no information worth a surfaced
/// maneuver, so `Sₖ₊₁` is dropped and its geometry folded into `Sₖ`. When `Sₖ₊₂` is the last step
/// in the route, its own boundary is dropped the same way -- there's nothing left to say besides
/// arriving. Never applies across a mode boundary or an "important" junction (R7).
pub fn try_suppress_unnamed(
    steps: &[Step],
    i: usize,
    _config: &GuidanceConfig,
) -> Option<(usize, Vec<Step>)> {
    let a = steps.get(i)?;
    let b = steps.get(i + 1)?;
    let c = steps.get(i + 2)?;

    if !matches!(
        b.instruction.modifier,
        Modifier::Straight | Modifier::SlightRight | Modifier::SlightLeft
    ) {
        return None;
    }
    if mode_boundary::blocks_merge(a, b) || mode_boundary::blocks_merge(b, c) {
        return None;
    }
    if a.name != c.name {
        return None;
    }
    if importance::is_important(b) {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);

    if i + 3 == steps.len() {
        merged.absorb(c);
        return Some((3, vec![merged]));
    }
    Some((2, vec![merged]))
}

/// Adjacent steps sharing `(name, ref, mode)` with a no-op boundary between them (`NoTurn`,
/// straight `Turn`, or a `NewName` that turned out not to matter) merge silently -- the boundary
/// carries no instruction a driver would act on.
pub fn try_silent_name_change(
    steps: &[Step],
    i: usize,
    _config: &GuidanceConfig,
) -> Option<(usize, Vec<Step>)> {
    let a = steps.get(i)?;
    let b = steps.get(i + 1)?;

    if mode_boundary::blocks_merge(a, b) {
        return None;
    }
    if a.name != b.name || a.r#ref != b.r#ref {
        return None;
    }
    let boundary_is_noop = b.instruction.ty == ManeuverType::NoTurn
        || b.instruction.ty == ManeuverType::NewName
        || (b.instruction.ty == ManeuverType::Turn && b.instruction.modifier == Modifier::Straight);
    if !boundary_is_noop {
        return None;
    }
    if importance::is_important(b) {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);
    Some((2, vec![merged]))
}
