//! C5: Collapsing Engine.
//!
//! A local-rewrite fixed point over the step list produced by C4. Each rule is a pure function
//! of a window starting at some index; the engine tries rules in fixed priority order at the
//! leftmost still-unresolved position and restarts scanning from that position after a rewrite,
//! so cascading merges (a sliproad collapse exposing a segregated pair, say) resolve within one
//! round rather than waiting for the next full scan. It terminates when a complete scan makes no
//! change.

mod close_turn;
mod importance;
mod mode_boundary;
mod ramp_chain;
mod segregated;
mod sliproad;
mod suppress;
mod use_lane;

use crate::config::GuidanceConfig;
use crate::step::Step;

/// `(window) -> Option<(consumed, replacement)>`: if the rule applies at `steps[i..]`, returns
/// how many leading steps it consumes and what to replace them with. Arena-by-index rather than
/// a linked list, per the design notes -- `Vec::splice` does the actual surgery.
type Rule = fn(&[Step], usize, &GuidanceConfig) -> Option<(usize, Vec<Step>)>;

/// Priority order doubles as the tie-break: at a given index, the first rule in this list that
/// applies wins, even if a later rule also would.
const RULES: &[Rule] = &[
    segregated::try_merge,
    sliproad::try_collapse,
    suppress::try_suppress_unnamed,
    suppress::try_silent_name_change,
    use_lane::try_suppress,
    ramp_chain::try_collapse,
];

/// Runs the fixed-point collapse described in `SPEC_FULL.md` §4.5 to completion.
pub fn collapse(mut steps: Vec<Step>, config: &GuidanceConfig) -> Vec<Step> {
    let mut round = 0u32;
    loop {
        round += 1;
        let mut changed = false;
        let mut i = 0;
        while i < steps.len() {
            let mut applied = false;
            for (rule_index, rule) in RULES.iter().enumerate() {
                if let Some((consumed, replacement)) = rule(&steps, i, config) {
                    debug!(
                        "collapse round {round}: rule {rule_index} fired at step {i}, consuming {consumed}"
                    );
                    steps.splice(i..i + consumed, replacement);
                    changed = true;
                    applied = true;
                    break;
                }
            }
            if !applied {
                i += 1;
            }
        }
        if !changed {
            debug!("collapse converged after {round} round(s), {} step(s) remain", steps.len());
            return steps;
        }
    }
}
