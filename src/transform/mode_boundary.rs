//! R10: travel-mode boundary guard.

use crate::step::Step;

/// `true` when merging `a` and `b` would collapse across a travel-mode change. `classify_turn`
/// already guarantees a mode change never classifies as `NoTurn` (it forces `Notification`
/// instead, see invariant I5), so every rewrite rule calls this as a backstop before merging
/// rather than relying on that alone.
pub fn blocks_merge(a: &Step, b: &Step) -> bool {
    a.mode != b.mode
}
