use geom::Distance;

/// Tunable thresholds for the collapsing engine. The exact meters used by R1/R3 are empirically
/// tuned, not load-bearing invariants -- see the design notes in `SPEC_FULL.md` -- so they live
/// here as plain data rather than hardcoded literals scattered through `transform/`.
///
/// Constructed once by the caller and threaded through the pipeline by shared reference; nothing
/// in this crate mutates it mid-route.
#[derive(Clone, Debug, PartialEq)]
pub struct GuidanceConfig {
    /// R1: the second half of a segregated-pair crossing must be shorter than this to merge.
    pub segregated_pair_max_distance: Distance,
    /// R3: a step longer than this multiple of `typical_intersection_spacing` is never a
    /// sliproad, regardless of its link status.
    pub sliproad_length_factor: f64,
    /// A rough "normal city block" distance, used as the unit for `sliproad_length_factor`.
    pub typical_intersection_spacing: Distance,
    /// Bearing-delta bins (degrees) used by the default `Turn` modifier assignment in
    /// [crate::turn].
    pub straight_deg: f64,
    pub slight_deg: f64,
    pub sharp_deg: f64,
    pub uturn_deg: f64,
    /// A `Fork` is only detected when both candidate exits lie within this many degrees of
    /// straight ahead, on opposite sides.
    pub fork_max_deg: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            segregated_pair_max_distance: Distance::meters(30.0),
            sliproad_length_factor: 2.0,
            typical_intersection_spacing: Distance::meters(50.0),
            straight_deg: 10.0,
            slight_deg: 45.0,
            sharp_deg: 135.0,
            uturn_deg: 175.0,
            fork_max_deg: 60.0,
        }
    }
}

impl GuidanceConfig {
    pub fn sliproad_max_distance(&self) -> Distance {
        self.typical_intersection_spacing * self.sliproad_length_factor
    }
}
