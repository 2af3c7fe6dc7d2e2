use enumset::{EnumSet, EnumSetType};
use geom::PolyLine;
use serde::{Deserialize, Serialize};

use crate::ids::EdgeId;

/// The OSM-style road class of an edge, ordered roughly by how "major" it reads to a driver.
/// `RoadClassifier` uses the enum's declaration order as the priority ladder described in
/// [crate::classify].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HighwayClass {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Residential,
    Service,
    Ferry,
    Other,
}

impl HighwayClass {
    /// Whether this class is the `_link` half of an on/off ramp, sliproad, or similar connector.
    pub fn is_link(self) -> bool {
        matches!(
            self,
            HighwayClass::MotorwayLink
                | HighwayClass::TrunkLink
                | HighwayClass::PrimaryLink
                | HighwayClass::SecondaryLink
                | HighwayClass::TertiaryLink
        )
    }

    /// Lower is "more major". Used directly as the first component of `RoadPriority`.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl Default for HighwayClass {
    fn default() -> Self {
        HighwayClass::Other
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TravelMode {
    Driving,
    Ferry,
    Walking,
    Cycling,
}

impl Default for TravelMode {
    fn default() -> Self {
        TravelMode::Driving
    }
}

/// One tagged direction a lane permits, matching OSM's `turn:lanes` vocabulary closely enough to
/// drive the `UseLane` decision in [crate::turn]. An `EnumSet` because a single lane is commonly
/// tagged with more than one indication (e.g. "left;through").
#[derive(Debug, EnumSetType, Serialize, Deserialize)]
pub enum LaneIndication {
    SharpLeft,
    Left,
    SlightLeft,
    Through,
    SlightRight,
    Right,
    SharpRight,
    UTurn,
    Merge,
}

/// Directed edge along the route. Attributes mirror what an upstream map/graph layer would hand
/// over for one traversed way segment; this crate never parses OSM tags itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    /// Empty when the edge is unnamed (a bridge approach, a service road, ...).
    pub name: String,
    /// The highway route designation (e.g. "I-90"), independent of `name`.
    pub r#ref: String,
    pub highway_class: HighwayClass,
    pub travel_mode: TravelMode,
    /// 0 means unknown; callers should not assume `lanes > 0`.
    pub lanes: u32,
    /// Left-to-right per-lane turn indications. Empty when the map has no `turn:lanes` data.
    pub turn_lanes: Vec<EnumSet<LaneIndication>>,
    pub oneway: bool,
    pub bridge: bool,
    pub tunnel: bool,
    pub geometry: PolyLine,
}

impl Edge {
    /// Conservative defaults for any attribute the map layer couldn't supply, per the Road
    /// Classifier's "no errors, degrade gracefully" contract.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_link(&self) -> bool {
        self.highway_class.is_link()
    }
}
