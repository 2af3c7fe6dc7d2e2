//! Turn-by-turn guidance post-processing: collapses a raw routed edge sequence into a
//! driver-facing maneuver list.
//!
//! The pipeline is `build_maneuvers`: per traversed node, classify the incident roads and the
//! turn taken ([`classify`], [`intersection_view`], [`turn`]), fold the edge sequence into a
//! linear step list ([`step`]), run the fixed-point collapsing engine that merges segregated
//! crossings, drops no-op name changes, and preserves forced u-turns ([`transform`]), then emit
//! the final `Depart`-to-`Arrive` maneuver list ([`maneuver`]). Callers supply their map/graph by
//! implementing [`RouteGraph`]; this crate never parses maps or runs shortest-path search itself.

#[macro_use]
extern crate log;

mod classify;
mod config;
mod edge;
mod error;
mod graph;
mod ids;
mod intersection_view;
mod maneuver;
mod step;
mod transform;
mod turn;

pub use config::GuidanceConfig;
pub use edge::{Edge, HighwayClass, LaneIndication, TravelMode};
pub use error::InvalidRouteInput;
pub use graph::RouteGraph;
pub use ids::{EdgeId, NodeId};
pub use maneuver::{build_maneuvers, Maneuver};
pub use turn::{ManeuverType, Modifier};
