use thiserror::Error;

use crate::ids::{EdgeId, NodeId};

/// The single public failure surface of this crate, per the error-handling design in
/// `SPEC_FULL.md` §7. Every variant is a programming or upstream-map error -- never something a
/// well-formed route produces -- so callers are expected to treat any of these as a bug report,
/// not a condition to retry or recover from.
///
/// Everything else (unknown road class, missing name, missing lane count) degrades to a
/// conservative default inside the relevant component and never reaches this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRouteInput {
    #[error("route has no edges")]
    EmptyRoute,

    #[error("node {0} has no incident edge data")]
    UnknownNode(NodeId),

    #[error("edge {0} does not connect to node {1}: steps are not contiguous")]
    DisconnectedStep(EdgeId, NodeId),

    #[error("edge {0} and its reverse are both marked oneway into each other at node {1}")]
    ContradictoryOneway(EdgeId, NodeId),
}
