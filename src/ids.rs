use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque and non-contiguous. Assigned upstream by the map/graph layer; this crate never
/// allocates one itself.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Edge #{}", self.0)
    }
}

/// Opaque and non-contiguous. One node may be a real intersection or, just as often in a
/// segregated network, one half of a dual carriageway crossing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node #{}", self.0)
    }
}

/// Identifies one `Step` by its position in the step list built by `build_steps`. Indices, not a
/// linked structure -- the collapsing engine replaces runs of steps by index range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepIndex(pub usize);

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Step #{}", self.0)
    }
}
