use crate::edge::Edge;
use crate::ids::{EdgeId, NodeId};

/// The upstream collaborators this crate consumes, bundled into one object-safe trait so a
/// caller implements it once over whatever map representation it already has (a raw graph, a
/// contraction-hierarchy query layer, a synthetic test fixture). The collapsing core never
/// parses maps, snaps coordinates, or runs shortest-path search itself -- all of that lives on
/// the other side of this trait.
///
/// Every method is a pure lookup: no method here may block, retry, or mutate shared state. The
/// whole pipeline (`build_maneuvers`) is synchronous and single-threaded, see `SPEC_FULL.md` §5.
pub trait RouteGraph {
    /// All edges departing `node`, i.e. edges whose source is `node` -- the full set of
    /// candidate "out" roads an `IntersectionView` needs, including the reverse of whatever edge
    /// was just arrived on, if the network models one. Order is unspecified; callers sort by
    /// bearing themselves.
    fn incident_edges(&self, node: NodeId) -> Vec<EdgeId>;

    /// Look up an edge's attributes.
    fn edge(&self, id: EdgeId) -> &Edge;

    /// The `(source, destination)` nodes of `edge`, in the edge's own direction of travel.
    fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId);

    /// Deterministic bearing of `edge`, measured at `at_node`, in degrees clockwise from north,
    /// normalized to `[0, 360)`. If `at_node` is the edge's source, this is the departure
    /// bearing; if it's the destination, this is the arrival bearing (the direction you were
    /// travelling just before reaching the node).
    fn bearing(&self, edge: EdgeId, at_node: NodeId) -> f64;

    /// The turn-restriction oracle: which edges a vehicle may legally take leaving `via_node`
    /// having arrived on `from_edge`. Already resolves `no_*`/`only_*` restrictions and one-way
    /// direction; the result is exactly the set `IntersectionView::entry_allowed` should mark
    /// `true`.
    fn allowed_out_edges(&self, from_edge: EdgeId, via_node: NodeId) -> Vec<EdgeId>;

    /// Length of `edge` in meters, as computed by the (excluded) vehicle-profile/weight stage.
    fn distance(&self, edge: EdgeId) -> f64;

    /// Traversal time of `edge` in seconds, as computed by the (excluded) vehicle-profile stage.
    fn duration(&self, edge: EdgeId) -> f64;

    /// The node at the far end of `edge` from `from`.
    fn other_endpoint(&self, edge: EdgeId, from: NodeId) -> NodeId {
        let (src, dst) = self.endpoints(edge);
        if src == from {
            dst
        } else {
            src
        }
    }
}
