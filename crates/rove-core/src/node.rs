//! Node identity.
//!
//! Rove never owns host nodes; it only refers to them. [`NodeId`] is the
//! opaque key a host hands out for each node it manages, typically allocated
//! from a `slotmap::SlotMap<NodeId, _>` arena on the host side.

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for a host node.
    ///
    /// The host environment allocates these and guarantees stability for the
    /// lifetime of the node. Rove stores and compares them but never
    /// dereferences them itself; all node inspection goes through the host
    /// capability traits.
    pub struct NodeId;
}
