//! Identifier types for interned terms
//!
//! A [`NodeId`] is only meaningful relative to the [`NodeStorage`](super::NodeStorage)
//! that minted it. Two ids with the same kind and local id coming from different
//! storages do not denote the same term.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Kind tag of an interned term
///
/// The declaration order is the cross-kind sort order used by
/// [`Node`](crate::node::Node): unbound (null) first, then variables, blank nodes,
/// IRIs and finally literals.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum NodeKind {
    /// Sentinel for the empty term
    #[default]
    Null,
    Variable,
    BlankNode,
    Iri,
    Literal,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Variable => "variable",
            NodeKind::BlankNode => "blank node",
            NodeKind::Iri => "IRI",
            NodeKind::Literal => "literal",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage-local numeric id, the index of a record in its kind's arena
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LocalId(pub u64);

impl LocalId {
    pub fn new(id: u64) -> Self {
        LocalId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Arena position, or `None` when the id does not fit the address space
    pub(crate) fn as_index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl From<u64> for LocalId {
    fn from(id: u64) -> Self {
        LocalId(id)
    }
}

/// Kind tag plus storage-local id
///
/// Ordered lexicographically by `(kind, local_id)`. The default value is the null
/// term; for a null id the local id carries no meaning.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId {
    kind: NodeKind,
    local_id: LocalId,
}

impl NodeId {
    /// `rdf:langString`, pre-interned by every storage
    pub const RDF_LANG_STRING: NodeId = NodeId {
        kind: NodeKind::Iri,
        local_id: LocalId(0),
    };

    /// `xsd:string`, pre-interned by every storage
    pub const XSD_STRING: NodeId = NodeId {
        kind: NodeKind::Iri,
        local_id: LocalId(1),
    };

    pub fn new(kind: NodeKind, local_id: LocalId) -> Self {
        if kind == NodeKind::Null {
            return Self::null();
        }
        NodeId { kind, local_id }
    }

    pub fn null() -> Self {
        NodeId::default()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn local_id(&self) -> LocalId {
        self.local_id
    }

    pub fn is_null(&self) -> bool {
        self.kind == NodeKind::Null
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "NodeId(null)")
        } else {
            write!(f, "NodeId({}:{})", self.kind, self.local_id.0)
        }
    }
}

static NEXT_STORAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a storage instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageId(u64);

impl StorageId {
    pub(crate) fn next() -> Self {
        StorageId(NEXT_STORAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        let id = NodeId::default();
        assert!(id.is_null());
        assert_eq!(id.kind(), NodeKind::Null);
        assert_eq!(format!("{}", id), "NodeId(null)");
    }

    #[test]
    fn test_local_id_index() {
        assert_eq!(LocalId(7).as_index(), Some(7));
        assert_eq!(LocalId(u64::MAX).as_index(), usize::try_from(u64::MAX).ok());
    }

    #[test]
    fn test_null_kind_discards_local_id() {
        let id = NodeId::new(NodeKind::Null, LocalId(42));
        assert_eq!(id, NodeId::null());
    }

    #[test]
    fn test_id_ordering() {
        let var = NodeId::new(NodeKind::Variable, LocalId(9));
        let iri_a = NodeId::new(NodeKind::Iri, LocalId(1));
        let iri_b = NodeId::new(NodeKind::Iri, LocalId(2));
        let lit = NodeId::new(NodeKind::Literal, LocalId(0));

        assert!(NodeId::null() < var);
        assert!(var < iri_a);
        assert!(iri_a < iri_b);
        assert!(iri_b < lit);
    }

    #[test]
    fn test_kind_order() {
        let mut kinds = vec![
            NodeKind::Literal,
            NodeKind::Iri,
            NodeKind::Null,
            NodeKind::BlankNode,
            NodeKind::Variable,
        ];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Null,
                NodeKind::Variable,
                NodeKind::BlankNode,
                NodeKind::Iri,
                NodeKind::Literal,
            ]
        );
    }

    #[test]
    fn test_storage_ids_are_unique() {
        let a = StorageId::next();
        let b = StorageId::next();
        assert_ne!(a, b);
        assert!(a < b);
    }
}
