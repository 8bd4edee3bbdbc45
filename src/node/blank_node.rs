use super::{expect_record, node_facade, Node};
use crate::storage::{BackendNodeHandle, BlankNodeBackend, NodeKind, NodeStorage};
use std::sync::Arc;

/// Blank node term
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlankNode(Node);

node_facade!(BlankNode, NodeKind::BlankNode);

impl BlankNode {
    /// Intern the label in the primary storage
    pub fn new(label: &str) -> Self {
        Self::new_in(label, NodeStorage::primary_instance())
    }

    pub fn new_in(label: &str, storage: &NodeStorage) -> Self {
        let (_, id) = storage.get_bnode(label);
        Self(Node::from_handle(BackendNodeHandle::new(id, storage)))
    }

    pub fn backend(&self) -> Arc<BlankNodeBackend> {
        expect_record(self.0.backend_handle().bnode_backend())
    }

    /// Label without the `_:` prefix
    pub fn identifier(&self) -> String {
        self.backend().identifier().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let storage = NodeStorage::new();
        let bnode = BlankNode::new_in("abc", &storage);
        assert_eq!(bnode.identifier(), "abc");
        assert_eq!(bnode.to_string(), "_:abc");
        assert_eq!(format!("{:?}", bnode), "BlankNode(_:abc)");
    }
}
