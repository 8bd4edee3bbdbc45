//! Handle to an interned record
//!
//! A [`BackendNodeHandle`] pairs a [`NodeId`] with the storage that minted it.
//! Holding a handle keeps the storage alive, so a handle can never outlive its
//! records. Build handles only from ids the same storage returned; mixing an id
//! from one storage with another storage yields `UnknownNodeId` errors or, worse,
//! a different term.

use super::backend::{BlankNodeBackend, IriBackend, LiteralBackend, VariableBackend};
use super::id::{NodeId, NodeKind};
use super::node_storage::NodeStorage;
use super::{NodeError, NodeResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone)]
pub struct BackendNodeHandle {
    id: NodeId,
    storage: NodeStorage,
}

impl BackendNodeHandle {
    pub fn new(id: NodeId, storage: &NodeStorage) -> Self {
        Self {
            id,
            storage: storage.clone(),
        }
    }

    /// The null handle of `storage`
    pub fn null_in(storage: &NodeStorage) -> Self {
        Self::new(NodeId::null(), storage)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }

    pub fn storage(&self) -> &NodeStorage {
        &self.storage
    }

    pub fn is_null(&self) -> bool {
        self.id.is_null()
    }

    pub fn is_iri(&self) -> bool {
        self.kind() == NodeKind::Iri
    }

    pub fn is_blank_node(&self) -> bool {
        self.kind() == NodeKind::BlankNode
    }

    pub fn is_literal(&self) -> bool {
        self.kind() == NodeKind::Literal
    }

    pub fn is_variable(&self) -> bool {
        self.kind() == NodeKind::Variable
    }

    pub fn iri_backend(&self) -> NodeResult<Arc<IriBackend>> {
        self.expect_kind(NodeKind::Iri)?;
        self.storage
            .iri(self.id.local_id())
            .ok_or_else(|| self.unknown())
    }

    pub fn bnode_backend(&self) -> NodeResult<Arc<BlankNodeBackend>> {
        self.expect_kind(NodeKind::BlankNode)?;
        self.storage
            .bnode(self.id.local_id())
            .ok_or_else(|| self.unknown())
    }

    pub fn literal_backend(&self) -> NodeResult<Arc<LiteralBackend>> {
        self.expect_kind(NodeKind::Literal)?;
        self.storage
            .literal(self.id.local_id())
            .ok_or_else(|| self.unknown())
    }

    pub fn variable_backend(&self) -> NodeResult<Arc<VariableBackend>> {
        self.expect_kind(NodeKind::Variable)?;
        self.storage
            .variable(self.id.local_id())
            .ok_or_else(|| self.unknown())
    }

    fn expect_kind(&self, expected: NodeKind) -> NodeResult<()> {
        match self.kind() {
            found if found == expected => Ok(()),
            NodeKind::Null => Err(NodeError::NullNode),
            found => Err(NodeError::KindMismatch { expected, found }),
        }
    }

    fn unknown(&self) -> NodeError {
        NodeError::UnknownNodeId {
            id: self.id,
            storage: self.storage.id(),
        }
    }
}

impl Default for BackendNodeHandle {
    fn default() -> Self {
        Self::null_in(NodeStorage::primary_instance())
    }
}

impl PartialEq for BackendNodeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage && self.id == other.id
    }
}

impl Eq for BackendNodeHandle {}

impl Hash for BackendNodeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage.hash(state);
        self.id.hash(state);
    }
}

impl PartialOrd for BackendNodeHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BackendNodeHandle {
    /// Storage identity first, then `(kind, local_id)`
    fn cmp(&self, other: &Self) -> Ordering {
        self.storage
            .cmp(&other.storage)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Debug for BackendNodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendNodeHandle")
            .field("id", &self.id)
            .field("storage", &self.storage.id())
            .finish()
    }
}
