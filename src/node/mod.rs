//! Public term types
//!
//! [`Node`] is a kind-tagged [`BackendNodeHandle`]. The façades [`Iri`],
//! [`BlankNode`], [`Literal`] and [`Variable`] are the same handle with the kind
//! already verified; narrowing a `Node` never copies record data.
//!
//! Term equality and ordering are storage independent: two terms with the same
//! kind and the same content are equal even when they were interned in different
//! storages and carry different ids.

mod blank_node;
mod interop;
mod iri;
mod literal;
mod variable;

pub use blank_node::BlankNode;
pub use iri::Iri;
pub use literal::Literal;
pub use variable::Variable;

use crate::storage::{BackendNodeHandle, NodeId, NodeKind, NodeResult, NodeStorage};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Unwrap a record lookup whose kind the caller has already checked.
///
/// Failing here means a handle was forged from an id its storage never minted.
pub(crate) fn expect_record<T>(result: NodeResult<T>) -> T {
    result.unwrap_or_else(|e| panic!("corrupt term handle: {}", e))
}

/// An RDF term or query variable
#[derive(Clone, Default)]
pub struct Node {
    handle: BackendNodeHandle,
}

impl Node {
    pub fn from_handle(handle: BackendNodeHandle) -> Self {
        Self { handle }
    }

    /// The null term of `storage`
    pub fn null_in(storage: &NodeStorage) -> Self {
        Self::from_handle(BackendNodeHandle::null_in(storage))
    }

    pub fn backend_handle(&self) -> &BackendNodeHandle {
        &self.handle
    }

    pub fn id(&self) -> NodeId {
        self.handle.id()
    }

    pub fn kind(&self) -> NodeKind {
        self.handle.kind()
    }

    pub fn storage(&self) -> &NodeStorage {
        self.handle.storage()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn is_iri(&self) -> bool {
        self.handle.is_iri()
    }

    pub fn is_blank_node(&self) -> bool {
        self.handle.is_blank_node()
    }

    pub fn is_literal(&self) -> bool {
        self.handle.is_literal()
    }

    pub fn is_variable(&self) -> bool {
        self.handle.is_variable()
    }

    /// View as an IRI without re-checking the kind.
    ///
    /// Only for call sites that already tested `is_iri()`; accessors on the
    /// result fail with a kind mismatch otherwise.
    pub fn as_iri_unchecked(&self) -> Iri {
        debug_assert!(self.is_iri(), "as_iri_unchecked on a {}", self.kind());
        Iri::from_node_unchecked(self.clone())
    }

    pub fn as_blank_node_unchecked(&self) -> BlankNode {
        debug_assert!(self.is_blank_node(), "as_blank_node_unchecked on a {}", self.kind());
        BlankNode::from_node_unchecked(self.clone())
    }

    pub fn as_literal_unchecked(&self) -> Literal {
        debug_assert!(self.is_literal(), "as_literal_unchecked on a {}", self.kind());
        Literal::from_node_unchecked(self.clone())
    }

    pub fn as_variable_unchecked(&self) -> Variable {
        debug_assert!(self.is_variable(), "as_variable_unchecked on a {}", self.kind());
        Variable::from_node_unchecked(self.clone())
    }

    /// Re-intern this term in `storage`.
    ///
    /// Returns a clone when the term already lives there. The source storage is
    /// only read.
    pub fn to_node_storage(&self, storage: &NodeStorage) -> Node {
        if self.storage() == storage {
            return self.clone();
        }

        let id = match self.kind() {
            NodeKind::Null => NodeId::null(),
            NodeKind::Variable => {
                let variable = expect_record(self.handle.variable_backend());
                storage
                    .get_variable(variable.name(), variable.is_anonymous())
                    .1
            }
            NodeKind::BlankNode => {
                let bnode = expect_record(self.handle.bnode_backend());
                storage.get_bnode(bnode.identifier()).1
            }
            NodeKind::Iri => {
                let iri = expect_record(self.handle.iri_backend());
                storage.get_iri(iri.identifier()).1
            }
            NodeKind::Literal => {
                let literal = expect_record(self.handle.literal_backend());
                storage.get_literal_like(&literal).1
            }
        };

        debug!(
            "Migrated {} from {} to {}",
            self.kind(),
            self.storage().id(),
            storage.id()
        );
        Node::from_handle(BackendNodeHandle::new(id, storage))
    }

    /// Canonical N-Triples style rendering; empty for the null term.
    ///
    /// Literals are rendered through the owning storage's datatype registry.
    fn n_string(&self) -> String {
        match self.kind() {
            NodeKind::Null => String::new(),
            NodeKind::Variable => expect_record(self.handle.variable_backend()).n_string(),
            NodeKind::BlankNode => expect_record(self.handle.bnode_backend()).n_string(),
            NodeKind::Iri => expect_record(self.handle.iri_backend()).n_string(),
            NodeKind::Literal => {
                let literal = expect_record(self.handle.literal_backend());
                self.storage().render_literal(&literal)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.n_string())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("term", &format_args!("{}", self))
            .field("handle", &self.handle)
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.handle == other.handle {
            return true;
        }
        if self.kind() != other.kind() {
            return false;
        }
        match self.kind() {
            NodeKind::Null => true,
            NodeKind::Variable => {
                expect_record(self.handle.variable_backend())
                    == expect_record(other.handle.variable_backend())
            }
            NodeKind::BlankNode => {
                expect_record(self.handle.bnode_backend())
                    == expect_record(other.handle.bnode_backend())
            }
            NodeKind::Iri => {
                expect_record(self.handle.iri_backend())
                    == expect_record(other.handle.iri_backend())
            }
            NodeKind::Literal => {
                expect_record(self.handle.literal_backend())
                    == expect_record(other.handle.literal_backend())
            }
        }
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Identical handles are equal; otherwise order by kind, then by record
    /// content. Since a storage never holds two records with the same content,
    /// this is a total order over `(kind, content)`.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.handle == other.handle {
            return Ordering::Equal;
        }
        match self.kind().cmp(&other.kind()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.kind() {
            NodeKind::Null => Ordering::Equal,
            NodeKind::Variable => expect_record(self.handle.variable_backend())
                .cmp(&expect_record(other.handle.variable_backend())),
            NodeKind::BlankNode => expect_record(self.handle.bnode_backend())
                .cmp(&expect_record(other.handle.bnode_backend())),
            NodeKind::Iri => expect_record(self.handle.iri_backend())
                .cmp(&expect_record(other.handle.iri_backend())),
            NodeKind::Literal => expect_record(self.handle.literal_backend())
                .cmp(&expect_record(other.handle.literal_backend())),
        }
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let kind = self.kind();
        kind.hash(state);
        match kind {
            NodeKind::Null => {}
            NodeKind::Variable => expect_record(self.handle.variable_backend()).hash(state),
            NodeKind::BlankNode => expect_record(self.handle.bnode_backend()).hash(state),
            NodeKind::Iri => expect_record(self.handle.iri_backend()).hash(state),
            NodeKind::Literal => expect_record(self.handle.literal_backend()).hash(state),
        }
    }
}

/// Shared plumbing for the kind-narrowed views
macro_rules! node_facade {
    ($facade:ident, $kind:expr) => {
        impl $facade {
            pub(crate) fn from_node_unchecked(node: $crate::node::Node) -> Self {
                Self(node)
            }

            pub fn as_node(&self) -> &$crate::node::Node {
                &self.0
            }

            pub fn into_node(self) -> $crate::node::Node {
                self.0
            }

            pub fn backend_handle(&self) -> &$crate::storage::BackendNodeHandle {
                self.0.backend_handle()
            }

            pub fn id(&self) -> $crate::storage::NodeId {
                self.0.id()
            }

            pub fn storage(&self) -> &$crate::storage::NodeStorage {
                self.0.storage()
            }

            /// Re-intern in `storage`; see [`Node::to_node_storage`](crate::node::Node::to_node_storage)
            pub fn to_node_storage(&self, storage: &$crate::storage::NodeStorage) -> Self {
                Self(self.0.to_node_storage(storage))
            }
        }

        impl From<$facade> for $crate::node::Node {
            fn from(facade: $facade) -> Self {
                facade.0
            }
        }

        impl TryFrom<$crate::node::Node> for $facade {
            type Error = $crate::storage::NodeError;

            fn try_from(node: $crate::node::Node) -> Result<Self, Self::Error> {
                match node.kind() {
                    kind if kind == $kind => Ok(Self(node)),
                    $crate::storage::NodeKind::Null => Err($crate::storage::NodeError::NullNode),
                    found => Err($crate::storage::NodeError::KindMismatch {
                        expected: $kind,
                        found,
                    }),
                }
            }
        }

        impl std::fmt::Display for $facade {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::fmt::Debug for $facade {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($facade))
                    .field(&format_args!("{}", self.0))
                    .finish()
            }
        }
    };
}

pub(crate) use node_facade;
