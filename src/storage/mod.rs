//! Term identity and interning
//!
//! This module implements the storage side of the term model:
//! - [`NodeId`]: kind tag plus storage-local id
//! - [`NodeStorage`]: the interning dictionary that mints ids and owns records
//! - [`BackendNodeHandle`]: an id bound to the storage that minted it
//! - the immutable per-kind records ([`IriBackend`], [`LiteralBackend`], ...)

mod backend;
mod config;
mod handle;
mod id;
mod node_storage;

pub use backend::{BlankNodeBackend, IriBackend, LiteralBackend, VariableBackend};
pub use config::{ConfigError, ConfigResult, NodeStorageConfig};
pub use handle::BackendNodeHandle;
pub use id::{LocalId, NodeId, NodeKind, StorageId};
pub use node_storage::{NodeStorage, NodeStorageStats};

use thiserror::Error;

/// Errors raised when a handle is used against its contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// A kind-specific accessor or narrowing was applied to a term of another kind
    #[error("Kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: NodeKind, found: NodeKind },

    /// The null term was dereferenced
    #[error("Null term dereferenced")]
    NullNode,

    /// The id was never minted by this storage
    #[error("{id} is not known to {storage}")]
    UnknownNodeId { id: NodeId, storage: StorageId },

    /// Rejected by IRI validation
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Variables and the null term have no RDF counterpart
    #[error("A {0} is not an RDF term")]
    NotAnRdfTerm(NodeKind),

    /// `rdf:langString` literal built without a language tag
    #[error("Literal {0:?} has datatype rdf:langString but no language tag")]
    MissingLanguageTag(String),

    /// Foreign term with no counterpart in this term model, such as a quoted triple
    #[error("Unsupported term: {0}")]
    UnsupportedTerm(String),
}

pub type NodeResult<T> = Result<T, NodeError>;
