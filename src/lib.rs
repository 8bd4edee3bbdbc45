//! RDF term identity and term storage
//!
//! Every RDF term (IRI, blank node, literal) and query variable gets one
//! canonical, deduplicated record inside a [`NodeStorage`]. Terms are compared
//! by kind and content, so equal terms from different storages are equal even
//! though their ids are storage-local. Literal datatypes are pluggable through
//! the [`DatatypeRegistry`].
//!
//! # Layers
//!
//! - [`storage`]: ids, records, the interning dictionary and handles
//! - [`datatypes`]: datatype IRI -> (parse, render) registry and the XSD built-ins
//! - [`node`]: the public term type [`Node`] and its kind façades
//!
//! ## Example Usage
//!
//! ```rust
//! use rdf_termstore::{Iri, Literal, Node, NodeStorage};
//!
//! let first = NodeStorage::new();
//! let second = NodeStorage::new();
//!
//! let alice = Iri::new_in("http://example.org/alice", &first);
//! let moved = alice.to_node_storage(&second);
//!
//! assert_eq!(moved.to_string(), "<http://example.org/alice>");
//! assert_eq!(alice, moved);
//! assert_ne!(alice.backend_handle(), moved.backend_handle());
//!
//! let age = Literal::new_typed_in("+030", "http://www.w3.org/2001/XMLSchema#integer", &first)
//!     .unwrap();
//! assert_eq!(age.lexical_form(), "+030");
//! assert_eq!(age.to_string(), "\"30\"^^<http://www.w3.org/2001/XMLSchema#integer>");
//!
//! let node: Node = age.into();
//! assert!(node.is_literal());
//! ```

#![warn(clippy::all)]

pub mod datatypes;
pub mod node;
pub mod storage;

// Re-export main types for convenience
pub use datatypes::{
    Datatype, DatatypeEntry, DatatypeError, DatatypeRegistry, DatatypeResult, DatatypeValue,
};

pub use node::{BlankNode, Iri, Literal, Node, Variable};

pub use storage::{
    BackendNodeHandle, ConfigError, NodeError, NodeId, NodeKind, NodeResult, NodeStorage,
    NodeStorageConfig, NodeStorageStats, StorageId,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
