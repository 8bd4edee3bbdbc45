//! Interning dictionary for RDF terms
//!
//! One arena per term kind. An arena is an insertion-ordered hash set of shared
//! records, so the position of a record doubles as its [`LocalId`] and the set
//! itself is the reverse (content -> id) lookup. Records are never removed or
//! mutated; they live as long as the storage does.
//!
//! Each arena sits behind its own `RwLock`. Interning looks up under the read lock
//! and only takes the write lock on a miss.

use super::backend::{BlankNodeBackend, IriBackend, LiteralBackend, VariableBackend};
use super::config::NodeStorageConfig;
use super::id::{LocalId, NodeId, NodeKind, StorageId};
use super::{NodeError, NodeResult};
use crate::datatypes::{xsd, DatatypeRegistry};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, trace};

/// Records of one kind, addressable by position
struct Arena<T> {
    records: RwLock<IndexSet<Arc<T>, FxBuildHasher>>,
}

impl<T: Hash + Eq> Arena<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(IndexSet::with_capacity_and_hasher(
                capacity,
                FxBuildHasher,
            )),
        }
    }

    /// Returns the stored record, its id and whether it was inserted by this call
    fn intern(&self, record: T) -> (Arc<T>, LocalId, bool) {
        if let Some((index, existing)) = self.read().get_full(&record) {
            return (Arc::clone(existing), LocalId(index as u64), false);
        }

        let mut records = self.write();
        // Another writer may have inserted the same content between the two locks;
        // `insert_full` then reports the existing position.
        let (index, inserted) = records.insert_full(Arc::new(record));
        (Arc::clone(&records[index]), LocalId(index as u64), inserted)
    }

    fn get(&self, id: LocalId) -> Option<Arc<T>> {
        self.read().get_index(id.as_index()?).cloned()
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexSet<Arc<T>, FxBuildHasher>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexSet<Arc<T>, FxBuildHasher>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

struct StorageInner {
    id: StorageId,
    config: NodeStorageConfig,
    registry: Arc<DatatypeRegistry>,
    iris: Arena<IriBackend>,
    bnodes: Arena<BlankNodeBackend>,
    literals: Arena<LiteralBackend>,
    variables: Arena<VariableBackend>,
}

/// Record counts per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeStorageStats {
    pub iris: usize,
    pub blank_nodes: usize,
    pub literals: usize,
    pub variables: usize,
}

impl NodeStorageStats {
    pub fn total(&self) -> usize {
        self.iris + self.blank_nodes + self.literals + self.variables
    }
}

/// Shared handle to one interning dictionary
///
/// Cloning is cheap and yields the same storage. Two `NodeStorage` values are
/// equal only if they are the same storage; content never matters.
#[derive(Clone)]
pub struct NodeStorage {
    inner: Arc<StorageInner>,
}

impl NodeStorage {
    /// Create a storage backed by the shared XSD datatype registry
    pub fn new() -> Self {
        Self::with_registry(DatatypeRegistry::shared())
    }

    pub fn with_registry(registry: Arc<DatatypeRegistry>) -> Self {
        Self::with_config(NodeStorageConfig::default(), registry)
    }

    pub fn with_config(config: NodeStorageConfig, registry: Arc<DatatypeRegistry>) -> Self {
        let capacity = config.initial_capacity;
        let storage = NodeStorage {
            inner: Arc::new(StorageInner {
                id: StorageId::next(),
                config,
                registry,
                iris: Arena::with_capacity(capacity),
                bnodes: Arena::with_capacity(capacity),
                literals: Arena::with_capacity(capacity),
                variables: Arena::with_capacity(capacity),
            }),
        };

        // Reserved ids; see NodeId::RDF_LANG_STRING and NodeId::XSD_STRING.
        storage.get_iri(xsd::RDF_LANG_STRING);
        storage.get_iri(xsd::XSD_STRING);

        info!(
            "Created node storage {} ({})",
            storage.id(),
            storage.name().unwrap_or("unnamed")
        );
        storage
    }

    /// Process-wide default storage, created on first use
    pub fn primary_instance() -> &'static NodeStorage {
        static PRIMARY: OnceLock<NodeStorage> = OnceLock::new();
        PRIMARY.get_or_init(|| {
            NodeStorage::with_config(NodeStorageConfig::named("primary"), DatatypeRegistry::shared())
        })
    }

    pub fn id(&self) -> StorageId {
        self.inner.id
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.config.name.as_deref()
    }

    pub fn config(&self) -> &NodeStorageConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &Arc<DatatypeRegistry> {
        &self.inner.registry
    }

    pub fn get_iri(&self, iri: &str) -> (Arc<IriBackend>, NodeId) {
        let (record, local_id, inserted) = self.inner.iris.intern(IriBackend::new(iri));
        self.trace_insert(inserted, NodeKind::Iri, local_id);
        (record, NodeId::new(NodeKind::Iri, local_id))
    }

    pub fn get_bnode(&self, label: &str) -> (Arc<BlankNodeBackend>, NodeId) {
        let (record, local_id, inserted) = self.inner.bnodes.intern(BlankNodeBackend::new(label));
        self.trace_insert(inserted, NodeKind::BlankNode, local_id);
        (record, NodeId::new(NodeKind::BlankNode, local_id))
    }

    pub fn get_variable(&self, name: &str, anonymous: bool) -> (Arc<VariableBackend>, NodeId) {
        let (record, local_id, inserted) = self
            .inner
            .variables
            .intern(VariableBackend::new(name, anonymous));
        self.trace_insert(inserted, NodeKind::Variable, local_id);
        (record, NodeId::new(NodeKind::Variable, local_id))
    }

    /// Intern a language-tagged literal. Tags are stored lower-cased.
    pub fn get_lang_literal(
        &self,
        lexical_form: &str,
        language_tag: &str,
    ) -> (Arc<LiteralBackend>, NodeId) {
        let record = LiteralBackend::new(
            lexical_form,
            xsd::RDF_LANG_STRING,
            Some(language_tag.to_ascii_lowercase()),
            NodeId::RDF_LANG_STRING,
        );
        self.intern_literal(record)
    }

    /// Intern a typed literal with its lexical form exactly as given.
    ///
    /// `rdf:langString` needs a language tag and is rejected here; use
    /// [`get_lang_literal`](Self::get_lang_literal).
    pub fn get_typed_literal(
        &self,
        lexical_form: &str,
        datatype: &str,
    ) -> NodeResult<(Arc<LiteralBackend>, NodeId)> {
        if datatype == xsd::RDF_LANG_STRING {
            return Err(NodeError::MissingLanguageTag(lexical_form.to_string()));
        }
        Ok(self.intern_typed_literal(lexical_form, datatype))
    }

    /// Intern a literal with the same content as `record`, which may belong to
    /// another storage
    pub(crate) fn get_literal_like(&self, record: &LiteralBackend) -> (Arc<LiteralBackend>, NodeId) {
        match record.language_tag() {
            Some(tag) => self.get_lang_literal(record.lexical_form(), tag),
            None => self.intern_typed_literal(record.lexical_form(), record.datatype()),
        }
    }

    /// Lexical form as rendered by this storage.
    ///
    /// Typed literals of datatypes registered with this storage's registry go
    /// through the registered factory and `to_string`. Unknown datatypes and
    /// lexical forms the factory rejects come back unchanged.
    pub fn canonical_lexical_form<'a>(&self, record: &'a LiteralBackend) -> Cow<'a, str> {
        let lexical_form = record.lexical_form();
        if !self.inner.config.canonicalize_typed_literals
            || record.language_tag().is_some()
            || record.datatype() == xsd::XSD_STRING
        {
            return Cow::Borrowed(lexical_form);
        }

        match self.inner.registry.canonicalize(record.datatype(), lexical_form) {
            None => Cow::Borrowed(lexical_form),
            Some(Ok(canonical)) => Cow::Owned(canonical),
            Some(Err(e)) => {
                debug!("Rendering lexical form verbatim: {}", e);
                Cow::Borrowed(lexical_form)
            }
        }
    }

    /// N-Triples rendering of a literal using [`canonical_lexical_form`](Self::canonical_lexical_form)
    pub fn render_literal(&self, record: &LiteralBackend) -> String {
        record.n_string_with(&self.canonical_lexical_form(record))
    }

    pub fn iri(&self, id: LocalId) -> Option<Arc<IriBackend>> {
        self.inner.iris.get(id)
    }

    pub fn bnode(&self, id: LocalId) -> Option<Arc<BlankNodeBackend>> {
        self.inner.bnodes.get(id)
    }

    pub fn literal(&self, id: LocalId) -> Option<Arc<LiteralBackend>> {
        self.inner.literals.get(id)
    }

    pub fn variable(&self, id: LocalId) -> Option<Arc<VariableBackend>> {
        self.inner.variables.get(id)
    }

    /// Number of records of one kind
    pub fn len(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Null => 0,
            NodeKind::Variable => self.inner.variables.len(),
            NodeKind::BlankNode => self.inner.bnodes.len(),
            NodeKind::Iri => self.inner.iris.len(),
            NodeKind::Literal => self.inner.literals.len(),
        }
    }

    pub fn stats(&self) -> NodeStorageStats {
        NodeStorageStats {
            iris: self.inner.iris.len(),
            blank_nodes: self.inner.bnodes.len(),
            literals: self.inner.literals.len(),
            variables: self.inner.variables.len(),
        }
    }

    /// Typed interning for callers that already excluded `rdf:langString`
    pub(crate) fn intern_typed_literal(
        &self,
        lexical_form: &str,
        datatype: &str,
    ) -> (Arc<LiteralBackend>, NodeId) {
        let (_, datatype_id) = self.get_iri(datatype);
        self.intern_literal(LiteralBackend::new(lexical_form, datatype, None, datatype_id))
    }

    fn intern_literal(&self, record: LiteralBackend) -> (Arc<LiteralBackend>, NodeId) {
        let (record, local_id, inserted) = self.inner.literals.intern(record);
        self.trace_insert(inserted, NodeKind::Literal, local_id);
        (record, NodeId::new(NodeKind::Literal, local_id))
    }

    fn trace_insert(&self, inserted: bool, kind: NodeKind, local_id: LocalId) {
        if inserted {
            trace!("Storage {} interned {} {}", self.inner.id, kind, local_id.0);
        }
    }
}

impl Default for NodeStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for NodeStorage {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for NodeStorage {}

impl Hash for NodeStorage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl PartialOrd for NodeStorage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeStorage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.id.cmp(&other.inner.id)
    }
}

impl fmt::Debug for NodeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStorage")
            .field("id", &self.inner.id)
            .field("name", &self.inner.config.name)
            .finish_non_exhaustive()
    }
}
